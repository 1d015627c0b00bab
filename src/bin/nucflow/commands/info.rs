use anyhow::{Context, Result};

use nucflow::io::{flowfile, snapshot};

use crate::cli::{FileFormat, InfoArgs};
use crate::config::{build_read_options, load_options};
use crate::display::{print_flow_list, print_kv_table, Context as DisplayContext, Progress};

pub fn run_info(args: InfoArgs, ctx: DisplayContext) -> Result<()> {
    let options = load_options(args.io.options.as_deref())?;
    let read_options = build_read_options(&args.read, &options);

    let mut progress = Progress::new(ctx.interactive, 1);
    progress.step("Reading input files");

    enum Parsed {
        Flow(flowfile::FlowFile),
        Snapshot(snapshot::Snapshot),
    }

    let mut parsed = Vec::new();
    for path in &args.inputs {
        let name = path.display().to_string();
        let result = match args.format {
            FileFormat::Flow => Parsed::Flow(
                flowfile::read_path(path, &read_options)
                    .with_context(|| format!("Failed to read {}", name))?,
            ),
            FileFormat::Snapshot => Parsed::Snapshot(
                snapshot::read_path(path).with_context(|| format!("Failed to read {}", name))?,
            ),
        };
        parsed.push((name, result));
    }

    let substeps: Vec<&str> = parsed.iter().map(|(name, _)| name.as_str()).collect();
    progress.complete_step("Reading input files", &substeps);
    progress.finish();

    for (name, result) in &parsed {
        match result {
            Parsed::Flow(file) => print_flow_info(name, file, args.top)?,
            Parsed::Snapshot(snap) => print_snapshot_info(name, snap)?,
        }
    }

    Ok(())
}

fn print_flow_info(name: &str, file: &flowfile::FlowFile, top: usize) -> Result<()> {
    let bounds = file.flows.bounds()?;
    let mut rows = vec![
        ("Time", format!("{:.4e}", file.time)),
        ("Temperature", format!("{:.4e}", file.temp)),
        ("Density", format!("{:.4e}", file.dens)),
        ("Isotopes", format!("{}", file.flows.isotopes().len())),
        ("Flows", format!("{}", file.flows.flow_count())),
        ("Max flow", format!("{:.4e}", file.flows.max_flow()?)),
        ("Min flow", format!("{:.4e}", file.flows.min_flow()?)),
        (
            "N range",
            format!("{} – {}", bounds.min_n, bounds.max_n),
        ),
        (
            "Z range",
            format!("{} – {}", bounds.min_z, bounds.max_z),
        ),
    ];
    if let Some(dt) = file.dt {
        rows.insert(1, ("Timestep", format!("{:.4e}", dt)));
    }

    print_kv_table(name, &rows);
    print_flow_list("Largest flows", &file.flows, top);
    Ok(())
}

fn print_snapshot_info(name: &str, snap: &snapshot::Snapshot) -> Result<()> {
    let bounds = snap.isotopes.bounds()?;
    let rows = vec![
        ("Time", format!("{:.4e}", snap.time)),
        ("Temperature", format!("{:.4e}", snap.temp)),
        ("Density", format!("{:.4e}", snap.dens)),
        ("Isotopes", format!("{}", snap.isotopes.len())),
        ("Max abundance", format!("{:.4e}", snap.isotopes.max_abundance()?)),
        (
            "N range",
            format!("{} – {}", bounds.min_n, bounds.max_n),
        ),
        (
            "Z range",
            format!("{} – {}", bounds.min_z, bounds.max_z),
        ),
    ];

    print_kv_table(name, &rows);
    Ok(())
}
