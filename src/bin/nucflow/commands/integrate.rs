use anyhow::{bail, Context, Result};

use nucflow::io::flowfile;
use nucflow::FlowCollection;

use crate::cli::IntegrateArgs;
use crate::config::{build_merge_policy, build_read_options, load_options};
use crate::display::{print_flow_list, print_kv_table, Context as DisplayContext, Progress};

const TOTAL_STEPS: u8 = 2;

pub fn run_integrate(args: IntegrateArgs, ctx: DisplayContext) -> Result<()> {
    let options = load_options(args.io.options.as_deref())?;
    let read_options = build_read_options(&args.read, &options);
    let policy = build_merge_policy(&args, &options);

    let mut progress = Progress::new(ctx.interactive, TOTAL_STEPS);

    progress.step("Reading timesteps");
    let mut files = Vec::new();
    let mut skipped = Vec::new();
    for path in &args.inputs {
        let name = path.display().to_string();
        match flowfile::read_path(path, &read_options) {
            Ok(file) => files.push((name, file)),
            Err(e) if args.keep_going => {
                skipped.push(format!("{} (skipped: {})", name, e));
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read {}", name));
            }
        }
    }
    if files.is_empty() {
        bail!("No readable flow tables among the {} input(s)", args.inputs.len());
    }

    let mut substeps: Vec<String> = files.iter().map(|(name, _)| name.clone()).collect();
    substeps.extend(skipped);
    let substeps_ref: Vec<&str> = substeps.iter().map(|s| s.as_str()).collect();
    progress.complete_step("Reading timesteps", &substeps_ref);

    progress.step("Merging flow graphs");
    let mut iter = files.iter();
    // files is non-empty here
    let (_, first) = iter.next().context("no flow tables to merge")?;
    let mut merged: FlowCollection = first.flows.clone();
    for (_, file) in iter {
        merged = merged.merge(&file.flows, &policy);
    }
    merged.sort();
    let summary = format!("{} timestep(s) merged", files.len());
    progress.complete_step("Merging flow graphs", &[summary.as_str()]);
    progress.finish();

    let bounds = merged.bounds()?;
    let mut rows = vec![
        ("Timesteps", format!("{}", files.len())),
        ("Isotopes", format!("{}", merged.isotopes().len())),
        ("Net flows", format!("{}", merged.flow_count())),
    ];
    // Every pair can cancel under --suppress-zero-net, leaving no flows
    // to aggregate over.
    if merged.flow_count() > 0 {
        rows.push(("Max flow", format!("{:.4e}", merged.max_flow()?)));
        rows.push(("Min flow", format!("{:.4e}", merged.min_flow()?)));
    }
    rows.push(("N range", format!("{} – {}", bounds.min_n, bounds.max_n)));
    rows.push(("Z range", format!("{} – {}", bounds.min_z, bounds.max_z)));
    print_kv_table("Integrated network", &rows);
    if merged.flow_count() > 0 {
        print_flow_list("Largest net flows", &merged, args.top);
    }

    Ok(())
}
