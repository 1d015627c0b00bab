use anyhow::{Context, Result};

use nucflow::io::flowfile;

use super::parse_isotope_arg;
use crate::cli::{TraceArgs, TraceDirection};
use crate::config::{build_read_options, build_trace_policy, load_options};
use crate::display::{print_flow_list, print_kv_table, Context as DisplayContext, Progress};

const TOTAL_STEPS: u8 = 2;

pub fn run_trace(args: TraceArgs, ctx: DisplayContext) -> Result<()> {
    let options = load_options(args.io.options.as_deref())?;
    let read_options = build_read_options(&args.read, &options);
    let policy = build_trace_policy(&args, &options);
    let seed = parse_isotope_arg(&args.isotope);

    let mut progress = Progress::new(ctx.interactive, TOTAL_STEPS);

    progress.step("Reading flow table");
    let name = args.input.display().to_string();
    let file = flowfile::read_path(&args.input, &read_options)
        .with_context(|| format!("Failed to read {}", name))?;
    progress.complete_step("Reading flow table", &[&name]);

    progress.step("Tracing flows");
    let (label, traced) = match args.direction {
        TraceDirection::To => (
            "into",
            file.flows.flows_to(&seed, args.hops, &policy),
        ),
        TraceDirection::From => (
            "out of",
            file.flows.flows_from(&seed, args.hops, &policy),
        ),
    };
    let traced =
        traced.with_context(|| format!("Failed to trace flows {} {}", label, args.isotope))?;
    let summary = format!("{} hop(s) {} {}", args.hops, label, args.isotope);
    progress.complete_step("Tracing flows", &[summary.as_str()]);
    progress.finish();

    let rows = vec![
        ("Seed", args.isotope.clone()),
        ("Direction", label.to_string()),
        ("Hops", format!("{}", args.hops)),
        ("Cutoff", format!("{}", policy.relative_cutoff)),
        ("Flows found", format!("{}", traced.flow_count())),
    ];
    print_kv_table("Trace", &rows);
    if traced.flow_count() > 0 {
        print_flow_list("Traced flows", &traced, traced.flow_count());
    }

    Ok(())
}
