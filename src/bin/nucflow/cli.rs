use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "nucflow",
    about = "Nuclear reaction network flow analysis",
    version,
    author,
    before_help = crate::display::banner_for_help(),
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Summarize flow tables or abundance snapshots
    #[command(visible_alias = "i")]
    Info(InfoArgs),

    /// Trace flows into or out of an isotope
    #[command(visible_alias = "t")]
    Trace(TraceArgs),

    /// Merge timestep flow tables into one integrated graph
    #[command(visible_alias = "m")]
    Integrate(IntegrateArgs),
}

/// Options shared by all commands.
#[derive(Args)]
pub struct IoOptions {
    /// Options file (TOML) with [read], [merge], and [trace] sections
    #[arg(long, value_name = "FILE")]
    pub options: Option<PathBuf>,

    /// Suppress progress output (for scripting)
    #[arg(short, long)]
    pub quiet: bool,
}

/// Ingestion thresholds shared by the flow-reading commands. Flags
/// override the options file, which overrides the built-in defaults.
#[derive(Args)]
#[command(next_help_heading = "Ingestion Thresholds")]
pub struct ReadArgs {
    /// Minimum source abundance; rows below it are skipped
    #[arg(long, value_name = "Y")]
    pub ymin: Option<f64>,

    /// Minimum flow relative to the file's largest flow
    #[arg(long = "flmin", value_name = "FRAC")]
    pub rel_min: Option<f64>,
}

#[derive(Args)]
pub struct InfoArgs {
    #[command(flatten)]
    pub io: IoOptions,

    /// Input files
    #[arg(value_name = "FILE", required = true)]
    pub inputs: Vec<PathBuf>,

    /// Input file format
    #[arg(long, value_name = "FORMAT", default_value = "flow")]
    pub format: FileFormat,

    /// Number of largest flows to list per file
    #[arg(long, value_name = "N", default_value = "10")]
    pub top: usize,

    #[command(flatten)]
    pub read: ReadArgs,
}

#[derive(Args)]
pub struct TraceArgs {
    #[command(flatten)]
    pub io: IoOptions,

    /// Input flow table
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Seed isotope: name (fe56, p, neutron) or 1000*Z+N checksum
    #[arg(short = 's', long, value_name = "ISOTOPE")]
    pub isotope: String,

    /// Traversal direction relative to the seed
    #[arg(long, value_name = "DIR", default_value = "to")]
    pub direction: TraceDirection,

    /// Maximum traversal depth in hops
    #[arg(long, value_name = "N", default_value = "3")]
    pub hops: usize,

    /// Relative cutoff for pruning weak branches (0 keeps every edge)
    #[arg(long, value_name = "FRAC")]
    pub cutoff: Option<f64>,

    #[command(flatten)]
    pub read: ReadArgs,
}

#[derive(Args)]
pub struct IntegrateArgs {
    #[command(flatten)]
    pub io: IoOptions,

    /// Input flow tables, in timestep order
    #[arg(value_name = "FILE", required = true)]
    pub inputs: Vec<PathBuf>,

    /// Drop opposing pairs whose magnitudes cancel exactly
    #[arg(long)]
    pub suppress_zero_net: bool,

    /// Skip files that fail to read instead of aborting
    #[arg(long)]
    pub keep_going: bool,

    /// Number of largest merged flows to list
    #[arg(long, value_name = "N", default_value = "10")]
    pub top: usize,

    #[command(flatten)]
    pub read: ReadArgs,
}

#[derive(Clone, Copy, ValueEnum, Default)]
pub enum FileFormat {
    /// Per-timestep flow table
    #[default]
    Flow,
    /// Abundance snapshot
    #[value(alias = "snap")]
    Snapshot,
}

#[derive(Clone, Copy, ValueEnum, Default)]
pub enum TraceDirection {
    /// Flows feeding into the seed (upstream)
    #[default]
    To,
    /// Flows draining out of the seed (downstream)
    From,
}

pub fn parse() -> Cli {
    Cli::parse()
}
