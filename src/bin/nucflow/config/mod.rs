use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use nucflow::io::flowfile::ReadOptions;
use nucflow::{MergePolicy, TracePolicy};

use crate::cli::{IntegrateArgs, ReadArgs, TraceArgs};

/// Layout of the optional `--options` TOML file. Every section falls
/// back to the built-in defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OptionsFile {
    pub read: ReadOptions,
    pub merge: MergePolicy,
    pub trace: TracePolicy,
}

pub fn load_options(path: Option<&Path>) -> Result<OptionsFile> {
    let Some(path) = path else {
        return Ok(OptionsFile::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read options file: {}", path.display()))?;
    toml::from_str(&text)
        .with_context(|| format!("Failed to parse options file: {}", path.display()))
}

/// Read thresholds: CLI flags override the options file.
pub fn build_read_options(args: &ReadArgs, file: &OptionsFile) -> ReadOptions {
    let mut options = file.read;
    if let Some(ymin) = args.ymin {
        options.ymin = ymin;
    }
    if let Some(rel_min) = args.rel_min {
        options.rel_min = rel_min;
    }
    options
}

pub fn build_merge_policy(args: &IntegrateArgs, file: &OptionsFile) -> MergePolicy {
    let mut policy = file.merge;
    if args.suppress_zero_net {
        policy.suppress_zero_net = true;
    }
    policy
}

pub fn build_trace_policy(args: &TraceArgs, file: &OptionsFile) -> TracePolicy {
    let mut policy = file.trace;
    if let Some(cutoff) = args.cutoff {
        policy.relative_cutoff = cutoff;
    }
    policy
}
