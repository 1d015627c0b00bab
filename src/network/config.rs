//! Policy knobs for merging and traversal.
//!
//! The historical implementations of these algorithms disagreed on two
//! details: whether a zero-net opposing pair survives a merge, and where
//! the small-edge cutoff is applied during traversal expansion. Both are
//! explicit policy here instead of hidden constants.

use serde::Deserialize;

/// Controls flow conflict resolution in [`FlowCollection::merge`](super::FlowCollection::merge).
///
/// Isotope handling (max abundance wins) is not configurable.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MergePolicy {
    /// Drop an opposing pair whose magnitudes cancel exactly, instead of
    /// keeping a zero-magnitude net edge. Off by default: a zero edge
    /// still documents that the reaction pair was present.
    pub suppress_zero_net: bool,
}

/// Controls the truncated weighted traversal
/// ([`flows_to`](super::FlowCollection::flows_to) /
/// [`flows_from`](super::FlowCollection::flows_from)).
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TracePolicy {
    /// Candidate edges below `relative_cutoff * frontier_magnitude` are
    /// discarded *before* the proportional split, so the surviving edges
    /// share the full frontier magnitude between them. Set to `0.0` to
    /// keep every edge.
    pub relative_cutoff: f64,
}

impl Default for TracePolicy {
    fn default() -> Self {
        Self {
            relative_cutoff: 0.05,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        assert!(!MergePolicy::default().suppress_zero_net);
        assert_eq!(TracePolicy::default().relative_cutoff, 0.05);
    }

    #[test]
    fn deserialize_from_toml() {
        let merge: MergePolicy = toml::from_str("suppress_zero_net = true").unwrap();
        assert!(merge.suppress_zero_net);

        let trace: TracePolicy = toml::from_str("relative_cutoff = 0.1").unwrap();
        assert_eq!(trace.relative_cutoff, 0.1);

        let trace: TracePolicy = toml::from_str("").unwrap();
        assert_eq!(trace, TracePolicy::default());
    }

    #[test]
    fn deserialize_rejects_unknown_fields() {
        assert!(toml::from_str::<TracePolicy>("cutoff = 0.1").is_err());
    }
}
