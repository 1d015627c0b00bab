//! Truncated weighted traversal of the flow graph.
//!
//! Extracts the sub-graph within a bounded number of hops upstream or
//! downstream of a seed isotope, rescaling magnitudes at each expansion
//! so that the edges feeding a frontier edge share its magnitude
//! proportionally. The sub-graph keeps the source collection's full
//! isotope set so chart bounds stay comparable.

use crate::error::Result;
use crate::model::IsotopeKey;
use crate::network::config::TracePolicy;
use crate::network::flow::FlowKey;
use crate::network::flows::{Direction, FlowCollection};

impl FlowCollection {
    /// Sub-graph of flows reaching `seed` within `hops` steps upstream.
    ///
    /// Hop 1 is the seed's direct incoming flows, copied unchanged; each
    /// further hop expands every frontier edge through its source
    /// isotope's own incoming flows (see [`TracePolicy`] for the pruning
    /// rule). Fails with `NotFound` if the seed is absent.
    pub fn flows_to(&self, seed: &IsotopeKey, hops: usize, policy: &TracePolicy) -> Result<Self> {
        self.trace(seed, hops, policy, Direction::Incoming)
    }

    /// Sub-graph of flows leaving `seed` within `hops` steps downstream;
    /// the mirror image of [`flows_to`](Self::flows_to).
    pub fn flows_from(&self, seed: &IsotopeKey, hops: usize, policy: &TracePolicy) -> Result<Self> {
        self.trace(seed, hops, policy, Direction::Outgoing)
    }

    fn trace(
        &self,
        seed: &IsotopeKey,
        hops: usize,
        policy: &TracePolicy,
        dir: Direction,
    ) -> Result<Self> {
        let seed_chk = self.get_isotope(seed)?.checksum();
        let mut sub = Self::with_isotopes_of(self);
        if hops == 0 {
            return Ok(sub);
        }

        let mut frontier: Vec<(FlowKey, f64)> = Vec::new();
        for flow in self.linked_flows(seed_chk, dir) {
            sub.attach(flow.source(), flow.dest(), flow.magnitude())?;
            frontier.push((flow.key(), flow.magnitude()));
        }

        for _ in 1..hops {
            let mut next: Vec<(FlowKey, f64)> = Vec::new();
            for (key, magnitude) in frontier {
                // expand through the endpoint the edge came from
                let node = match dir {
                    Direction::Incoming => key.source,
                    Direction::Outgoing => key.dest,
                };
                let mut candidates: Vec<(FlowKey, f64)> = self
                    .linked_flows(node, dir)
                    .iter()
                    .map(|f| (f.key(), f.magnitude()))
                    .collect();
                if policy.relative_cutoff > 0.0 {
                    candidates.retain(|(_, m)| *m >= magnitude * policy.relative_cutoff);
                }
                let base: f64 = candidates.iter().map(|(_, m)| m).sum();
                if base <= 0.0 {
                    // degenerate expansion: nothing feeds this edge
                    continue;
                }
                for (candidate, cand_magnitude) in candidates {
                    let scaled = cand_magnitude * magnitude / base;
                    let already_present = sub.get_flow(candidate).is_some();
                    sub.attach(candidate.source, candidate.dest, scaled)?;
                    if !already_present {
                        next.push((candidate, scaled));
                    }
                }
            }
            frontier = next;
        }

        sub.sort();
        Ok(sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::network::flow::Flow;

    fn collection(isotopes: &[(&str, f64)], flows: &[(&str, &str, f64)]) -> FlowCollection {
        let mut col = FlowCollection::new();
        for (name, y) in isotopes {
            col.insert_isotope(&IsotopeKey::name(*name), *y).unwrap();
        }
        for (src, dst, mag) in flows {
            col.add_flow(&IsotopeKey::name(*src), &IsotopeKey::name(*dst), *mag)
                .unwrap();
        }
        col
    }

    fn flow_names(col: &FlowCollection) -> Vec<(String, f64)> {
        col.flows()
            .map(|f| (f.to_string(), f.magnitude()))
            .collect()
    }

    fn no_cutoff() -> TracePolicy {
        TracePolicy {
            relative_cutoff: 0.0,
        }
    }

    #[test]
    fn single_hop_returns_direct_inbound_edges_sorted() {
        let col = collection(
            &[("ni56", 1e-6), ("fe56", 1e-4), ("co56", 1e-5)],
            &[("fe56", "ni56", 6.0), ("co56", "ni56", 2.0)],
        );

        let sub = col.flows_to(&"ni56".into(), 1, &TracePolicy::default()).unwrap();
        assert_eq!(
            flow_names(&sub),
            [
                ("co56->ni56".to_string(), 2.0),
                ("fe56->ni56".to_string(), 6.0)
            ]
        );
        // the full isotope set is shared for plot bounds
        assert_eq!(sub.isotopes().len(), 3);
    }

    #[test]
    fn two_hops_rescale_proportionally() {
        // ni56 <- fe56 (6), ni56 <- co56 (2); fe56 <- cr52 (3), fe56 <- mn55 (1)
        let col = collection(
            &[
                ("ni56", 1e-6),
                ("fe56", 1e-4),
                ("co56", 1e-5),
                ("cr52", 1e-3),
                ("mn55", 1e-4),
            ],
            &[
                ("fe56", "ni56", 6.0),
                ("co56", "ni56", 2.0),
                ("cr52", "fe56", 3.0),
                ("mn55", "fe56", 1.0),
            ],
        );

        let sub = col.flows_to(&"ni56".into(), 2, &no_cutoff()).unwrap();
        // fe56's inbound edges split fe56->ni56's magnitude 6 as 3:1
        assert_eq!(
            flow_names(&sub),
            [
                ("mn55->fe56".to_string(), 1.5),
                ("co56->ni56".to_string(), 2.0),
                ("cr52->fe56".to_string(), 4.5),
                ("fe56->ni56".to_string(), 6.0)
            ]
        );
    }

    #[test]
    fn relative_cutoff_prunes_before_normalization() {
        let col = collection(
            &[("ni56", 1e-6), ("fe56", 1e-4), ("cr52", 1e-3), ("mn55", 1e-4)],
            &[
                ("fe56", "ni56", 6.0),
                ("cr52", "fe56", 3.0),
                // below 5% of the parent magnitude 6.0
                ("mn55", "fe56", 0.1),
            ],
        );

        let sub = col.flows_to(&"ni56".into(), 2, &TracePolicy::default()).unwrap();
        // mn55->fe56 is pruned and cr52->fe56 inherits the full magnitude
        assert_eq!(sub.flow_count(), 2);
        assert_eq!(
            sub.get_flow(FlowKey::new(24028, 26030)).unwrap().magnitude(),
            6.0
        );
        assert!(sub.get_flow(FlowKey::new(25030, 26030)).is_none());
    }

    #[test]
    fn shared_upstream_edge_accumulates() {
        // Two chains rejoin at ti44: both fe56 and co56 are fed by ti44,
        // and ti44 itself by ca40.
        let col = collection(
            &[
                ("ni56", 1e-6),
                ("fe56", 1e-4),
                ("co56", 1e-5),
                ("ti44", 1e-3),
                ("ca40", 1e-2),
            ],
            &[
                ("fe56", "ni56", 6.0),
                ("co56", "ni56", 2.0),
                ("ti44", "fe56", 3.0),
                ("ti44", "co56", 1.0),
                ("ca40", "ti44", 10.0),
            ],
        );

        let sub = col.flows_to(&"ni56".into(), 3, &no_cutoff()).unwrap();
        assert_eq!(sub.flow_count(), 5);
        // ca40->ti44 is reached from both third-hop expansions: 6 + 2
        let key = FlowKey::new(20020, 22022);
        assert_eq!(sub.get_flow(key).unwrap().magnitude(), 8.0);
    }

    #[test]
    fn dead_end_expansion_is_absorbed() {
        let col = collection(
            &[("ni56", 1e-6), ("fe56", 1e-4)],
            &[("fe56", "ni56", 6.0)],
        );

        // fe56 has no inbound flows; extra hops must not fail
        let sub = col.flows_to(&"ni56".into(), 4, &no_cutoff()).unwrap();
        assert_eq!(flow_names(&sub), [("fe56->ni56".to_string(), 6.0)]);
    }

    #[test]
    fn zero_hops_yields_empty_flow_set() {
        let col = collection(
            &[("ni56", 1e-6), ("fe56", 1e-4)],
            &[("fe56", "ni56", 6.0)],
        );

        let sub = col.flows_to(&"ni56".into(), 0, &no_cutoff()).unwrap();
        assert_eq!(sub.flow_count(), 0);
        assert_eq!(sub.isotopes().len(), 2);
    }

    #[test]
    fn missing_seed_fails() {
        let col = FlowCollection::new();
        assert!(matches!(
            col.flows_to(&"ni56".into(), 1, &no_cutoff()),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn flows_from_mirrors_downstream() {
        let col = collection(
            &[
                ("ni56", 1e-6),
                ("fe56", 1e-4),
                ("co56", 1e-5),
                ("zn60", 1e-7),
                ("cu59", 1e-8),
            ],
            &[
                ("ni56", "fe56", 6.0),
                ("ni56", "co56", 2.0),
                ("fe56", "zn60", 3.0),
                ("fe56", "cu59", 1.0),
            ],
        );

        let sub = col.flows_from(&"ni56".into(), 2, &no_cutoff()).unwrap();
        assert_eq!(
            flow_names(&sub),
            [
                ("fe56->cu59".to_string(), 1.5),
                ("ni56->co56".to_string(), 2.0),
                ("fe56->zn60".to_string(), 4.5),
                ("ni56->fe56".to_string(), 6.0)
            ]
        );
        let mags: Vec<f64> = sub.flows().map(Flow::magnitude).collect();
        assert!(mags.windows(2).all(|w| w[0] <= w[1]));
    }
}
