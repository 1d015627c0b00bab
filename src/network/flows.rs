use std::collections::{HashMap, HashSet};
use std::ops::Add;

use crate::error::{Error, Result};
use crate::model::{nuclide_name, Isotope, IsotopeKey};
use crate::network::config::MergePolicy;
use crate::network::flow::{Flow, FlowId, FlowKey};
use crate::network::isotopes::{nan_last, Bounds, IsotopeCollection, DEFAULT_YMIN};

/// One data row of a flow file: source coordinates and abundance,
/// destination coordinates and abundance, and the flow magnitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowRow {
    pub n_in: u32,
    pub z_in: u32,
    pub y_in: f64,
    pub n_out: u32,
    pub z_out: u32,
    pub y_out: f64,
    pub flow: f64,
}

/// Per-isotope adjacency: handles of the flows entering and leaving it.
#[derive(Debug, Clone, Default)]
pub(crate) struct Links {
    pub(crate) incoming: Vec<FlowId>,
    pub(crate) outgoing: Vec<FlowId>,
}

/// An isotope collection plus the directed weighted flows between its
/// members.
///
/// The collection is the sole owner of the flow arena; isotopes reference
/// flows through integer handles in the adjacency table, so there are no
/// ownership cycles. Every flow's endpoints are present in the isotope
/// set, enforced at insertion.
#[derive(Debug, Clone, Default)]
pub struct FlowCollection {
    isotopes: IsotopeCollection,
    flows: Vec<Flow>,
    flow_index: HashMap<FlowKey, FlowId>,
    links: HashMap<u32, Links>,
}

impl FlowCollection {
    pub fn new() -> Self {
        Self::with_ymin(DEFAULT_YMIN)
    }

    pub fn with_ymin(ymin: f64) -> Self {
        Self {
            isotopes: IsotopeCollection::with_ymin(ymin),
            flows: Vec::new(),
            flow_index: HashMap::new(),
            links: HashMap::new(),
        }
    }

    /// Minimum-abundance threshold, forwarded from the isotope set.
    #[inline]
    pub fn ymin(&self) -> f64 {
        self.isotopes.ymin()
    }

    /// The underlying isotope set.
    #[inline]
    pub fn isotopes(&self) -> &IsotopeCollection {
        &self.isotopes
    }

    /// Inserts an isotope; forwards to [`IsotopeCollection::insert`].
    pub fn insert_isotope(&mut self, key: &IsotopeKey, y: f64) -> Result<&Isotope> {
        self.isotopes.insert(key, y)
    }

    /// Looks up an isotope; forwards to [`IsotopeCollection::get`].
    pub fn get_isotope(&self, key: &IsotopeKey) -> Result<&Isotope> {
        self.isotopes.get(key)
    }

    /// Coordinate extent; forwards to [`IsotopeCollection::bounds`].
    pub fn bounds(&self) -> Result<Bounds> {
        self.isotopes.bounds()
    }

    /// Largest abundance; forwards to [`IsotopeCollection::max_abundance`].
    pub fn max_abundance(&self) -> Result<f64> {
        self.isotopes.max_abundance()
    }

    pub fn flows(&self) -> impl Iterator<Item = &Flow> {
        self.flows.iter()
    }

    #[inline]
    pub fn flow_count(&self) -> usize {
        self.flows.len()
    }

    pub fn get_flow(&self, key: FlowKey) -> Option<&Flow> {
        self.flow_index.get(&key).map(|&id| &self.flows[id])
    }

    /// Flows entering the given isotope. Fails with `NotFound` if the
    /// isotope is not in the collection.
    pub fn incoming(&self, key: &IsotopeKey) -> Result<Vec<&Flow>> {
        let chk = self.get_isotope(key)?.checksum();
        Ok(self.linked_flows(chk, Direction::Incoming))
    }

    /// Flows leaving the given isotope.
    pub fn outgoing(&self, key: &IsotopeKey) -> Result<Vec<&Flow>> {
        let chk = self.get_isotope(key)?.checksum();
        Ok(self.linked_flows(chk, Direction::Outgoing))
    }

    pub(crate) fn linked_flows(&self, chk: u32, dir: Direction) -> Vec<&Flow> {
        match self.links.get(&chk) {
            Some(links) => dir
                .select(links)
                .iter()
                .map(|&id| &self.flows[id])
                .collect(),
            None => Vec::new(),
        }
    }

    /// Ingests one flow-file row, creating missing endpoints with the
    /// row's abundances. A repeated directed pair accumulates into the
    /// existing flow.
    pub fn add_row(&mut self, row: &FlowRow) -> Result<FlowId> {
        let source = Isotope::from_coords(row.z_in, row.n_in, row.y_in)?;
        let dest = Isotope::from_coords(row.z_out, row.n_out, row.y_out)?;
        let (src_chk, dst_chk) = (source.checksum(), dest.checksum());
        if !self.isotopes.contains_checksum(src_chk) {
            self.isotopes.insert_isotope(source)?;
        }
        if !self.isotopes.contains_checksum(dst_chk) {
            self.isotopes.insert_isotope(dest)?;
        }
        self.attach(src_chk, dst_chk, row.flow)
    }

    /// Adds a flow between two isotopes that must already be present.
    pub fn add_flow(&mut self, source: &IsotopeKey, dest: &IsotopeKey, magnitude: f64) -> Result<FlowId> {
        let src_chk = self.get_isotope(source)?.checksum();
        let dst_chk = self.get_isotope(dest)?.checksum();
        self.attach(src_chk, dst_chk, magnitude)
    }

    /// Links a flow between two resident isotopes, accumulating into an
    /// existing flow with the same directed key.
    pub(crate) fn attach(&mut self, source: u32, dest: u32, magnitude: f64) -> Result<FlowId> {
        let key = FlowKey::new(source, dest);
        if let Some(&id) = self.flow_index.get(&key) {
            self.flows[id].add_magnitude(magnitude);
            return Ok(id);
        }
        let flow = match (self.isotopes.by_checksum(source), self.isotopes.by_checksum(dest)) {
            (Some(src), Some(dst)) => Flow::new(src, dst, magnitude),
            (None, _) => return Err(Error::NotFound(nuclide_name(source))),
            (_, None) => return Err(Error::NotFound(nuclide_name(dest))),
        };
        let id = self.flows.len();
        self.flows.push(flow);
        self.flow_index.insert(key, id);
        self.links.entry(source).or_default().outgoing.push(id);
        self.links.entry(dest).or_default().incoming.push(id);
        Ok(id)
    }

    /// Largest flow magnitude.
    pub fn max_flow(&self) -> Result<f64> {
        if self.flows.is_empty() {
            return Err(Error::EmptyCollection("max_flow"));
        }
        Ok(self
            .flows
            .iter()
            .map(Flow::magnitude)
            .fold(f64::NEG_INFINITY, f64::max))
    }

    /// Smallest flow magnitude.
    pub fn min_flow(&self) -> Result<f64> {
        if self.flows.is_empty() {
            return Err(Error::EmptyCollection("min_flow"));
        }
        Ok(self
            .flows
            .iter()
            .map(Flow::magnitude)
            .fold(f64::INFINITY, f64::min))
    }

    /// Establishes canonical order: isotopes ascending by abundance,
    /// flows ascending by magnitude. Flow handles are reassigned; the
    /// key index and adjacency table are rebuilt.
    pub fn sort(&mut self) {
        self.isotopes.sort_by_abundance();
        self.flows
            .sort_by(|a, b| nan_last(a.magnitude(), b.magnitude()));
        self.rebuild_links();
    }

    fn rebuild_links(&mut self) {
        self.flow_index = self
            .flows
            .iter()
            .enumerate()
            .map(|(id, f)| (f.key(), id))
            .collect();
        self.links.clear();
        for (id, flow) in self.flows.iter().enumerate() {
            self.links.entry(flow.source()).or_default().outgoing.push(id);
            self.links.entry(flow.dest()).or_default().incoming.push(id);
        }
    }

    /// Shares this collection's isotopes with an otherwise empty flow
    /// set; the traversal algorithms build their sub-graphs on this.
    pub(crate) fn with_isotopes_of(other: &Self) -> Self {
        Self {
            isotopes: other.isotopes.clone(),
            flows: Vec::new(),
            flow_index: HashMap::new(),
            links: HashMap::new(),
        }
    }

    /// Combines two collections into a new one.
    ///
    /// Isotopes: checksum union, higher abundance wins. Flows, by
    /// directed key:
    /// 1. the same key on both sides sums;
    /// 2. a key facing its reverse (in either input) collapses to one net
    ///    edge in the direction of the larger total, carrying the
    ///    difference — a pair cancelling exactly keeps a zero-magnitude
    ///    edge unless `policy.suppress_zero_net` is set;
    /// 3. a key with no reverse anywhere carries over unchanged.
    ///
    /// The result is re-sorted. Merging never fails: every flow endpoint
    /// already exists in the merged isotope union.
    pub fn merge(&self, other: &Self, policy: &MergePolicy) -> Self {
        let mut out = Self {
            isotopes: self.isotopes.merge(&other.isotopes),
            ..Self::default()
        };

        let a: HashMap<FlowKey, f64> = self
            .flows
            .iter()
            .map(|f| (f.key(), f.magnitude()))
            .collect();
        let b: HashMap<FlowKey, f64> = other
            .flows
            .iter()
            .map(|f| (f.key(), f.magnitude()))
            .collect();
        let total = |key: &FlowKey| {
            a.get(key).copied().unwrap_or(0.0) + b.get(key).copied().unwrap_or(0.0)
        };

        let mut seen: HashSet<FlowKey> = HashSet::new();
        let keys = self
            .flows
            .iter()
            .map(Flow::key)
            .chain(other.flows.iter().map(Flow::key));
        for key in keys {
            if !seen.insert(key) {
                continue;
            }
            let rev = key.reversed();
            let forward = total(&key);
            if !a.contains_key(&rev) && !b.contains_key(&rev) {
                out.attach_merged(key, forward);
                continue;
            }
            seen.insert(rev);
            let delta = forward - total(&rev);
            if delta > 0.0 {
                out.attach_merged(key, delta);
            } else if delta < 0.0 || !policy.suppress_zero_net {
                out.attach_merged(rev, delta.abs());
            }
        }

        out.sort();
        out
    }

    fn attach_merged(&mut self, key: FlowKey, magnitude: f64) {
        self.attach(key.source, key.dest, magnitude)
            .expect("merged isotope union contains all flow endpoints");
    }
}

/// Adjacency direction selector shared with the traversal algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    Incoming,
    Outgoing,
}

impl Direction {
    pub(crate) fn select<'a>(&self, links: &'a Links) -> &'a [FlowId] {
        match self {
            Self::Incoming => &links.incoming,
            Self::Outgoing => &links.outgoing,
        }
    }
}

impl Add for &FlowCollection {
    type Output = FlowCollection;

    fn add(self, rhs: &FlowCollection) -> FlowCollection {
        self.merge(rhs, &MergePolicy::default())
    }
}

impl Add for FlowCollection {
    type Output = FlowCollection;

    fn add(self, rhs: FlowCollection) -> FlowCollection {
        &self + &rhs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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

    #[test]
    fn add_row_creates_missing_endpoints() {
        let mut col = FlowCollection::new();
        col.add_row(&FlowRow {
            n_in: 30,
            z_in: 26,
            y_in: 1e-4,
            n_out: 28,
            z_out: 28,
            y_out: 1e-6,
            flow: 2.0,
        })
        .unwrap();

        assert_eq!(col.isotopes().len(), 2);
        assert_eq!(col.get_isotope(&"fe56".into()).unwrap().y(), 1e-4);
        assert_eq!(col.flow_count(), 1);
        assert_eq!(col.outgoing(&"fe56".into()).unwrap().len(), 1);
        assert_eq!(col.incoming(&"ni56".into()).unwrap().len(), 1);
    }

    #[test]
    fn add_row_repeated_pair_accumulates() {
        let mut col = FlowCollection::new();
        let row = FlowRow {
            n_in: 30,
            z_in: 26,
            y_in: 1e-4,
            n_out: 28,
            z_out: 28,
            y_out: 1e-6,
            flow: 2.0,
        };
        col.add_row(&row).unwrap();
        col.add_row(&row).unwrap();

        assert_eq!(col.flow_count(), 1);
        assert_eq!(col.flows().next().unwrap().magnitude(), 4.0);
    }

    #[test]
    fn add_flow_requires_existing_endpoints() {
        let mut col = FlowCollection::new();
        col.insert_isotope(&"fe56".into(), 1e-4).unwrap();
        assert!(matches!(
            col.add_flow(&"fe56".into(), &"ni56".into(), 1.0),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn max_and_min_flow() {
        let col = collection(
            &[("fe56", 1e-4), ("ni56", 1e-6), ("co56", 1e-5)],
            &[("fe56", "ni56", 2.0), ("fe56", "co56", 0.5)],
        );
        assert_eq!(col.max_flow().unwrap(), 2.0);
        assert_eq!(col.min_flow().unwrap(), 0.5);
    }

    #[test]
    fn flow_queries_on_empty_collection_fail() {
        let col = FlowCollection::new();
        assert_eq!(col.max_flow(), Err(Error::EmptyCollection("max_flow")));
        assert_eq!(col.min_flow(), Err(Error::EmptyCollection("min_flow")));
    }

    #[test]
    fn sort_orders_flows_and_rebuilds_adjacency() {
        let mut col = collection(
            &[("fe56", 1e-4), ("ni56", 1e-6), ("co56", 1e-5)],
            &[("fe56", "ni56", 2.0), ("co56", "ni56", 0.5), ("fe56", "co56", 1.0)],
        );
        col.sort();

        let mags: Vec<f64> = col.flows().map(Flow::magnitude).collect();
        assert_eq!(mags, [0.5, 1.0, 2.0]);

        let into_ni56 = col.incoming(&"ni56".into()).unwrap();
        let names: Vec<String> = into_ni56.iter().map(|f| f.to_string()).collect();
        assert_eq!(names, ["co56->ni56", "fe56->ni56"]);
    }

    #[test]
    fn merge_same_direction_sums() {
        let a = collection(&[("fe56", 1e-4), ("ni56", 1e-6)], &[("fe56", "ni56", 2.0)]);
        let b = collection(&[("fe56", 2e-4), ("ni56", 1e-6)], &[("fe56", "ni56", 3.0)]);

        let merged = a.merge(&b, &MergePolicy::default());
        assert_eq!(flow_names(&merged), [("fe56->ni56".to_string(), 5.0)]);
        // higher abundance wins on the isotope side
        assert_eq!(merged.get_isotope(&"fe56".into()).unwrap().y(), 2e-4);
    }

    #[test]
    fn merge_opposing_pair_nets_forward() {
        let a = collection(&[("fe56", 1e-4), ("ni56", 1e-6)], &[("fe56", "ni56", 5.0)]);
        let b = collection(&[("fe56", 1e-4), ("ni56", 1e-6)], &[("ni56", "fe56", 3.0)]);

        let merged = a.merge(&b, &MergePolicy::default());
        assert_eq!(flow_names(&merged), [("fe56->ni56".to_string(), 2.0)]);
    }

    #[test]
    fn merge_opposing_pair_nets_reverse() {
        let a = collection(&[("fe56", 1e-4), ("ni56", 1e-6)], &[("fe56", "ni56", 2.0)]);
        let b = collection(&[("fe56", 1e-4), ("ni56", 1e-6)], &[("ni56", "fe56", 5.0)]);

        let merged = a.merge(&b, &MergePolicy::default());
        assert_eq!(flow_names(&merged), [("ni56->fe56".to_string(), 3.0)]);
    }

    #[test]
    fn merge_zero_net_kept_by_default() {
        let a = collection(&[("fe56", 1e-4), ("ni56", 1e-6)], &[("fe56", "ni56", 4.0)]);
        let b = collection(&[("fe56", 1e-4), ("ni56", 1e-6)], &[("ni56", "fe56", 4.0)]);

        let merged = a.merge(&b, &MergePolicy::default());
        assert_eq!(flow_names(&merged), [("ni56->fe56".to_string(), 0.0)]);
    }

    #[test]
    fn merge_zero_net_suppressed_by_policy() {
        let a = collection(&[("fe56", 1e-4), ("ni56", 1e-6)], &[("fe56", "ni56", 4.0)]);
        let b = collection(&[("fe56", 1e-4), ("ni56", 1e-6)], &[("ni56", "fe56", 4.0)]);

        let merged = a.merge(
            &b,
            &MergePolicy {
                suppress_zero_net: true,
            },
        );
        assert_eq!(merged.flow_count(), 0);
    }

    #[test]
    fn merge_carries_unpaired_flows() {
        let a = collection(&[("fe56", 1e-4), ("ni56", 1e-6)], &[("fe56", "ni56", 2.0)]);
        let b = collection(&[("he4", 0.5), ("c12", 1e-3)], &[("he4", "c12", 7.0)]);

        let merged = a.merge(&b, &MergePolicy::default());
        assert_eq!(merged.flow_count(), 2);
        assert_eq!(
            merged
                .get_flow(FlowKey::new(26030, 28028))
                .unwrap()
                .magnitude(),
            2.0
        );
        assert_eq!(
            merged.get_flow(FlowKey::new(2002, 6006)).unwrap().magnitude(),
            7.0
        );
        assert_eq!(merged.isotopes().len(), 4);
    }

    #[test]
    fn merge_result_is_sorted() {
        let a = collection(
            &[("fe56", 1e-4), ("ni56", 1e-6), ("co56", 1e-5)],
            &[("fe56", "ni56", 2.0), ("co56", "ni56", 9.0)],
        );
        let b = collection(&[("fe56", 1e-4), ("ni56", 1e-6)], &[("fe56", "ni56", 3.0)]);

        let merged = a.merge(&b, &MergePolicy::default());
        let mags: Vec<f64> = merged.flows().map(Flow::magnitude).collect();
        assert_eq!(mags, [5.0, 9.0]);
    }

    #[test]
    fn add_operator_uses_default_policy() {
        let a = collection(&[("fe56", 1e-4), ("ni56", 1e-6)], &[("fe56", "ni56", 2.0)]);
        let b = collection(&[("fe56", 1e-4), ("ni56", 1e-6)], &[("fe56", "ni56", 3.0)]);

        let merged = &a + &b;
        assert_eq!(flow_names(&merged), [("fe56->ni56".to_string(), 5.0)]);
    }
}
