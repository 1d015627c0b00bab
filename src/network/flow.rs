use std::fmt;

use crate::model::{nuclide_name, Isotope};

/// Handle into a [`FlowCollection`](super::FlowCollection) flow arena.
///
/// Handles are stable between sorts of the isotope storage but are
/// reassigned when the flow arena itself is re-sorted; the owning
/// collection rebuilds its adjacency lists at that point.
pub type FlowId = usize;

/// Directed identity of a flow: the ordered pair of endpoint checksums.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FlowKey {
    pub source: u32,
    pub dest: u32,
}

impl FlowKey {
    pub fn new(source: u32, dest: u32) -> Self {
        Self { source, dest }
    }

    /// The opposing reaction direction.
    pub fn reversed(&self) -> Self {
        Self {
            source: self.dest,
            dest: self.source,
        }
    }
}

impl fmt::Display for FlowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", nuclide_name(self.source), nuclide_name(self.dest))
    }
}

/// A directed, weighted edge between two isotopes.
///
/// Flows are owned by a `FlowCollection`; isotopes reach them through the
/// collection's adjacency lists, never through owning references.
#[derive(Debug, Clone, PartialEq)]
pub struct Flow {
    key: FlowKey,
    z0: u32,
    n0: u32,
    dz: i32,
    dn: i32,
    magnitude: f64,
}

impl Flow {
    pub fn new(source: &Isotope, dest: &Isotope, magnitude: f64) -> Self {
        Self {
            key: FlowKey::new(source.checksum(), dest.checksum()),
            z0: source.z(),
            n0: source.n(),
            dz: dest.z() as i32 - source.z() as i32,
            dn: dest.n() as i32 - source.n() as i32,
            magnitude,
        }
    }

    #[inline]
    pub fn key(&self) -> FlowKey {
        self.key
    }

    /// Source checksum.
    #[inline]
    pub fn source(&self) -> u32 {
        self.key.source
    }

    /// Destination checksum.
    #[inline]
    pub fn dest(&self) -> u32 {
        self.key.dest
    }

    /// Source proton count.
    #[inline]
    pub fn z0(&self) -> u32 {
        self.z0
    }

    /// Source neutron count.
    #[inline]
    pub fn n0(&self) -> u32 {
        self.n0
    }

    /// Proton delta to the destination.
    #[inline]
    pub fn dz(&self) -> i32 {
        self.dz
    }

    /// Neutron delta to the destination.
    #[inline]
    pub fn dn(&self) -> i32 {
        self.dn
    }

    #[inline]
    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    /// Traversal rescaling and merge accumulation go through here.
    pub(crate) fn add_magnitude(&mut self, magnitude: f64) {
        self.magnitude += magnitude;
    }
}

impl fmt::Display for Flow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.key.fmt(f)
    }
}
