//! Graph collections of isotopes and flows.
//!
//! [`IsotopeCollection`] is the checksum-keyed isotope set;
//! [`FlowCollection`] composes one with an owned flow arena and
//! adjacency table, and carries the merge and traversal algorithms.

mod config;
mod flow;
mod flows;
mod isotopes;
mod trace;

pub use config::{MergePolicy, TracePolicy};
pub use flow::{Flow, FlowId, FlowKey};
pub use flows::{FlowCollection, FlowRow};
pub use isotopes::{Bounds, IsotopeCollection, DEFAULT_YMIN};
