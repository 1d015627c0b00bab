//! A pure Rust library for analyzing nuclear reaction network output.
//! It reads per-timestep flow tables and abundance snapshots, merges
//! timesteps into integrated flow graphs with opposing-flow
//! cancellation, and traces weighted flow paths into or out of any
//! isotope.
//!
//! # Features
//!
//! - **Flexible isotope lookup** — Address nuclides by name (`fe56`,
//!   `p`, `neutron`), by `(Z, N)` coordinates, or by the packed
//!   `1000*Z + N` checksum
//! - **Flow graphs** — Directed weighted flows between isotopes with
//!   constant-time lookup by endpoint pair and per-isotope adjacency
//! - **Timestep merging** — Sum same-direction flows and net opposing
//!   pairs across timesteps, so back-and-forth equilibrium reactions
//!   cancel out of the integrated picture
//! - **Flow tracing** — Truncated weighted traversal upstream or
//!   downstream of a seed isotope, rescaling each expansion so deeper
//!   hops carry the seed's share of the flow
//! - **File I/O** — Readers for flow tables and snapshots with
//!   configurable ingestion thresholds
//!
//! # Quick Start
//!
//! ```
//! use nucflow::{FlowCollection, FlowKey, IsotopeKey, TracePolicy};
//!
//! // A three-isotope alpha-capture chain with abundances.
//! let mut flows = FlowCollection::new();
//! flows.insert_isotope(&IsotopeKey::from("ca40"), 1.0e-4)?;
//! flows.insert_isotope(&IsotopeKey::from("ti44"), 2.0e-5)?;
//! flows.insert_isotope(&IsotopeKey::from("cr48"), 3.0e-6)?;
//!
//! flows.add_flow(&IsotopeKey::from("ca40"), &IsotopeKey::from("ti44"), 8.0)?;
//! flows.add_flow(&IsotopeKey::from("ti44"), &IsotopeKey::from("cr48"), 2.0)?;
//!
//! // Two timesteps merge by summing; opposing flows would net.
//! let merged = &flows + &flows;
//! let ca_ti = merged.get_flow(FlowKey::new(20020, 22022)).unwrap();
//! assert_eq!(ca_ti.magnitude(), 16.0);
//!
//! // Trace two hops upstream of cr48: the direct ti44 edge plus the
//! // ca40 contribution rescaled through it.
//! let trace = flows.flows_to(&IsotopeKey::from("cr48"), 2, &TracePolicy::default())?;
//! assert_eq!(trace.flow_count(), 2);
//! assert_eq!(trace.get_flow(FlowKey::new(20020, 22022)).unwrap().magnitude(), 2.0);
//! # Ok::<(), nucflow::Error>(())
//! ```
//!
//! # Module Organization
//!
//! - [`io`] — Readers for flow tables ([`io::flowfile`]) and
//!   abundance snapshots ([`io::snapshot`])
//! - [`FlowCollection`] — Isotope set plus the directed flows between
//!   its members; merging and tracing live here
//! - [`IsotopeCollection`] — Plain isotope set with bounds and
//!   abundance queries
//! - [`Isotope`] / [`IsotopeKey`] — A single nuclide and the ways to
//!   address one
//! - [`MergePolicy`] / [`TracePolicy`] — Tunable knobs for merging and
//!   tracing

mod error;
mod model;
mod network;

pub mod io;

pub use error::{Error, Result};
pub use model::{nuclide_name, Isotope, IsotopeKey};
pub use network::{
    Bounds, Flow, FlowCollection, FlowId, FlowKey, FlowRow, IsotopeCollection, MergePolicy,
    TracePolicy, DEFAULT_YMIN,
};
