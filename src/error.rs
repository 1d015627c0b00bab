//! Error type for the isotope/flow data model.
//!
//! All construction, lookup, and aggregate-query failures in the core
//! collections surface through this enum. File-level failures live in
//! [`crate::io::Error`] and wrap this type where a malformed row fails
//! isotope construction.

use thiserror::Error;

/// Errors produced by isotope construction and collection operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A structurally invalid argument, e.g. a neutron count that does not
    /// fit the `1000*Z + N` checksum encoding.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An isotope name that cannot be split into an element symbol and a
    /// mass number.
    #[error("cannot parse isotope name '{name}': {details}")]
    ParseName {
        /// The offending input, as given.
        name: String,
        /// What went wrong.
        details: String,
    },

    /// An element symbol not present in the element table.
    #[error("unknown element symbol '{0}'")]
    UnknownElement(String),

    /// An atomic number outside the element table.
    #[error("no element with atomic number {0}")]
    UnknownAtomicNumber(u32),

    /// A lookup by name, coordinates, or checksum that missed.
    #[error("isotope '{0}' not found in collection")]
    NotFound(String),

    /// An insertion whose checksum is already present.
    #[error("isotope '{0}' is already in the collection")]
    DuplicateIsotope(String),

    /// An aggregate query (`max_abundance`, `bounds`, `max_flow`, ...) on
    /// an empty collection.
    #[error("{0} requires a non-empty collection")]
    EmptyCollection(&'static str),
}

/// Convenience alias used throughout the library.
pub type Result<T> = std::result::Result<T, Error>;
