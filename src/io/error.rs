use super::Format;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O operation failed: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("failed to parse {format} data: {details} (at line ~{line})")]
    Parse {
        format: Format,
        line: usize,
        details: String,
    },

    /// A row that parsed numerically but describes an impossible nuclide
    /// (unknown atomic number, checksum overflow, duplicate isotope).
    #[error("invalid nuclide data: {0}")]
    Nuclide(#[from] crate::Error),

    /// A flow file in which every row fell below the ingestion
    /// thresholds.
    #[error("no flows above threshold in {0}")]
    NoFlows(String),
}

impl Error {
    pub fn parse(format: Format, line: usize, details: impl Into<String>) -> Self {
        Self::Parse {
            format,
            line,
            details: details.into(),
        }
    }
}
