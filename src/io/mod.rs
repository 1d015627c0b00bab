//! Readers for the text formats produced by nucleosynthesis network
//! runs: per-timestep flow tables and abundance snapshots.
//!
//! Both formats share the same three-line header: a free-form label
//! line, a line of numeric header values, and a line of column
//! captions that is ignored. They differ only in the row layout and in
//! the optional `dt` column of the flow header.

pub mod error;
pub mod flowfile;
pub mod snapshot;

use std::fmt;
use std::io::BufRead;

pub use error::Error;

/// The file formats this module can read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// A per-timestep flow table: header, captions, then one row per
    /// reaction flow.
    Flow,
    /// An abundance snapshot: header, captions, then one row per
    /// isotope.
    Snapshot,
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Flow => write!(f, "flow table"),
            Format::Snapshot => write!(f, "snapshot"),
        }
    }
}

/// Numeric header values shared by both formats. `dt` is present only
/// when the flow file's label line advertises a `dt` column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Header {
    pub time: f64,
    pub dt: Option<f64>,
    pub temp: f64,
    pub dens: f64,
}

/// Line-at-a-time reader that tracks 1-based line numbers for error
/// reporting.
pub(crate) struct LineReader<R: BufRead> {
    lines: std::io::Lines<R>,
    line_no: usize,
}

impl<R: BufRead> LineReader<R> {
    pub(crate) fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
        }
    }

    /// Returns the next non-blank line with its line number, or `None`
    /// at end of input.
    pub(crate) fn next_line(&mut self) -> Result<Option<(usize, String)>, Error> {
        for line in self.lines.by_ref() {
            let line = line?;
            self.line_no += 1;
            if !line.trim().is_empty() {
                return Ok(Some((self.line_no, line)));
            }
        }
        Ok(None)
    }
}

/// Parses the three-line header. The label line of a flow table
/// contains the token `dt` when a `dt` column is present; snapshots
/// never carry one.
pub(crate) fn read_header<R: BufRead>(
    reader: &mut LineReader<R>,
    format: Format,
) -> Result<Header, Error> {
    let (_, label) = reader
        .next_line()?
        .ok_or_else(|| Error::parse(format, 1, "missing label line"))?;

    let has_dt = format == Format::Flow
        && label
            .split_whitespace()
            .any(|token| token.eq_ignore_ascii_case("dt"));
    let expected = if has_dt { 4 } else { 3 };

    let (line_no, values) = reader
        .next_line()?
        .ok_or_else(|| Error::parse(format, 2, "missing header values"))?;
    let values = parse_floats(&values, format, line_no)?;
    if values.len() < expected {
        return Err(Error::parse(
            format,
            line_no,
            format!("expected {expected} header values, found {}", values.len()),
        ));
    }

    // Column captions; ignored, but consumed so rows start cleanly.
    reader.next_line()?;

    let header = if has_dt {
        Header {
            time: values[0],
            dt: Some(values[1]),
            temp: values[2],
            dens: values[3],
        }
    } else {
        Header {
            time: values[0],
            dt: None,
            temp: values[1],
            dens: values[2],
        }
    };
    Ok(header)
}

pub(crate) fn parse_floats(line: &str, format: Format, line_no: usize) -> Result<Vec<f64>, Error> {
    line.split_whitespace()
        .map(|token| {
            token.parse::<f64>().map_err(|_| {
                Error::parse(format, line_no, format!("invalid number `{token}`"))
            })
        })
        .collect()
}

/// Converts a coordinate column that is stored as a float back to the
/// integer it must be.
pub(crate) fn parse_coord(
    value: f64,
    format: Format,
    line_no: usize,
    column: &str,
) -> Result<u32, Error> {
    if value < 0.0 || value.fract() != 0.0 || value > f64::from(u32::MAX) {
        return Err(Error::parse(
            format,
            line_no,
            format!("column {column} must be a non-negative integer, found {value}"),
        ));
    }
    Ok(value as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_with_dt_column() {
        let input = "time dt temp dens\n1.0e2 0.5 3.2 1.0e7\nN Z Y ...\n";
        let mut reader = LineReader::new(input.as_bytes());
        let header = read_header(&mut reader, Format::Flow).unwrap();
        assert_eq!(header.time, 1.0e2);
        assert_eq!(header.dt, Some(0.5));
        assert_eq!(header.temp, 3.2);
        assert_eq!(header.dens, 1.0e7);
    }

    #[test]
    fn header_without_dt_column() {
        let input = "time temp dens\n1.0e2 3.2 1.0e7\nN Z Y\n";
        let mut reader = LineReader::new(input.as_bytes());
        let header = read_header(&mut reader, Format::Snapshot).unwrap();
        assert_eq!(header.dt, None);
        assert_eq!(header.temp, 3.2);
    }

    #[test]
    fn snapshot_label_mentioning_dt_still_has_three_values() {
        // Only flow tables ever carry a dt column; the label text of a
        // snapshot must not trigger the four-value layout.
        let input = "width dt of bins\n1.0 3.2 1.0e7\ncaptions\n";
        let mut reader = LineReader::new(input.as_bytes());
        let header = read_header(&mut reader, Format::Snapshot).unwrap();
        assert_eq!(header.dt, None);
    }

    #[test]
    fn missing_header_values_is_an_error() {
        let input = "label only\n";
        let mut reader = LineReader::new(input.as_bytes());
        assert!(read_header(&mut reader, Format::Snapshot).is_err());
    }

    #[test]
    fn short_header_line_is_an_error() {
        let input = "time dt temp dens\n1.0 0.5 3.2\ncaptions\n";
        let mut reader = LineReader::new(input.as_bytes());
        let result = read_header(&mut reader, Format::Flow);
        assert!(matches!(result, Err(Error::Parse { line: 2, .. })));
    }

    #[test]
    fn coord_rejects_fractional_and_negative_values() {
        assert_eq!(parse_coord(26.0, Format::Flow, 4, "Z").unwrap(), 26);
        assert!(parse_coord(26.5, Format::Flow, 4, "Z").is_err());
        assert!(parse_coord(-1.0, Format::Flow, 4, "Z").is_err());
    }
}
