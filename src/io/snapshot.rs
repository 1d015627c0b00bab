//! Reader for abundance snapshots.
//!
//! A snapshot is the network's full composition at one instant: the
//! shared three-line header followed by one row per isotope with its
//! coordinates and abundance.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::error::Error;
use super::{parse_coord, parse_floats, read_header, Format, LineReader};
use crate::model::IsotopeKey;
use crate::network::IsotopeCollection;

const FORMAT: Format = Format::Snapshot;

/// One parsed snapshot: the header values and the isotope set.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub time: f64,
    pub temp: f64,
    pub dens: f64,
    pub isotopes: IsotopeCollection,
}

/// Reads a snapshot from any buffered source. Rows are `(N, Z, Y)`;
/// a repeated coordinate pair is an error.
pub fn read<R: BufRead>(reader: R) -> Result<Snapshot, Error> {
    let mut lines = LineReader::new(reader);
    let header = read_header(&mut lines, FORMAT)?;

    let mut isotopes = IsotopeCollection::new();
    while let Some((line_no, line)) = lines.next_line()? {
        let values = parse_floats(&line, FORMAT, line_no)?;
        if values.len() < 3 {
            return Err(Error::parse(
                FORMAT,
                line_no,
                format!("expected 3 columns, found {}", values.len()),
            ));
        }
        let n = parse_coord(values[0], FORMAT, line_no, "N")?;
        let z = parse_coord(values[1], FORMAT, line_no, "Z")?;
        isotopes.insert(&IsotopeKey::Coords { z, n }, values[2])?;
    }

    Ok(Snapshot {
        time: header.time,
        temp: header.temp,
        dens: header.dens,
        isotopes,
    })
}

/// Reads a snapshot from a file on disk.
pub fn read_path(path: impl AsRef<Path>) -> Result<Snapshot, Error> {
    let file = File::open(path.as_ref())?;
    read(BufReader::new(file))
}
