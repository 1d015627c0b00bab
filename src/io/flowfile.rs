//! Reader for per-timestep flow tables.
//!
//! A flow file holds the reaction flows of one network timestep: the
//! shared three-line header, then one row per flow with the source
//! coordinates and abundance, the destination coordinates and
//! abundance, and the flow magnitude. Rows are thresholded on ingest
//! so that numerically dead flows never enter the collection.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::Deserialize;

use super::error::Error;
use super::{parse_coord, parse_floats, read_header, Format, LineReader};
use crate::network::{FlowCollection, FlowRow};

const FORMAT: Format = Format::Flow;

/// Thresholds applied while ingesting flow rows.
///
/// Solver output keeps every reaction it integrated, down to flows
/// that are pure floating-point noise; these floors discard them at
/// the boundary so downstream analysis never sees them.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReadOptions {
    /// Rows whose source abundance is below this are skipped; a
    /// destination abundance below it is clamped to `-inf`.
    pub ymin: f64,
    /// Rows whose flow is below `rel_min` times the file's largest
    /// flow are skipped.
    pub rel_min: f64,
    /// Rows whose flow is at or below this absolute floor are skipped
    /// regardless of the largest flow.
    pub abs_min: f64,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            ymin: 1e-20,
            rel_min: 1e-10,
            abs_min: 1e-99,
        }
    }
}

/// One parsed flow file: the header values and the thresholded flow
/// collection.
#[derive(Debug, Clone)]
pub struct FlowFile {
    pub time: f64,
    pub dt: Option<f64>,
    pub temp: f64,
    pub dens: f64,
    pub flows: FlowCollection,
}

/// Reads a flow table from any buffered source.
///
/// Thresholding is two-pass: every row is parsed first so the file's
/// largest flow is known, then rows below the floors of `options` are
/// dropped. A file with no surviving rows is an error.
pub fn read<R: BufRead>(reader: R, options: &ReadOptions) -> Result<FlowFile, Error> {
    read_from(reader, options, "input")
}

/// Reads a flow table from a file on disk.
pub fn read_path(path: impl AsRef<Path>, options: &ReadOptions) -> Result<FlowFile, Error> {
    let path = path.as_ref();
    let file = File::open(path)?;
    read_from(
        BufReader::new(file),
        options,
        &path.display().to_string(),
    )
}

fn read_from<R: BufRead>(
    reader: R,
    options: &ReadOptions,
    origin: &str,
) -> Result<FlowFile, Error> {
    let mut lines = LineReader::new(reader);
    let header = read_header(&mut lines, FORMAT)?;

    let mut rows = Vec::new();
    while let Some((line_no, line)) = lines.next_line()? {
        rows.push(parse_row(&line, line_no)?);
    }

    let max_flow = rows
        .iter()
        .map(|row| row.flow)
        .fold(f64::NEG_INFINITY, f64::max);
    let rel_floor = options.rel_min * max_flow;

    let mut flows = FlowCollection::with_ymin(options.ymin);
    for mut row in rows {
        if row.flow <= options.abs_min || row.flow < rel_floor || row.y_in < options.ymin {
            continue;
        }
        if row.y_out < options.ymin {
            // The destination exists only as the endpoint of this
            // flow; mark its abundance as below the floor.
            row.y_out = f64::NEG_INFINITY;
        }
        flows.add_row(&row)?;
    }
    if flows.flow_count() == 0 {
        return Err(Error::NoFlows(origin.to_string()));
    }
    flows.sort();

    Ok(FlowFile {
        time: header.time,
        dt: header.dt,
        temp: header.temp,
        dens: header.dens,
        flows,
    })
}

fn parse_row(line: &str, line_no: usize) -> Result<FlowRow, Error> {
    let values = parse_floats(line, FORMAT, line_no)?;
    if values.len() < 7 {
        return Err(Error::parse(
            FORMAT,
            line_no,
            format!("expected 7 columns, found {}", values.len()),
        ));
    }
    Ok(FlowRow {
        n_in: parse_coord(values[0], FORMAT, line_no, "N_in")?,
        z_in: parse_coord(values[1], FORMAT, line_no, "Z_in")?,
        y_in: values[2],
        n_out: parse_coord(values[3], FORMAT, line_no, "N_out")?,
        z_out: parse_coord(values[4], FORMAT, line_no, "Z_out")?,
        y_out: values[5],
        flow: values[6],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::IsotopeKey;
    use crate::network::FlowKey;

    #[test]
    fn reads_header_and_rows() {
        let input = "\
timestep with dt column
1.25e2 5.0e-3 3.2 1.0e7
N_in Z_in Y_in N_out Z_out Y_out flow
30 26 1.0e-4 30 28 2.0e-6 4.0e-5
22 20 5.0e-5 22 22 1.0e-6 1.5e-5
";
        let file = read(input.as_bytes(), &ReadOptions::default()).unwrap();
        assert_eq!(file.time, 1.25e2);
        assert_eq!(file.dt, Some(5.0e-3));
        assert_eq!(file.temp, 3.2);
        assert_eq!(file.dens, 1.0e7);
        assert_eq!(file.flows.flow_count(), 2);

        let flow = file.flows.get_flow(FlowKey::new(26030, 28030)).unwrap();
        assert_eq!(flow.magnitude(), 4.0e-5);
        let fe56 = file.flows.get_isotope(&IsotopeKey::from("fe56")).unwrap();
        assert_eq!(fe56.y(), 1.0e-4);
    }

    #[test]
    fn header_without_dt() {
        let input = "\
timestep
1.25e2 3.2 1.0e7
captions
30 26 1.0e-4 30 28 2.0e-6 4.0e-5
";
        let file = read(input.as_bytes(), &ReadOptions::default()).unwrap();
        assert_eq!(file.dt, None);
        assert_eq!(file.dens, 1.0e7);
    }

    #[test]
    fn drops_rows_below_relative_floor() {
        // Second row is 1e-12 of the maximum, well under the default
        // rel_min of 1e-10.
        let input = "\
timestep
1.0 3.2 1.0e7
captions
30 26 1.0e-4 30 28 2.0e-6 1.0e-3
22 20 5.0e-5 22 22 1.0e-6 1.0e-15
";
        let file = read(input.as_bytes(), &ReadOptions::default()).unwrap();
        assert_eq!(file.flows.flow_count(), 1);
        assert!(file.flows.get_flow(FlowKey::new(20022, 22022)).is_none());
    }

    #[test]
    fn drops_rows_at_absolute_floor() {
        let options = ReadOptions {
            rel_min: 0.0,
            ..ReadOptions::default()
        };
        let input = "\
timestep
1.0 3.2 1.0e7
captions
30 26 1.0e-4 30 28 2.0e-6 1.0e-99
22 20 5.0e-5 22 22 1.0e-6 1.0e-3
";
        let file = read(input.as_bytes(), &options).unwrap();
        assert_eq!(file.flows.flow_count(), 1);
    }

    #[test]
    fn drops_rows_with_depleted_source() {
        let input = "\
timestep
1.0 3.2 1.0e7
captions
30 26 1.0e-25 30 28 2.0e-6 1.0e-3
22 20 5.0e-5 22 22 1.0e-6 1.0e-3
";
        let file = read(input.as_bytes(), &ReadOptions::default()).unwrap();
        assert_eq!(file.flows.flow_count(), 1);
        assert!(file.flows.get_flow(FlowKey::new(26030, 28030)).is_none());
    }

    #[test]
    fn clamps_depleted_destination_abundance() {
        let input = "\
timestep
1.0 3.2 1.0e7
captions
30 26 1.0e-4 30 28 1.0e-25 1.0e-3
";
        let file = read(input.as_bytes(), &ReadOptions::default()).unwrap();
        let ni58 = file.flows.get_isotope(&IsotopeKey::from("ni58")).unwrap();
        assert_eq!(ni58.y(), f64::NEG_INFINITY);
    }

    #[test]
    fn all_rows_filtered_is_an_error() {
        let input = "\
timestep
1.0 3.2 1.0e7
captions
30 26 1.0e-25 30 28 2.0e-6 1.0e-3
";
        let result = read(input.as_bytes(), &ReadOptions::default());
        assert!(matches!(result, Err(Error::NoFlows(_))));
    }

    #[test]
    fn short_row_is_an_error() {
        let input = "\
timestep
1.0 3.2 1.0e7
captions
30 26 1.0e-4 30 28
";
        let result = read(input.as_bytes(), &ReadOptions::default());
        assert!(matches!(result, Err(Error::Parse { line: 4, .. })));
    }

    #[test]
    fn repeated_pair_accumulates() {
        let input = "\
timestep
1.0 3.2 1.0e7
captions
30 26 1.0e-4 30 28 2.0e-6 1.0e-3
30 26 1.0e-4 30 28 2.0e-6 2.0e-3
";
        let file = read(input.as_bytes(), &ReadOptions::default()).unwrap();
        assert_eq!(file.flows.flow_count(), 1);
        let flow = file.flows.get_flow(FlowKey::new(26030, 28030)).unwrap();
        assert_eq!(flow.magnitude(), 3.0e-3);
    }

    #[test]
    fn options_deserialize_from_toml() {
        let options: ReadOptions = toml::from_str("ymin = 1e-12\nrel_min = 1e-6\n").unwrap();
        assert_eq!(options.ymin, 1e-12);
        assert_eq!(options.rel_min, 1e-6);
        assert_eq!(options.abs_min, 1e-99);
    }
}
