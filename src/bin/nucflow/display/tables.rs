use std::io::{self, Write};

use nucflow::FlowCollection;

use crate::util::text::truncate;

const INDENT: &str = "  ";
const TABLE_WIDTH: usize = 56;

/// Prints a titled key/value box to stdout.
pub fn print_kv_table(title: &str, rows: &[(&str, String)]) {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let key_w = rows.iter().map(|(k, _)| k.len()).max().unwrap_or(0).max(8);
    let val_w = TABLE_WIDTH.saturating_sub(key_w + 7);

    let _ = writeln!(out);
    let _ = writeln!(out, "{}┌─ {} ─┐", INDENT, truncate(title, TABLE_WIDTH - 6));
    let _ = writeln!(
        out,
        "{}┌{}┬{}┐",
        INDENT,
        "─".repeat(key_w + 2),
        "─".repeat(val_w + 2)
    );
    for (key, value) in rows {
        let _ = writeln!(
            out,
            "{}│ {:<key_w$} │ {:>val_w$} │",
            INDENT,
            key,
            truncate(value, val_w),
        );
    }
    let _ = writeln!(
        out,
        "{}└{}┴{}┘",
        INDENT,
        "─".repeat(key_w + 2),
        "─".repeat(val_w + 2)
    );
}

/// Prints the `top` largest flows of a collection, descending, each
/// with a share bar relative to the largest.
pub fn print_flow_list(title: &str, flows: &FlowCollection, top: usize) {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let max = flows
        .flows()
        .map(|f| f.magnitude())
        .fold(f64::NEG_INFINITY, f64::max);

    let _ = writeln!(out);
    let _ = writeln!(out, "{}┌─ {} ─┐", INDENT, truncate(title, TABLE_WIDTH - 6));
    for flow in largest(flows, top) {
        let share = if max > 0.0 { flow.magnitude() / max } else { 0.0 };
        let _ = writeln!(
            out,
            "{}  {:<18} {:>12.4e}  {}",
            INDENT,
            truncate(&flow.to_string(), 18),
            flow.magnitude(),
            make_bar(share, 20),
        );
    }
    let remaining = flows.flow_count().saturating_sub(top);
    if remaining > 0 {
        let _ = writeln!(out, "{}  … and {} more", INDENT, remaining);
    }
}

/// Selects the `top` largest flows in descending magnitude order.
/// Collections arrive sorted ascending, but this does not rely on it.
fn largest(flows: &FlowCollection, top: usize) -> Vec<&nucflow::Flow> {
    let mut all: Vec<&nucflow::Flow> = flows.flows().collect();
    all.sort_by(|a, b| {
        b.magnitude()
            .partial_cmp(&a.magnitude())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    all.truncate(top);
    all
}

fn make_bar(share: f64, width: usize) -> String {
    let filled = (share.clamp(0.0, 1.0) * width as f64).round() as usize;
    let mut bar = String::with_capacity(width * 3);
    for _ in 0..filled {
        bar.push('█');
    }
    for _ in filled..width {
        bar.push('░');
    }
    bar
}
