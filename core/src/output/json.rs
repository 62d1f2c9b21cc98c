//! JSON serialization of diff reports.
//!
//! Reports cross the rendering boundary as plain nested records (objects,
//! arrays, strings, numbers, booleans) so callers can template or re-emit
//! them without knowing the crate's types.

use crate::diff::DiffReport;
use std::io::Write;

pub fn serialize_diff_report(report: &DiffReport) -> serde_json::Result<String> {
    serde_json::to_string(report)
}

pub fn write_json_report<W: Write>(w: &mut W, report: &DiffReport) -> serde_json::Result<()> {
    serde_json::to_writer_pretty(w, report)
}
