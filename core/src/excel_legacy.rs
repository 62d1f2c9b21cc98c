//! Decoding of legacy binary workbooks via the `calamine` reader.
//!
//! Cell values are converted to display text on the way in; the one special
//! rule is that floats which are mathematically integers render without a
//! fractional part (`10.0` becomes `"10"`).

use crate::decode::FormatError;
use crate::workbook::{GridBuilder, Workbook};
use calamine::{Data, Reader, Xls, open_workbook};
use std::path::Path;

pub fn open_workbook_legacy(path: impl AsRef<Path>) -> Result<Workbook, FormatError> {
    let mut reader: Xls<_> = open_workbook(path.as_ref())?;

    let mut workbook = Workbook::new();
    for (name, range) in reader.worksheets() {
        let mut builder = GridBuilder::new();
        let (start_row, start_col) = range.start().unwrap_or((0, 0));
        for (r, row) in range.rows().enumerate() {
            for (c, value) in row.iter().enumerate() {
                if matches!(value, Data::Empty) {
                    continue;
                }
                builder.record(start_row + r as u32, start_col + c as u32, display_text(value));
            }
        }
        tracing::debug!(sheet = %name, "read legacy sheet");
        workbook.insert_sheet(name, builder.finish());
    }

    Ok(workbook)
}

pub(crate) fn display_text(value: &Data) -> String {
    match value {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => float_text(*f),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        Data::DateTime(dt) => float_text(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(e) => e.to_string(),
    }
}

fn float_text(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
        (f as i64).to_string()
    } else {
        f.to_string()
    }
}
