//! sheetdiff: decode spreadsheet workbooks and diff them cell by cell.
//!
//! This crate provides functionality for:
//! - Decoding workbook files (ZIP-of-XML packages and legacy binary `.xls`)
//!   into a uniform grid model of cell display text
//! - Comparing two decoded workbooks position by position, sheet by sheet
//! - Serializing the resulting diff report to JSON
//!
//! Alignment is strictly positional: sheets pair by declaration order,
//! rows and columns by index. There is no formula evaluation, no fuzzy
//! row matching, and no move detection.
//!
//! # Quick Start
//!
//! ```ignore
//! let wb_a = sheetdiff::decode("a.xlsx")?;
//! let wb_b = sheetdiff::decode("b.xlsx")?;
//! let report = sheetdiff::diff_workbooks(&wb_a, &wb_b);
//!
//! for sheet in &report.sheets {
//!     println!("{} -> {}: match={}", sheet.name_a, sheet.name_b, sheet.is_match);
//! }
//! ```

mod addressing;
mod container;
mod decode;
mod diff;
mod excel_legacy;
mod excel_open_xml;
mod output;
mod sheet_xml;
mod workbook;

pub use addressing::{column_from_address, index_to_address};
pub use container::{ContainerError, ZipContainer};
pub use decode::{FormatError, decode};
pub use diff::{
    CellDiff, CellStatus, DiffReport, DiffSummary, GridDiff, MISSING_SHEET_NAME, RowDiff,
    SheetDiffRecord, diff_grids, diff_workbooks,
};
pub use excel_open_xml::{open_workbook, open_workbook_from_reader};
pub use output::json::{serialize_diff_report, write_json_report};
pub use sheet_xml::{
    SheetEntry, SheetParseError, parse_shared_strings, parse_workbook_manifest, parse_worksheet,
};
pub use workbook::{Grid, GridBuilder, Workbook};
