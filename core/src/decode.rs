//! Format dispatch for the two supported workbook container formats.

use crate::container::ContainerError;
use crate::sheet_xml::SheetParseError;
use crate::workbook::Workbook;
use std::path::Path;
use thiserror::Error;

/// Failure to decode an input file. Permanent for a given input; the
/// variants separate "not a spreadsheet container at all" from "container
/// with a missing or corrupt required part" from "legacy reader failure".
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FormatError {
    #[error("container error: {0}")]
    Container(#[from] ContainerError),
    #[error("workbook manifest missing or unreadable (xl/workbook.xml)")]
    WorkbookManifestMissing,
    #[error("sheet parse error: {0}")]
    SheetParse(#[from] SheetParseError),
    #[error("legacy workbook could not be read: {0}")]
    Legacy(#[from] calamine::XlsError),
}

/// Decode a workbook file into its in-memory grid model.
///
/// Dispatch is by extension: `.xls` routes to the legacy binary reader,
/// everything else is treated as a ZIP-of-XML package and validated as a
/// ZIP archive up front.
pub fn decode(path: impl AsRef<Path>) -> Result<Workbook, FormatError> {
    let path = path.as_ref();
    if has_legacy_extension(path) {
        crate::excel_legacy::open_workbook_legacy(path)
    } else {
        crate::excel_open_xml::open_workbook(path)
    }
}

fn has_legacy_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("xls"))
        .unwrap_or(false)
}
