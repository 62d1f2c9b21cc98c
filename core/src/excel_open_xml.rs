//! Decoding of package-based (ZIP of XML parts) workbooks.
//!
//! Reads the shared-string table, enumerates the manifest's sheets, locates
//! each worksheet part, and parses it into the grid model.

use crate::container::{ContainerError, ZipContainer};
use crate::decode::FormatError;
use crate::sheet_xml::{
    SheetEntry, parse_shared_strings, parse_workbook_manifest, parse_worksheet,
};
use crate::workbook::Workbook;
use std::io::{Read, Seek};
use std::path::Path;

pub(crate) fn open_workbook_from_container(
    container: &mut ZipContainer,
) -> Result<Workbook, FormatError> {
    let shared_strings = match container.read_file_optional("xl/sharedStrings.xml")? {
        Some(bytes) => parse_shared_strings(&bytes)?,
        None => Vec::new(),
    };

    let manifest_bytes = container
        .read_file("xl/workbook.xml")
        .map_err(|_| FormatError::WorkbookManifestMissing)?;
    let entries = parse_workbook_manifest(&manifest_bytes)?;
    tracing::debug!(sheets = entries.len(), "parsed workbook manifest");

    let mut workbook = Workbook::new();
    for (index, entry) in entries.iter().enumerate() {
        let Some(bytes) = locate_worksheet_part(container, entry, index)? else {
            tracing::debug!(sheet = %entry.name, "worksheet part not found, skipping");
            continue;
        };
        let grid = parse_worksheet(&bytes, &shared_strings)?;
        workbook.insert_sheet(entry.name.clone(), grid);
    }

    Ok(workbook)
}

/// Locate a sheet's worksheet XML: by 1-based manifest position first, then
/// by the manifest's `sheetId`. Both missing means the sheet is treated as
/// absent, not as an error.
fn locate_worksheet_part(
    container: &mut ZipContainer,
    entry: &SheetEntry,
    index: usize,
) -> Result<Option<Vec<u8>>, ContainerError> {
    let positional = format!("xl/worksheets/sheet{}.xml", index + 1);
    if let Some(bytes) = container.read_file_optional(&positional)? {
        return Ok(Some(bytes));
    }

    if let Some(id) = entry.sheet_id
        && let Some(bytes) =
            container.read_file_optional(&format!("xl/worksheets/sheet{id}.xml"))?
    {
        return Ok(Some(bytes));
    }

    Ok(None)
}

pub fn open_workbook(path: impl AsRef<Path>) -> Result<Workbook, FormatError> {
    let mut container = ZipContainer::open_from_path(path.as_ref())?;
    open_workbook_from_container(&mut container)
}

pub fn open_workbook_from_reader<R: Read + Seek + 'static>(
    reader: R,
) -> Result<Workbook, FormatError> {
    let mut container = ZipContainer::open_from_reader(reader)?;
    open_workbook_from_container(&mut container)
}
