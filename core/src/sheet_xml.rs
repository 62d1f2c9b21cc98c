//! XML parsing for the package-based workbook parts.
//!
//! Handles the shared-string table, the workbook manifest, and worksheet
//! grids, turning each worksheet into a dense [`Grid`] of display text.

use crate::addressing::column_from_address;
use crate::workbook::{Grid, GridBuilder};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SheetParseError {
    #[error("XML parse error: {0}")]
    XmlError(String),
    #[error("invalid cell address: {0}")]
    InvalidAddress(String),
    #[error("shared string index {0} out of bounds")]
    SharedStringOutOfBounds(usize),
}

/// One `<sheet>` entry from the workbook manifest, in document order.
pub struct SheetEntry {
    pub name: String,
    pub sheet_id: Option<u32>,
}

/// Parse the shared-string table. Each `<si>` entry's display text is the
/// concatenation of all its `<t>` fragments in document order; an entry
/// with no fragments is the empty string.
pub fn parse_shared_strings(xml: &[u8]) -> Result<Vec<String>, SheetParseError> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(false);
    let mut buf = Vec::new();
    let mut strings = Vec::new();
    let mut current = String::new();
    let mut in_si = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) if e.name().as_ref() == b"si" => {
                current.clear();
                in_si = true;
            }
            Ok(Event::Start(e)) if e.name().as_ref() == b"t" && in_si => {
                let text = reader
                    .read_text(e.name())
                    .map_err(|e| SheetParseError::XmlError(e.to_string()))?
                    .into_owned();
                current.push_str(&text);
            }
            Ok(Event::End(e)) if e.name().as_ref() == b"si" => {
                strings.push(std::mem::take(&mut current));
                in_si = false;
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(SheetParseError::XmlError(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    Ok(strings)
}

/// Enumerate the manifest's declared sheets in document order.
pub fn parse_workbook_manifest(xml: &[u8]) -> Result<Vec<SheetEntry>, SheetParseError> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();
    let mut sheets = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) if e.name().as_ref() == b"sheet" => {
                let mut name = None;
                let mut sheet_id = None;
                for attr in e.attributes() {
                    let attr = attr.map_err(|e| SheetParseError::XmlError(e.to_string()))?;
                    match attr.key.as_ref() {
                        b"name" => {
                            name = Some(attr.unescape_value().map_err(to_xml_err)?.into_owned())
                        }
                        b"sheetId" => {
                            let parsed = attr.unescape_value().map_err(to_xml_err)?;
                            sheet_id = parsed.parse::<u32>().ok();
                        }
                        _ => {}
                    }
                }
                if let Some(name) = name {
                    sheets.push(SheetEntry { name, sheet_id });
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(SheetParseError::XmlError(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    Ok(sheets)
}

/// Parse one worksheet part into a dense grid.
///
/// Rows come from `<row r="...">` (1-based), columns from the letter prefix
/// of each cell's `r` attribute. A cell whose `t` attribute is `"s"` reads
/// its text from the shared-string table; any other cell uses its literal
/// `<v>` text, empty if absent. Every declared cell extends the grid
/// bounds, including cells with no value.
pub fn parse_worksheet(xml: &[u8], shared_strings: &[String]) -> Result<Grid, SheetParseError> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(false);
    let mut buf = Vec::new();
    let mut builder = GridBuilder::new();
    let mut current_row: Option<u32> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) if e.name().as_ref() == b"row" => {
                let raw = get_attr_value(&e, b"r")?.ok_or_else(|| {
                    SheetParseError::XmlError("row element missing r attribute".into())
                })?;
                let index = raw
                    .trim()
                    .parse::<u32>()
                    .map_err(|e| SheetParseError::XmlError(format!("bad row index '{raw}': {e}")))?;
                if index == 0 {
                    return Err(SheetParseError::XmlError("row index must be 1-based".into()));
                }
                current_row = Some(index - 1);
            }
            Ok(Event::Start(e)) if e.name().as_ref() == b"c" => {
                let row = current_row.ok_or_else(|| {
                    SheetParseError::XmlError("cell declared outside of a row".into())
                })?;
                let (col, value) = parse_cell(&mut reader, e, shared_strings)?;
                builder.record(row, col, value);
            }
            Ok(Event::Empty(e)) if e.name().as_ref() == b"c" => {
                let row = current_row.ok_or_else(|| {
                    SheetParseError::XmlError("cell declared outside of a row".into())
                })?;
                let col = cell_column(&e)?;
                builder.record(row, col, String::new());
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(SheetParseError::XmlError(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    Ok(builder.finish())
}

fn parse_cell(
    reader: &mut Reader<&[u8]>,
    start: BytesStart,
    shared_strings: &[String],
) -> Result<(u32, String), SheetParseError> {
    let col = cell_column(&start)?;
    let cell_type = get_attr_value(&start, b"t")?;

    let mut value_text: Option<String> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) if e.name().as_ref() == b"v" => {
                let text = reader
                    .read_text(e.name())
                    .map_err(|e| SheetParseError::XmlError(e.to_string()))?
                    .into_owned();
                value_text = Some(text);
            }
            Ok(Event::End(e)) if e.name().as_ref() == start.name().as_ref() => break,
            Ok(Event::Eof) => {
                return Err(SheetParseError::XmlError("unexpected EOF inside cell".into()));
            }
            Err(e) => return Err(SheetParseError::XmlError(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    let value = resolve_value(value_text, cell_type.as_deref(), shared_strings)?;
    Ok((col, value))
}

fn cell_column(element: &BytesStart<'_>) -> Result<u32, SheetParseError> {
    let address = get_attr_value(element, b"r")?
        .ok_or_else(|| SheetParseError::XmlError("cell missing address".into()))?;
    column_from_address(&address).ok_or(SheetParseError::InvalidAddress(address))
}

fn resolve_value(
    value_text: Option<String>,
    cell_type: Option<&str>,
    shared_strings: &[String],
) -> Result<String, SheetParseError> {
    let raw = value_text.unwrap_or_default();

    if cell_type == Some("s") {
        let idx = raw
            .trim()
            .parse::<usize>()
            .map_err(|e| SheetParseError::XmlError(format!("bad shared string index '{raw}': {e}")))?;
        let text = shared_strings
            .get(idx)
            .ok_or(SheetParseError::SharedStringOutOfBounds(idx))?;
        return Ok(text.clone());
    }

    Ok(raw)
}

fn get_attr_value(
    element: &BytesStart<'_>,
    key: &[u8],
) -> Result<Option<String>, SheetParseError> {
    for attr in element.attributes() {
        let attr = attr.map_err(|e| SheetParseError::XmlError(e.to_string()))?;
        if attr.key.as_ref() == key {
            return Ok(Some(attr.unescape_value().map_err(to_xml_err)?.into_owned()));
        }
    }
    Ok(None)
}

fn to_xml_err(err: quick_xml::Error) -> SheetParseError {
    SheetParseError::XmlError(err.to_string())
}
