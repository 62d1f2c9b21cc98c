//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use std::io::{Cursor, Write};
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::FileOptions;

/// Build an in-memory ZIP archive from (entry name, contents) pairs.
pub fn zip_bytes(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut buf = Vec::new();
    {
        let cursor = Cursor::new(&mut buf);
        let mut zip = ZipWriter::new(cursor);
        let options = FileOptions::default().compression_method(CompressionMethod::Stored);

        for (name, contents) in entries {
            zip.start_file(*name, options)
                .unwrap_or_else(|e| panic!("start entry {name}: {e}"));
            zip.write_all(contents.as_bytes())
                .unwrap_or_else(|e| panic!("write entry {name}: {e}"));
        }

        zip.finish().expect("finish zip");
    }
    buf
}

/// A minimal single-sheet package around the given worksheet XML.
pub fn single_sheet_xlsx(sheet_name: &str, sheet_xml: &str) -> Vec<u8> {
    let manifest = format!(
        r#"<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheets><sheet name="{sheet_name}" sheetId="1"/></sheets></workbook>"#
    );
    zip_bytes(&[
        ("[Content_Types].xml", "<Types/>"),
        ("xl/workbook.xml", &manifest),
        ("xl/worksheets/sheet1.xml", sheet_xml),
    ])
}

/// Worksheet XML holding one inline (non-shared) string per cell.
///
/// `rows` are written in order as 1-based row indices with `t="str"` cells,
/// so fixtures read back exactly the literal text supplied here.
pub fn worksheet_from_rows(rows: &[&[&str]]) -> String {
    let mut body = String::new();
    for (r, row) in rows.iter().enumerate() {
        let row_index = r + 1;
        body.push_str(&format!(r#"<row r="{row_index}">"#));
        for (c, value) in row.iter().enumerate() {
            let address = sheetdiff::index_to_address(r as u32, c as u32);
            body.push_str(&format!(r#"<c r="{address}" t="str"><v>{value}</v></c>"#));
        }
        body.push_str("</row>");
    }
    format!(
        r#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>{body}</sheetData></worksheet>"#
    )
}

/// Write fixture bytes to a temp file with the given suffix, returning the
/// handle (the file lives as long as the handle does).
pub fn temp_fixture(bytes: &[u8], suffix: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("create temp fixture");
    file.write_all(bytes).expect("write temp fixture");
    file.flush().expect("flush temp fixture");
    file
}
