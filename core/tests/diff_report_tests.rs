use std::io::Cursor;

use sheetdiff::{
    CellStatus, MISSING_SHEET_NAME, diff_workbooks, open_workbook_from_reader,
    serialize_diff_report,
};

mod common;
use common::{single_sheet_xlsx, worksheet_from_rows, zip_bytes};

fn decode_bytes(bytes: Vec<u8>) -> sheetdiff::Workbook {
    open_workbook_from_reader(Cursor::new(bytes)).expect("fixture should decode")
}

#[test]
fn decoded_fixtures_diff_end_to_end() {
    let a = decode_bytes(single_sheet_xlsx(
        "Sheet1",
        &worksheet_from_rows(&[&["A", "B"], &["1", "2"]]),
    ));
    let b = decode_bytes(single_sheet_xlsx(
        "Sheet1",
        &worksheet_from_rows(&[&["A", "B", "C"], &["1", "2", "3"]]),
    ));

    let report = diff_workbooks(&a, &b);
    assert!(report.has_changes());

    let record = &report.sheets[0];
    assert!(record.is_match);
    assert_eq!(record.grid_diff.max_cols, 3);

    let grown = &record.grid_diff.rows[1].cells[2];
    assert_eq!(grown.status, CellStatus::Added);
    assert_eq!(grown.a, "");
    assert_eq!(grown.b, "3");
}

#[test]
fn sheet_count_mismatch_round_trips_through_json() {
    let two_sheets = zip_bytes(&[
        (
            "xl/workbook.xml",
            r#"<workbook><sheets><sheet name="Main" sheetId="1"/><sheet name="Extra" sheetId="2"/></sheets></workbook>"#,
        ),
        (
            "xl/worksheets/sheet1.xml",
            r#"<worksheet><sheetData><row r="1"><c r="A1"><v>1</v></c></row></sheetData></worksheet>"#,
        ),
        (
            "xl/worksheets/sheet2.xml",
            r#"<worksheet><sheetData><row r="1"><c r="A1"><v>2</v></c></row></sheetData></worksheet>"#,
        ),
    ]);
    let one_sheet = single_sheet_xlsx(
        "Main",
        r#"<worksheet><sheetData><row r="1"><c r="A1"><v>1</v></c></row></sheetData></worksheet>"#,
    );

    let report = diff_workbooks(&decode_bytes(two_sheets), &decode_bytes(one_sheet));
    assert_eq!(report.sheets.len(), 2);

    let json = serialize_diff_report(&report).expect("report should serialize");
    let value: serde_json::Value = serde_json::from_str(&json).expect("valid JSON");

    assert_eq!(value["sheets"][1]["name_a"], "Extra");
    assert_eq!(value["sheets"][1]["name_b"], MISSING_SHEET_NAME);
    assert_eq!(value["sheets"][1]["is_match"], false);
    assert_eq!(
        value["sheets"][1]["grid_diff"]["rows"][0]["cells"][0]["status"],
        "deleted"
    );
}

#[test]
fn renamed_sheet_reports_no_cell_changes() {
    let a = decode_bytes(single_sheet_xlsx(
        "Sheet1",
        &worksheet_from_rows(&[&["Header"], &["Data A"]]),
    ));
    let b = decode_bytes(single_sheet_xlsx(
        "RENAMED_SHEET",
        &worksheet_from_rows(&[&["Header"], &["Data A"]]),
    ));

    let report = diff_workbooks(&a, &b);
    let record = &report.sheets[0];
    assert!(!record.is_match);
    assert!(record
        .grid_diff
        .rows
        .iter()
        .flat_map(|r| &r.cells)
        .all(|c| c.status == CellStatus::Equal));
    assert_eq!(report.summary.changed_rows(), 0);
}
