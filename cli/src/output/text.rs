use anyhow::Result;
use sheetdiff::{CellStatus, DiffReport, SheetDiffRecord, index_to_address};
use std::io::Write;

pub fn write_text_report<W: Write>(
    w: &mut W,
    report: &DiffReport,
    old_label: &str,
    new_label: &str,
    quiet: bool,
) -> Result<()> {
    if !report.has_changes() {
        writeln!(w, "No differences between {old_label} and {new_label}.")?;
        return Ok(());
    }

    if !quiet {
        writeln!(w, "Comparing {old_label} -> {new_label}")?;
        writeln!(w)?;
        for record in &report.sheets {
            write_sheet(w, record)?;
        }
    }

    let summary = &report.summary;
    writeln!(
        w,
        "Summary: {} row(s) modified, {} added, {} deleted",
        summary.rows_modified, summary.rows_added, summary.rows_deleted
    )?;

    Ok(())
}

fn write_sheet<W: Write>(w: &mut W, record: &SheetDiffRecord) -> Result<()> {
    if record.is_match {
        writeln!(w, "Sheet \"{}\":", record.name_a)?;
    } else {
        writeln!(w, "Sheet \"{}\" -> \"{}\":", record.name_a, record.name_b)?;
    }

    let mut any = false;
    for row in &record.grid_diff.rows {
        for cell in &row.cells {
            if cell.status == CellStatus::Equal {
                continue;
            }
            any = true;
            let address = index_to_address((row.row_index - 1) as u32, cell.col as u32);
            match cell.status {
                CellStatus::Added => writeln!(w, "  {address}: added \"{}\"", cell.b)?,
                CellStatus::Deleted => writeln!(w, "  {address}: deleted \"{}\"", cell.a)?,
                CellStatus::Modified => {
                    writeln!(w, "  {address}: \"{}\" -> \"{}\"", cell.a, cell.b)?
                }
                CellStatus::Equal => unreachable!(),
            }
        }
    }

    if !any {
        writeln!(w, "  (no cell changes)")?;
    }
    writeln!(w)?;

    Ok(())
}
