use anyhow::Result;
use sheetdiff::DiffReport;
use std::io::Write;

pub fn write_json_report<W: Write>(w: &mut W, report: &DiffReport) -> Result<()> {
    sheetdiff::write_json_report(&mut *w, report)?;
    writeln!(w)?;
    Ok(())
}
