use anyhow::{Context, Result};
use sheetdiff::decode;
use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

pub fn run(path: &str) -> Result<ExitCode> {
    let workbook = decode(path).with_context(|| format!("Failed to decode workbook: {path}"))?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    let filename = Path::new(path)
        .file_name()
        .map(|s| s.to_string_lossy())
        .unwrap_or_else(|| path.into());

    writeln!(handle, "Workbook: {}", filename)?;
    writeln!(handle, "Sheets: {}", workbook.sheet_count())?;

    for (name, grid) in workbook.iter() {
        writeln!(
            handle,
            "  - \"{}\" {}x{}",
            name,
            grid.nrows(),
            grid.max_cols
        )?;
    }

    Ok(ExitCode::SUCCESS)
}
