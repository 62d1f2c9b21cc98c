use crate::OutputFormat;
use crate::output::{json, text};
use crate::source::{ResolvedInput, resolve_git_file};
use anyhow::{Context, Result};
use sheetdiff::{DiffReport, decode, diff_workbooks};
use std::io;
use std::process::ExitCode;

pub struct DiffArgs {
    pub old: String,
    pub new: String,
    pub format: OutputFormat,
    pub quiet: bool,
    pub old_ref: Option<String>,
    pub new_ref: Option<String>,
    pub repo: String,
    pub remote: Option<String>,
}

pub fn run(args: DiffArgs) -> Result<ExitCode> {
    let old_input = resolve_input(&args, &args.old, args.old_ref.as_deref())?;
    let new_input = resolve_input(&args, &args.new, args.new_ref.as_deref())?;

    // Each side decodes independently; either failure aborts the whole
    // comparison before any diffing happens.
    let workbook_a = decode(old_input.path())
        .with_context(|| format!("Failed to decode workbook: {}", old_input.label))?;
    let workbook_b = decode(new_input.path())
        .with_context(|| format!("Failed to decode workbook: {}", new_input.label))?;

    let report = diff_workbooks(&workbook_a, &workbook_b);

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match args.format {
        OutputFormat::Text => {
            text::write_text_report(
                &mut handle,
                &report,
                &old_input.label,
                &new_input.label,
                args.quiet,
            )?;
        }
        OutputFormat::Json => {
            json::write_json_report(&mut handle, &report)?;
        }
    }

    Ok(exit_code_from_report(&report))
}

fn resolve_input(
    args: &DiffArgs,
    target: &str,
    reference: Option<&str>,
) -> Result<ResolvedInput> {
    match reference {
        Some(reference) => {
            resolve_git_file(&args.repo, args.remote.as_deref(), reference, target)
                .with_context(|| format!("Failed to resolve {reference}:{target}"))
        }
        None => Ok(ResolvedInput::local(target)),
    }
}

fn exit_code_from_report(report: &DiffReport) -> ExitCode {
    if report.has_changes() {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}
