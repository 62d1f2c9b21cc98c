mod commands;
mod output;
mod source;

use clap::{Parser, Subcommand, ValueEnum};
use source::ReferenceResolutionError;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "sheetdiff")]
#[command(about = "Compare spreadsheet workbooks cell by cell")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Compare two workbooks")]
    Diff {
        #[arg(help = "Path to workbook A (or a repo-relative path with --old-ref)")]
        old: String,
        #[arg(help = "Path to workbook B (or a repo-relative path with --new-ref)")]
        new: String,
        #[arg(long, short, value_enum, default_value = "text", help = "Output format")]
        format: OutputFormat,
        #[arg(long, short, help = "Quiet mode: only show the summary")]
        quiet: bool,
        #[arg(long, value_name = "REF", help = "Read OLD from this git revision instead of disk")]
        old_ref: Option<String>,
        #[arg(long, value_name = "REF", help = "Read NEW from this git revision instead of disk")]
        new_ref: Option<String>,
        #[arg(long, value_name = "DIR", default_value = ".", help = "Git repository for --old-ref/--new-ref")]
        repo: String,
        #[arg(long, value_name = "URL", help = "Fetch refs from this remote before resolving")]
        remote: Option<String>,
    },
    #[command(about = "Show information about a workbook")]
    Info {
        #[arg(help = "Path to the workbook")]
        path: String,
    },
}

#[derive(Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Diff {
            old,
            new,
            format,
            quiet,
            old_ref,
            new_ref,
            repo,
            remote,
        } => commands::diff::run(commands::diff::DiffArgs {
            old,
            new,
            format,
            quiet,
            old_ref,
            new_ref,
            repo,
            remote,
        }),
        Commands::Info { path } => commands::info::run(&path),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            exit_code_for_error(&e)
        }
    }
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// 2 = the input could not be decoded (or another local failure), 3 = a git
/// reference could not be resolved to a file. Both abort the comparison.
fn exit_code_for_error(err: &anyhow::Error) -> ExitCode {
    if err.chain().any(|cause| cause.is::<ReferenceResolutionError>()) {
        ExitCode::from(3)
    } else {
        ExitCode::from(2)
    }
}
