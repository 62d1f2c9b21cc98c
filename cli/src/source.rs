//! Resolution of workbook inputs to local file paths.
//!
//! Inputs come either from disk or from a git history: a `{ref, path}` pair
//! (optionally against a remote URL) is materialized through the `git` CLI
//! into a temporary file that lives for the duration of the comparison.

use std::ffi::OsStr;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReferenceResolutionError {
    #[error("not a git repository: {0}")]
    InvalidRepository(String),
    #[error("unknown revision '{reference}': {detail}")]
    UnknownReference { reference: String, detail: String },
    #[error("path '{path}' not found at revision '{reference}'")]
    PathNotFound { reference: String, path: String },
    #[error("could not fetch '{reference}' from '{remote}': {detail}")]
    FetchFailed {
        remote: String,
        reference: String,
        detail: String,
    },
    #[error("'{0}' does not have a .xlsx or .xls extension")]
    UnsupportedExtension(String),
    #[error("git invocation failed: {0}")]
    GitInvocation(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A workbook input resolved to a readable path. Git-sourced inputs carry
/// their backing temp file; dropping the handle deletes it.
#[derive(Debug)]
pub struct ResolvedInput {
    path: PathBuf,
    pub label: String,
    _temp: Option<NamedTempFile>,
}

impl ResolvedInput {
    pub fn local(path: &str) -> ResolvedInput {
        ResolvedInput {
            path: PathBuf::from(path),
            label: path.to_string(),
            _temp: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Materialize `path` as stored at `reference` in the repository at
/// `repo`. With `remote`, the reference is shallow-fetched from that URL
/// first and read from `FETCH_HEAD`.
pub fn resolve_git_file(
    repo: &str,
    remote: Option<&str>,
    reference: &str,
    path: &str,
) -> Result<ResolvedInput, ReferenceResolutionError> {
    let suffix = workbook_suffix(path)?;

    if !Path::new(repo).is_dir() {
        return Err(ReferenceResolutionError::InvalidRepository(repo.to_string()));
    }

    let resolved_ref = match remote {
        Some(url) => {
            fetch_remote(repo, url, reference)?;
            "FETCH_HEAD".to_string()
        }
        None => {
            verify_reference(repo, reference)?;
            reference.to_string()
        }
    };

    let normalized = path.replace('\\', "/");
    let bytes = git_show(repo, &resolved_ref, &normalized).map_err(|detail| {
        classify_show_failure(reference, &normalized, detail)
    })?;
    tracing::debug!(reference, path = %normalized, bytes = bytes.len(), "materialized git file");

    let mut temp = tempfile::Builder::new().suffix(suffix).tempfile()?;
    temp.write_all(&bytes)?;
    temp.flush()?;

    Ok(ResolvedInput {
        path: temp.path().to_path_buf(),
        label: format!("{reference}:{normalized}"),
        _temp: Some(temp),
    })
}

fn workbook_suffix(path: &str) -> Result<&'static str, ReferenceResolutionError> {
    match Path::new(path).extension().and_then(OsStr::to_str) {
        Some(ext) if ext.eq_ignore_ascii_case("xlsx") => Ok(".xlsx"),
        Some(ext) if ext.eq_ignore_ascii_case("xls") => Ok(".xls"),
        _ => Err(ReferenceResolutionError::UnsupportedExtension(
            path.to_string(),
        )),
    }
}

fn verify_reference(repo: &str, reference: &str) -> Result<(), ReferenceResolutionError> {
    let output = run_git(repo, &["rev-parse", "--verify", "--quiet", reference])?;
    if output.status.success() {
        Ok(())
    } else {
        Err(ReferenceResolutionError::UnknownReference {
            reference: reference.to_string(),
            detail: stderr_text(&output.stderr),
        })
    }
}

fn fetch_remote(repo: &str, url: &str, reference: &str) -> Result<(), ReferenceResolutionError> {
    let output = run_git(repo, &["fetch", "--depth", "1", url, reference])?;
    if output.status.success() {
        Ok(())
    } else {
        Err(ReferenceResolutionError::FetchFailed {
            remote: url.to_string(),
            reference: reference.to_string(),
            detail: stderr_text(&output.stderr),
        })
    }
}

fn git_show(repo: &str, reference: &str, path: &str) -> Result<Vec<u8>, String> {
    let object = format!("{reference}:{path}");
    let output = run_git(repo, &["show", &object]).map_err(|e| e.to_string())?;
    if output.status.success() {
        Ok(output.stdout)
    } else {
        Err(stderr_text(&output.stderr))
    }
}

fn classify_show_failure(
    reference: &str,
    path: &str,
    detail: String,
) -> ReferenceResolutionError {
    if detail.contains("does not exist") || detail.contains("exists on disk, but not in") {
        ReferenceResolutionError::PathNotFound {
            reference: reference.to_string(),
            path: path.to_string(),
        }
    } else {
        ReferenceResolutionError::UnknownReference {
            reference: reference.to_string(),
            detail,
        }
    }
}

fn run_git(repo: &str, args: &[&str]) -> Result<std::process::Output, ReferenceResolutionError> {
    Command::new("git")
        .arg("-C")
        .arg(repo)
        .args(args)
        .output()
        .map_err(|e| ReferenceResolutionError::GitInvocation(e.to_string()))
}

fn stderr_text(stderr: &[u8]) -> String {
    String::from_utf8_lossy(stderr).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_gate_accepts_only_workbook_suffixes() {
        assert_eq!(workbook_suffix("dir/book.xlsx").unwrap(), ".xlsx");
        assert_eq!(workbook_suffix("Book.XLS").unwrap(), ".xls");
        assert!(matches!(
            workbook_suffix("notes.txt"),
            Err(ReferenceResolutionError::UnsupportedExtension(_))
        ));
        assert!(matches!(
            workbook_suffix("no_extension"),
            Err(ReferenceResolutionError::UnsupportedExtension(_))
        ));
    }

    #[test]
    fn missing_repository_directory_is_rejected() {
        let err = resolve_git_file("/definitely/missing/repo", None, "main", "a.xlsx")
            .expect_err("missing repo should fail");
        assert!(matches!(
            err,
            ReferenceResolutionError::InvalidRepository(_)
        ));
    }
}
