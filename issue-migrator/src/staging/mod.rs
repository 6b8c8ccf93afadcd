//! Staging fetched records on disk between export and import.
//!
//! Each source repository produces two files in the staging directory:
//! ```text
//! staging/
//! ├── <repo>.json            # raw issues, newest first
//! └── <repo>_comments.json   # raw comments, newest first
//! ```
//! Both are JSON arrays indented with four spaces.

mod error;

pub use error::StagingError;

use crate::model::{IssueInfo, RawComment, RawIssue, RepoLocation};
use crate::transform::{associate_comments, TransformOptions};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Path of the staged issue file for `repo`.
pub fn issues_path(dir: &Path, repo: &str) -> PathBuf {
    dir.join(format!("{repo}.json"))
}

/// Path of the staged comment file for `repo`.
pub fn comments_path(dir: &Path, repo: &str) -> PathBuf {
    dir.join(format!("{repo}_comments.json"))
}

/// Writes `issues` to `<dir>/<repo>.json`, creating `dir` if needed.
///
/// # Errors
///
/// Returns [`StagingError`] if the directory or file cannot be written.
pub fn save_issues(dir: &Path, repo: &str, issues: &[RawIssue]) -> Result<PathBuf, StagingError> {
    let path = issues_path(dir, repo);
    write_pretty(&path, issues)?;
    debug!(path = %path.display(), count = issues.len(), "Staged issues");
    Ok(path)
}

/// Writes `comments` to `<dir>/<repo>_comments.json`, creating `dir` if needed.
///
/// # Errors
///
/// Returns [`StagingError`] if the directory or file cannot be written.
pub fn save_comments(
    dir: &Path,
    repo: &str,
    comments: &[RawComment],
) -> Result<PathBuf, StagingError> {
    let path = comments_path(dir, repo);
    write_pretty(&path, comments)?;
    debug!(path = %path.display(), count = comments.len(), "Staged comments");
    Ok(path)
}

/// Reads back the staged issues and comments of `repo`, in file order.
///
/// # Errors
///
/// Returns [`StagingError`] if either file is missing or unparsable.
pub fn load_raw(
    dir: &Path,
    repo: &str,
) -> Result<(Vec<RawIssue>, Vec<RawComment>), StagingError> {
    let issues = read_json(&issues_path(dir, repo))?;
    let comments = read_json(&comments_path(dir, repo))?;
    Ok((issues, comments))
}

/// Loads the staged records of `repo` and assembles them into [`IssueInfo`]s.
///
/// Staged listings are newest first, so both are reversed before comments
/// are associated. The result is in creation order, oldest issue first.
///
/// # Errors
///
/// Returns [`StagingError`] if a file is missing or unparsable, or the
/// records fail association.
pub fn load_issue_infos(
    dir: &Path,
    repo: &RepoLocation,
    options: &TransformOptions,
) -> Result<Vec<IssueInfo>, StagingError> {
    let (mut issues, mut comments) = load_raw(dir, &repo.name)?;
    issues.reverse();
    comments.reverse();

    let infos = associate_comments(repo, &issues, &comments, options)?;
    let attached = associated_comments(&infos);
    info!(
        repo = %repo,
        issues = infos.len(),
        comments = attached,
        dropped = comments.len() - attached,
        "Loaded staged repository"
    );
    Ok(infos)
}

/// Number of comments attached to `infos`, after pull request and unmatched comments were dropped.
fn associated_comments(infos: &[IssueInfo]) -> usize {
    infos.iter().map(|info| info.comments.len()).sum()
}

fn write_pretty<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StagingError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| StagingError::IoError {
            path: parent.display().to_string(),
            source: e,
        })?;
    }

    let mut buffer = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(b"    "));
    value
        .serialize(&mut serializer)
        .map_err(|e| StagingError::SerializeError {
            path: path.display().to_string(),
            source: e,
        })?;
    buffer.push(b'\n');

    std::fs::write(path, buffer).map_err(|e| StagingError::IoError {
        path: path.display().to_string(),
        source: e,
    })
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, StagingError> {
    let content = std::fs::read_to_string(path).map_err(|e| StagingError::IoError {
        path: path.display().to_string(),
        source: e,
    })?;

    serde_json::from_str(&content).map_err(|e| StagingError::ParseError {
        path: path.display().to_string(),
        source: e,
    })
}
