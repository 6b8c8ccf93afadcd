//! Import: load staged repositories back into replayable issues.

use super::RunnerError;
use crate::model::{IssueInfo, RepoLocation};
use crate::staging;
use crate::transform::TransformOptions;
use std::path::Path;
use tracing::info;

/// Loads the staged repositories and concatenates their issues.
///
/// Repositories are taken in the order of `repos`; within each, issues keep
/// their creation order.
///
/// # Errors
///
/// Returns [`RunnerError::Staging`] for the first repository whose files are
/// missing, unparsable or inconsistent.
pub fn import_repos(
    dir: &Path,
    owner: &str,
    repos: &[String],
    options: &TransformOptions,
) -> Result<Vec<IssueInfo>, RunnerError> {
    let mut all = Vec::new();

    for name in repos {
        let repo = RepoLocation::new(owner, name.as_str());
        let infos = staging::load_issue_infos(dir, &repo, options).map_err(|source| {
            RunnerError::Staging {
                repository: repo.full_name(),
                source,
            }
        })?;
        all.extend(infos);
    }

    info!(repositories = repos.len(), issues = all.len(), "Imported staged issues");
    Ok(all)
}
