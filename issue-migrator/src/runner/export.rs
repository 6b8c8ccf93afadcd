//! Export: fetch source repositories and stage them on disk.

use super::{FailurePolicy, RunnerError};
use crate::api::IssueTracker;
use crate::model::RepoLocation;
use crate::staging;
use crate::summary::ExportResult;
use futures::stream::{self, StreamExt, TryStreamExt};
use std::path::Path;
use tracing::{error, info, info_span, Instrument};

/// Fetches and stages every repository in `repos` under `owner`.
///
/// Up to `concurrency` repositories are exported at once, so results arrive
/// in completion order. Under [`FailurePolicy::Abort`] the first failure
/// cancels the remaining exports and is returned; under
/// [`FailurePolicy::Continue`] it is recorded as [`ExportResult::Failed`].
///
/// # Errors
///
/// Returns [`RunnerError`] for the first failed repository under
/// [`FailurePolicy::Abort`].
pub async fn export_repos<T: IssueTracker>(
    tracker: &T,
    owner: &str,
    repos: &[String],
    dir: &Path,
    concurrency: usize,
    policy: FailurePolicy,
) -> Result<Vec<ExportResult>, RunnerError> {
    info!(owner, count = repos.len(), dir = %dir.display(), "Exporting repositories");

    let outcomes = stream::iter(repos)
        .map(|name| {
            let repo = RepoLocation::new(owner, name.as_str());
            async move {
                let result = export_repository(tracker, &repo, dir).await;
                (repo, result)
            }
        })
        .buffer_unordered(concurrency.max(1));

    match policy {
        FailurePolicy::Abort => outcomes.map(|(_, result)| result).try_collect().await,
        FailurePolicy::Continue => Ok(outcomes
            .map(|(repo, result)| {
                result.unwrap_or_else(|e| {
                    error!(repo = %repo, error = %e, "Failed to export repository");
                    ExportResult::Failed {
                        repository: repo.full_name(),
                        error: e.to_string(),
                    }
                })
            })
            .collect()
            .await),
    }
}

/// Fetches all issues, then all comments, of one repository and stages both.
async fn export_repository<T: IssueTracker>(
    tracker: &T,
    repo: &RepoLocation,
    dir: &Path,
) -> Result<ExportResult, RunnerError> {
    let span = info_span!("export", repo = %repo);

    async {
        info!("Fetching issues and comments");

        let fetch_error = |source| RunnerError::Fetch {
            repository: repo.full_name(),
            source,
        };
        let issues = tracker.list_issues(repo).await.map_err(fetch_error)?;
        let comments = tracker.list_comments(repo).await.map_err(fetch_error)?;

        let stage_error = |source| RunnerError::Staging {
            repository: repo.full_name(),
            source,
        };
        staging::save_issues(dir, &repo.name, &issues).map_err(stage_error)?;
        staging::save_comments(dir, &repo.name, &comments).map_err(stage_error)?;

        info!(
            issues = issues.len(),
            comments = comments.len(),
            "Repository staged"
        );
        Ok(ExportResult::Exported {
            repository: repo.full_name(),
            issues: issues.len(),
            comments: comments.len(),
        })
    }
    .instrument(span)
    .await
}
