//! Replay: recreate issues and comments in the destination repository.

use super::{FailurePolicy, RunnerError};
use crate::api::{ApiError, IssueTracker};
use crate::model::{IssueInfo, RepoLocation};
use crate::summary::IssueResult;
use tracing::{debug, error, info, info_span, Instrument};

/// Recreates `issues` in `destination`, strictly one after another.
///
/// Each issue is created, closed if it was closed in the source, and given
/// its comments in order before the next issue starts; every follow-up call
/// needs the number the destination assigns on creation. With `dry_run` set
/// nothing is written and each issue is reported as previewed.
///
/// # Errors
///
/// Under [`FailurePolicy::Abort`] returns [`RunnerError::Replay`] for the
/// first failing issue. Issues created before the failure stay in place.
pub async fn replay<T: IssueTracker>(
    tracker: &T,
    issues: &[IssueInfo],
    destination: &RepoLocation,
    dry_run: bool,
    policy: FailurePolicy,
) -> Result<Vec<IssueResult>, RunnerError> {
    let total = issues.len();
    info!(destination = %destination, total, dry_run, "Replaying issues");

    if dry_run {
        print_dry_run_preview(issues, destination);
        return Ok(issues
            .iter()
            .map(|info| IssueResult::Previewed {
                title: info.issue.title.clone(),
            })
            .collect());
    }

    let mut results = Vec::with_capacity(total);
    for (index, info) in issues.iter().enumerate() {
        let span = info_span!(
            "replay",
            position = index + 1,
            total,
            title = %info.issue.title
        );

        match replay_issue(tracker, destination, info).instrument(span).await {
            Ok(result) => results.push(result),
            Err(failure) => {
                let title = info.issue.title.clone();
                match policy {
                    FailurePolicy::Abort => {
                        return Err(RunnerError::Replay {
                            title,
                            number: failure.created,
                            source: failure.source,
                        });
                    }
                    FailurePolicy::Continue => {
                        error!(
                            title = %title,
                            issue_number = ?failure.created,
                            error = %failure.source,
                            "Failed to replay issue"
                        );
                        results.push(IssueResult::Failed {
                            title,
                            number: failure.created,
                            error: failure.source.to_string(),
                        });
                    }
                }
            }
        }
    }

    Ok(results)
}

/// Where replay of a single issue stopped.
struct ReplayFailure {
    /// Destination number, if creation had succeeded.
    created: Option<u64>,
    source: ApiError,
}

async fn replay_issue<T: IssueTracker>(
    tracker: &T,
    destination: &RepoLocation,
    info: &IssueInfo,
) -> Result<IssueResult, ReplayFailure> {
    let created = tracker
        .create_issue(destination, &info.issue)
        .await
        .map_err(|source| ReplayFailure {
            created: None,
            source,
        })?;
    let number = created.number;
    let failed = |source| ReplayFailure {
        created: Some(number),
        source,
    };

    info!(
        issue_number = number,
        url = created.html_url.as_deref().unwrap_or_default(),
        "Issue created"
    );

    if info.closed {
        tracker
            .close_issue(destination, number)
            .await
            .map_err(failed)?;
        debug!(issue_number = number, "Issue closed");
    }

    for comment in &info.comments {
        tracker
            .add_comment(destination, number, comment)
            .await
            .map_err(failed)?;
    }

    debug!(
        issue_number = number,
        comments = info.comments.len(),
        "Comments posted"
    );
    Ok(IssueResult::Migrated {
        title: info.issue.title.clone(),
        number,
        closed: info.closed,
        comments: info.comments.len(),
    })
}

fn print_dry_run_preview(issues: &[IssueInfo], destination: &RepoLocation) {
    println!("\n[DRY RUN] Replay into {destination}");
    println!("  {} issues would be created:\n", issues.len());

    for (i, info) in issues.iter().enumerate() {
        println!("  [{}/{}] {}", i + 1, issues.len(), info.issue.title);
        if let Some(assignee) = &info.issue.assignee {
            println!("    Assignee: {assignee}");
        }
        if !info.issue.labels.is_empty() {
            println!("    Labels: {}", info.issue.labels.join(", "));
        }
        println!(
            "    Comments: {}{}",
            info.comments.len(),
            if info.closed { ", then closed" } else { "" }
        );
    }

    println!();
}
