//! Turning raw source records into replayable [`IssueInfo`] values.

mod commit_refs;
mod error;

pub use commit_refs::rewrite_commit_references;
pub use error::TransformError;

use crate::model::{IssueDraft, IssueInfo, RawComment, RawIssue, RepoLocation};
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// What to do with a comment whose issue is not in the snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnmatchedCommentPolicy {
    /// Fail with [`TransformError::UnmatchedComment`].
    #[default]
    Abort,
    /// Log a warning and drop the comment.
    Skip,
}

/// Options controlling how records are transformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransformOptions {
    /// Migrate pull requests as issues too.
    pub include_pull_requests: bool,
    /// Assign each new issue to the author of the original.
    pub assign_author: bool,
    pub unmatched_comments: UnmatchedCommentPolicy,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            include_pull_requests: false,
            assign_author: true,
            unmatched_comments: UnmatchedCommentPolicy::Abort,
        }
    }
}

/// Builds the creation payload for a source issue.
///
/// The author's login becomes the assignee; labels are reduced to their names.
pub fn to_draft(raw: &RawIssue) -> IssueDraft {
    IssueDraft {
        title: raw.title.clone(),
        body: raw.body.clone(),
        assignee: Some(raw.user.login.clone()),
        labels: raw.labels.iter().map(|label| label.name.clone()).collect(),
    }
}

/// Builds a comment-less [`IssueInfo`] for a source issue.
pub fn to_issue_info(raw: &RawIssue, options: &TransformOptions) -> IssueInfo {
    let mut draft = to_draft(raw);
    if !options.assign_author {
        draft.assignee = None;
    }
    IssueInfo::new(draft, raw.is_closed())
}

/// Attaches each comment to its issue.
///
/// `issues` and `comments` must be in chronological order. The result keeps
/// the order of `issues`, and every issue lists its comments in the order
/// they appear in `comments`. Comment bodies have their commit hashes
/// qualified with `source`.
///
/// Pull requests are left out unless `options.include_pull_requests` is set;
/// comments on a left-out pull request are dropped.
///
/// # Errors
///
/// Returns [`TransformError::DuplicateIssueUrl`] if two issues share a URL,
/// and [`TransformError::UnmatchedComment`] for a comment on an unknown issue
/// under [`UnmatchedCommentPolicy::Abort`].
pub fn associate_comments(
    source: &RepoLocation,
    issues: &[RawIssue],
    comments: &[RawComment],
    options: &TransformOptions,
) -> Result<Vec<IssueInfo>, TransformError> {
    let mut infos = Vec::with_capacity(issues.len());
    let mut by_url: HashMap<&str, usize> = HashMap::with_capacity(issues.len());
    let mut excluded: HashSet<&str> = HashSet::new();

    for raw in issues {
        if raw.is_pull_request() && !options.include_pull_requests {
            excluded.insert(raw.url.as_str());
            continue;
        }
        if by_url.insert(raw.url.as_str(), infos.len()).is_some() {
            return Err(TransformError::DuplicateIssueUrl {
                url: raw.url.clone(),
            });
        }
        infos.push(to_issue_info(raw, options));
    }

    for comment in comments {
        let issue_url = comment.issue_url.as_str();
        match by_url.get(issue_url) {
            Some(&index) => infos[index].comments.push(rewrite_commit_references(
                &source.owner,
                &source.name,
                &comment.body,
            )),
            None if excluded.contains(issue_url) => {
                debug!(issue_url, "Dropping comment on excluded pull request");
            }
            None => match options.unmatched_comments {
                UnmatchedCommentPolicy::Abort => {
                    return Err(TransformError::UnmatchedComment {
                        issue_url: comment.issue_url.clone(),
                    });
                }
                UnmatchedCommentPolicy::Skip => {
                    warn!(repo = %source, issue_url, "Skipping comment on unknown issue");
                }
            },
        }
    }

    if !excluded.is_empty() {
        debug!(repo = %source, count = excluded.len(), "Excluded pull requests");
    }

    Ok(infos)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::model::{RawLabel, RawUser};
    use serde_json::{json, Map};

    pub(crate) fn raw_issue(url: &str, title: &str, state: &str) -> RawIssue {
        RawIssue {
            url: url.to_string(),
            number: None,
            title: title.to_string(),
            body: Some(format!("{title} body")),
            user: RawUser {
                login: "octocat".to_string(),
                extra: Map::new(),
            },
            state: state.to_string(),
            labels: Vec::new(),
            pull_request: None,
            extra: Map::new(),
        }
    }

    pub(crate) fn raw_comment(issue_url: &str, body: &str) -> RawComment {
        RawComment {
            issue_url: issue_url.to_string(),
            body: body.to_string(),
            extra: Map::new(),
        }
    }

    fn source() -> RepoLocation {
        RepoLocation::new("acme", "api")
    }

    #[test]
    fn to_draft_copies_fields() {
        let mut raw = raw_issue("u1", "Crash", "open");
        raw.labels = vec![
            RawLabel {
                name: "bug".to_string(),
                extra: Map::new(),
            },
            RawLabel {
                name: "p1".to_string(),
                extra: Map::new(),
            },
        ];

        let draft = to_draft(&raw);

        assert_eq!(draft.title, "Crash");
        assert_eq!(draft.body.as_deref(), Some("Crash body"));
        assert_eq!(draft.assignee.as_deref(), Some("octocat"));
        assert_eq!(draft.labels, vec!["bug", "p1"]);
    }

    #[test]
    fn closed_state_propagates() {
        let options = TransformOptions::default();

        assert!(to_issue_info(&raw_issue("u1", "a", "closed"), &options).closed);
        assert!(!to_issue_info(&raw_issue("u2", "b", "open"), &options).closed);
    }

    #[test]
    fn author_assignment_can_be_disabled() {
        let options = TransformOptions {
            assign_author: false,
            ..TransformOptions::default()
        };

        let info = to_issue_info(&raw_issue("u1", "a", "open"), &options);

        assert_eq!(info.issue.assignee, None);
    }

    #[test]
    fn associates_reversed_listing() {
        let issues = vec![raw_issue("u1", "one", "open"), raw_issue("u2", "two", "open")];
        let mut comments = vec![raw_comment("u2", "c2"), raw_comment("u1", "c1")];
        comments.reverse();

        let infos =
            associate_comments(&source(), &issues, &comments, &TransformOptions::default())
                .unwrap();

        assert_eq!(infos[0].comments, vec!["c1"]);
        assert_eq!(infos[1].comments, vec!["c2"]);
    }

    #[test]
    fn keeps_comment_order_per_issue() {
        let issues = vec![raw_issue("u1", "one", "open"), raw_issue("u2", "two", "open")];
        let comments = vec![
            raw_comment("u1", "first"),
            raw_comment("u2", "other"),
            raw_comment("u1", "second"),
            raw_comment("u1", "third"),
        ];

        let infos =
            associate_comments(&source(), &issues, &comments, &TransformOptions::default())
                .unwrap();

        assert_eq!(infos[0].issue.title, "one");
        assert_eq!(infos[0].comments, vec!["first", "second", "third"]);
        assert_eq!(infos[1].comments, vec!["other"]);
    }

    #[test]
    fn qualifies_commit_hashes_in_comments() {
        let issues = vec![raw_issue("u1", "one", "open")];
        let comments = vec![raw_comment(
            "u1",
            "fixed in a1b2c3d4e5f60718293a4b5c6d7e8f9012345678",
        )];

        let infos =
            associate_comments(&source(), &issues, &comments, &TransformOptions::default())
                .unwrap();

        assert_eq!(
            infos[0].comments,
            vec!["fixed in acme/api@a1b2c3d4e5f60718293a4b5c6d7e8f9012345678"]
        );
    }

    #[test]
    fn unmatched_comment_aborts_by_default() {
        let issues = vec![raw_issue("u1", "one", "open")];
        let comments = vec![raw_comment("u9", "orphan")];

        let result =
            associate_comments(&source(), &issues, &comments, &TransformOptions::default());

        assert_eq!(
            result,
            Err(TransformError::UnmatchedComment {
                issue_url: "u9".to_string()
            })
        );
    }

    #[test]
    fn unmatched_comment_can_be_skipped() {
        let issues = vec![raw_issue("u1", "one", "open")];
        let comments = vec![raw_comment("u9", "orphan"), raw_comment("u1", "kept")];
        let options = TransformOptions {
            unmatched_comments: UnmatchedCommentPolicy::Skip,
            ..TransformOptions::default()
        };

        let infos = associate_comments(&source(), &issues, &comments, &options).unwrap();

        assert_eq!(infos.len(), 1);
        assert_eq!(infos[0].comments, vec!["kept"]);
    }

    #[test]
    fn duplicate_issue_urls_are_rejected() {
        let issues = vec![raw_issue("u1", "one", "open"), raw_issue("u1", "again", "open")];

        let result = associate_comments(&source(), &issues, &[], &TransformOptions::default());

        assert!(matches!(
            result,
            Err(TransformError::DuplicateIssueUrl { url }) if url == "u1"
        ));
    }

    #[test]
    fn pull_requests_are_excluded_with_their_comments() {
        let mut pr = raw_issue("u2", "feature", "closed");
        pr.pull_request = Some(json!({ "url": "pulls/2" }));
        let issues = vec![raw_issue("u1", "one", "open"), pr];
        let comments = vec![raw_comment("u2", "review"), raw_comment("u1", "c1")];

        let infos =
            associate_comments(&source(), &issues, &comments, &TransformOptions::default())
                .unwrap();

        assert_eq!(infos.len(), 1);
        assert_eq!(infos[0].comments, vec!["c1"]);

        let included = TransformOptions {
            include_pull_requests: true,
            ..TransformOptions::default()
        };
        let infos = associate_comments(&source(), &issues, &comments, &included).unwrap();

        assert_eq!(infos.len(), 2);
        assert_eq!(infos[1].comments, vec!["review"]);
        assert!(infos[1].closed);
    }
}
