//! Run summary types.

use super::result::{ExportResult, IssueResult};

/// Summary of a complete run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of repositories exported successfully.
    pub repositories_exported: usize,

    /// Number of repositories whose export failed.
    pub repositories_failed: usize,

    /// Number of issues fetched and staged.
    pub issues_fetched: usize,

    /// Number of comments fetched and staged.
    pub comments_fetched: usize,

    /// Number of issues loaded from staging for replay.
    pub issues_loaded: usize,

    /// Number of issues created in the destination.
    pub issues_created: usize,

    /// Number of created issues that were also closed.
    pub issues_closed: usize,

    /// Number of comments posted.
    pub comments_posted: usize,

    /// Number of issues previewed in a dry run.
    pub issues_previewed: usize,

    /// Number of issues whose replay failed.
    pub issues_failed: usize,

    /// Whether this was a dry run.
    pub dry_run: bool,
}

impl RunSummary {
    /// Creates a new empty summary.
    #[must_use]
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Default::default()
        }
    }

    /// Updates the summary with an export result.
    pub fn record_export(&mut self, result: &ExportResult) {
        match result {
            ExportResult::Exported {
                issues, comments, ..
            } => {
                self.repositories_exported += 1;
                self.issues_fetched += issues;
                self.comments_fetched += comments;
            }
            ExportResult::Failed { .. } => self.repositories_failed += 1,
        }
    }

    /// Updates the summary with a replay result.
    pub fn record_issue(&mut self, result: &IssueResult) {
        match result {
            IssueResult::Migrated {
                closed, comments, ..
            } => {
                self.issues_created += 1;
                self.comments_posted += comments;
                if *closed {
                    self.issues_closed += 1;
                }
            }
            IssueResult::Previewed { .. } => self.issues_previewed += 1,
            IssueResult::Failed { number, .. } => {
                self.issues_failed += 1;
                if number.is_some() {
                    self.issues_created += 1;
                }
            }
        }
    }

    /// Returns true if any failures occurred.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.repositories_failed > 0 || self.issues_failed > 0
    }

    /// Returns true if all operations were successful.
    #[must_use]
    pub fn all_success(&self) -> bool {
        !self.has_failures()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn can_record_results() {
        let mut summary = RunSummary::new(false);

        summary.record_export(&ExportResult::Exported {
            repository: "acme/api".to_string(),
            issues: 2,
            comments: 3,
        });
        summary.record_issue(&IssueResult::Migrated {
            title: "one".to_string(),
            number: 1,
            closed: true,
            comments: 2,
        });
        summary.record_issue(&IssueResult::Migrated {
            title: "two".to_string(),
            number: 2,
            closed: false,
            comments: 1,
        });

        assert_eq!(summary.repositories_exported, 1);
        assert_eq!(summary.issues_fetched, 2);
        assert_eq!(summary.comments_fetched, 3);
        assert_eq!(summary.issues_created, 2);
        assert_eq!(summary.issues_closed, 1);
        assert_eq!(summary.comments_posted, 3);
        assert!(summary.all_success());
    }

    #[test]
    fn partially_replayed_issue_counts_as_created_and_failed() {
        let mut summary = RunSummary::new(false);

        summary.record_issue(&IssueResult::Failed {
            title: "one".to_string(),
            number: Some(7),
            error: "boom".to_string(),
        });
        summary.record_export(&ExportResult::Failed {
            repository: "acme/web".to_string(),
            error: "boom".to_string(),
        });

        assert_eq!(summary.issues_created, 1);
        assert_eq!(summary.issues_failed, 1);
        assert_eq!(summary.repositories_failed, 1);
        assert!(summary.has_failures());
    }
}
