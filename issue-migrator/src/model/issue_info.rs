//! The unit of replay.

use super::IssueDraft;

/// One issue ready to be recreated, with its comments in posting order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueInfo {
    /// Creation payload.
    pub issue: IssueDraft,

    /// Whether the issue must be closed after creation.
    pub closed: bool,

    /// Comment bodies, oldest first.
    pub comments: Vec<String>,
}

impl IssueInfo {
    /// Creates an issue without comments.
    #[must_use]
    pub fn new(issue: IssueDraft, closed: bool) -> Self {
        Self {
            issue,
            closed,
            comments: Vec::new(),
        }
    }
}
