//! Per-repository and per-issue outcomes.

/// Result of exporting one source repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportResult {
    /// Issues and comments were fetched and staged.
    Exported {
        /// Repository full name.
        repository: String,
        /// Number of issues staged.
        issues: usize,
        /// Number of comments staged.
        comments: usize,
    },

    /// Export failed.
    Failed {
        /// Repository full name.
        repository: String,
        /// Error message.
        error: String,
    },
}

/// Result of replaying one issue into the destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueResult {
    /// Issue created, closed if needed, and all comments posted.
    Migrated {
        /// Issue title.
        title: String,
        /// Number assigned by the destination.
        number: u64,
        /// Whether the issue was closed after creation.
        closed: bool,
        /// Number of comments posted.
        comments: usize,
    },

    /// Dry run; nothing was written.
    Previewed {
        /// Issue title.
        title: String,
    },

    /// Replay of the issue failed part way.
    Failed {
        /// Issue title.
        title: String,
        /// Destination number, if the issue was created before the failure.
        number: Option<u64>,
        /// Error message.
        error: String,
    },
}
