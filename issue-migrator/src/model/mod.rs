//! Records moved through a migration.
//!
//! Raw records mirror what the issue tracker returns and are what gets staged
//! to disk. Drafts and [`IssueInfo`] values are derived from them and carry no
//! source-repository identity.

mod issue_draft;
mod issue_info;
mod raw_comment;
mod raw_issue;
mod repo;

pub use issue_draft::{CreatedIssue, IssueDraft};
pub use issue_info::IssueInfo;
pub use raw_comment::RawComment;
pub use raw_issue::{RawIssue, RawLabel, RawUser};
pub use repo::RepoLocation;
