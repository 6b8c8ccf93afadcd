//! Issue records as returned by the tracker.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An issue exactly as fetched from the source repository.
///
/// Only the fields the migration reads are typed. Everything else the API
/// returned is kept in `extra` so staged files remain a full copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawIssue {
    /// API URL of the issue. Comments reference their issue through it.
    pub url: String,

    /// Issue number in the source repository.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u64>,

    pub title: String,

    #[serde(default)]
    pub body: Option<String>,

    pub user: RawUser,

    /// `open` or `closed`.
    pub state: String,

    #[serde(default)]
    pub labels: Vec<RawLabel>,

    /// Present when the record is a pull request rather than a plain issue.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pull_request: Option<Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RawIssue {
    /// Returns true if the issue was closed in the source repository.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.state == "closed"
    }

    /// Returns true if this record describes a pull request.
    #[must_use]
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }
}

/// Author of an issue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawUser {
    pub login: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A label attached to an issue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawLabel {
    pub name: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
