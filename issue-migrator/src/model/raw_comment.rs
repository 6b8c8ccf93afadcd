//! Issue comment records as returned by the tracker.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A comment exactly as fetched from the source repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawComment {
    /// API URL of the issue this comment belongs to.
    pub issue_url: String,

    pub body: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
