//! Destination-side issue payloads.

use serde::{Deserialize, Serialize};

/// Payload used to create an issue in the destination repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueDraft {
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,

    /// Login assigned to the new issue.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,

    #[serde(default)]
    pub labels: Vec<String>,
}

/// An issue created in the destination repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedIssue {
    /// Number assigned by the destination.
    pub number: u64,

    /// Browser URL of the new issue, when the tracker reports one.
    pub html_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn omits_missing_body_and_assignee() {
        let draft = IssueDraft {
            title: "Crash".to_string(),
            body: None,
            assignee: None,
            labels: vec![],
        };

        let value = serde_json::to_value(&draft).unwrap();

        assert_eq!(value, serde_json::json!({ "title": "Crash", "labels": [] }));
    }
}
