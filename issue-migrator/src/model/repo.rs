//! Repository coordinates.

use std::fmt;

/// Identifies a repository on the tracker.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoLocation {
    /// Repository owner (user or organization).
    pub owner: String,

    /// Repository name.
    pub name: String,
}

impl RepoLocation {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Full repository name in "owner/name" format.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

impl fmt::Display for RepoLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
