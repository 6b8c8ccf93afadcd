//! Migration plan files.

use crate::config::ConfigError;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A migration described in a TOML file.
///
/// ```toml
/// staging-dir = "staging"
///
/// [source]
/// owner = "acme"
/// repos = ["api", "web"]
///
/// [destination]
/// owner = "acme"
/// repo = "platform"
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct MigrationPlan {
    /// Repositories to export.
    pub source: SourcePlan,

    /// Repository to replay into. Only needed for import and migrate.
    #[serde(default)]
    pub destination: Option<DestinationPlan>,

    /// Directory holding the staged JSON files (defaults to "staging").
    #[serde(default = "default_staging_dir")]
    pub staging_dir: PathBuf,

    /// Maximum number of repositories exported at once.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// API root for GitHub Enterprise installations.
    #[serde(default)]
    pub api_url: Option<String>,

    #[serde(default)]
    pub options: PlanOptions,
}

/// Source side of a plan.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct SourcePlan {
    pub owner: String,
    pub repos: Vec<String>,
}

/// Destination side of a plan.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct DestinationPlan {
    pub owner: String,
    pub repo: String,
}

/// Behavior switches of a plan.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct PlanOptions {
    /// Migrate pull requests as issues.
    #[serde(default)]
    pub include_pull_requests: bool,

    /// Assign new issues to the original author.
    #[serde(default = "default_true")]
    pub assign_author: bool,

    /// Drop comments whose issue is missing instead of failing.
    #[serde(default)]
    pub skip_unmatched_comments: bool,

    /// Record failures and carry on with the next repository or issue.
    #[serde(default)]
    pub keep_going: bool,

    /// Preview the replay without writing to the destination.
    #[serde(default)]
    pub dry_run: bool,
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self {
            include_pull_requests: false,
            assign_author: true,
            skip_unmatched_comments: false,
            keep_going: false,
            dry_run: false,
        }
    }
}

pub(crate) fn default_staging_dir() -> PathBuf {
    PathBuf::from("staging")
}

pub(crate) fn default_concurrency() -> usize {
    4
}

fn default_true() -> bool {
    true
}

impl MigrationPlan {
    /// Loads and validates a plan file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file is unreadable, not valid TOML, or
    /// fails validation.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        debug!(path = %path.display(), "Loading migration plan");

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        Self::parse(&content, path)
    }

    /// Parses and validates plan content; `path` is only used in errors.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the content is not valid TOML or fails validation.
    pub fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let plan: Self = toml::from_str(content).map_err(|e| ConfigError::TomlError {
            path: path.display().to_string(),
            source: e,
        })?;
        plan.validate(path)?;
        Ok(plan)
    }

    /// Checks the plan for values that cannot work.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] describing the first problem found.
    pub fn validate(&self, path: &Path) -> Result<(), ConfigError> {
        let fail = |message: String| {
            Err(ConfigError::ValidationError {
                path: path.display().to_string(),
                message,
            })
        };

        if self.source.owner.trim().is_empty() {
            return fail("source owner is empty".to_string());
        }
        if self.source.repos.is_empty() {
            return fail("no source repositories listed".to_string());
        }

        let mut seen = HashSet::new();
        for repo in &self.source.repos {
            if let Err(message) = validate_repo_name(repo) {
                return fail(message);
            }
            if !seen.insert(repo.as_str()) {
                return fail(format!("source repository '{repo}' listed twice"));
            }
        }

        if let Some(destination) = &self.destination {
            if destination.owner.trim().is_empty() {
                return fail("destination owner is empty".to_string());
            }
            if let Err(message) = validate_repo_name(&destination.repo) {
                return fail(message);
            }
        }

        if self.concurrency == 0 {
            return fail("concurrency must be at least 1".to_string());
        }

        if let Some(api_url) = &self.api_url {
            if let Err(e) = url::Url::parse(api_url) {
                return fail(format!("api-url '{api_url}' is not a valid URL: {e}"));
            }
        }

        Ok(())
    }
}

/// Checks that `name` is a bare repository name.
pub(crate) fn validate_repo_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("repository name is empty".to_string());
    }
    if name.contains('/') {
        return Err(format!(
            "repository name '{name}' must not contain '/'; set the owner separately"
        ));
    }
    Ok(())
}
