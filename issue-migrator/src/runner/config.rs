//! Runner configuration.

use crate::config::{
    default_concurrency, default_staging_dir, validate_repo_name, ConfigError, MigrationPlan,
};
use crate::model::RepoLocation;
use crate::transform::{TransformOptions, UnmatchedCommentPolicy};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// How a batch reacts to a failed repository or issue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop at the first failure.
    #[default]
    Abort,
    /// Record the failure and carry on.
    Continue,
}

/// Configuration for a migration run.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Owner of the source repositories.
    source_owner: String,
    /// Source repository names, in replay order.
    source_repos: Vec<String>,
    /// Repository issues are replayed into.
    destination: Option<RepoLocation>,
    /// Directory holding the staged JSON files.
    staging_dir: PathBuf,
    /// GitHub token used for API calls.
    token: String,
    /// API root, when not the public GitHub API.
    api_url: Option<String>,
    /// Maximum repositories exported at once.
    concurrency: usize,
    /// Whether to preview the replay without writing.
    dry_run: bool,
    failure_policy: FailurePolicy,
    transform: TransformOptions,
}

impl RunnerConfig {
    /// Creates a configuration with default options.
    pub fn new(source_owner: String, source_repos: Vec<String>, token: String) -> Self {
        Self {
            source_owner,
            source_repos,
            destination: None,
            staging_dir: default_staging_dir(),
            token,
            api_url: None,
            concurrency: default_concurrency(),
            dry_run: false,
            failure_policy: FailurePolicy::Abort,
            transform: TransformOptions::default(),
        }
    }

    /// Creates a configuration from a loaded plan.
    pub fn from_plan(plan: &MigrationPlan, token: String) -> Self {
        let options = &plan.options;
        let mut config = Self::new(plan.source.owner.clone(), plan.source.repos.clone(), token)
            .with_staging_dir(plan.staging_dir.clone())
            .with_concurrency(plan.concurrency)
            .with_dry_run(options.dry_run)
            .with_failure_policy(if options.keep_going {
                FailurePolicy::Continue
            } else {
                FailurePolicy::Abort
            })
            .with_transform_options(TransformOptions {
                include_pull_requests: options.include_pull_requests,
                assign_author: options.assign_author,
                unmatched_comments: if options.skip_unmatched_comments {
                    UnmatchedCommentPolicy::Skip
                } else {
                    UnmatchedCommentPolicy::Abort
                },
            });

        if let Some(destination) = &plan.destination {
            config = config.with_destination(RepoLocation::new(
                destination.owner.clone(),
                destination.repo.clone(),
            ));
        }
        if let Some(api_url) = &plan.api_url {
            config = config.with_api_url(api_url.clone());
        }
        config
    }

    /// Sets the source owner.
    pub fn with_source_owner(mut self, source_owner: String) -> Self {
        self.source_owner = source_owner;
        self
    }

    /// Replaces the source repository list.
    pub fn with_source_repos(mut self, source_repos: Vec<String>) -> Self {
        self.source_repos = source_repos;
        self
    }

    /// Sets the destination repository.
    pub fn with_destination(mut self, destination: RepoLocation) -> Self {
        self.destination = Some(destination);
        self
    }

    /// Sets the staging directory.
    pub fn with_staging_dir(mut self, staging_dir: PathBuf) -> Self {
        self.staging_dir = staging_dir;
        self
    }

    /// Sets a custom API root.
    pub fn with_api_url(mut self, api_url: String) -> Self {
        self.api_url = Some(api_url);
        self
    }

    /// Sets the export concurrency.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Enables or disables dry-run mode.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Sets the failure policy.
    pub fn with_failure_policy(mut self, failure_policy: FailurePolicy) -> Self {
        self.failure_policy = failure_policy;
        self
    }

    /// Sets the transform options.
    pub fn with_transform_options(mut self, transform: TransformOptions) -> Self {
        self.transform = transform;
        self
    }

    /// Returns the source owner.
    pub fn source_owner(&self) -> &str {
        &self.source_owner
    }

    /// Returns the source repository names.
    pub fn source_repos(&self) -> &[String] {
        &self.source_repos
    }

    /// Returns the destination repository, if configured.
    pub fn destination(&self) -> Option<&RepoLocation> {
        self.destination.as_ref()
    }

    /// Returns the staging directory.
    pub fn staging_dir(&self) -> &Path {
        &self.staging_dir
    }

    /// Returns the configured GitHub token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns the custom API root, if any.
    pub fn api_url(&self) -> Option<&str> {
        self.api_url.as_deref()
    }

    /// Returns the export concurrency.
    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Returns whether dry-run mode is enabled.
    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    /// Returns the failure policy.
    pub fn failure_policy(&self) -> FailurePolicy {
        self.failure_policy
    }

    /// Returns the transform options.
    pub fn transform(&self) -> &TransformOptions {
        &self.transform
    }

    /// Checks that the configuration can drive a run.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |message: String| Err(ConfigError::Invalid { message });

        if self.source_owner.trim().is_empty() {
            return invalid("source owner is empty".to_string());
        }
        if self.source_repos.is_empty() {
            return invalid("no source repositories given".to_string());
        }
        let mut seen = HashSet::new();
        for repo in &self.source_repos {
            validate_repo_name(repo).or_else(invalid)?;
            if !seen.insert(repo.as_str()) {
                return invalid(format!("source repository '{repo}' listed twice"));
            }
        }
        if let Some(destination) = &self.destination {
            if destination.owner.trim().is_empty() {
                return invalid("destination owner is empty".to_string());
            }
            validate_repo_name(&destination.name).or_else(invalid)?;
        }
        if self.concurrency == 0 {
            return invalid("concurrency must be at least 1".to_string());
        }
        if self.token.trim().is_empty() {
            return Err(ConfigError::MissingToken);
        }
        Ok(())
    }
}
