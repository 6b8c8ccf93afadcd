//! Orchestrates export, import and replay runs.

mod config;
mod error;
mod export;
mod import;
mod replay;

pub use config::{FailurePolicy, RunnerConfig};
pub use error::RunnerError;
pub use export::export_repos;
pub use import::import_repos;
pub use replay::replay;

use crate::api::{GitHubClient, IssueTracker};
use crate::model::RepoLocation;
use crate::summary::{ExportResult, RunSummary};
use tracing::{info, warn};

/// Drives a migration against an [`IssueTracker`].
pub struct Runner<T = GitHubClient> {
    config: RunnerConfig,
    tracker: T,
}

impl Runner<GitHubClient> {
    /// Builds a runner talking to GitHub.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Config`] for an invalid configuration and
    /// [`RunnerError::Client`] if the client cannot be built.
    pub fn new(config: RunnerConfig) -> Result<Self, RunnerError> {
        config.validate()?;
        let tracker = match config.api_url() {
            Some(api_url) => GitHubClient::with_api_url(config.token(), api_url),
            None => GitHubClient::new(config.token()),
        }
        .map_err(RunnerError::Client)?;
        Ok(Self { config, tracker })
    }
}

impl<T: IssueTracker> Runner<T> {
    /// Builds a runner on top of an existing tracker.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Config`] for an invalid configuration.
    pub fn with_tracker(config: RunnerConfig, tracker: T) -> Result<Self, RunnerError> {
        config.validate()?;
        Ok(Self { config, tracker })
    }

    /// Returns the run configuration.
    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Fetches every source repository into the staging directory.
    pub async fn export(&self) -> Result<RunSummary, RunnerError> {
        let mut summary = RunSummary::new(self.config.dry_run());
        self.export_into(&mut summary).await?;
        Ok(summary)
    }

    /// Replays previously staged repositories into the destination.
    pub async fn import(&self) -> Result<RunSummary, RunnerError> {
        let destination = self.destination()?;
        let mut summary = RunSummary::new(self.config.dry_run());
        self.import_into(destination, self.config.source_repos(), &mut summary)
            .await?;
        Ok(summary)
    }

    /// Exports, then replays what was exported.
    ///
    /// Under [`FailurePolicy::Continue`] only the repositories that exported
    /// successfully are replayed.
    pub async fn migrate(&self) -> Result<RunSummary, RunnerError> {
        let destination = self.destination()?;
        let mut summary = RunSummary::new(self.config.dry_run());

        let exported = self.export_into(&mut summary).await?;
        let repos: Vec<String> = self
            .config
            .source_repos()
            .iter()
            .filter(|name| exported.contains(*name))
            .cloned()
            .collect();

        if repos.len() < self.config.source_repos().len() {
            warn!(
                skipped = self.config.source_repos().len() - repos.len(),
                "Skipping replay of repositories that failed to export"
            );
        }

        self.import_into(destination, &repos, &mut summary).await?;
        Ok(summary)
    }

    fn destination(&self) -> Result<&RepoLocation, RunnerError> {
        self.config
            .destination()
            .ok_or(RunnerError::MissingDestination)
    }

    /// Exports and records the outcome; returns the names of exported repositories.
    async fn export_into(&self, summary: &mut RunSummary) -> Result<Vec<String>, RunnerError> {
        let results = export_repos(
            &self.tracker,
            self.config.source_owner(),
            self.config.source_repos(),
            self.config.staging_dir(),
            self.config.concurrency(),
            self.config.failure_policy(),
        )
        .await?;

        let mut exported = Vec::new();
        for result in &results {
            summary.record_export(result);
            if let ExportResult::Exported { repository, .. } = result {
                if let Some((_, name)) = repository.split_once('/') {
                    exported.push(name.to_string());
                }
            }
        }
        Ok(exported)
    }

    async fn import_into(
        &self,
        destination: &RepoLocation,
        repos: &[String],
        summary: &mut RunSummary,
    ) -> Result<(), RunnerError> {
        let issues = import_repos(
            self.config.staging_dir(),
            self.config.source_owner(),
            repos,
            self.config.transform(),
        )?;
        summary.issues_loaded += issues.len();

        if issues.is_empty() {
            info!("Nothing to replay");
            return Ok(());
        }

        let results = replay(
            &self.tracker,
            &issues,
            destination,
            self.config.dry_run(),
            self.config.failure_policy(),
        )
        .await?;

        for result in &results {
            summary.record_issue(result);
        }
        Ok(())
    }
}
