//! CLI for the issue migrator.
//!
//! Exports issues and comments from source repositories into a staging
//! directory, and replays staged issues into a destination repository.

use clap::{Args as ClapArgs, Parser, Subcommand};
use issue_migrator::{
    resolve_token, ConfigError, FailurePolicy, MigrationPlan, RepoLocation, RunSummary, Runner,
    RunnerConfig, RunnerError, UnmatchedCommentPolicy,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Issue Migrator - Move GitHub issues and comments between repositories.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    options: RunOptions,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    /// Fetch issues and comments into the staging directory.
    Export,
    /// Replay staged issues into the destination repository.
    Import,
    /// Export, then import.
    Migrate,
}

#[derive(ClapArgs, Debug)]
struct RunOptions {
    /// TOML plan file; command line options override its values.
    #[arg(long, global = true)]
    plan: Option<PathBuf>,

    /// Owner of the source repositories.
    #[arg(long, global = true)]
    source_owner: Option<String>,

    /// Source repository name (repeatable, replayed in the given order).
    #[arg(long = "repo", global = true)]
    repos: Vec<String>,

    /// Owner of the destination repository.
    #[arg(long, global = true, requires = "dest_repo")]
    dest_owner: Option<String>,

    /// Name of the destination repository.
    #[arg(long, global = true, requires = "dest_owner")]
    dest_repo: Option<String>,

    /// Directory holding the staged JSON files.
    #[arg(long, global = true)]
    staging_dir: Option<PathBuf>,

    /// Maximum repositories exported at once.
    #[arg(long, global = true)]
    concurrency: Option<usize>,

    /// GitHub Personal Access Token.
    #[arg(long, env = "GITHUB_TOKEN", global = true, hide_env_values = true)]
    token: Option<String>,

    /// API root for GitHub Enterprise installations.
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Preview the replay without writing to the destination.
    #[arg(long, global = true)]
    dry_run: bool,

    /// Record failures and carry on instead of stopping at the first one.
    #[arg(long, global = true)]
    keep_going: bool,

    /// Drop comments whose issue is missing instead of failing.
    #[arg(long, global = true)]
    skip_unmatched_comments: bool,

    /// Migrate pull requests as plain issues.
    #[arg(long, global = true)]
    include_pull_requests: bool,

    /// Do not assign new issues to the original author.
    #[arg(long, global = true)]
    no_assign_author: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let args = Args::parse();

    match run(args).await {
        Ok(summary) => {
            print_summary(&summary);

            if summary.has_failures() {
                ExitCode::from(1)
            } else {
                ExitCode::from(0)
            }
        }
        Err(e) => {
            error!(error = %e, "Critical failure");
            ExitCode::from(2)
        }
    }
}

/// Initializes tracing with compact output, filtered by `RUST_LOG` (default "info").
fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Main execution logic.
async fn run(args: Args) -> Result<RunSummary, RunnerError> {
    // Explicitly install aws-lc-rs as the default crypto provider for rustls
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    let config = build_config(args.options)?;
    let runner = Runner::new(config)?;

    match args.command {
        Command::Export => runner.export().await,
        Command::Import => runner.import().await,
        Command::Migrate => runner.migrate().await,
    }
}

/// Merges the plan file (if any) with command line overrides.
fn build_config(options: RunOptions) -> Result<RunnerConfig, ConfigError> {
    let token = resolve_token(options.token)?;

    let mut config = match &options.plan {
        Some(path) => RunnerConfig::from_plan(&MigrationPlan::load(path)?, token),
        None => {
            let source_owner = options.source_owner.clone().ok_or_else(|| ConfigError::Invalid {
                message: "either --plan or --source-owner is required".to_string(),
            })?;
            RunnerConfig::new(source_owner, options.repos.clone(), token)
        }
    };

    if let Some(source_owner) = options.source_owner {
        config = config.with_source_owner(source_owner);
    }
    if !options.repos.is_empty() {
        config = config.with_source_repos(options.repos);
    }
    if let (Some(owner), Some(repo)) = (options.dest_owner, options.dest_repo) {
        config = config.with_destination(RepoLocation::new(owner, repo));
    }
    if let Some(staging_dir) = options.staging_dir {
        config = config.with_staging_dir(staging_dir);
    }
    if let Some(concurrency) = options.concurrency {
        config = config.with_concurrency(concurrency);
    }
    if let Some(api_url) = options.api_url {
        config = config.with_api_url(api_url);
    }
    if options.dry_run {
        config = config.with_dry_run(true);
    }
    if options.keep_going {
        config = config.with_failure_policy(FailurePolicy::Continue);
    }

    let mut transform = *config.transform();
    if options.skip_unmatched_comments {
        transform.unmatched_comments = UnmatchedCommentPolicy::Skip;
    }
    if options.include_pull_requests {
        transform.include_pull_requests = true;
    }
    if options.no_assign_author {
        transform.assign_author = false;
    }
    Ok(config.with_transform_options(transform))
}

/// Prints the final run summary.
fn print_summary(summary: &RunSummary) {
    println!("\nSummary:");
    println!(
        "  Mode: {}",
        if summary.dry_run { "Dry Run" } else { "Live" }
    );

    if summary.repositories_exported + summary.repositories_failed > 0 {
        println!("  Repositories exported: {}", summary.repositories_exported);
        println!("  Repositories failed: {}", summary.repositories_failed);
        println!("  Issues fetched: {}", summary.issues_fetched);
        println!("  Comments fetched: {}", summary.comments_fetched);
    }

    println!("  Issues loaded: {}", summary.issues_loaded);
    if summary.dry_run {
        println!("  Issues previewed: {}", summary.issues_previewed);
    } else {
        println!("  Issues created: {}", summary.issues_created);
        println!("  Issues closed: {}", summary.issues_closed);
        println!("  Comments posted: {}", summary.comments_posted);
        println!("  Issues failed: {}", summary.issues_failed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(["issue-migrator"].iter().chain(args)).unwrap()
    }

    #[test]
    fn builds_config_from_flags() {
        let args = parse(&[
            "migrate",
            "--source-owner",
            "acme",
            "--repo",
            "api",
            "--repo",
            "web",
            "--dest-owner",
            "acme",
            "--dest-repo",
            "platform",
            "--token",
            "t",
            "--keep-going",
            "--no-assign-author",
        ]);
        assert_eq!(args.command, Command::Migrate);

        let config = build_config(args.options).unwrap();

        assert_eq!(config.source_owner(), "acme");
        assert_eq!(config.source_repos(), ["api", "web"]);
        assert_eq!(
            config.destination(),
            Some(&RepoLocation::new("acme", "platform"))
        );
        assert_eq!(config.failure_policy(), FailurePolicy::Continue);
        assert!(!config.transform().assign_author);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn destination_needs_both_parts() {
        let result = Args::try_parse_from([
            "issue-migrator",
            "import",
            "--dest-owner",
            "acme",
        ]);

        assert!(result.is_err());
    }

    #[test]
    fn source_owner_or_plan_is_required() {
        let args = parse(&["export", "--repo", "api", "--token", "t"]);

        assert!(matches!(
            build_config(args.options),
            Err(ConfigError::Invalid { .. })
        ));
    }
}
