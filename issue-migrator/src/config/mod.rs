//! Configuration loading.
//!
//! A migration can be described entirely on the command line, or in a TOML
//! plan file whose values the command line then overrides.

mod error;
mod plan;

pub use error::ConfigError;
pub use plan::{DestinationPlan, MigrationPlan, PlanOptions, SourcePlan};
pub(crate) use plan::{default_concurrency, default_staging_dir, validate_repo_name};

use tracing::debug;

/// Environment variable consulted when no token is passed explicitly.
///
/// `GITHUB_TOKEN` is read by the CLI itself; this is the name the `gh` tool uses.
pub const FALLBACK_TOKEN_ENV: &str = "GH_TOKEN";

/// Picks the access token to use.
///
/// An explicit, non-blank token wins; otherwise [`FALLBACK_TOKEN_ENV`] is read.
///
/// # Errors
///
/// Returns [`ConfigError::MissingToken`] if neither yields a token.
pub fn resolve_token(explicit: Option<String>) -> Result<String, ConfigError> {
    if let Some(token) = explicit.filter(|token| !token.trim().is_empty()) {
        return Ok(token.trim().to_string());
    }

    match std::env::var(FALLBACK_TOKEN_ENV) {
        Ok(token) if !token.trim().is_empty() => {
            debug!(var = FALLBACK_TOKEN_ENV, "Using token from environment");
            Ok(token.trim().to_string())
        }
        _ => Err(ConfigError::MissingToken),
    }
}
