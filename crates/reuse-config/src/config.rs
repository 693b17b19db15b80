//! Configuration types and loading.
//!
//! The main entry point is [`UtilConfig`], loaded with [`load_config`].
//! Recognised environment variables:
//!
//! | Variable          | Field       | Example        |
//! |-------------------|-------------|----------------|
//! | `REUSE_LOG_LEVEL` | `log_level` | `debug`        |
//! | `REUSE_GIT`       | `git`       | `/usr/bin/git` |

use figment::Figment;
use figment::providers::{Env, Serialized};
use reuse_logging::LogLevel;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Prefix shared by every configuration environment variable.
pub const ENV_PREFIX: &str = "REUSE_";

const KEYS: &[&str] = &["log_level", "git"];

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A value could not be converted to its field type.
    #[error("invalid configuration: {0}")]
    Extract(#[from] figment::Error),
}

/// A specialized `Result` type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Settings shared by the reuse utilities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct UtilConfig {
    /// Minimum severity for the `reuse` logger.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Explicit git binary; looked up on `PATH` when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git: Option<PathBuf>,
}

impl UtilConfig {
    /// The provider chain: defaults, then environment.
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(UtilConfig::default()))
            .merge(Env::prefixed(ENV_PREFIX).only(KEYS))
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Load configuration from the environment.
///
/// # Errors
///
/// Returns [`ConfigError::Extract`] if a variable holds a value that does
/// not parse, such as `REUSE_LOG_LEVEL=loud`.
pub fn load_config() -> Result<UtilConfig> {
    Ok(UtilConfig::figment().extract()?)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
