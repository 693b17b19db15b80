//! Runtime context for command execution.
//!
//! The [`RuntimeContext`] is built once in `main`. Building it loads the
//! configuration, layers CLI flags on top, sets up logging and resolves the
//! git executable.

use anyhow::{Context, Result};
use reuse_config::{UtilConfig, load_config};
use reuse_git::GitExecutable;
use reuse_logging::{LogLevel, setup_logging};
use tracing::debug;

use crate::cli::GlobalArgs;

/// Runtime context passed to every command handler.
#[derive(Debug)]
pub struct RuntimeContext {
    /// Git capability, resolved once for the whole run.
    pub git: GitExecutable,
}

impl RuntimeContext {
    /// Build a `RuntimeContext` from parsed global arguments.
    ///
    /// Priority: `--verbose` > `--log-level` > `REUSE_LOG_LEVEL` > warning,
    /// and `--git` > `REUSE_GIT` > `PATH` lookup.
    pub fn from_global_args(global: &GlobalArgs) -> Result<Self> {
        let mut config = load_config().context("failed to load configuration")?;
        apply_overrides(&mut config, global);

        let logger = setup_logging(config.log_level);
        let git = GitExecutable::resolve(config.git.as_deref());
        debug!(
            "log level {}, git executable {:?}",
            logger.level(),
            git.path()
        );

        Ok(Self { git })
    }
}

fn apply_overrides(config: &mut UtilConfig, global: &GlobalArgs) {
    if let Some(level) = global.log_level {
        config.log_level = level;
    }
    if global.verbose {
        config.log_level = LogLevel::Debug;
    }
    if let Some(git) = &global.git {
        config.git = Some(git.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn global() -> GlobalArgs {
        GlobalArgs {
            log_level: None,
            verbose: false,
            git: None,
        }
    }

    #[test]
    fn test_no_flags_keep_config() {
        let mut config = UtilConfig::default();
        apply_overrides(&mut config, &global());
        assert_eq!(config, UtilConfig::default());
    }

    #[test]
    fn test_verbose_wins_over_level() {
        let mut config = UtilConfig::default();
        let args = GlobalArgs {
            log_level: Some(LogLevel::Error),
            verbose: true,
            ..global()
        };
        apply_overrides(&mut config, &args);
        assert_eq!(config.log_level, LogLevel::Debug);
    }

    #[test]
    fn test_git_flag_replaces_config() {
        let mut config = UtilConfig {
            git: Some(PathBuf::from("/from/env/git")),
            ..UtilConfig::default()
        };
        let args = GlobalArgs {
            git: Some(PathBuf::from("/from/flag/git")),
            ..global()
        };
        apply_overrides(&mut config, &args);
        assert_eq!(config.git, Some(PathBuf::from("/from/flag/git")));
    }
}
