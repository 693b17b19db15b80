//! Configuration management for the reuse utilities.
//!
//! Settings come from built-in defaults overlaid with `REUSE_`-prefixed
//! environment variables. There is no configuration file.

pub mod config;

pub use config::{ConfigError, ENV_PREFIX, UtilConfig, load_config};
