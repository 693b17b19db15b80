//! Console logging for the reuse utilities.
//!
//! Only tracing targets under the `reuse` prefix are configured; events from
//! other libraries are left alone. Call [`setup_logging`] once at startup and
//! keep the returned [`ReuseLogger`] handle if the level needs to change later.

pub mod level;
pub mod logger;

pub use level::{LogLevel, ParseLevelError};
pub use logger::{LOGGER_NAME, ReuseLogger, setup_logging};
