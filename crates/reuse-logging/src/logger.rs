//! Installation of the `reuse` console handler.
//!
//! The handler is a tracing-subscriber fmt layer writing to stderr, behind a
//! reloadable [`Targets`] filter so the level can be changed after the global
//! subscriber has been set. Each line reads `<name> - <LEVEL> - <message>`.

use std::fmt;
use std::sync::{Mutex, OnceLock, PoisonError};

use tracing::{Event, Subscriber};
use tracing_subscriber::filter::Targets;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{Registry, reload};

use crate::level::{LogLevel, level_name};

/// Target prefix covered by the logger.
pub const LOGGER_NAME: &str = "reuse";

static LOGGER: OnceLock<ReuseLogger> = OnceLock::new();

// ---------------------------------------------------------------------------
// Handle
// ---------------------------------------------------------------------------

/// Handle to the process-wide `reuse` logger.
pub struct ReuseLogger {
    level: Mutex<LogLevel>,
    /// `None` when another global subscriber was already installed and no
    /// handler could be attached.
    filter: Option<reload::Handle<Targets, Registry>>,
}

impl ReuseLogger {
    /// The fixed logger name.
    pub fn name(&self) -> &'static str {
        LOGGER_NAME
    }

    /// The current minimum severity.
    pub fn level(&self) -> LogLevel {
        *self.level.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of console handlers attached: 1 once installed, 0 if the
    /// global subscriber belonged to someone else.
    pub fn handler_count(&self) -> usize {
        usize::from(self.filter.is_some())
    }

    /// Change the minimum severity of the installed handler.
    pub fn set_level(&self, level: LogLevel) {
        *self.level.lock().unwrap_or_else(PoisonError::into_inner) = level;
        if let Some(handle) = &self.filter {
            // Only fails once the global subscriber is gone.
            let _ = handle.reload(targets_for(level));
        }
    }
}

impl fmt::Debug for ReuseLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReuseLogger")
            .field("name", &self.name())
            .field("level", &self.level())
            .field("handlers", &self.handler_count())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Configure the `reuse` logger with a console handler at `level`.
///
/// The first call installs the handler. Later calls only update the level,
/// so this is safe to call more than once.
///
/// # Examples
///
/// ```no_run
/// use reuse_logging::{LogLevel, setup_logging};
///
/// let logger = setup_logging(LogLevel::Info);
/// assert_eq!(logger.handler_count(), 1);
/// ```
pub fn setup_logging(level: LogLevel) -> &'static ReuseLogger {
    let logger = LOGGER.get_or_init(|| install(level));
    logger.set_level(level);
    logger
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn targets_for(level: LogLevel) -> Targets {
    Targets::new().with_target(LOGGER_NAME, level.level_filter())
}

fn install(level: LogLevel) -> ReuseLogger {
    let (filter, handle) = reload::Layer::new(targets_for(level));
    let handler = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .event_format(NameLevelMessage);

    let attached = tracing_subscriber::registry()
        .with(filter)
        .with(handler)
        .try_init()
        .is_ok();

    ReuseLogger {
        level: Mutex::new(level),
        filter: attached.then_some(handle),
    }
}

/// Formats events as `<name> - <LEVEL> - <message>`.
///
/// The name is the innermost enabled span the event belongs to, falling
/// back to the event target with `::` written as `.`. Spans meant to name
/// a logger are created at `ERROR` so the filter never drops them.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct NameLevelMessage;

impl<S, N> FormatEvent<S, N> for NameLevelMessage
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let meta = event.metadata();
        match ctx.event_scope().and_then(|mut scope| scope.next()) {
            Some(span) => write!(writer, "{}", span.name())?,
            None => write!(writer, "{}", meta.target().replace("::", "."))?,
        }
        write!(writer, " - {} - ", level_name(meta.level()))?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
