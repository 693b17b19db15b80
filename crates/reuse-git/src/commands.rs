//! Subprocess execution wrapper.
//!
//! [`execute_command`] runs a command to completion and hands back a
//! [`CompletedCommand`] with the exit status and whatever output was
//! captured. Both output streams are captured and stdin is inherited from
//! the parent unless [`CommandOptions`] says otherwise. A non-zero exit is a normal result; only a failure to
//! launch the process is an error (plus non-zero exits when `check` is on).

use std::ffi::{OsStr, OsString};
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};

use thiserror::Error;
use tracing::{Span, debug};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur when running external commands.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The command token list was empty.
    #[error("no command given")]
    EmptyCommand,

    /// The process could not be launched (not found, not executable, or a
    /// bad working directory).
    #[error("failed to execute {program}: {source}")]
    Spawn {
        /// The program that was being launched.
        program: String,
        /// The underlying launch error.
        #[source]
        source: std::io::Error,
    },

    /// The command exited with a non-zero status and the caller asked for
    /// that to be checked.
    #[error("command failed (exit code {code:?}): {stderr}")]
    Failed {
        /// The exit code, or `None` if the process was killed by a signal.
        code: Option<i32>,
        /// The content of stderr.
        stderr: String,
    },

    /// The current working directory could not be determined.
    #[error("cannot determine current directory: {0}")]
    CurrentDir(#[source] std::io::Error),
}

/// A specialized `Result` type for command execution.
pub type Result<T> = std::result::Result<T, CommandError>;

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Where a child's standard stream is connected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Redirect {
    /// Collect into the [`CompletedCommand`]. For stdin this is a pipe
    /// that is closed straight away, so the child reads end-of-file.
    #[default]
    Capture,
    /// Share the parent's stream.
    Inherit,
    /// Discard.
    Null,
}

impl Redirect {
    fn stdio(self) -> Stdio {
        match self {
            Redirect::Capture => Stdio::piped(),
            Redirect::Inherit => Stdio::inherit(),
            Redirect::Null => Stdio::null(),
        }
    }
}

/// Optional execution parameters for [`execute_command`].
///
/// ```
/// use reuse_git::commands::{CommandOptions, Redirect};
///
/// let opts = CommandOptions::new()
///     .cwd("/tmp")
///     .stdin(Redirect::Null)
///     .stderr(Redirect::Null)
///     .env("GIT_TERMINAL_PROMPT", "0");
/// assert!(!opts.is_checked());
/// ```
#[derive(Debug, Clone)]
pub struct CommandOptions {
    cwd: Option<PathBuf>,
    stdin: Redirect,
    stdout: Redirect,
    stderr: Redirect,
    env: Vec<(OsString, OsString)>,
    check: bool,
}

impl Default for CommandOptions {
    fn default() -> Self {
        Self {
            cwd: None,
            stdin: Redirect::Inherit,
            stdout: Redirect::Capture,
            stderr: Redirect::Capture,
            env: Vec::new(),
            check: false,
        }
    }
}

impl CommandOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run the command in `dir` instead of the current directory.
    pub fn cwd(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Where the child reads input from. Defaults to the parent's stdin.
    pub fn stdin(mut self, redirect: Redirect) -> Self {
        self.stdin = redirect;
        self
    }

    pub fn stdout(mut self, redirect: Redirect) -> Self {
        self.stdout = redirect;
        self
    }

    pub fn stderr(mut self, redirect: Redirect) -> Self {
        self.stderr = redirect;
        self
    }

    /// Set an extra environment variable for the child.
    pub fn env(mut self, key: impl Into<OsString>, value: impl Into<OsString>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Turn a non-zero exit into [`CommandError::Failed`].
    pub fn check(mut self, check: bool) -> Self {
        self.check = check;
        self
    }

    pub fn is_checked(&self) -> bool {
        self.check
    }
}

// ---------------------------------------------------------------------------
// Result
// ---------------------------------------------------------------------------

/// A process that ran to completion.
#[derive(Debug, Clone)]
pub struct CompletedCommand {
    /// The tokens that were executed, program first.
    pub args: Vec<OsString>,
    pub status: ExitStatus,
    /// Captured stdout; empty unless stdout was [`Redirect::Capture`].
    pub stdout: Vec<u8>,
    /// Captured stderr; empty unless stderr was [`Redirect::Capture`].
    pub stderr: Vec<u8>,
}

impl CompletedCommand {
    /// The exit code, or `None` if the process was killed by a signal.
    pub fn returncode(&self) -> Option<i32> {
        self.status.code()
    }

    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Captured stdout, lossily decoded as UTF-8.
    pub fn stdout_text(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    /// Captured stderr, lossily decoded as UTF-8.
    pub fn stderr_text(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Run `command` synchronously and wait for it to finish.
///
/// The first token is the program, the rest are its arguments. The
/// invocation is logged at debug level under `logger`. There is no
/// timeout: a process that never exits blocks the caller.
///
/// # Errors
///
/// Returns [`CommandError::EmptyCommand`] for an empty token list,
/// [`CommandError::Spawn`] if the program cannot be launched, and
/// [`CommandError::Failed`] for a non-zero exit when
/// [`CommandOptions::check`] is set.
///
/// # Examples
///
/// ```no_run
/// use reuse_git::commands::{CommandOptions, execute_command};
///
/// let logger = tracing::error_span!("reuse.example");
/// let result = execute_command(&["git", "--version"], &logger, &CommandOptions::new()).unwrap();
/// println!("{}", result.stdout_text());
/// ```
pub fn execute_command<S: AsRef<OsStr>>(
    command: &[S],
    logger: &Span,
    options: &CommandOptions,
) -> Result<CompletedCommand> {
    let (program, rest) = command.split_first().ok_or(CommandError::EmptyCommand)?;

    let joined = command
        .iter()
        .map(|token| token.as_ref().to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ");
    debug!(parent: logger, "running {joined}");

    let mut cmd = Command::new(program);
    cmd.args(rest)
        .stdin(options.stdin.stdio())
        .stdout(options.stdout.stdio())
        .stderr(options.stderr.stdio())
        .envs(options.env.iter().map(|(k, v)| (k, v)));
    if let Some(dir) = &options.cwd {
        cmd.current_dir(dir);
    }

    let output = cmd.output().map_err(|source| CommandError::Spawn {
        program: program.as_ref().to_string_lossy().into_owned(),
        source,
    })?;

    if options.check && !output.status.success() {
        return Err(CommandError::Failed {
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(CompletedCommand {
        args: command.iter().map(|t| t.as_ref().to_os_string()).collect(),
        status: output.status,
        stdout: output.stdout,
        stderr: output.stderr,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn logger() -> Span {
        tracing::error_span!("reuse.test")
    }

    #[test]
    fn test_execute_git_version() {
        let result = execute_command(&["git", "--version"], &logger(), &CommandOptions::new())
            .expect("git --version should run");
        assert!(result.success());
        assert_eq!(result.returncode(), Some(0));
        assert!(
            result.stdout_text().starts_with("git version"),
            "unexpected output: {}",
            result.stdout_text()
        );
        assert_eq!(result.args, vec![OsString::from("git"), OsString::from("--version")]);
    }

    #[test]
    fn test_nonzero_exit_is_not_an_error() {
        let result = execute_command(
            &["git", "not-a-real-subcommand"],
            &logger(),
            &CommandOptions::new(),
        )
        .unwrap();
        assert!(!result.success());
        assert!(result.returncode().is_some_and(|code| code != 0));
        assert!(!result.stderr.is_empty());
    }

    #[test]
    fn test_check_turns_nonzero_exit_into_error() {
        let err = execute_command(
            &["git", "not-a-real-subcommand"],
            &logger(),
            &CommandOptions::new().check(true),
        )
        .unwrap_err();
        match err {
            CommandError::Failed { code, stderr } => {
                assert!(code.is_some());
                assert!(!stderr.is_empty());
            }
            other => panic!("expected Failed, got: {other:?}"),
        }
    }

    #[test]
    fn test_missing_executable_propagates_spawn_error() {
        let err = execute_command(
            &["reuse-definitely-not-a-real-program"],
            &logger(),
            &CommandOptions::new(),
        )
        .unwrap_err();
        match err {
            CommandError::Spawn { program, source } => {
                assert_eq!(program, "reuse-definitely-not-a-real-program");
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected Spawn, got: {other:?}"),
        }
    }

    #[test]
    fn test_empty_command() {
        let err = execute_command::<&str>(&[], &logger(), &CommandOptions::new()).unwrap_err();
        assert!(matches!(err, CommandError::EmptyCommand));
    }

    #[test]
    fn test_bad_cwd_is_a_spawn_error() {
        let err = execute_command(
            &["git", "status"],
            &logger(),
            &CommandOptions::new().cwd("/nonexistent/directory/xyz"),
        )
        .unwrap_err();
        assert!(matches!(err, CommandError::Spawn { .. }));
    }

    #[test]
    fn test_null_redirect_captures_nothing() {
        let result = execute_command(
            &["git", "--version"],
            &logger(),
            &CommandOptions::new().stdout(Redirect::Null),
        )
        .unwrap();
        assert!(result.success());
        assert!(result.stdout.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_exit_code_matches_process() {
        let result = execute_command(&["sh", "-c", "exit 3"], &logger(), &CommandOptions::new())
            .unwrap();
        assert_eq!(result.returncode(), Some(3));
    }

    #[test]
    fn test_stdin_is_inherited_by_default() {
        let opts = CommandOptions::new();
        assert_eq!(opts.stdin, Redirect::Inherit);
        assert_eq!(opts.stdout, Redirect::Capture);
        assert_eq!(opts.stderr, Redirect::Capture);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_child_shares_parent_stdin() {
        let ours = std::fs::read_link("/proc/self/fd/0").unwrap();
        let result = execute_command(
            &["readlink", "/proc/self/fd/0"],
            &logger(),
            &CommandOptions::new(),
        )
        .unwrap();
        assert!(result.success());
        assert_eq!(
            result.stdout_text().trim_end_matches('\n'),
            ours.to_string_lossy()
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_captured_stdin_reads_end_of_file() {
        let result = execute_command(
            &["sh", "-c", "cat; echo done"],
            &logger(),
            &CommandOptions::new().stdin(Redirect::Capture),
        )
        .unwrap();
        assert_eq!(result.stdout_text(), "done\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_cwd_and_env_are_applied() {
        let dir = tempfile::tempdir().unwrap();
        let opts = CommandOptions::new()
            .cwd(dir.path())
            .env("REUSE_TEST_VALUE", "hello");
        let result = execute_command(
            &["sh", "-c", "pwd; printf %s \"$REUSE_TEST_VALUE\""],
            &logger(),
            &opts,
        )
        .unwrap();

        let stdout = result.stdout_text();
        let mut lines = stdout.lines();
        let pwd = std::path::PathBuf::from(lines.next().unwrap());
        assert_eq!(
            pwd.canonicalize().unwrap(),
            dir.path().canonicalize().unwrap()
        );
        assert_eq!(lines.next(), Some("hello"));
    }
}
