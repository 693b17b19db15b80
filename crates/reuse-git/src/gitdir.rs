//! Git checkout detection and root discovery.
//!
//! Whether git is installed at all is modelled by [`GitExecutable`], which is
//! resolved once and then consulted by every query. When git is missing the
//! queries answer "not in a checkout" without launching anything.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use tracing::{Span, error_span, warn};

use crate::commands::{CommandError, CommandOptions, Result, execute_command};

static GIT: LazyLock<GitExecutable> = LazyLock::new(GitExecutable::detect);

// ---------------------------------------------------------------------------
// Capability
// ---------------------------------------------------------------------------

/// The resolved location of the `git` binary, if there is one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GitExecutable {
    path: Option<PathBuf>,
}

impl GitExecutable {
    /// Look `git` up on the search path.
    pub fn detect() -> Self {
        Self {
            path: which::which("git").ok(),
        }
    }

    /// Use `override_path` when given, otherwise [`detect`](Self::detect).
    ///
    /// An override that does not point at an executable leaves git
    /// unavailable rather than falling back to the search path.
    pub fn resolve(override_path: Option<&Path>) -> Self {
        let Some(path) = override_path else {
            return Self::detect();
        };
        match which::which(path) {
            Ok(found) => Self { path: Some(found) },
            Err(err) => {
                warn!("configured git executable {} is unusable: {err}", path.display());
                Self::unavailable()
            }
        }
    }

    /// Use `path` as-is, without checking that it exists.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// A capability with no git binary behind it.
    pub fn unavailable() -> Self {
        Self { path: None }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_available(&self) -> bool {
        self.path.is_some()
    }

    /// Is `cwd` (default: the current directory) inside a git checkout?
    ///
    /// Always `false` when git is unavailable; nothing is executed in that
    /// case. Otherwise runs `git status` in `cwd` and reports whether it
    /// exited cleanly.
    ///
    /// # Errors
    ///
    /// Propagates [`CommandError::Spawn`] if git cannot be launched (for
    /// example when `cwd` does not exist), and [`CommandError::CurrentDir`]
    /// if `cwd` is `None` and the current directory is unreadable.
    pub fn in_git_repo(&self, cwd: Option<&Path>) -> Result<bool> {
        let Some(git) = self.path.as_deref() else {
            return Ok(false);
        };
        let cwd = match cwd {
            Some(dir) => dir.to_path_buf(),
            None => current_dir()?,
        };

        let result = execute_command(
            &[git.as_os_str(), OsStr::new("status")],
            &logger(),
            &CommandOptions::new().cwd(cwd),
        )?;
        Ok(result.success())
    }

    /// Find the top-level directory of the checkout containing `cwd`.
    ///
    /// Returns `Ok(None)` when git is unavailable or `cwd` is not inside a
    /// checkout. The trailing newline git prints is stripped. On Unix the
    /// path keeps git's raw bytes, so non-UTF-8 names survive.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use reuse_git::gitdir::GitExecutable;
    /// use std::path::Path;
    ///
    /// let git = GitExecutable::detect();
    /// if let Some(root) = git.find_root_from(Path::new(".")).unwrap() {
    ///     println!("Git root: {}", root.display());
    /// }
    /// ```
    pub fn find_root_from(&self, cwd: &Path) -> Result<Option<PathBuf>> {
        let Some(git) = self.path.as_deref() else {
            return Ok(None);
        };
        if !self.in_git_repo(Some(cwd))? {
            return Ok(None);
        }

        let result = execute_command(
            &[
                git.as_os_str(),
                OsStr::new("rev-parse"),
                OsStr::new("--show-toplevel"),
            ],
            &logger(),
            &CommandOptions::new().cwd(cwd),
        )?;
        if !result.success() {
            return Ok(None);
        }

        let mut line = result.stdout;
        if line.last() == Some(&b'\n') {
            line.pop();
        }
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        Ok(Some(path_from_git_output(line)))
    }

    /// [`find_root_from`](Self::find_root_from) the current directory.
    pub fn find_root(&self) -> Result<Option<PathBuf>> {
        if !self.is_available() {
            return Ok(None);
        }
        self.find_root_from(&current_dir()?)
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// The process-wide git capability, resolved from the search path on first use.
pub fn git() -> &'static GitExecutable {
    &GIT
}

/// [`GitExecutable::in_git_repo`] using [`git()`].
pub fn in_git_repo(cwd: Option<&Path>) -> Result<bool> {
    git().in_git_repo(cwd)
}

/// [`GitExecutable::find_root`] using [`git()`].
pub fn find_root() -> Result<Option<PathBuf>> {
    git().find_root()
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn logger() -> Span {
    error_span!("reuse.git")
}

fn current_dir() -> Result<PathBuf> {
    std::env::current_dir().map_err(CommandError::CurrentDir)
}

#[cfg(unix)]
fn path_from_git_output(raw: Vec<u8>) -> PathBuf {
    use std::os::unix::ffi::OsStringExt;
    PathBuf::from(std::ffi::OsString::from_vec(raw))
}

/// Git on Windows may print `C:/Users/...` or MSYS-style `/c/Users/...`.
#[cfg(not(unix))]
fn path_from_git_output(raw: Vec<u8>) -> PathBuf {
    PathBuf::from(to_native(&String::from_utf8_lossy(&raw), cfg!(windows)))
}

#[cfg(any(not(unix), test))]
fn to_native(path: &str, windows: bool) -> String {
    if !windows {
        return path.to_string();
    }

    let bytes = path.as_bytes();
    if bytes.len() >= 3 && bytes[0] == b'/' && bytes[1].is_ascii_alphabetic() && bytes[2] == b'/'
    {
        let drive = bytes[1].to_ascii_uppercase() as char;
        return format!("{drive}:{}", path[2..].replace('/', "\\"));
    }

    path.replace('/', "\\")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
