//! Launcher errors.

use std::ffi::OsString;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that stop the launcher before the receiver is running.
#[derive(Debug, Error)]
pub enum LauncherError {
    /// The launcher could not find its own executable.
    #[error("cannot locate the launcher executable: {0}")]
    CurrentExe(#[source] io::Error),

    /// The interpreter is not installed or not on `PATH`.
    #[error("{} is not installed or not on PATH", .interpreter.to_string_lossy())]
    InterpreterNotFound { interpreter: OsString },

    /// The interpreter exists but could not be run.
    #[error("cannot run {}: {source}", .interpreter.to_string_lossy())]
    InterpreterFailed {
        interpreter: OsString,
        source: io::Error,
    },

    /// `<interpreter> --version` ran but reported failure.
    #[error("{} --version exited with {}", .interpreter.to_string_lossy(), exit_status(.code))]
    InterpreterExited {
        interpreter: OsString,
        code: Option<i32>,
    },

    #[error("cannot change directory to {}: {source}", .path.display())]
    WorkingDirectory { path: PathBuf, source: io::Error },

    #[error("failed to start {}: {source}", .script.to_string_lossy())]
    Spawn { script: OsString, source: io::Error },
}

impl LauncherError {
    /// Whether the interpreter itself is the problem.
    #[must_use]
    pub fn is_interpreter_missing(&self) -> bool {
        matches!(
            self,
            Self::InterpreterNotFound { .. }
                | Self::InterpreterFailed { .. }
                | Self::InterpreterExited { .. }
        )
    }
}

fn exit_status(code: &Option<i32>) -> String {
    code.map_or_else(|| "no exit code".to_string(), |c| format!("status {c}"))
}
