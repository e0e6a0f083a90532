//! Launcher configuration from environment variables.

use crate::error::LauncherError;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Interpreter used when `JOYLINK_INTERPRETER` is unset.
pub const DEFAULT_INTERPRETER: &str = "python";
/// Receiver script used when `JOYLINK_SCRIPT` is unset.
pub const DEFAULT_SCRIPT: &str = "character.py";

pub const INTERPRETER_VAR: &str = "JOYLINK_INTERPRETER";
pub const SCRIPT_VAR: &str = "JOYLINK_SCRIPT";
pub const WORKDIR_VAR: &str = "JOYLINK_WORKDIR";
/// Serial port handed to the receiver script.
pub const BT_PORT_VAR: &str = "BT_COM_PORT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LauncherConfig {
    pub interpreter: OsString,
    /// Script path, relative to `workdir` unless absolute.
    pub script: OsString,
    pub workdir: PathBuf,
    /// Port already chosen by the user; disables auto-detection.
    pub bt_port: Option<OsString>,
}

impl LauncherConfig {
    /// Read the configuration from the process environment.
    ///
    /// The working directory defaults to the directory holding the
    /// launcher executable.
    pub fn from_env() -> Result<Self, LauncherError> {
        let exe = std::env::current_exe().map_err(LauncherError::CurrentExe)?;
        let exe_dir = exe.parent().unwrap_or_else(|| Path::new("."));
        Ok(Self::from_lookup(exe_dir, |name| std::env::var_os(name)))
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(exe_dir: &Path, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<OsString>,
    {
        // Empty values count as unset
        let var = |name: &str| lookup(name).filter(|v| !v.is_empty());

        Self {
            interpreter: var(INTERPRETER_VAR).unwrap_or_else(|| DEFAULT_INTERPRETER.into()),
            script: var(SCRIPT_VAR).unwrap_or_else(|| DEFAULT_SCRIPT.into()),
            workdir: var(WORKDIR_VAR).map_or_else(|| exe_dir.to_path_buf(), PathBuf::from),
            bt_port: var(BT_PORT_VAR),
        }
    }
}
