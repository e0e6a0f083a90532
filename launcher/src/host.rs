//! Process and terminal access behind a trait.

use crate::ports::PortCandidate;
use log::warn;
use std::ffi::{OsStr, OsString};
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::Path;
use std::process::{Command, Output, Stdio};

/// Program, arguments and extra environment for a detached child.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpawnSpec {
    pub program: OsString,
    pub args: Vec<OsString>,
    pub envs: Vec<(OsString, OsString)>,
}

impl SpawnSpec {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            envs: Vec::new(),
        }
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    #[must_use]
    pub fn env(mut self, key: impl Into<OsString>, value: impl Into<OsString>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }
}

/// Everything the launch sequence needs from the operating system.
pub trait ProcessHost {
    /// Run `<program> <args>` to completion and capture its output.
    fn run_captured(&mut self, program: &OsStr, args: &[&OsStr]) -> io::Result<Output>;

    fn set_current_dir(&mut self, dir: &Path) -> io::Result<()>;

    /// Start a child detached from this console and return its process id.
    ///
    /// The child is never waited on.
    fn spawn_detached(&mut self, spec: &SpawnSpec) -> io::Result<u32>;

    /// Serial ports currently present; empty when enumeration fails.
    fn serial_ports(&mut self) -> Vec<PortCandidate>;

    /// Show a diagnostic to the user.
    fn report(&mut self, message: &str);

    /// Wait for the user to acknowledge a diagnostic, if anyone is watching.
    fn pause(&mut self);
}

/// [`ProcessHost`] backed by the real operating system.
#[derive(Debug, Default)]
pub struct SystemHost;

impl ProcessHost for SystemHost {
    fn run_captured(&mut self, program: &OsStr, args: &[&OsStr]) -> io::Result<Output> {
        Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()
    }

    fn set_current_dir(&mut self, dir: &Path) -> io::Result<()> {
        std::env::set_current_dir(dir)
    }

    fn spawn_detached(&mut self, spec: &SpawnSpec) -> io::Result<u32> {
        let mut command = Command::new(&spec.program);
        command
            .args(&spec.args)
            .envs(spec.envs.iter().map(|(k, v)| (k, v)))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        detach(&mut command);

        let child = command.spawn()?;
        Ok(child.id())
    }

    fn serial_ports(&mut self) -> Vec<PortCandidate> {
        match serialport::available_ports() {
            Ok(ports) => ports.iter().map(PortCandidate::from).collect(),
            Err(e) => {
                warn!("Could not enumerate serial ports: {e}");
                Vec::new()
            }
        }
    }

    fn report(&mut self, message: &str) {
        eprintln!("{message}");
    }

    fn pause(&mut self) {
        let stdin = io::stdin();
        if !stdin.is_terminal() {
            return;
        }
        eprint!("Press Enter to exit...");
        let _ = io::stderr().flush();
        let mut line = String::new();
        let _ = stdin.lock().read_line(&mut line);
    }
}

#[cfg(windows)]
fn detach(command: &mut Command) {
    use std::os::windows::process::CommandExt;

    const DETACHED_PROCESS: u32 = 0x0000_0008;
    const CREATE_NEW_PROCESS_GROUP: u32 = 0x0000_0200;
    command.creation_flags(DETACHED_PROCESS | CREATE_NEW_PROCESS_GROUP);
}

#[cfg(unix)]
fn detach(command: &mut Command) {
    use std::os::unix::process::CommandExt;

    // Own process group: terminal signals aimed at us skip the child
    command.process_group(0);
}

#[cfg(not(any(windows, unix)))]
fn detach(_command: &mut Command) {}
