//! Launch sequence: check the interpreter, then start the receiver detached.

use crate::config::{LauncherConfig, BT_PORT_VAR};
use crate::error::LauncherError;
use crate::host::{ProcessHost, SpawnSpec};
use crate::ports::select_bluetooth_port;
use log::{debug, info};
use std::ffi::OsStr;
use std::io;

/// Start the receiver script and return the child's process id.
///
/// Nothing is spawned unless `<interpreter> --version` succeeds.
pub fn launch<H: ProcessHost>(
    host: &mut H,
    config: &LauncherConfig,
) -> Result<u32, LauncherError> {
    host.set_current_dir(&config.workdir)
        .map_err(|source| LauncherError::WorkingDirectory {
            path: config.workdir.clone(),
            source,
        })?;
    debug!("Working directory: {}", config.workdir.display());

    let version = probe_interpreter(host, &config.interpreter)?;
    info!("Found {version}");

    let mut spec = SpawnSpec::new(&config.interpreter).arg(&config.script);
    if config.bt_port.is_none() {
        match select_bluetooth_port(&host.serial_ports()) {
            Some(port) => {
                info!("Using Bluetooth port {port}");
                spec = spec.env(BT_PORT_VAR, port);
            }
            None => debug!("No Bluetooth port found, receiver will auto-detect"),
        }
    }

    host.spawn_detached(&spec)
        .map_err(|source| LauncherError::Spawn {
            script: config.script.clone(),
            source,
        })
}

/// Run [`launch`] and turn the outcome into a process exit status.
///
/// Failures are reported through the host, which then pauses so a
/// double-clicked console window stays open long enough to be read.
pub fn run<H: ProcessHost>(host: &mut H, config: &LauncherConfig) -> i32 {
    match launch(host, config) {
        Ok(pid) => {
            info!("Started {} (pid {pid})", config.script.to_string_lossy());
            0
        }
        Err(e) => {
            host.report(&diagnostic(&e, config));
            host.pause();
            1
        }
    }
}

/// Run `<interpreter> --version` and return what it printed.
fn probe_interpreter<H: ProcessHost>(
    host: &mut H,
    interpreter: &OsStr,
) -> Result<String, LauncherError> {
    let output = host
        .run_captured(interpreter, &[OsStr::new("--version")])
        .map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => LauncherError::InterpreterNotFound {
                interpreter: interpreter.to_owned(),
            },
            _ => LauncherError::InterpreterFailed {
                interpreter: interpreter.to_owned(),
                source,
            },
        })?;

    if !output.status.success() {
        return Err(LauncherError::InterpreterExited {
            interpreter: interpreter.to_owned(),
            code: output.status.code(),
        });
    }

    // Older interpreters print their version on stderr
    let text = if output.stdout.iter().all(u8::is_ascii_whitespace) {
        &output.stderr
    } else {
        &output.stdout
    };
    Ok(String::from_utf8_lossy(text).trim().to_string())
}

/// User-facing text for a launch failure.
fn diagnostic(error: &LauncherError, config: &LauncherConfig) -> String {
    if error.is_interpreter_missing() {
        format!(
            "Error: {error}.\n\
             Install it (for Python: https://www.python.org/downloads/), make sure it is on PATH, \
             or set JOYLINK_INTERPRETER, then run this launcher again."
        )
    } else {
        format!(
            "Error: could not start {}: {error}",
            config.script.to_string_lossy()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{PortCandidate, PortKind};
    use std::ffi::OsString;
    use std::path::{Path, PathBuf};
    use std::process::{ExitStatus, Output};

    #[cfg(unix)]
    fn exit_status(code: i32) -> ExitStatus {
        use std::os::unix::process::ExitStatusExt;
        ExitStatus::from_raw(code << 8)
    }

    #[cfg(windows)]
    fn exit_status(code: i32) -> ExitStatus {
        use std::os::windows::process::ExitStatusExt;
        ExitStatus::from_raw(code as u32)
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        Run(OsString, Vec<OsString>),
        SetCurrentDir(PathBuf),
        Spawn(SpawnSpec),
        SerialPorts,
        Report(String),
        Pause,
    }

    /// Host that records every call and answers from a script.
    struct RecordingHost {
        calls: Vec<Call>,
        /// `None` means the interpreter is not installed.
        version: Option<(i32, &'static str, &'static str)>,
        ports: Vec<PortCandidate>,
        spawn_error: Option<io::ErrorKind>,
    }

    impl RecordingHost {
        fn with_interpreter() -> Self {
            Self {
                calls: Vec::new(),
                version: Some((0, "Python 3.12.1\n", "")),
                ports: Vec::new(),
                spawn_error: None,
            }
        }

        fn without_interpreter() -> Self {
            Self {
                version: None,
                ..Self::with_interpreter()
            }
        }

        fn spawns(&self) -> Vec<&SpawnSpec> {
            self.calls
                .iter()
                .filter_map(|c| match c {
                    Call::Spawn(spec) => Some(spec),
                    _ => None,
                })
                .collect()
        }

        fn reports(&self) -> Vec<&str> {
            self.calls
                .iter()
                .filter_map(|c| match c {
                    Call::Report(msg) => Some(msg.as_str()),
                    _ => None,
                })
                .collect()
        }
    }

    impl ProcessHost for RecordingHost {
        fn run_captured(&mut self, program: &OsStr, args: &[&OsStr]) -> io::Result<Output> {
            self.calls.push(Call::Run(
                program.to_owned(),
                args.iter().map(|a| (*a).to_owned()).collect(),
            ));
            let (code, stdout, stderr) = self.version.ok_or(io::ErrorKind::NotFound)?;
            Ok(Output {
                status: exit_status(code),
                stdout: stdout.as_bytes().to_vec(),
                stderr: stderr.as_bytes().to_vec(),
            })
        }

        fn set_current_dir(&mut self, dir: &Path) -> io::Result<()> {
            self.calls.push(Call::SetCurrentDir(dir.to_path_buf()));
            Ok(())
        }

        fn spawn_detached(&mut self, spec: &SpawnSpec) -> io::Result<u32> {
            self.calls.push(Call::Spawn(spec.clone()));
            match self.spawn_error {
                Some(kind) => Err(kind.into()),
                None => Ok(4242),
            }
        }

        fn serial_ports(&mut self) -> Vec<PortCandidate> {
            self.calls.push(Call::SerialPorts);
            self.ports.clone()
        }

        fn report(&mut self, message: &str) {
            self.calls.push(Call::Report(message.to_string()));
        }

        fn pause(&mut self) {
            self.calls.push(Call::Pause);
        }
    }

    fn config() -> LauncherConfig {
        LauncherConfig::from_lookup(Path::new("/opt/joylink"), |_| None)
    }

    #[test]
    fn test_missing_interpreter_exits_1_without_spawning() {
        let mut host = RecordingHost::without_interpreter();

        assert_eq!(run(&mut host, &config()), 1);

        assert!(host.spawns().is_empty());
        let reports = host.reports();
        assert_eq!(reports.len(), 1);
        assert!(reports[0].contains("python is not installed"));
        assert_eq!(host.calls.last(), Some(&Call::Pause));
    }

    #[test]
    fn test_failing_interpreter_exits_1_without_spawning() {
        let mut host = RecordingHost::with_interpreter();
        host.version = Some((2, "", "not found"));

        assert_eq!(run(&mut host, &config()), 1);
        assert!(host.spawns().is_empty());
        assert!(host.reports()[0].contains("status 2"));
    }

    #[test]
    fn test_valid_interpreter_spawns_once_and_exits_0() {
        let mut host = RecordingHost::with_interpreter();

        assert_eq!(run(&mut host, &config()), 0);

        assert_eq!(
            host.calls[0],
            Call::SetCurrentDir(PathBuf::from("/opt/joylink"))
        );
        assert_eq!(
            host.calls[1],
            Call::Run("python".into(), vec!["--version".into()])
        );
        let spawns = host.spawns();
        assert_eq!(spawns.len(), 1);
        assert_eq!(*spawns[0], SpawnSpec::new("python").arg("character.py"));
        assert!(host.reports().is_empty());
        assert!(!host.calls.contains(&Call::Pause));
    }

    #[test]
    fn test_launch_returns_child_pid() {
        let mut host = RecordingHost::with_interpreter();
        assert_eq!(launch(&mut host, &config()).unwrap(), 4242);
    }

    #[test]
    fn test_version_on_stderr() {
        let mut host = RecordingHost::with_interpreter();
        host.version = Some((0, "", "Python 2.7.18\n"));
        assert_eq!(
            probe_interpreter(&mut host, OsStr::new("python")).unwrap(),
            "Python 2.7.18"
        );
    }

    #[test]
    fn test_detected_port_passed_to_child() {
        let mut host = RecordingHost::with_interpreter();
        host.ports = vec![
            PortCandidate {
                name: "COM3".into(),
                kind: PortKind::Usb,
                description: "Arduino Uno".into(),
            },
            PortCandidate {
                name: "COM5".into(),
                kind: PortKind::Bluetooth,
                description: String::new(),
            },
        ];

        assert_eq!(run(&mut host, &config()), 0);
        assert_eq!(
            *host.spawns()[0],
            SpawnSpec::new("python")
                .arg("character.py")
                .env("BT_COM_PORT", "COM5")
        );
    }

    #[test]
    fn test_configured_port_skips_detection() {
        let mut host = RecordingHost::with_interpreter();
        let mut config = config();
        config.bt_port = Some("COM9".into());

        assert_eq!(run(&mut host, &config), 0);
        assert!(!host.calls.contains(&Call::SerialPorts));
        // The child inherits BT_COM_PORT from our environment
        assert!(host.spawns()[0].envs.is_empty());
    }

    #[test]
    fn test_spawn_failure_exits_1() {
        let mut host = RecordingHost::with_interpreter();
        host.spawn_error = Some(io::ErrorKind::PermissionDenied);

        assert_eq!(run(&mut host, &config()), 1);
        assert_eq!(host.spawns().len(), 1);
        assert!(host.reports()[0].contains("could not start character.py"));
    }
}
