//! Find the serial port a transmitter is streaming on.

use crate::ports::PortCandidate;
use joylink_proto::{parse_frame, JoystickSample};
use log::{info, warn};
use std::fmt::Display;
use std::io::{self, BufRead, BufReader, Read};
use std::time::Duration;

/// Baud rate of the transmitter's Bluetooth link.
pub const SCAN_BAUD_RATE: u32 = 38_400;
/// Read timeout for each port.
pub const SCAN_TIMEOUT: Duration = Duration::from_secs(1);
/// Wait after opening a port before reading, so a line can arrive.
pub const SCAN_SETTLE: Duration = Duration::from_secs(1);

/// First port that produced data.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanHit {
    pub port: String,
    /// The line read, trimmed.
    pub line: String,
    /// The line decoded as a transmitter frame, if it is one.
    pub sample: Option<JoystickSample>,
}

/// Try each port in turn and stop at the first one that yields a line.
///
/// `open` opens a port (and waits for it to settle); errors on one port
/// are logged and scanning moves on.
pub fn scan_ports<F, R, E>(ports: &[PortCandidate], mut open: F) -> Option<ScanHit>
where
    F: FnMut(&str) -> Result<R, E>,
    R: Read,
    E: Display,
{
    for port in ports {
        info!("Testing {} ({})", port.name, describe(port));
        let reader = match open(&port.name) {
            Ok(reader) => reader,
            Err(e) => {
                warn!("Error on {}: {e}", port.name);
                continue;
            }
        };

        match read_line(reader) {
            Ok(line) if !line.is_empty() => {
                info!("Data received from {}: {line}", port.name);
                return Some(ScanHit {
                    port: port.name.clone(),
                    sample: parse_frame(line.as_bytes()).ok(),
                    line,
                });
            }
            Ok(_) => {}
            Err(e) => warn!("Error on {}: {e}", port.name),
        }
    }
    None
}

/// Read up to one line; a timeout just ends the line early.
fn read_line<R: Read>(reader: R) -> io::Result<String> {
    let mut bytes = Vec::new();
    match BufReader::new(reader).read_until(b'\n', &mut bytes) {
        Ok(_) => {}
        Err(e) if e.kind() == io::ErrorKind::TimedOut => {}
        Err(e) => return Err(e),
    }
    Ok(String::from_utf8_lossy(&bytes).trim().to_string())
}

fn describe(port: &PortCandidate) -> &str {
    if port.description.is_empty() {
        "n/a"
    } else {
        &port.description
    }
}
