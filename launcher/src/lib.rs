//! Host-side tools for the joystick link.
//!
//! - [`launch`]: check that the receiver's interpreter is installed, then
//!   start the receiver script detached and return immediately.
//! - [`scan`]: find the serial port the transmitter is streaming on.
//!
//! Everything that touches processes or the terminal goes through
//! [`ProcessHost`], so the launch sequence can be tested without spawning
//! anything.

pub mod config;
pub mod error;
pub mod host;
pub mod launch;
pub mod ports;
pub mod scan;

pub use config::{LauncherConfig, BT_PORT_VAR};
pub use error::LauncherError;
pub use host::{ProcessHost, SpawnSpec, SystemHost};
pub use launch::{launch, run};
pub use ports::{select_bluetooth_port, PortCandidate, PortKind};
pub use scan::{scan_ports, ScanHit, SCAN_BAUD_RATE};
