//! Platform-agnostic joystick transmitter and serial bridge.
//!
//! This crate holds the two firmware loops without any platform-specific
//! dependencies. It runs on embedded `no_std` targets and on the host for
//! testing.
//!
//! # Overview
//!
//! - [`channel`]: Serial link trait ([`SerialChannel`])
//! - [`input`]: Analog joystick trait ([`JoystickInput`])
//! - [`transmitter`]: Periodic sample streaming ([`JoystickTransmitter`])
//! - [`bridge`]: PC ↔ Bluetooth relay ([`SerialBridge`])
//! - [`line`]: Non-blocking line scanner ([`LineAccumulator`])
//! - [`config`]: Loop settings and link constants
//!
//! # Wire Format
//!
//! The transmitter writes, once per period:
//!
//! ```text
//! X=<x>;Y=<y>\n        (Bluetooth)
//! X:<x> | Y:<y>\n      (debug)
//! ```
//!
//! The bridge forwards PC bytes unchanged and relays each Bluetooth line as
//! `BT → <line>\n`.
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Log and format through defmt (embedded targets)
//! - **`log`**: Log through the `log` facade (host builds)

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

// Must come first so the logging macros are visible to the modules below.
mod fmt;

pub mod bridge;
pub mod channel;
pub mod config;
pub mod input;
pub mod line;
pub mod transmitter;

#[cfg(test)]
mod testing;

pub use bridge::{BridgeActivity, SerialBridge, LINE_PREFIX, MAX_RELAY_SIZE};
pub use channel::{ChannelError, SerialChannel};
pub use config::{
    BridgeConfig, BridgeMode, TransmitterConfig, BAUD_RATE, DEFAULT_IDLE_POLL_US,
    DEFAULT_LINE_TIMEOUT_MS, DEFAULT_PERIOD_MS, MAX_LINE_LENGTH,
};
pub use input::{JoystickInput, SampleError};
pub use line::LineAccumulator;
pub use transmitter::JoystickTransmitter;

// Re-export the wire format so platform crates need a single dependency
pub use joylink_proto::{
    parse_frame, DebugLine, Frame, JoystickSample, ParseError, Serialize, ADC_BITS, ADC_MAX,
};
