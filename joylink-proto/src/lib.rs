//! Wire format for the joystick link.
//!
//! This crate provides everything needed to produce and consume the text
//! lines exchanged by the joystick firmware:
//!
//! - **Types**: [`JoystickSample`] - one pair of 10-bit analog readings
//!
//! - **Serialization**: [`Serialize`] trait, implemented by
//!   - [`Frame`] - the Bluetooth frame `X=<x>;Y=<y>\n`
//!   - [`DebugLine`] - the human-readable line `X:<x> | Y:<y>\n`
//!
//! - **Parsing**: [`parse_frame()`] - decode a received Bluetooth frame
//!
//! # Protocol Format
//!
//! ```text
//! X=<x>;Y=<y>\n
//! ```
//!
//! - `x`, `y` - unsigned decimal, `0..=1023`
//! - no framing, no checksum; one frame per line
//!
//! # Examples
//!
//! ```
//! use joylink_proto::{parse_frame, Frame, JoystickSample, Serialize};
//!
//! let sample = JoystickSample::new(512, 1023);
//! let mut buf = [0u8; 32];
//! let len = Frame(sample).serialize(&mut buf).unwrap();
//! assert_eq!(&buf[..len], b"X=512;Y=1023\n");
//!
//! assert_eq!(parse_frame(&buf[..len]), Ok(sample));
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting (for embedded logging)
//! - **`heapless`**: Enable `serialize_to_vec()`
//! - **`embedded-io`**: Enable `serialize_io()` for I/O peripherals

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

mod fmt;
pub mod parser;
pub mod serialize;
pub mod types;

pub use parser::{parse_frame, ParseError};
pub use serialize::{
    DebugLine, Frame, Serialize, SerializeError, MAX_DEBUG_LINE_SIZE, MAX_FRAME_SIZE,
};
pub use types::{JoystickSample, ADC_BITS, ADC_CENTER, ADC_MAX};
