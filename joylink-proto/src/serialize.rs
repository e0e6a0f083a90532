//! Line serialization for joystick samples.
//!
//! This module provides the [`Serialize`] trait and the two line types the
//! transmitter emits for every sample.
//!
//! # Line Formats
//!
//! ## Bluetooth Frame
//!
//! ```text
//! X=<x>;Y=<y>\n
//! ```
//!
//! ## Debug Line
//!
//! ```text
//! X:<x> | Y:<y>\n
//! ```
//!
//! # Example
//!
//! ```
//! use joylink_proto::{DebugLine, JoystickSample, Serialize};
//!
//! let mut buf = [0u8; 32];
//! let len = DebugLine(JoystickSample::new(3, 1000)).serialize(&mut buf).unwrap();
//! assert_eq!(&buf[..len], b"X:3 | Y:1000\n");
//! ```

use crate::fmt::{write_u16, MAX_U16_DIGITS};
use crate::types::JoystickSample;

/// Cursor over an output buffer.
struct SerializeBuf<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> SerializeBuf<'a> {
    #[inline]
    fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    #[inline]
    fn write_slice(&mut self, bytes: &[u8]) {
        self.buf[self.pos..self.pos + bytes.len()].copy_from_slice(bytes);
        self.pos += bytes.len();
    }

    #[inline]
    fn write_u16(&mut self, value: u16) {
        let mut tmp = [0u8; MAX_U16_DIGITS];
        let len = write_u16(&mut tmp, value);
        self.write_slice(&tmp[..len]);
    }

    /// Terminate the line and return its length.
    #[inline]
    fn finalize(mut self) -> usize {
        self.write_slice(b"\n");
        self.pos
    }
}

/// Maximum size of a serialized Bluetooth frame.
///
/// Breakdown: `X=`(2) + x(4) + `;Y=`(3) + y(4) + `\n`(1) = 14
pub const MAX_FRAME_SIZE: usize = 16;

/// Maximum size of a serialized debug line.
///
/// Breakdown: `X:`(2) + x(4) + ` | Y:`(5) + y(4) + `\n`(1) = 16
pub const MAX_DEBUG_LINE_SIZE: usize = 20;

/// Error type for serialization operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SerializeError {
    /// The output buffer is too small to hold the serialized line.
    BufferTooSmall,
    /// A write operation failed (for I/O adapters).
    WriteError,
}

impl core::fmt::Display for SerializeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::BufferTooSmall => write!(f, "buffer too small"),
            Self::WriteError => write!(f, "write error"),
        }
    }
}

/// Bluetooth frame for one sample: `X=<x>;Y=<y>\n`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame(pub JoystickSample);

/// Debug console line for one sample: `X:<x> | Y:<y>\n`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DebugLine(pub JoystickSample);

/// Extension trait for serializing protocol lines.
///
/// Implemented for [`Frame`] and [`DebugLine`].
pub trait Serialize {
    /// Smallest buffer [`serialize`](Serialize::serialize) accepts.
    const MAX_SIZE: usize;

    /// Serialize to the provided buffer.
    ///
    /// Returns the number of bytes written on success.
    ///
    /// # Errors
    ///
    /// Returns [`SerializeError::BufferTooSmall`] if `buf` is shorter than
    /// [`MAX_SIZE`](Serialize::MAX_SIZE).
    fn serialize(&self, buf: &mut [u8]) -> Result<usize, SerializeError>;

    /// Serialize to a `heapless::Vec`.
    ///
    /// # Errors
    ///
    /// Returns [`SerializeError::BufferTooSmall`] if `N` is not large enough.
    #[cfg(feature = "heapless")]
    fn serialize_to_vec<const N: usize>(&self) -> Result<heapless::Vec<u8, N>, SerializeError> {
        let mut vec = heapless::Vec::new();
        vec.resize(N, 0)
            .map_err(|_| SerializeError::BufferTooSmall)?;
        let len = self.serialize(&mut vec)?;
        vec.truncate(len);
        Ok(vec)
    }

    /// Serialize to a `core::fmt::Write` implementation.
    ///
    /// # Errors
    ///
    /// Returns [`SerializeError::WriteError`] if the write fails.
    fn serialize_fmt<W: core::fmt::Write>(&self, writer: &mut W) -> Result<(), SerializeError> {
        let mut buf = [0u8; MAX_DEBUG_LINE_SIZE];
        let len = self.serialize(&mut buf)?;
        let s = core::str::from_utf8(&buf[..len]).map_err(|_| SerializeError::WriteError)?;
        writer.write_str(s).map_err(|_| SerializeError::WriteError)
    }

    /// Serialize to an `embedded_io::Write` implementation.
    ///
    /// # Errors
    ///
    /// Returns [`SerializeError::WriteError`] if the write fails.
    #[cfg(feature = "embedded-io")]
    fn serialize_io<W: embedded_io::Write>(&self, writer: &mut W) -> Result<(), SerializeError> {
        let mut buf = [0u8; MAX_DEBUG_LINE_SIZE];
        let len = self.serialize(&mut buf)?;
        writer
            .write_all(&buf[..len])
            .map_err(|_| SerializeError::WriteError)
    }
}

impl Serialize for Frame {
    const MAX_SIZE: usize = MAX_FRAME_SIZE;

    fn serialize(&self, buf: &mut [u8]) -> Result<usize, SerializeError> {
        if buf.len() < Self::MAX_SIZE {
            return Err(SerializeError::BufferTooSmall);
        }

        let mut sb = SerializeBuf::new(buf);
        sb.write_slice(b"X=");
        sb.write_u16(self.0.x);
        sb.write_slice(b";Y=");
        sb.write_u16(self.0.y);
        Ok(sb.finalize())
    }
}

impl Serialize for DebugLine {
    const MAX_SIZE: usize = MAX_DEBUG_LINE_SIZE;

    fn serialize(&self, buf: &mut [u8]) -> Result<usize, SerializeError> {
        if buf.len() < Self::MAX_SIZE {
            return Err(SerializeError::BufferTooSmall);
        }

        let mut sb = SerializeBuf::new(buf);
        sb.write_slice(b"X:");
        sb.write_u16(self.0.x);
        sb.write_slice(b" | Y:");
        sb.write_u16(self.0.y);
        Ok(sb.finalize())
    }
}

#[cfg(test)]
mod tests {
    extern crate std;
    use std::string::String;

    use super::*;
    use crate::types::ADC_MAX;

    fn frame_bytes(x: u16, y: u16) -> ([u8; MAX_FRAME_SIZE], usize) {
        let mut buf = [0u8; MAX_FRAME_SIZE];
        let len = Frame(JoystickSample::new(x, y)).serialize(&mut buf).unwrap();
        (buf, len)
    }

    /// Checks `X=<digits>;Y=<digits>\n` with both values in range.
    fn is_valid_frame(line: &[u8]) -> bool {
        let Some(body) = line.strip_suffix(b"\n") else {
            return false;
        };
        let Some(rest) = body.strip_prefix(b"X=") else {
            return false;
        };
        let Some(sep) = rest.iter().position(|&b| b == b';') else {
            return false;
        };
        let (x, y) = (&rest[..sep], &rest[sep + 1..]);
        let Some(y) = y.strip_prefix(b"Y=") else {
            return false;
        };
        let in_range = |digits: &[u8]| {
            !digits.is_empty()
                && digits.len() <= 4
                && digits.iter().all(u8::is_ascii_digit)
                && core::str::from_utf8(digits)
                    .ok()
                    .and_then(|s| s.parse::<u16>().ok())
                    .is_some_and(|v| v <= ADC_MAX)
        };
        in_range(x) && in_range(y)
    }

    #[test]
    fn test_frame_center() {
        let (buf, len) = frame_bytes(512, 512);
        assert_eq!(&buf[..len], b"X=512;Y=512\n");
    }

    #[test]
    fn test_frame_extremes() {
        let (buf, len) = frame_bytes(0, 1023);
        assert_eq!(&buf[..len], b"X=0;Y=1023\n");

        let (buf, len) = frame_bytes(1023, 0);
        assert_eq!(&buf[..len], b"X=1023;Y=0\n");
    }

    #[test]
    fn test_every_sample_matches_frame_pattern() {
        for v in 0..=ADC_MAX {
            let (buf, len) = frame_bytes(v, ADC_MAX - v);
            assert!(is_valid_frame(&buf[..len]), "bad frame for {}", v);
            assert!(len <= 14);
        }
    }

    #[test]
    fn test_debug_line() {
        let mut buf = [0u8; MAX_DEBUG_LINE_SIZE];
        let len = DebugLine(JoystickSample::new(1023, 1023))
            .serialize(&mut buf)
            .unwrap();
        assert_eq!(&buf[..len], b"X:1023 | Y:1023\n");
        assert_eq!(len, 16);
    }

    #[test]
    fn test_buffer_too_small() {
        let mut buf = [0u8; 8];
        assert_eq!(
            Frame(JoystickSample::CENTER).serialize(&mut buf),
            Err(SerializeError::BufferTooSmall)
        );
        assert_eq!(
            DebugLine(JoystickSample::CENTER).serialize(&mut [0u8; MAX_FRAME_SIZE]),
            Err(SerializeError::BufferTooSmall)
        );
    }

    #[test]
    fn test_serialize_fmt() {
        let mut out = String::new();
        Frame(JoystickSample::new(10, 20))
            .serialize_fmt(&mut out)
            .unwrap();
        assert_eq!(out, "X=10;Y=20\n");
    }
}
