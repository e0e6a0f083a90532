//! Parser for received Bluetooth frames.
//!
//! Decodes `X=<x>;Y=<y>` lines as produced by [`Frame`](crate::Frame), and
//! the flat JSON objects (`{"x":<x>,"y":<y>}`) some receivers stream instead.

use crate::fmt::parse_u16;
use crate::types::{JoystickSample, ADC_MAX};

/// Error type for frame parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// The line is not shaped like `X=<x>;Y=<y>`.
    Malformed,
    /// A value is a valid number but above [`ADC_MAX`].
    OutOfRange,
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Malformed => write!(f, "malformed frame"),
            Self::OutOfRange => write!(f, "value out of range"),
        }
    }
}

/// Parse one frame into a [`JoystickSample`].
///
/// A trailing `\n`, `\r\n` or `\r` is ignored. A line starting with `{` is
/// read as a JSON object with integer `"x"` and `"y"` members; other members
/// are ignored.
///
/// # Example
///
/// ```
/// use joylink_proto::{parse_frame, JoystickSample};
///
/// assert_eq!(parse_frame(b"X=100;Y=900\r\n"), Ok(JoystickSample::new(100, 900)));
/// assert_eq!(parse_frame(b"{\"x\": 3, \"y\": 7}\n"), Ok(JoystickSample::new(3, 7)));
/// ```
pub fn parse_frame(line: &[u8]) -> Result<JoystickSample, ParseError> {
    let line = strip_line_ending(line);
    if line.trim_ascii_start().starts_with(b"{") {
        return parse_json_frame(line);
    }

    let mut parts = line.split(|&b| b == b';');
    let x = parse_field(parts.next(), b"X=")?;
    let y = parse_field(parts.next(), b"Y=")?;

    if parts.next().is_some() {
        return Err(ParseError::Malformed);
    }

    Ok(JoystickSample { x, y })
}

/// Parse one `<key><value>` field, e.g. `X=512`.
fn parse_field(part: Option<&[u8]>, key: &[u8]) -> Result<u16, ParseError> {
    let value = part
        .and_then(|p| p.strip_prefix(key))
        .ok_or(ParseError::Malformed)?;
    parse_value(value)
}

/// Parse a flat `{"x":<x>,"y":<y>}` object. String values containing `,`
/// or `:` are not supported.
fn parse_json_frame(line: &[u8]) -> Result<JoystickSample, ParseError> {
    let body = line
        .trim_ascii()
        .strip_prefix(b"{")
        .and_then(|b| b.strip_suffix(b"}"))
        .ok_or(ParseError::Malformed)?;

    let mut x = None;
    let mut y = None;
    for member in body.split(|&b| b == b',') {
        let mut kv = member.splitn(2, |&b| b == b':');
        let key = kv.next().map(<[u8]>::trim_ascii).ok_or(ParseError::Malformed)?;
        let value = kv.next().map(<[u8]>::trim_ascii).ok_or(ParseError::Malformed)?;
        let slot = match key {
            b"\"x\"" => &mut x,
            b"\"y\"" => &mut y,
            _ => continue,
        };
        if slot.is_some() {
            return Err(ParseError::Malformed);
        }
        *slot = Some(parse_value(value)?);
    }

    match (x, y) {
        (Some(x), Some(y)) => Ok(JoystickSample { x, y }),
        _ => Err(ParseError::Malformed),
    }
}

fn parse_value(value: &[u8]) -> Result<u16, ParseError> {
    let value = parse_u16(value).ok_or(ParseError::Malformed)?;
    if value > ADC_MAX {
        return Err(ParseError::OutOfRange);
    }
    Ok(value)
}

/// Strip trailing CR and/or LF from a line.
#[inline]
fn strip_line_ending(line: &[u8]) -> &[u8] {
    let mut end = line.len();
    if end > 0 && line[end - 1] == b'\n' {
        end -= 1;
    }
    if end > 0 && line[end - 1] == b'\r' {
        end -= 1;
    }
    &line[..end]
}
