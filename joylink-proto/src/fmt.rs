//! No-std compatible number formatting for protocol serialization.
//!
//! Writes decimal digits straight into byte buffers without heap
//! allocation or `core::fmt` machinery.

/// Maximum number of decimal digits in a `u16` ("65535").
pub const MAX_U16_DIGITS: usize = 5;

/// Write a u16 as an unsigned decimal string.
///
/// Returns the number of bytes written (1-5 bytes).
///
/// # Panics
///
/// Panics if `buf` is shorter than the number of digits.
#[inline]
pub fn write_u16(buf: &mut [u8], value: u16) -> usize {
    if value == 0 {
        buf[0] = b'0';
        return 1;
    }

    // Digits come out least significant first
    let mut temp = [0u8; MAX_U16_DIGITS];
    let mut n = value;
    let mut len = 0;
    while n > 0 {
        temp[len] = b'0' + (n % 10) as u8;
        n /= 10;
        len += 1;
    }

    for i in 0..len {
        buf[i] = temp[len - 1 - i];
    }

    len
}

/// Parse an unsigned decimal string as u16.
///
/// Accepts leading spaces, rejects empty input, non-digits and overflow.
#[inline]
pub fn parse_u16(s: &[u8]) -> Option<u16> {
    let start = s.iter().position(|&b| b != b' ').unwrap_or(s.len());
    let s = &s[start..];
    if s.is_empty() {
        return None;
    }

    let mut value: u16 = 0;
    for &b in s {
        if !b.is_ascii_digit() {
            return None;
        }
        value = value.checked_mul(10)?.checked_add((b - b'0') as u16)?;
    }
    Some(value)
}
