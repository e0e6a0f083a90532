//! Incremental newline scanner for the Bluetooth-to-PC direction.

use crate::config::MAX_LINE_LENGTH;
use heapless::Vec;

/// Accumulates bytes until a `\n` completes a line.
///
/// Never blocks: each [`push`](Self::push) handles one byte and reports a
/// finished line, if any. The delimiter and a trailing `\r` are not part of
/// the returned line. When `N` bytes pile up without a delimiter, they are
/// returned as a line of their own; the `\n` (or `\r\n`) that eventually
/// ends that overlong line is then swallowed.
pub struct LineAccumulator<const N: usize = MAX_LINE_LENGTH> {
    buffer: Vec<u8, N>,
    /// The buffer holds a line that has already been handed out.
    complete: bool,
    /// The last line was flushed because the buffer filled up.
    flushed: bool,
}

impl<const N: usize> LineAccumulator<N> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buffer: Vec::new(),
            complete: false,
            flushed: false,
        }
    }

    /// Feed one byte; returns the line it completes.
    pub fn push(&mut self, byte: u8) -> Option<&[u8]> {
        if self.complete {
            self.buffer.clear();
            self.complete = false;
        }

        if byte == b'\n' {
            if core::mem::take(&mut self.flushed) {
                return None;
            }
            self.complete = true;
            return Some(strip_cr(&self.buffer));
        }

        // CR of a CRLF ending an overlong line
        if byte == b'\r' && self.flushed {
            return None;
        }

        self.flushed = false;
        // Cannot fail: a full buffer is flushed below before the next push
        let _ = self.buffer.push(byte);

        if self.buffer.is_full() {
            self.complete = true;
            self.flushed = true;
            return Some(strip_cr(&self.buffer));
        }

        None
    }

    /// Bytes received since the last completed line.
    #[must_use]
    pub fn pending(&self) -> &[u8] {
        if self.complete {
            &[]
        } else {
            &self.buffer
        }
    }

    /// Hand out the pending bytes as a line even though no delimiter arrived.
    ///
    /// Returns `None` when nothing is pending.
    pub fn take_partial(&mut self) -> Option<&[u8]> {
        if self.complete || self.buffer.is_empty() {
            return None;
        }
        self.complete = true;
        Some(strip_cr(&self.buffer))
    }

    /// Drop any pending bytes.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.complete = false;
        self.flushed = false;
    }
}

impl<const N: usize> Default for LineAccumulator<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
fn strip_cr(line: &[u8]) -> &[u8] {
    line.strip_suffix(b"\r").unwrap_or(line)
}
