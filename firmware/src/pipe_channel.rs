//! Serial channel over a pair of byte pipes.
//!
//! Peripheral tasks ([`uart_link`](crate::uart_link),
//! [`usb_serial`](crate::usb_serial)) pump bytes between the hardware and
//! two static pipes; the loops only ever see this [`SerialChannel`].

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::pipe::Pipe;
use joylink_core::{ChannelError, SerialChannel, MAX_RELAY_SIZE};

/// Capacity of each direction's pipe; holds at least one relayed line.
pub const PIPE_SIZE: usize = 256;

const _: () = assert!(PIPE_SIZE >= MAX_RELAY_SIZE);

/// Byte pipe shared between a peripheral task and a loop.
pub type BytePipe = Pipe<CriticalSectionRawMutex, PIPE_SIZE>;

/// [`SerialChannel`] reading from `rx` and writing into `tx`.
#[derive(Clone, Copy)]
pub struct PipeChannel {
    rx: &'static BytePipe,
    tx: &'static BytePipe,
}

impl PipeChannel {
    #[must_use]
    pub const fn new(rx: &'static BytePipe, tx: &'static BytePipe) -> Self {
        Self { rx, tx }
    }
}

impl SerialChannel for PipeChannel {
    fn read_byte(&mut self) -> Option<u8> {
        let mut byte = [0u8; 1];
        match self.rx.try_read(&mut byte) {
            Ok(1) => Some(byte[0]),
            _ => None,
        }
    }

    /// Queue `bytes` whole or not at all; never waits for the peer.
    async fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), ChannelError> {
        if self.tx.free_capacity() < bytes.len() {
            return Err(ChannelError::Overflow);
        }
        match self.tx.try_write(bytes) {
            Ok(n) if n == bytes.len() => Ok(()),
            _ => Err(ChannelError::Overflow),
        }
    }
}
