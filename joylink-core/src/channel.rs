//! Serial channel trait and error types.

use core::future::Future;

/// Error type for serial channel operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChannelError {
    /// UART/USB I/O error.
    Io,
    /// Peer not attached (e.g., USB host not connected).
    Disconnected,
    /// Transmit buffer could not take the bytes.
    Overflow,
}

/// A byte-oriented serial link (debug/USB or Bluetooth).
///
/// This trait hides the concrete peripheral so the transmitter and bridge
/// loops can run against UART, USB CDC or in-memory mocks alike. Concrete
/// pin wiring belongs to the platform layer.
///
/// # `no_std` Compatibility
///
/// All implementations must be `#![no_std]` compatible with no heap allocation.
pub trait SerialChannel {
    /// Take one received byte if one is already buffered.
    ///
    /// Never waits: returns `None` when nothing has arrived.
    fn read_byte(&mut self) -> Option<u8>;

    /// Write all of `bytes` to the link.
    ///
    /// May wait for transmit buffer space. Callers treat writes as
    /// fire-and-forget; the error is only logged.
    fn write_bytes(&mut self, bytes: &[u8]) -> impl Future<Output = Result<(), ChannelError>>;
}

/// Write and swallow the error, logging it at trace level.
pub(crate) async fn send<C: SerialChannel>(channel: &mut C, bytes: &[u8]) {
    if let Err(e) = channel.write_bytes(bytes).await {
        trace!("Dropped {} bytes: {:?}", bytes.len(), e);
    }
}
