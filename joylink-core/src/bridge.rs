//! SerialBridge: shuttles bytes between the PC link and the Bluetooth link.

use crate::channel::{send, SerialChannel};
use crate::config::{BridgeConfig, BridgeMode, MAX_LINE_LENGTH};
use crate::line::LineAccumulator;
use embedded_hal_async::delay::DelayNs;

/// Prefix written before every line relayed from Bluetooth to the PC.
pub const LINE_PREFIX: &[u8] = "BT → ".as_bytes();

/// Longest relayed line on the wire: prefix, [`MAX_LINE_LENGTH`] bytes and `\n`.
pub const MAX_RELAY_SIZE: usize = LINE_PREFIX.len() + MAX_LINE_LENGTH + 1;

/// A bridge between a PC serial channel and a Bluetooth serial channel.
///
/// The two directions are not symmetric:
///
/// - PC → Bluetooth is byte-granular: one byte per iteration, forwarded as is.
/// - Bluetooth → PC is line-granular: received bytes are relayed as
///   `BT → <line>\n` once a line is complete.
///
/// How the Bluetooth side is read depends on [`BridgeMode`]. In
/// [`BridgeMode::LineBlocking`] the whole line is read in one go, which
/// starves the PC direction until the delimiter or the timeout arrives.
/// [`BridgeMode::NonBlocking`] accumulates one byte per iteration instead.
pub struct SerialBridge<P, B, T> {
    pc: P,
    bluetooth: B,
    delay: T,
    config: BridgeConfig,
    line: LineAccumulator<MAX_LINE_LENGTH>,
}

/// What a single bridge iteration did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BridgeActivity {
    /// A PC byte was forwarded to Bluetooth.
    pub forwarded: bool,
    /// At least one Bluetooth byte was consumed.
    pub received: bool,
    /// A `BT → ` line was written to the PC.
    pub relayed_line: bool,
}

impl BridgeActivity {
    /// Nothing moved in either direction.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        !self.forwarded && !self.received
    }
}

impl<P, B, T> SerialBridge<P, B, T>
where
    P: SerialChannel,
    B: SerialChannel,
    T: DelayNs,
{
    /// Create a bridge in the default (non-blocking) mode.
    pub fn new(pc: P, bluetooth: B, delay: T) -> Self {
        Self::with_config(pc, bluetooth, delay, BridgeConfig::default())
    }

    pub fn with_config(pc: P, bluetooth: B, delay: T, config: BridgeConfig) -> Self {
        Self {
            pc,
            bluetooth,
            delay,
            config,
            line: LineAccumulator::new(),
        }
    }

    /// Run the bridge forever.
    ///
    /// Waits `idle_poll_us` after every iteration that moved nothing.
    pub async fn run(&mut self) -> ! {
        loop {
            if self.poll_once().await.is_idle() {
                self.delay.delay_us(self.config.idle_poll_us).await;
            }
        }
    }

    /// One iteration: service PC → Bluetooth, then Bluetooth → PC.
    pub async fn poll_once(&mut self) -> BridgeActivity {
        let mut activity = BridgeActivity::default();

        if let Some(byte) = self.pc.read_byte() {
            send(&mut self.bluetooth, &[byte]).await;
            activity.forwarded = true;
        }

        match self.config.mode {
            BridgeMode::LineBlocking { timeout_ms } => {
                if let Some(first) = self.bluetooth.read_byte() {
                    activity.received = true;
                    activity.relayed_line = self.read_line_blocking(first, timeout_ms).await;
                }
            }
            BridgeMode::NonBlocking => {
                if let Some(byte) = self.bluetooth.read_byte() {
                    activity.received = true;
                    if let Some(line) = self.line.push(byte) {
                        relay_line(&mut self.pc, line).await;
                        activity.relayed_line = true;
                    }
                }
            }
        }

        activity
    }

    /// Keep reading Bluetooth bytes until a line completes or no byte
    /// arrives for `timeout_ms`; a timed-out partial line is relayed as is.
    ///
    /// Returns whether a line was relayed.
    async fn read_line_blocking(&mut self, first: u8, timeout_ms: u32) -> bool {
        let step_us = self.config.idle_poll_us.max(1);
        let timeout_us = timeout_ms.saturating_mul(1000);
        let mut idle_us: u32 = 0;
        let mut next = Some(first);

        loop {
            match next.take().or_else(|| self.bluetooth.read_byte()) {
                Some(byte) => {
                    idle_us = 0;
                    if let Some(line) = self.line.push(byte) {
                        relay_line(&mut self.pc, line).await;
                        return true;
                    }
                }
                None if idle_us >= timeout_us => {
                    debug!("Bluetooth line timed out after {} ms", timeout_ms);
                    return match self.line.take_partial() {
                        Some(line) => {
                            relay_line(&mut self.pc, line).await;
                            true
                        }
                        None => false,
                    };
                }
                None => {
                    self.delay.delay_us(step_us).await;
                    idle_us = idle_us.saturating_add(step_us);
                }
            }
        }
    }

    #[must_use]
    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Bluetooth bytes held back until their line completes.
    #[must_use]
    pub fn pending_line(&self) -> &[u8] {
        self.line.pending()
    }

    /// Get a mutable reference to the PC channel.
    pub fn pc_mut(&mut self) -> &mut P {
        &mut self.pc
    }

    /// Get a mutable reference to the Bluetooth channel.
    pub fn bluetooth_mut(&mut self) -> &mut B {
        &mut self.bluetooth
    }

    /// Decompose the bridge into its PC channel, Bluetooth channel and delay.
    pub fn into_parts(self) -> (P, B, T) {
        (self.pc, self.bluetooth, self.delay)
    }
}

/// Write `BT → <line>\n` to the PC channel in a single write, so a full
/// channel drops the whole line rather than part of it.
async fn relay_line<C: SerialChannel>(pc: &mut C, line: &[u8]) {
    trace!("Relaying {} byte line", line.len());
    let mut out: heapless::Vec<u8, MAX_RELAY_SIZE> = heapless::Vec::new();
    // Cannot fail: the accumulator never yields more than MAX_LINE_LENGTH
    let _ = out.extend_from_slice(LINE_PREFIX);
    let _ = out.extend_from_slice(line);
    let _ = out.push(b'\n');
    send(pc, &out).await;
}
