//! Loop configuration and link constants.

/// Baud rate of the Bluetooth module (HC-05 AT-mode default) and bridge UART.
pub const BAUD_RATE: u32 = 38_400;

/// Transmitter sampling period.
pub const DEFAULT_PERIOD_MS: u32 = 60;

/// How long a line-blocking read waits for the next byte.
pub const DEFAULT_LINE_TIMEOUT_MS: u32 = 1_000;

/// Wait between polls when the bridge found nothing to move.
pub const DEFAULT_IDLE_POLL_US: u32 = 100;

/// Longest Bluetooth line held before it is flushed without a delimiter.
pub const MAX_LINE_LENGTH: usize = 128;

/// Joystick transmitter settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TransmitterConfig {
    /// Delay after each transmitted sample.
    pub period_ms: u32,
}

impl Default for TransmitterConfig {
    fn default() -> Self {
        Self {
            period_ms: DEFAULT_PERIOD_MS,
        }
    }
}

/// How the bridge reads the Bluetooth side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BridgeMode {
    /// Read a whole line once the first byte shows up, waiting up to
    /// `timeout_ms` for each following byte.
    ///
    /// The PC side is not serviced while waiting.
    LineBlocking {
        /// Per-byte wait before a partial line is emitted.
        timeout_ms: u32,
    },
    /// Take at most one byte per iteration and emit a line once its
    /// delimiter has been accumulated.
    NonBlocking,
}

impl BridgeMode {
    /// Line-blocking mode with the default timeout.
    #[must_use]
    pub const fn line_blocking() -> Self {
        Self::LineBlocking {
            timeout_ms: DEFAULT_LINE_TIMEOUT_MS,
        }
    }
}

impl Default for BridgeMode {
    fn default() -> Self {
        Self::NonBlocking
    }
}

/// Serial bridge settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BridgeConfig {
    pub mode: BridgeMode,
    /// Poll interval when idle, and while a line-blocking read waits.
    pub idle_poll_us: u32,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            mode: BridgeMode::default(),
            idle_poll_us: DEFAULT_IDLE_POLL_US,
        }
    }
}
