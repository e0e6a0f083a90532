//! UART side of the Bluetooth link (HC-05 on UART1).
//!
//! # Pins
//!
//! - GPIO 8: TX (to HC-05 RXD)
//! - GPIO 9: RX (from HC-05 TXD)

use crate::pipe_channel::{BytePipe, PIPE_SIZE};
use defmt::warn;
use embassy_rp::uart::{Async, Config as UartConfig, Error as UartError, UartRx, UartTx};
use joylink_core::BAUD_RATE;

/// UART configuration for the Bluetooth module (38400 8N1).
#[must_use]
pub fn bluetooth_uart_config() -> UartConfig {
    let mut config = UartConfig::default();
    config.baudrate = BAUD_RATE;
    config
}

/// Move received UART bytes into `pipe`, forever.
///
/// Bytes that do not fit are dropped, as a full hardware buffer would.
pub async fn pump_rx(mut rx: UartRx<'static, Async>, pipe: &'static BytePipe) -> ! {
    let mut byte = [0u8; 1];
    loop {
        match rx.read(&mut byte).await {
            Ok(()) => {
                if pipe.try_write(&byte).is_err() {
                    warn!("Bluetooth RX pipe full, byte dropped");
                }
            }
            Err(e) => warn!("Bluetooth UART error: {:?}", uart_error_name(e)),
        }
    }
}

/// Drain `pipe` onto the UART, forever.
pub async fn pump_tx(mut tx: UartTx<'static, Async>, pipe: &'static BytePipe) -> ! {
    let mut buf = [0u8; PIPE_SIZE];
    loop {
        let n = pipe.read(&mut buf).await;
        if let Err(e) = tx.write(&buf[..n]).await {
            warn!("Bluetooth UART write failed: {:?}", uart_error_name(e));
        }
    }
}

#[inline]
fn uart_error_name(e: UartError) -> &'static str {
    match e {
        UartError::Framing => "framing",
        UartError::Break => "break",
        UartError::Overrun => "overrun",
        UartError::Parity => "parity",
        _ => "io",
    }
}
