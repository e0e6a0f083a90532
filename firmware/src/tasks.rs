//! Executor tasks shared by both firmware images.
//!
//! Embassy tasks cannot be generic, so each pump gets a concrete wrapper.

use crate::pipe_channel::BytePipe;
use crate::usb_serial::UsbDriver;
use crate::{uart_link, usb_serial};
use embassy_rp::uart::{Async, UartRx, UartTx};
use embassy_usb::class::cdc_acm::{Receiver, Sender};
use embassy_usb::UsbDevice;

/// USB device task - runs the USB stack.
#[embassy_executor::task]
pub async fn usb_task(mut device: UsbDevice<'static, UsbDriver>) {
    device.run().await;
}

#[embassy_executor::task]
pub async fn usb_rx_task(rx: Receiver<'static, UsbDriver>, pipe: &'static BytePipe) {
    usb_serial::pump_rx(rx, pipe).await
}

#[embassy_executor::task]
pub async fn usb_tx_task(tx: Sender<'static, UsbDriver>, pipe: &'static BytePipe) {
    usb_serial::pump_tx(tx, pipe).await
}

#[embassy_executor::task]
pub async fn uart_rx_task(rx: UartRx<'static, Async>, pipe: &'static BytePipe) {
    uart_link::pump_rx(rx, pipe).await
}

#[embassy_executor::task]
pub async fn uart_tx_task(tx: UartTx<'static, Async>, pipe: &'static BytePipe) {
    uart_link::pump_tx(tx, pipe).await
}
