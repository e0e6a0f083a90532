#![no_std]
#![no_main]

use defmt::info;
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::{UART1, USB};
use embassy_rp::uart::Uart;
use embassy_rp::usb::Driver;
use embassy_time::Delay;
use joylink_firmware::tasks::{uart_rx_task, uart_tx_task, usb_rx_task, usb_task, usb_tx_task};
use joylink_firmware::{
    bluetooth_uart_config, configure_usb_serial, BridgeConfig, BridgeMode, BytePipe, PipeChannel,
    SerialBridge,
};

#[cfg(feature = "dev-panic")]
use panic_probe as _;
#[cfg(feature = "prod-panic")]
use panic_reset as _;

bind_interrupts!(struct Irqs {
    UART1_IRQ => embassy_rp::uart::InterruptHandler<UART1>;
    USBCTRL_IRQ => embassy_rp::usb::InterruptHandler<USB>;
});

static USB_RX: BytePipe = BytePipe::new();
static USB_TX: BytePipe = BytePipe::new();
static BT_RX: BytePipe = BytePipe::new();
static BT_TX: BytePipe = BytePipe::new();

#[cfg(feature = "line-blocking")]
const MODE: BridgeMode = BridgeMode::line_blocking();
#[cfg(not(feature = "line-blocking"))]
const MODE: BridgeMode = BridgeMode::NonBlocking;

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Serial bridge starting...");

    let p = embassy_rp::init(embassy_rp::config::Config::default());

    // --- Bluetooth UART (HC-05, 38400 baud) ---
    let uart = Uart::new(
        p.UART1,
        p.PIN_8, // TX
        p.PIN_9, // RX
        Irqs,
        p.DMA_CH0,
        p.DMA_CH1,
        bluetooth_uart_config(),
    );
    let (uart_tx, uart_rx) = uart.split();

    // --- USB serial (PC side) ---
    let usb_driver = Driver::new(p.USB, Irqs);
    let (usb_device, class) = configure_usb_serial(usb_driver, "Bluetooth Serial Bridge");
    let (usb_tx, usb_rx) = class.split();

    spawner.spawn(usb_task(usb_device).unwrap());
    spawner.spawn(usb_rx_task(usb_rx, &USB_RX).unwrap());
    spawner.spawn(usb_tx_task(usb_tx, &USB_TX).unwrap());
    spawner.spawn(uart_rx_task(uart_rx, &BT_RX).unwrap());
    spawner.spawn(uart_tx_task(uart_tx, &BT_TX).unwrap());

    let pc = PipeChannel::new(&USB_RX, &USB_TX);
    let bluetooth = PipeChannel::new(&BT_RX, &BT_TX);
    let config = BridgeConfig {
        mode: MODE,
        ..BridgeConfig::default()
    };
    let mut bridge = SerialBridge::with_config(pc, bluetooth, Delay, config);

    info!("Serial bridge initialized, relaying...");
    bridge.run().await
}
