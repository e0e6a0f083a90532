#![no_std]
#![no_main]

use defmt::info;
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_rp::adc::{Adc, Channel, Config as AdcConfig};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::Pull;
use embassy_rp::peripherals::{UART1, USB};
use embassy_rp::uart::Uart;
use embassy_rp::usb::Driver;
use embassy_time::Delay;
use joylink_firmware::tasks::{uart_tx_task, usb_task, usb_tx_task};
use joylink_firmware::{
    bluetooth_uart_config, configure_usb_serial, AdcJoystick, BytePipe, JoystickTransmitter,
    PipeChannel,
};

#[cfg(feature = "dev-panic")]
use panic_probe as _;
#[cfg(feature = "prod-panic")]
use panic_reset as _;

bind_interrupts!(struct Irqs {
    ADC_IRQ_FIFO => embassy_rp::adc::InterruptHandler;
    UART1_IRQ => embassy_rp::uart::InterruptHandler<UART1>;
    USBCTRL_IRQ => embassy_rp::usb::InterruptHandler<USB>;
});

/// Debug lines on their way to the USB host.
static USB_TX: BytePipe = BytePipe::new();
/// Never fed; the transmitter does not read the debug port.
static USB_RX: BytePipe = BytePipe::new();
/// Frames on their way to the HC-05.
static BT_TX: BytePipe = BytePipe::new();
/// Never fed; the transmitter does not read the Bluetooth link.
static BT_RX: BytePipe = BytePipe::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Joystick transmitter starting...");

    let p = embassy_rp::init(embassy_rp::config::Config::default());

    // --- Joystick (GPIO 26 = X, GPIO 27 = Y) ---
    let adc = Adc::new(p.ADC, Irqs, AdcConfig::default());
    let x = Channel::new_pin(p.PIN_26, Pull::None);
    let y = Channel::new_pin(p.PIN_27, Pull::None);
    let joystick = AdcJoystick::new(adc, x, y);

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
    let (uart_tx, _uart_rx) = uart.split();

    // --- USB serial (debug output) ---
    let usb_driver = Driver::new(p.USB, Irqs);
    let (usb_device, class) = configure_usb_serial(usb_driver, "Joystick Transmitter");
    let (usb_tx, _usb_rx) = class.split();

    spawner.spawn(usb_task(usb_device).unwrap());
    spawner.spawn(usb_tx_task(usb_tx, &USB_TX).unwrap());
    spawner.spawn(uart_tx_task(uart_tx, &BT_TX).unwrap());

    let debug = PipeChannel::new(&USB_RX, &USB_TX);
    let bluetooth = PipeChannel::new(&BT_RX, &BT_TX);
    let mut transmitter = JoystickTransmitter::new(joystick, debug, bluetooth, Delay);

    info!(
        "Joystick transmitter initialized, sampling every {} ms",
        transmitter.config().period_ms
    );
    transmitter.run().await
}
