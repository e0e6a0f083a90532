//! USB CDC-ACM serial port (the debug / PC channel).

use crate::pipe_channel::{BytePipe, PIPE_SIZE};
use defmt::{info, warn};
use embassy_rp::peripherals::USB;
use embassy_rp::usb::Driver;
use embassy_usb::class::cdc_acm::{CdcAcmClass, Receiver, Sender, State};
use embassy_usb::driver::EndpointError;
use embassy_usb::{Builder, Config as UsbConfig, UsbDevice};
use static_cell::StaticCell;

/// USB full-speed bulk packet size.
pub const MAX_PACKET_SIZE: u16 = 64;

pub type UsbDriver = Driver<'static, USB>;

/// Descriptor buffers and class state that must outlive the USB stack.
pub struct UsbResources {
    config_descriptor: [u8; 256],
    bos_descriptor: [u8; 256],
    msos_descriptor: [u8; 256],
    control_buf: [u8; 64],
    state: State<'static>,
}

static USB_RESOURCES: StaticCell<UsbResources> = StaticCell::new();

/// Build the USB device with a single CDC-ACM serial function.
///
/// Must be called once; returns the device (run it in its own task) and
/// the serial class.
pub fn configure_usb_serial(
    driver: UsbDriver,
    product: &'static str,
) -> (UsbDevice<'static, UsbDriver>, CdcAcmClass<'static, UsbDriver>) {
    let mut config = UsbConfig::new(0x1209, 0x0001); // pid.codes test VID/PID
    config.manufacturer = Some("joylink");
    config.product = Some(product);
    config.serial_number = Some("001");
    config.max_power = 100;
    config.max_packet_size_0 = 64;

    let UsbResources {
        config_descriptor,
        bos_descriptor,
        msos_descriptor,
        control_buf,
        state,
    } = USB_RESOURCES.init(UsbResources {
        config_descriptor: [0; 256],
        bos_descriptor: [0; 256],
        msos_descriptor: [0; 256],
        control_buf: [0; 64],
        state: State::new(),
    });

    let mut builder = Builder::new(
        driver,
        config,
        config_descriptor,
        bos_descriptor,
        msos_descriptor,
        control_buf,
    );
    let class = CdcAcmClass::new(&mut builder, state, MAX_PACKET_SIZE);

    (builder.build(), class)
}

/// Move bytes sent by the USB host into `pipe`, forever.
///
/// While no host has the port open, nothing is read.
pub async fn pump_rx(mut rx: Receiver<'static, UsbDriver>, pipe: &'static BytePipe) -> ! {
    let mut packet = [0u8; MAX_PACKET_SIZE as usize];
    loop {
        rx.wait_connection().await;
        info!("USB serial connected");
        loop {
            match rx.read_packet(&mut packet).await {
                Ok(n) => {
                    if pipe.try_write(&packet[..n]).is_err() {
                        warn!("USB RX pipe full, packet dropped");
                    }
                }
                Err(EndpointError::Disabled) => break,
                Err(EndpointError::BufferOverflow) => warn!("USB packet too large"),
            }
        }
        info!("USB serial disconnected");
    }
}

/// Drain `pipe` to the USB host, forever.
///
/// While no host is connected the pipe fills up and writers drop their
/// lines; whatever queued up meanwhile is discarded on connection.
pub async fn pump_tx(mut tx: Sender<'static, UsbDriver>, pipe: &'static BytePipe) -> ! {
    let mut buf = [0u8; PIPE_SIZE];
    loop {
        tx.wait_connection().await;
        pipe.clear();
        loop {
            let n = pipe.read(&mut buf).await;
            if write_packets(&mut tx, &buf[..n]).await.is_err() {
                break;
            }
        }
    }
}

/// Write `data` as bulk packets, ending a full-size packet with a ZLP.
async fn write_packets(
    tx: &mut Sender<'static, UsbDriver>,
    data: &[u8],
) -> Result<(), EndpointError> {
    for chunk in data.chunks(MAX_PACKET_SIZE as usize) {
        tx.write_packet(chunk).await?;
    }
    if data.len() % MAX_PACKET_SIZE as usize == 0 {
        tx.write_packet(&[]).await?;
    }
    Ok(())
}
