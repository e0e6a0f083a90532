//! Joystick transmitter and USB/Bluetooth serial bridge for RP2040.
//!
//! This crate wires the platform-agnostic loops from `joylink-core` to the
//! RP2040 peripherals: the ADC for the joystick, UART1 for the HC-05
//! Bluetooth module and USB CDC-ACM for the PC.

#![no_std]

// Re-export core types for convenience
pub use joylink_core::{
    BridgeConfig, BridgeMode, ChannelError, JoystickInput, JoystickSample, JoystickTransmitter,
    SampleError, SerialBridge, SerialChannel, TransmitterConfig, BAUD_RATE,
};

pub mod joystick;
pub mod pipe_channel;
pub mod tasks;
pub mod uart_link;
pub mod usb_serial;

pub use joystick::AdcJoystick;
pub use pipe_channel::{BytePipe, PipeChannel, PIPE_SIZE};
pub use uart_link::bluetooth_uart_config;
pub use usb_serial::{configure_usb_serial, UsbDriver};
