//! Two-axis analog joystick on the RP2040 ADC.
//!
//! # Pins
//!
//! - GPIO 26 (ADC0): X axis
//! - GPIO 27 (ADC1): Y axis

use embassy_rp::adc::{Adc, Async, Channel};
use joylink_core::{JoystickInput, JoystickSample, SampleError};

/// RP2040 ADC resolution.
pub const RP2040_ADC_BITS: u8 = 12;

/// Joystick read through two ADC channels.
pub struct AdcJoystick<'d> {
    adc: Adc<'d, Async>,
    x: Channel<'d>,
    y: Channel<'d>,
}

impl<'d> AdcJoystick<'d> {
    #[must_use]
    pub fn new(adc: Adc<'d, Async>, x: Channel<'d>, y: Channel<'d>) -> Self {
        Self { adc, x, y }
    }
}

impl JoystickInput for AdcJoystick<'_> {
    async fn sample(&mut self) -> Result<JoystickSample, SampleError> {
        let x = self.adc.read(&mut self.x).await.map_err(|_| SampleError::Adc)?;
        let y = self.adc.read(&mut self.y).await.map_err(|_| SampleError::Adc)?;
        Ok(JoystickSample::from_raw(x, y, RP2040_ADC_BITS))
    }
}
