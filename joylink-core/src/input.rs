//! Joystick input trait and error types.

use core::future::Future;
use joylink_proto::JoystickSample;

/// Error type for analog sampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SampleError {
    /// The ADC conversion failed.
    Adc,
}

/// Source of joystick samples (two analog axes).
pub trait JoystickInput {
    /// Sample both axes once.
    ///
    /// Implementations scale readings into the 10-bit range of
    /// [`JoystickSample`], see [`JoystickSample::from_raw`].
    fn sample(&mut self) -> impl Future<Output = Result<JoystickSample, SampleError>>;
}
