//! Core sample type: JoystickSample.

/// Resolution of the reference ADC, in bits.
pub const ADC_BITS: u8 = 10;

/// Largest value a sample axis can hold.
pub const ADC_MAX: u16 = (1 << ADC_BITS) - 1;

/// Resting position of a centered stick.
pub const ADC_CENTER: u16 = 1 << (ADC_BITS - 1);

/// One reading of both joystick axes.
///
/// Values are always in `0..=ADC_MAX` (10-bit range), whatever the
/// resolution of the ADC that produced them.
///
/// # Example
///
/// ```
/// use joylink_proto::JoystickSample;
///
/// // 12-bit RP2040 reading, full scale on X
/// let sample = JoystickSample::from_raw(4095, 2048, 12);
/// assert_eq!(sample, JoystickSample::new(1023, 512));
/// ```
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct JoystickSample {
    pub x: u16,
    pub y: u16,
}

impl JoystickSample {
    /// Stick at rest.
    pub const CENTER: Self = Self {
        x: ADC_CENTER,
        y: ADC_CENTER,
    };

    /// Create a sample, saturating each axis at [`ADC_MAX`].
    #[must_use]
    pub const fn new(x: u16, y: u16) -> Self {
        Self {
            x: saturate(x),
            y: saturate(y),
        }
    }

    /// Create a sample from raw readings of a `bits`-wide ADC.
    ///
    /// Wider readings are shifted down, narrower ones shifted up, so the
    /// result always spans the 10-bit range.
    #[must_use]
    pub const fn from_raw(x: u16, y: u16, bits: u8) -> Self {
        Self::new(rescale(x, bits), rescale(y, bits))
    }

    /// Map both axes to `[-1.0, 1.0]` around the center.
    ///
    /// Axes whose magnitude is below `deadzone` snap to `0.0`.
    #[must_use]
    pub fn normalized(&self, deadzone: f32) -> (f32, f32) {
        (normalize_axis(self.x, deadzone), normalize_axis(self.y, deadzone))
    }
}

#[inline]
const fn saturate(value: u16) -> u16 {
    if value > ADC_MAX {
        ADC_MAX
    } else {
        value
    }
}

#[inline]
const fn rescale(value: u16, bits: u8) -> u16 {
    if bits > ADC_BITS {
        value >> (bits - ADC_BITS)
    } else {
        value << (ADC_BITS - bits)
    }
}

fn normalize_axis(value: u16, deadzone: f32) -> f32 {
    let centered = (value as f32 - ADC_CENTER as f32) / ADC_CENTER as f32;
    let magnitude = if centered < 0.0 { -centered } else { centered };
    if magnitude < deadzone {
        0.0
    } else {
        centered.clamp(-1.0, 1.0)
    }
}
