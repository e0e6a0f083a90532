//! JoystickTransmitter: samples the stick and streams it over two links.

use crate::channel::{send, SerialChannel};
use crate::config::TransmitterConfig;
use crate::input::{JoystickInput, SampleError};
use embedded_hal_async::delay::DelayNs;
use joylink_proto::{DebugLine, Frame, JoystickSample, Serialize, MAX_DEBUG_LINE_SIZE};

/// Periodically samples a joystick and writes each sample to a debug
/// channel (`X:<x> | Y:<y>`) and a Bluetooth channel (`X=<x>;Y=<y>`).
///
/// Writes are fire-and-forget: if the Bluetooth module has no peer, the
/// bytes are dropped by the transport and the loop carries on.
pub struct JoystickTransmitter<J, D, B, T> {
    joystick: J,
    debug: D,
    bluetooth: B,
    delay: T,
    config: TransmitterConfig,
}

impl<J, D, B, T> JoystickTransmitter<J, D, B, T>
where
    J: JoystickInput,
    D: SerialChannel,
    B: SerialChannel,
    T: DelayNs,
{
    /// Create a transmitter with the default 60 ms period.
    pub fn new(joystick: J, debug: D, bluetooth: B, delay: T) -> Self {
        Self::with_config(joystick, debug, bluetooth, delay, TransmitterConfig::default())
    }

    pub fn with_config(
        joystick: J,
        debug: D,
        bluetooth: B,
        delay: T,
        config: TransmitterConfig,
    ) -> Self {
        Self {
            joystick,
            debug,
            bluetooth,
            delay,
            config,
        }
    }

    /// Sample and transmit forever, one sample per period.
    pub async fn run(&mut self) -> ! {
        loop {
            let _ = self.tick().await;
            self.delay.delay_ms(self.config.period_ms).await;
        }
    }

    /// Sample once and transmit the result on both channels.
    ///
    /// Returns the transmitted sample. A failed ADC read skips the
    /// iteration and nothing is written.
    pub async fn tick(&mut self) -> Result<JoystickSample, SampleError> {
        let sample = match self.joystick.sample().await {
            Ok(sample) => sample,
            Err(e) => {
                warn!("Joystick sample failed: {:?}", e);
                return Err(e);
            }
        };

        let mut buf = [0u8; MAX_DEBUG_LINE_SIZE];

        if let Ok(len) = DebugLine(sample).serialize(&mut buf) {
            send(&mut self.debug, &buf[..len]).await;
        }
        if let Ok(len) = Frame(sample).serialize(&mut buf) {
            send(&mut self.bluetooth, &buf[..len]).await;
        }

        Ok(sample)
    }

    #[must_use]
    pub fn config(&self) -> &TransmitterConfig {
        &self.config
    }

    /// Get a mutable reference to the debug channel.
    pub fn debug_mut(&mut self) -> &mut D {
        &mut self.debug
    }

    /// Get a mutable reference to the Bluetooth channel.
    pub fn bluetooth_mut(&mut self) -> &mut B {
        &mut self.bluetooth
    }

    /// Decompose into joystick, debug channel, Bluetooth channel and delay.
    pub fn into_parts(self) -> (J, D, B, T) {
        (self.joystick, self.debug, self.bluetooth, self.delay)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::channel::ChannelError;
    use crate::testing::{block_on, Clock, MockChannel, MockDelay, MockJoystick};
    use std::vec;

    fn transmitter(
        samples: std::vec::Vec<Result<JoystickSample, SampleError>>,
    ) -> (
        JoystickTransmitter<MockJoystick, MockChannel, MockChannel, MockDelay>,
        MockChannel,
        MockChannel,
        Clock,
    ) {
        let clock = Clock::default();
        let debug = MockChannel::new(&clock);
        let bluetooth = MockChannel::new(&clock);
        let tx = JoystickTransmitter::new(
            MockJoystick::new(samples),
            debug.clone(),
            bluetooth.clone(),
            MockDelay::new(&clock),
        );
        (tx, debug, bluetooth, clock)
    }

    #[test]
    fn test_tick_writes_both_formats() {
        let (mut tx, debug, bluetooth, _) = transmitter(vec![Ok(JoystickSample::new(100, 900))]);

        let sample = block_on(tx.tick()).unwrap();
        assert_eq!(sample, JoystickSample::new(100, 900));

        assert_eq!(debug.written(), b"X:100 | Y:900\n");
        assert_eq!(bluetooth.written(), b"X=100;Y=900\n");
    }

    #[test]
    fn test_each_tick_sends_latest_sample() {
        let (mut tx, _, bluetooth, _) = transmitter(vec![
            Ok(JoystickSample::new(0, 0)),
            Ok(JoystickSample::new(1023, 1023)),
        ]);

        block_on(tx.tick()).unwrap();
        block_on(tx.tick()).unwrap();

        assert_eq!(bluetooth.written(), b"X=0;Y=0\nX=1023;Y=1023\n");
    }

    #[test]
    fn test_bluetooth_failure_is_ignored() {
        let (mut tx, debug, bluetooth, _) = transmitter(vec![Ok(JoystickSample::CENTER)]);
        bluetooth.fail_writes(ChannelError::Disconnected);

        assert_eq!(block_on(tx.tick()), Ok(JoystickSample::CENTER));
        assert_eq!(debug.written(), b"X:512 | Y:512\n");
        assert!(bluetooth.written().is_empty());
    }

    #[test]
    fn test_sample_error_skips_iteration() {
        let (mut tx, debug, bluetooth, _) = transmitter(vec![
            Err(SampleError::Adc),
            Ok(JoystickSample::new(1, 2)),
        ]);

        assert_eq!(block_on(tx.tick()), Err(SampleError::Adc));
        assert!(debug.written().is_empty());
        assert!(bluetooth.written().is_empty());

        assert_eq!(block_on(tx.tick()), Ok(JoystickSample::new(1, 2)));
        assert_eq!(bluetooth.written(), b"X=1;Y=2\n");
    }

    #[test]
    fn test_custom_period() {
        let clock = Clock::default();
        let tx = JoystickTransmitter::with_config(
            MockJoystick::new(vec![]),
            MockChannel::new(&clock),
            MockChannel::new(&clock),
            MockDelay::new(&clock),
            TransmitterConfig { period_ms: 20 },
        );
        assert_eq!(tx.config().period_ms, 20);
    }
}
