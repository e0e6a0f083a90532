//! In-memory channels, a virtual clock and a blocking executor for tests.

extern crate std;

use crate::channel::{ChannelError, SerialChannel};
use crate::input::{JoystickInput, SampleError};
use core::cell::{Cell, RefCell};
use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};
use embedded_hal_async::delay::DelayNs;
use joylink_proto::JoystickSample;
use std::collections::VecDeque;
use std::rc::Rc;
use std::vec::Vec;

/// Virtual time shared by mock delays and mock channels.
#[derive(Clone, Default)]
pub struct Clock(Rc<Cell<u64>>);

impl Clock {
    pub fn now_us(&self) -> u64 {
        self.0.get() / 1000
    }

    fn advance_ns(&self, ns: u32) {
        self.0.set(self.0.get() + u64::from(ns));
    }
}

/// Delay that completes immediately and advances the virtual clock.
pub struct MockDelay {
    clock: Clock,
}

impl MockDelay {
    pub fn new(clock: &Clock) -> Self {
        Self {
            clock: clock.clone(),
        }
    }
}

impl DelayNs for MockDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.clock.advance_ns(ns);
    }
}

#[derive(Default)]
struct ChannelState {
    /// Bytes with the virtual time (µs) at which they become readable.
    incoming: VecDeque<(u64, u8)>,
    written: Vec<u8>,
    /// One entry per successful `write_bytes` call.
    writes: Vec<Vec<u8>>,
    write_error: Option<ChannelError>,
}

/// Serial channel backed by shared buffers; clones see the same state.
#[derive(Clone)]
pub struct MockChannel {
    state: Rc<RefCell<ChannelState>>,
    clock: Clock,
}

impl MockChannel {
    pub fn new(clock: &Clock) -> Self {
        Self {
            state: Rc::new(RefCell::new(ChannelState::default())),
            clock: clock.clone(),
        }
    }

    /// Make bytes readable right away.
    pub fn feed(&self, bytes: &[u8]) {
        self.feed_at(0, bytes);
    }

    /// Make bytes readable once the clock reaches `at_us`.
    pub fn feed_at(&self, at_us: u64, bytes: &[u8]) {
        let mut state = self.state.borrow_mut();
        state.incoming.extend(bytes.iter().map(|&b| (at_us, b)));
    }

    /// Everything successfully written so far.
    pub fn written(&self) -> Vec<u8> {
        self.state.borrow().written.clone()
    }

    /// Successful writes, one entry per call.
    pub fn writes(&self) -> Vec<Vec<u8>> {
        self.state.borrow().writes.clone()
    }

    /// Fail every following write with `error`.
    pub fn fail_writes(&self, error: ChannelError) {
        self.state.borrow_mut().write_error = Some(error);
    }
}

impl SerialChannel for MockChannel {
    fn read_byte(&mut self) -> Option<u8> {
        let now = self.clock.now_us();
        let mut state = self.state.borrow_mut();
        let ready = matches!(state.incoming.front(), Some(&(at, _)) if at <= now);
        if ready {
            state.incoming.pop_front().map(|(_, b)| b)
        } else {
            None
        }
    }

    async fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), ChannelError> {
        let mut state = self.state.borrow_mut();
        if let Some(e) = state.write_error {
            return Err(e);
        }
        state.written.extend_from_slice(bytes);
        state.writes.push(bytes.to_vec());
        Ok(())
    }
}

/// Joystick that replays scripted results, then rests at center.
pub struct MockJoystick {
    samples: VecDeque<Result<JoystickSample, SampleError>>,
}

impl MockJoystick {
    pub fn new(samples: Vec<Result<JoystickSample, SampleError>>) -> Self {
        Self {
            samples: samples.into(),
        }
    }
}

impl JoystickInput for MockJoystick {
    async fn sample(&mut self) -> Result<JoystickSample, SampleError> {
        self.samples
            .pop_front()
            .unwrap_or(Ok(JoystickSample::CENTER))
    }
}

/// Run a future to completion (simple blocking executor).
///
/// Every mock completes immediately, so a `Pending` poll is a test bug.
pub fn block_on<F: Future>(mut f: F) -> F::Output {
    fn noop_raw_waker() -> RawWaker {
        fn noop(_: *const ()) {}
        fn clone(_: *const ()) -> RawWaker {
            noop_raw_waker()
        }
        static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, noop, noop, noop);
        RawWaker::new(core::ptr::null(), &VTABLE)
    }

    let waker = unsafe { Waker::from_raw(noop_raw_waker()) };
    let mut cx = Context::from_waker(&waker);

    // SAFETY: We don't move f after pinning
    let mut f = unsafe { Pin::new_unchecked(&mut f) };

    match f.as_mut().poll(&mut cx) {
        Poll::Ready(result) => result,
        Poll::Pending => panic!("Mock future returned Pending unexpectedly"),
    }
}
