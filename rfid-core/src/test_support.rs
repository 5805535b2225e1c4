//! Host-side mocks shared by the unit tests.

extern crate std;

use core::convert::Infallible;
use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};
use std::collections::VecDeque;
use std::vec::Vec;

use embedded_hal::digital::{ErrorType, OutputPin};
use embedded_hal_async::delay::DelayNs;
use rfid_proto::TagId;

use crate::receiver::TagReceiver;
use crate::source::{ByteSource, PollingSource, TransportError};

/// Output pin that remembers what was written to it.
#[derive(Debug, Default)]
pub struct MockPin {
    level: Option<bool>,
    writes: usize,
}

impl MockPin {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last level written (`true` = high), `None` if never written.
    pub fn level(&self) -> Option<bool> {
        self.level
    }

    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl ErrorType for MockPin {
    type Error = Infallible;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.level = Some(false);
        self.writes += 1;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.level = Some(true);
        self.writes += 1;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Read(TagId),
    Failed,
}

/// Receiver that records every event in order.
#[derive(Debug, Default)]
pub struct RecordingReceiver {
    pub events: Vec<Event>,
}

impl RecordingReceiver {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TagReceiver for RecordingReceiver {
    fn tag_read(&mut self, id: TagId) {
        self.events.push(Event::Read(id));
    }

    fn read_failed(&mut self) {
        self.events.push(Event::Failed);
    }
}

/// Async byte source replaying a script; reports `Io` once exhausted.
pub struct MockSource {
    script: VecDeque<Result<u8, TransportError>>,
}

impl MockSource {
    pub fn new(script: Vec<Result<u8, TransportError>>) -> Self {
        Self {
            script: script.into(),
        }
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::new(bytes.iter().map(|&b| Ok(b)).collect())
    }
}

impl ByteSource for MockSource {
    fn read_byte(&mut self) -> impl Future<Output = Result<u8, TransportError>> {
        let next = self.script.pop_front().unwrap_or(Err(TransportError::Io));
        core::future::ready(next)
    }
}

/// Polling source whose receive buffer is filled in bursts.
///
/// Each `poll_burst` entry becomes visible only after the previous bursts
/// have been drained and one empty poll has been observed, mimicking bytes
/// trickling in between idle periods.
pub struct MockPollingSource {
    bursts: VecDeque<Vec<u8>>,
    pending: VecDeque<u8>,
    pub empty_polls: usize,
}

impl MockPollingSource {
    pub fn new(bursts: Vec<Vec<u8>>) -> Self {
        Self {
            bursts: bursts.into(),
            pending: VecDeque::new(),
            empty_polls: 0,
        }
    }
}

impl PollingSource for MockPollingSource {
    fn bytes_available(&mut self) -> usize {
        if self.pending.is_empty() {
            self.empty_polls += 1;
            if let Some(burst) = self.bursts.pop_front() {
                self.pending.extend(burst);
            }
            return 0;
        }
        self.pending.len()
    }

    fn read_byte(&mut self) -> Result<u8, TransportError> {
        self.pending.pop_front().ok_or(TransportError::Io)
    }
}

/// Delay that only records how long it was asked to wait.
#[derive(Debug, Default)]
pub struct MockDelay {
    pub total_ns: u64,
    pub calls: usize,
}

impl DelayNs for MockDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
        self.calls += 1;
    }
}

/// Run a future that never returns `Pending` to completion.
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

    // SAFETY: `f` is not moved after pinning
    let mut f = unsafe { Pin::new_unchecked(&mut f) };

    match f.as_mut().poll(&mut cx) {
        Poll::Ready(result) => result,
        Poll::Pending => panic!("Mock future returned Pending unexpectedly"),
    }
}
