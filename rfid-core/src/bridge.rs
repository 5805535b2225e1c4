//! Bridges that drive an [`RfidReader`] from a byte source.

use core::convert::Infallible;
use embedded_hal::digital::OutputPin;
use embedded_hal_async::delay::DelayNs;

use crate::reader::RfidReader;
use crate::receiver::TagReceiver;
use crate::source::{ByteSource, PollingSource, TransportError};

/// Idle back-off of the polling bridge when no bytes are available.
pub const IDLE_BACKOFF_MS: u32 = 500;

/// Feeds every byte from a waiting [`ByteSource`] into a reader.
///
/// # Error Handling
///
/// Transport errors are returned to the caller and never reach the parser;
/// a frame interrupted by lost bytes fails on its terminator check.
pub struct ReaderBridge<S, R, P> {
    source: S,
    reader: RfidReader<R, P>,
}

impl<S, R, P> ReaderBridge<S, R, P>
where
    S: ByteSource,
    R: TagReceiver,
    P: OutputPin<Error = Infallible>,
{
    /// Create a new bridge from a byte source and a reader.
    pub fn new(source: S, reader: RfidReader<R, P>) -> Self {
        Self { source, reader }
    }

    /// Run the bridge indefinitely.
    ///
    /// This method never returns under normal operation.
    pub async fn run(&mut self) -> ! {
        loop {
            let _ = self.process_one().await;
        }
    }

    /// Wait for one byte and feed it to the reader.
    ///
    /// Returns the result of the operation for testing purposes.
    pub async fn process_one(&mut self) -> Result<(), TransportError> {
        let byte = self.source.read_byte().await?;
        self.reader.consume_byte(byte);
        Ok(())
    }
}

impl<S, R, P> ReaderBridge<S, R, P> {
    /// Get a reference to the reader.
    pub fn reader(&self) -> &RfidReader<R, P> {
        &self.reader
    }

    /// Get a mutable reference to the reader.
    pub fn reader_mut(&mut self) -> &mut RfidReader<R, P> {
        &mut self.reader
    }

    /// Get a mutable reference to the byte source.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Decompose the bridge into its source and reader.
    pub fn into_parts(self) -> (S, RfidReader<R, P>) {
        (self.source, self.reader)
    }
}

/// Feeds a reader from a [`PollingSource`], sleeping while the line is idle.
pub struct PollingBridge<S, D, R, P> {
    source: S,
    delay: D,
    reader: RfidReader<R, P>,
}

impl<S, D, R, P> PollingBridge<S, D, R, P>
where
    S: PollingSource,
    D: DelayNs,
    R: TagReceiver,
    P: OutputPin<Error = Infallible>,
{
    /// Create a new polling bridge.
    pub fn new(source: S, delay: D, reader: RfidReader<R, P>) -> Self {
        Self {
            source,
            delay,
            reader,
        }
    }

    /// Run the bridge indefinitely.
    pub async fn run(&mut self) -> ! {
        loop {
            let _ = self.poll_once().await;
        }
    }

    /// Consume one byte if one is available, otherwise back off for
    /// [`IDLE_BACKOFF_MS`].
    ///
    /// Returns `Ok(true)` if a byte was consumed.
    pub async fn poll_once(&mut self) -> Result<bool, TransportError> {
        if self.source.bytes_available() == 0 {
            self.delay.delay_ms(IDLE_BACKOFF_MS).await;
            return Ok(false);
        }

        let byte = self.source.read_byte()?;
        self.reader.consume_byte(byte);
        Ok(true)
    }
}

impl<S, D, R, P> PollingBridge<S, D, R, P> {
    /// Get a reference to the reader.
    pub fn reader(&self) -> &RfidReader<R, P> {
        &self.reader
    }

    /// Get a mutable reference to the reader.
    pub fn reader_mut(&mut self) -> &mut RfidReader<R, P> {
        &mut self.reader
    }

    /// Get a reference to the delay provider.
    pub fn delay(&self) -> &D {
        &self.delay
    }

    /// Decompose the bridge into its source, delay and reader.
    pub fn into_parts(self) -> (S, D, RfidReader<R, P>) {
        (self.source, self.delay, self.reader)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;
    use std::vec;

    use super::*;
    use crate::config::{Pin, PortId, ReaderConfig, PICO};
    use crate::test_support::{
        block_on, Event, MockDelay, MockPin, MockPollingSource, MockSource, RecordingReceiver,
    };
    use rfid_proto::{FrameState, TagId};

    fn reader() -> RfidReader<RecordingReceiver, MockPin> {
        let config = ReaderConfig::validate(&PICO, Some(PortId::UART0), Pin(4)).unwrap();
        RfidReader::new(config, MockPin::new(), RecordingReceiver::new())
    }

    #[test]
    fn test_bridge_delivers_tag() {
        let source = MockSource::from_bytes(b"\n0415ED7A3F\r");
        let mut bridge = ReaderBridge::new(source, reader());

        for _ in 0..12 {
            assert!(block_on(bridge.process_one()).is_ok());
        }

        assert_eq!(
            bridge.reader().receiver().events,
            [Event::Read(TagId::new(*b"0415ED7A3F"))]
        );
    }

    #[test]
    fn test_bridge_propagates_transport_error() {
        let source = MockSource::new(vec![Ok(0x0A), Err(TransportError::Framing), Ok(b'1')]);
        let mut bridge = ReaderBridge::new(source, reader());

        assert!(block_on(bridge.process_one()).is_ok());
        assert_eq!(block_on(bridge.process_one()), Err(TransportError::Framing));
        assert!(block_on(bridge.process_one()).is_ok());

        // The error did not reset or advance the frame.
        assert_eq!(bridge.reader().state(), FrameState::AwaitingData);
        assert!(bridge.reader().receiver().events.is_empty());
    }

    #[test]
    fn test_bridge_lost_byte_fails_frame() {
        // One payload byte is lost to an overrun; the end byte then lands in
        // the payload and the following start byte becomes the terminator.
        let mut script = vec![Ok(0x0A)];
        script.extend(b"041".iter().map(|&b| Ok(b)));
        script.push(Err(TransportError::Overrun));
        script.extend(b"ED7A3F\r\n".iter().map(|&b| Ok(b)));
        let mut bridge = ReaderBridge::new(MockSource::new(script), reader());

        for _ in 0..13 {
            let _ = block_on(bridge.process_one());
        }

        assert_eq!(bridge.reader().receiver().events, [Event::Failed]);
    }

    #[test]
    fn test_polling_backs_off_when_idle() {
        let source = MockPollingSource::new(vec![]);
        let mut bridge = PollingBridge::new(source, MockDelay::default(), reader());

        assert_eq!(block_on(bridge.poll_once()), Ok(false));
        assert_eq!(bridge.delay().total_ns, 500_000_000);

        assert_eq!(block_on(bridge.poll_once()), Ok(false));
        assert_eq!(bridge.delay().total_ns, 1_000_000_000);
    }

    #[test]
    fn test_polling_reads_without_delay() {
        let source = MockPollingSource::new(vec![b"\n0415ED7A3F\r".to_vec()]);
        let mut bridge = PollingBridge::new(source, MockDelay::default(), reader());

        // First poll sees an empty buffer and backs off once.
        assert_eq!(block_on(bridge.poll_once()), Ok(false));
        for _ in 0..12 {
            assert_eq!(block_on(bridge.poll_once()), Ok(true));
        }
        assert_eq!(bridge.delay().total_ns, u64::from(IDLE_BACKOFF_MS) * 1_000_000);

        let (source, _, reader) = bridge.into_parts();
        assert_eq!(source.empty_polls, 1);
        assert_eq!(
            reader.receiver().events,
            [Event::Read(TagId::new(*b"0415ED7A3F"))]
        );
    }

    #[test]
    fn test_polling_frame_split_across_idle_periods() {
        let source = MockPollingSource::new(vec![b"\n0415E".to_vec(), b"D7A3F\r".to_vec()]);
        let mut bridge = PollingBridge::new(source, MockDelay::default(), reader());

        let mut consumed = 0;
        for _ in 0..16 {
            if block_on(bridge.poll_once()) == Ok(true) {
                consumed += 1;
            }
        }

        assert_eq!(consumed, 12);
        assert_eq!(
            bridge.reader().receiver().events,
            [Event::Read(TagId::new(*b"0415ED7A3F"))]
        );
    }
}
