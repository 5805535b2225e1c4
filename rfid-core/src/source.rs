//! Byte source traits and transport error types.

use core::future::Future;

/// Error type for serial transport operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError {
    /// Generic UART/communication I/O error.
    Io,
    /// UART framing error (bad stop bit).
    Framing,
    /// Receive FIFO overrun; bytes were lost.
    Overrun,
    /// Break condition on the line.
    Break,
    /// Parity error.
    Parity,
}

/// Async byte source that waits for data.
///
/// The read completes only once a byte has arrived, so no idle delay is
/// needed when driving a reader from it.
///
/// # `no_std` Compatibility
///
/// All implementations must be `#![no_std]` compatible with no heap allocation.
pub trait ByteSource {
    /// Wait for and return the next received byte.
    fn read_byte(&mut self) -> impl Future<Output = Result<u8, TransportError>>;
}

/// Byte source that must be polled.
///
/// For transports that only expose a receive count and a non-waiting read.
pub trait PollingSource {
    /// Number of bytes that can be read without waiting.
    fn bytes_available(&mut self) -> usize;

    /// Read one byte. Only called after `bytes_available()` returned non-zero.
    fn read_byte(&mut self) -> Result<u8, TransportError>;
}
