//! UART byte source for the reader's serial output.
//!
//! # Pins
//!
//! Uses UART1 by default:
//! - GPIO 8: TX (unused by the reader, reserved by the port)
//! - GPIO 9: RX (reader SOUT)

use embassy_rp::uart::{Async, Error as UartError, UartRx};
use rfid_core::{ByteSource, TransportError};

/// Convert UART errors to [`TransportError`].
///
/// This is a helper function instead of a `From` impl to avoid orphan rule issues
/// (both `UartError` and `TransportError` are defined in external crates).
#[inline]
fn uart_error_to_transport_error(e: UartError) -> TransportError {
    match e {
        UartError::Framing => TransportError::Framing,
        UartError::Overrun => TransportError::Overrun,
        UartError::Break => TransportError::Break,
        UartError::Parity => TransportError::Parity,
        _ => TransportError::Io,
    }
}

/// Byte source reading the reader's output one byte at a time.
pub struct UartByteSource<'d> {
    rx: UartRx<'d, Async>,
}

impl<'d> UartByteSource<'d> {
    /// Create a new source from a UART receiver configured for 2400 8N1.
    #[must_use]
    pub fn new(rx: UartRx<'d, Async>) -> Self {
        Self { rx }
    }
}

impl ByteSource for UartByteSource<'_> {
    async fn read_byte(&mut self) -> Result<u8, TransportError> {
        let mut byte = [0u8; 1];
        self.rx
            .read(&mut byte)
            .await
            .map_err(uart_error_to_transport_error)?;
        Ok(byte[0])
    }
}
