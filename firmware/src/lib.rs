//! Parallax serial RFID reader firmware for RP2040.
//!
//! This crate provides the embedded side of the reader: it receives the
//! reader module's 2400 baud output over UART, feeds it through the frame
//! parser from [`rfid_core`], and hands read events to an application task.
//!
//! # Hardware Configuration
//!
//! | Function | GPIO | Description |
//! |----------|------|-------------|
//! | UART1 TX | 8    | Reserved by the port |
//! | UART1 RX | 9    | Reader SOUT |
//! | ENABLE   | 6    | Reader /ENABLE (active low) |
//! | LED      | 25   | On-board LED (toggles on every read event) |
//!
//! # Architecture
//!
//! Two Embassy tasks:
//!
//! - **Reader Task**: awaits UART bytes and drives the [`RfidReader`]
//! - **Event Task**: receives read events from an [`EventChannel`], logs
//!   them and blinks the LED
//!
//! # Features
//!
//! - **`dev-panic`** (default): Use `panic-probe` for development (prints panic info via RTT)
//! - **`prod-panic`**: Use `panic-reset` for production (silent watchdog reset)
//! - **`frame-timeout`**: Abort a frame when its next byte is more than
//!   [`FRAME_TIMEOUT`] late, reporting a failed read

#![no_std]

#[cfg(all(feature = "dev-panic", feature = "prod-panic"))]
compile_error!("Cannot enable both `dev-panic` and `prod-panic` features");

// Re-export core types for convenience
pub use rfid_core::{
    ConfigError, FrameState, Pin, PortId, ReadOutcome, ReaderBridge, ReaderConfig, ReaderStats,
    RfidReader, TagId, TagReceiver, TransportError, PICO, RFID_BAUDRATE,
};

pub mod event_queue;
pub mod uart_source;

pub use event_queue::{ChannelReceiver, EventChannel, EVENT_QUEUE_DEPTH};
pub use uart_source::UartByteSource;

use embassy_rp::gpio::Output;
use embassy_time::Duration;

/// Serial port the reader is wired to.
pub const READER_PORT: PortId = PortId::UART1;

/// GPIO driving the reader's enable line.
pub const ENABLE_PIN: Pin = Pin::new(6);

// `main` takes `p.UART1` and `p.PIN_6`; keep them in step with the
// constants that get validated.
const _: () = assert!(
    READER_PORT.0 == 1 && ENABLE_PIN.number() == 6,
    "READER_PORT/ENABLE_PIN do not match the peripherals taken in main"
);

/// Longest gap between two bytes of one frame (with `frame-timeout`).
///
/// A frame takes about 50 ms at 2400 baud.
pub const FRAME_TIMEOUT: Duration = Duration::from_millis(250);

/// Reader driven by the UART, reporting into an event channel.
pub type UartReaderBridge<'d> = ReaderBridge<UartByteSource<'d>, ChannelReceiver<'d>, Output<'d>>;
