//! Platform-agnostic RFID reader core.
//!
//! This crate wires the frame parser from [`rfid_proto`] to the rest of a
//! reader without any chip-specific dependencies. It can be used both in
//! embedded `no_std` environments and on host for testing.
//!
//! # Overview
//!
//! - [`config`]: Board pin table and validation ([`BoardTable`], [`ReaderConfig`])
//! - [`enable`]: Active-low enable line ([`EnableLine`])
//! - [`receiver`]: Event consumer trait ([`TagReceiver`])
//! - [`reader`]: Owner of parser, enable line and receiver ([`RfidReader`])
//! - [`source`]: Byte source traits ([`ByteSource`], [`PollingSource`])
//! - [`bridge`]: Drives a reader from a source ([`ReaderBridge`], [`PollingBridge`])
//!
//! # Example
//!
//! ```rust
//! use core::convert::Infallible;
//! use embedded_hal::digital::{ErrorType, OutputPin};
//! use rfid_core::{Pin, PortId, ReaderConfig, RfidReader, TagId, TagReceiver, PICO};
//!
//! struct Pinless;
//! impl ErrorType for Pinless {
//!     type Error = Infallible;
//! }
//! impl OutputPin for Pinless {
//!     fn set_low(&mut self) -> Result<(), Infallible> { Ok(()) }
//!     fn set_high(&mut self) -> Result<(), Infallible> { Ok(()) }
//! }
//!
//! #[derive(Default)]
//! struct LastTag(Option<TagId>);
//! impl TagReceiver for LastTag {
//!     fn tag_read(&mut self, id: TagId) { self.0 = Some(id); }
//!     fn read_failed(&mut self) { self.0 = None; }
//! }
//!
//! let config = ReaderConfig::validate(&PICO, Some(PortId::UART1), Pin::new(6)).unwrap();
//! let mut reader = RfidReader::new(config, Pinless, LastTag::default());
//!
//! for &byte in b"\n0415ED7A3F\r" {
//!     reader.consume_byte(byte);
//! }
//! assert_eq!(reader.receiver().0, Some(TagId::new(*b"0415ED7A3F")));
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting (for embedded logging)

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod bridge;
pub mod config;
pub mod enable;
pub mod reader;
pub mod receiver;
pub mod source;

#[cfg(test)]
mod test_support;

// Re-export main types at crate root
pub use bridge::{PollingBridge, ReaderBridge, IDLE_BACKOFF_MS};
pub use config::{
    BoardTable, ConfigError, Pin, PortId, PortWiring, ReaderConfig, MAX_ENABLE_PINS, PICO,
};
pub use enable::EnableLine;
pub use reader::{ReaderStats, RfidReader};
pub use receiver::{dispatch, TagReceiver};
pub use source::{ByteSource, PollingSource, TransportError};

pub use rfid_proto::{
    FrameParser, FrameState, ReadOutcome, TagId, END_BYTE, RFID_BAUDRATE, START_BYTE, TAG_ID_LEN,
};
