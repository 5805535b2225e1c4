//! Frame parsing for serial RFID readers.
//!
//! This crate turns the raw byte stream of a Parallax-style 125 kHz RFID
//! reader into classified read events. It has no chip-specific dependencies
//! and is fully testable on host.
//!
//! # Wire Format
//!
//! Every tag presentation is transmitted as a single frame:
//!
//! ```text
//! [0x0A] [10 payload bytes] [0x0D]
//! ```
//!
//! There is no escaping and no checksum. Any byte other than `0x0D` in the
//! terminal position turns the frame into a failed read.
//!
//! # Example
//!
//! ```
//! use rfid_proto::{FrameParser, ReadOutcome};
//!
//! let mut parser = FrameParser::new();
//! let mut outcome = None;
//!
//! for &byte in b"\n0415ED7A3F\r" {
//!     if let Some(o) = parser.push_byte(byte) {
//!         outcome = Some(o);
//!     }
//! }
//!
//! match outcome {
//!     Some(ReadOutcome::Success(tag)) => assert_eq!(tag.as_str(), Some("0415ED7A3F")),
//!     _ => panic!("expected a tag"),
//! }
//! ```
//!
//! # UART Configuration
//!
//! The reader transmits at 2400 baud, 8N1:
//! - Baud rate: 2400
//! - Data bits: 8
//! - Parity: None
//! - Stop bits: 1

#![cfg_attr(not(feature = "std"), no_std)]

pub mod parser;
pub mod tag;

pub use parser::{FrameParser, FrameState, END_BYTE, START_BYTE};
pub use tag::{ReadOutcome, TagId, TAG_ID_LEN};

/// Baud rate of the reader's serial output.
pub const RFID_BAUDRATE: u32 = 2_400;
