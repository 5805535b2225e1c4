//! RFID frame parser.
//!
//! A byte-at-a-time state machine for the reader's framing:
//! one start byte, [`TAG_ID_LEN`] payload bytes, one end byte.
//! Each call does a buffer write and a compare, so it is safe to drive
//! straight from a UART receive path.

use crate::tag::{ReadOutcome, TagId, TAG_ID_LEN};

/// First byte of every frame (line feed).
pub const START_BYTE: u8 = 0x0A;

/// Last byte of every frame (carriage return).
pub const END_BYTE: u8 = 0x0D;

/// Parser state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameState {
    /// Discarding bytes until a start byte arrives.
    AwaitingStart,
    /// Collecting payload bytes.
    AwaitingData,
    /// Payload complete, next byte must be the end byte.
    AwaitingEnd,
}

/// RFID frame parser.
///
/// Invariant: `cursor <= TAG_ID_LEN`, and only `buffer[..cursor]` holds
/// bytes of the frame in progress.
#[derive(Debug, Clone)]
pub struct FrameParser {
    buffer: [u8; TAG_ID_LEN],
    cursor: usize,
    state: FrameState,
}

impl FrameParser {
    /// Create a new parser waiting for a start byte.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buffer: [0u8; TAG_ID_LEN],
            cursor: 0,
            state: FrameState::AwaitingStart,
        }
    }

    /// Current state.
    #[inline]
    #[must_use]
    pub fn state(&self) -> FrameState {
        self.state
    }

    /// Number of payload bytes collected for the frame in progress.
    #[inline]
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Returns `true` once a start byte has been seen and the frame has not
    /// completed yet.
    #[inline]
    #[must_use]
    pub fn is_frame_in_progress(&self) -> bool {
        self.state != FrameState::AwaitingStart
    }

    /// Feed a byte to the parser.
    ///
    /// Returns `Some(outcome)` when this byte completes a frame. Bytes outside
    /// a frame are dropped silently.
    pub fn push_byte(&mut self, byte: u8) -> Option<ReadOutcome> {
        match self.state {
            FrameState::AwaitingStart => {
                if byte == START_BYTE {
                    self.buffer = [0u8; TAG_ID_LEN];
                    self.cursor = 0;
                    self.state = FrameState::AwaitingData;
                }
                None
            }
            FrameState::AwaitingData => {
                // A start byte here is payload, not a resync point.
                self.buffer[self.cursor] = byte;
                self.cursor += 1;

                if self.cursor == TAG_ID_LEN {
                    self.state = FrameState::AwaitingEnd;
                }
                None
            }
            FrameState::AwaitingEnd => {
                self.state = FrameState::AwaitingStart;

                if byte == END_BYTE {
                    Some(ReadOutcome::Success(TagId(self.buffer)))
                } else {
                    Some(ReadOutcome::Failure)
                }
            }
        }
    }

    /// Abandon the frame in progress.
    ///
    /// Returns [`ReadOutcome::Failure`] if a frame was open, `None` if the
    /// parser was already waiting for a start byte.
    pub fn abort(&mut self) -> Option<ReadOutcome> {
        if self.is_frame_in_progress() {
            self.state = FrameState::AwaitingStart;
            Some(ReadOutcome::Failure)
        } else {
            None
        }
    }
}

impl Default for FrameParser {
    fn default() -> Self {
        Self::new()
    }
}
