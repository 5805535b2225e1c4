//! RFID reader: configuration, enable line, parser and receiver in one owner.

use core::convert::Infallible;
use embedded_hal::digital::OutputPin;
use rfid_proto::{FrameParser, FrameState, ReadOutcome};

use crate::config::ReaderConfig;
use crate::enable::EnableLine;
use crate::receiver::{dispatch, TagReceiver};

/// Per-reader event counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReaderStats {
    /// Frames that ended with the end byte.
    pub tags_read: u32,
    /// Frames that ended badly or were aborted.
    pub reads_failed: u32,
    /// Bytes dropped while waiting for a start byte.
    pub bytes_discarded: u32,
}

/// A serial RFID reader.
///
/// Owns its parser state; the only way to advance it is
/// [`consume_byte`](Self::consume_byte) (or [`abort_frame`](Self::abort_frame)),
/// both of which take `&mut self`.
pub struct RfidReader<R, P> {
    config: ReaderConfig,
    enable: EnableLine<P>,
    parser: FrameParser,
    receiver: R,
    stats: ReaderStats,
}

impl<R: TagReceiver, P: OutputPin<Error = Infallible>> RfidReader<R, P> {
    /// Create a reader from a validated configuration.
    ///
    /// `enable_pin` must be the output for `config.enable_pin()`; it is
    /// driven inactive (high) immediately.
    pub fn new(config: ReaderConfig, enable_pin: P, receiver: R) -> Self {
        Self {
            config,
            enable: EnableLine::new(enable_pin),
            parser: FrameParser::new(),
            receiver,
            stats: ReaderStats::default(),
        }
    }

    /// Consume one received byte.
    ///
    /// Calls the receiver at most once, when this byte closes a frame.
    pub fn consume_byte(&mut self, byte: u8) {
        let was_idle = !self.parser.is_frame_in_progress();
        let outcome = self.parser.push_byte(byte);

        if was_idle && !self.parser.is_frame_in_progress() {
            self.stats.bytes_discarded = self.stats.bytes_discarded.wrapping_add(1);
        }

        if let Some(outcome) = outcome {
            self.deliver(outcome);
        }
    }

    /// Abandon a partially received frame, reporting it as a failed read.
    ///
    /// Returns `false` if no frame was in progress.
    pub fn abort_frame(&mut self) -> bool {
        match self.parser.abort() {
            Some(outcome) => {
                self.deliver(outcome);
                true
            }
            None => false,
        }
    }

    fn deliver(&mut self, outcome: ReadOutcome) {
        match outcome {
            ReadOutcome::Success(_) => {
                self.stats.tags_read = self.stats.tags_read.wrapping_add(1);
            }
            ReadOutcome::Failure => {
                self.stats.reads_failed = self.stats.reads_failed.wrapping_add(1);
            }
        }
        dispatch(outcome, &mut self.receiver);
    }

    /// Power the reader module on or off.
    pub fn set_enabled(&mut self, enabled: bool) {
        if enabled {
            self.enable.assert();
        } else {
            self.enable.deassert();
        }
    }
}

impl<R, P> RfidReader<R, P> {
    /// Whether the reader module is powered.
    #[inline]
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enable.is_asserted()
    }

    /// Current parser state.
    #[inline]
    #[must_use]
    pub fn state(&self) -> FrameState {
        self.parser.state()
    }

    /// True between a start byte and the byte that closes the frame.
    #[inline]
    #[must_use]
    pub fn is_frame_in_progress(&self) -> bool {
        self.parser.is_frame_in_progress()
    }

    /// The validated configuration this reader was built from.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Snapshot of the event counters.
    #[inline]
    #[must_use]
    pub fn stats(&self) -> ReaderStats {
        self.stats
    }

    /// Get a reference to the receiver.
    pub fn receiver(&self) -> &R {
        &self.receiver
    }

    /// Get a mutable reference to the receiver.
    pub fn receiver_mut(&mut self) -> &mut R {
        &mut self.receiver
    }

    /// Decompose the reader into its configuration, enable pin and receiver.
    pub fn into_parts(self) -> (ReaderConfig, P, R) {
        (self.config, self.enable.release(), self.receiver)
    }
}
