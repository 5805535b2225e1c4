//! Channel-backed receiver.
//!
//! Read events are produced inside the UART task. Handling them (logging,
//! LED, application logic) happens in another task, so the receiver only
//! queues them with `try_send` and never waits on the consumer.

use defmt::warn;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, Sender};
use rfid_core::{ReadOutcome, TagId, TagReceiver};

/// Number of read events buffered between the reader and event tasks.
pub const EVENT_QUEUE_DEPTH: usize = 4;

/// Queue of read events.
pub type EventChannel = Channel<CriticalSectionRawMutex, ReadOutcome, EVENT_QUEUE_DEPTH>;

/// [`TagReceiver`] that forwards events into an [`EventChannel`].
pub struct ChannelReceiver<'ch> {
    sender: Sender<'ch, CriticalSectionRawMutex, ReadOutcome, EVENT_QUEUE_DEPTH>,
    dropped: u32,
}

impl<'ch> ChannelReceiver<'ch> {
    /// Create a receiver sending into `channel`.
    #[must_use]
    pub fn new(channel: &'ch EventChannel) -> Self {
        Self {
            sender: channel.sender(),
            dropped: 0,
        }
    }

    /// Events lost because the queue was full.
    #[inline]
    #[must_use]
    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    fn forward(&mut self, outcome: ReadOutcome) {
        if self.sender.try_send(outcome).is_err() {
            self.dropped = self.dropped.wrapping_add(1);
            warn!("Event queue full, dropping {:?}", outcome);
        }
    }
}

impl TagReceiver for ChannelReceiver<'_> {
    fn tag_read(&mut self, id: TagId) {
        self.forward(ReadOutcome::Success(id));
    }

    fn read_failed(&mut self) {
        self.forward(ReadOutcome::Failure);
    }
}
