//! Receiver trait for read events.

use rfid_proto::{ReadOutcome, TagId};

/// Consumer of tag-read events.
///
/// Implemented by the application. Both methods are called synchronously
/// from the byte-consuming path, so they must not block; hand the event off
/// (e.g. into a channel) if real work is needed.
pub trait TagReceiver {
    /// A tag was read successfully.
    fn tag_read(&mut self, id: TagId);

    /// A frame ended with the wrong terminator.
    fn read_failed(&mut self);
}

impl<R: TagReceiver + ?Sized> TagReceiver for &mut R {
    #[inline]
    fn tag_read(&mut self, id: TagId) {
        (**self).tag_read(id);
    }

    #[inline]
    fn read_failed(&mut self) {
        (**self).read_failed();
    }
}

/// Forward an outcome to the matching receiver method.
#[inline]
pub fn dispatch<R: TagReceiver + ?Sized>(outcome: ReadOutcome, receiver: &mut R) {
    match outcome {
        ReadOutcome::Success(id) => receiver.tag_read(id),
        ReadOutcome::Failure => receiver.read_failed(),
    }
}
