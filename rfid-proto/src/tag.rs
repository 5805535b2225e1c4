//! Tag identifiers and read outcomes.

use core::fmt;

/// Number of payload bytes in a tag ID.
pub const TAG_ID_LEN: usize = 10;

/// A 10-byte RFID tag ID.
///
/// The bytes have no structure beyond their length; two tags are the same
/// exactly when all ten bytes match. Parallax readers send the ID as ASCII
/// hex characters, which [`TagId::as_str`] exposes when present.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TagId(pub [u8; TAG_ID_LEN]);

impl TagId {
    /// Create a tag ID from raw bytes.
    #[inline]
    #[must_use]
    pub const fn new(bytes: [u8; TAG_ID_LEN]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    #[inline]
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; TAG_ID_LEN] {
        &self.0
    }

    /// View the ID as text if every byte is printable ASCII.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        if self.0.iter().all(|b| b.is_ascii_graphic()) {
            core::str::from_utf8(&self.0).ok()
        } else {
            None
        }
    }
}

impl From<[u8; TAG_ID_LEN]> for TagId {
    fn from(bytes: [u8; TAG_ID_LEN]) -> Self {
        Self(bytes)
    }
}

/// Formats as space-separated uppercase hex, e.g. `01 02 0A FF ...`.
impl fmt::Display for TagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, byte) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{:02X}", byte)?;
        }
        Ok(())
    }
}

/// Result of a completed frame.
///
/// A frame produces exactly one of these, never both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[must_use]
pub enum ReadOutcome {
    /// Frame ended with the end byte; carries the payload.
    Success(TagId),
    /// Frame ended with a wrong terminator (or was aborted).
    Failure,
}

impl ReadOutcome {
    /// Get the tag ID of a successful read.
    #[inline]
    #[must_use]
    pub fn tag(&self) -> Option<TagId> {
        match self {
            ReadOutcome::Success(tag) => Some(*tag),
            ReadOutcome::Failure => None,
        }
    }

    /// Check whether the frame was closed by the end byte.
    #[inline]
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, ReadOutcome::Success(_))
    }
}

#[cfg(test)]
mod tests {
    extern crate std;
    use std::format;

    use super::*;

    #[test]
    fn test_display_hex() {
        let tag = TagId::new([0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A]);
        assert_eq!(format!("{}", tag), "01 02 03 04 05 06 07 08 09 0A");
    }

    #[test]
    fn test_as_str_ascii_tag() {
        let tag = TagId::new(*b"0415ED7A3F");
        assert_eq!(tag.as_str(), Some("0415ED7A3F"));
    }

    #[test]
    fn test_as_str_binary_tag() {
        let tag = TagId::new([0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0xFF]);
        assert_eq!(tag.as_str(), None);
    }

    #[test]
    fn test_equality_is_bytewise() {
        let a = TagId::new(*b"0415ED7A3F");
        let b = TagId::from(*b"0415ED7A3F");
        let c = TagId::new(*b"0415ED7A3E");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_outcome_tag() {
        let tag = TagId::new(*b"ABCDEFGHIJ");
        assert_eq!(ReadOutcome::Success(tag).tag(), Some(tag));
        assert_eq!(ReadOutcome::Failure.tag(), None);
        assert!(ReadOutcome::Success(tag).is_success());
        assert!(!ReadOutcome::Failure.is_success());
    }
}
