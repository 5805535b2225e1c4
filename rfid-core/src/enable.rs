//! Reader enable line.
//!
//! The reader's `/ENABLE` input is active-low: driving it low powers the
//! antenna, driving it high puts the module to sleep.

use core::convert::Infallible;
use embedded_hal::digital::OutputPin;

/// Exclusive owner of the reader's enable pin.
pub struct EnableLine<P> {
    pin: P,
    asserted: bool,
}

impl<P: OutputPin<Error = Infallible>> EnableLine<P> {
    /// Take ownership of `pin` and drive it to the inactive (high) level.
    pub fn new(mut pin: P) -> Self {
        pin.set_high().unwrap_or_else(|e| match e {});
        Self {
            pin,
            asserted: false,
        }
    }

    /// Activate the reader (drive low).
    pub fn assert(&mut self) {
        self.pin.set_low().unwrap_or_else(|e| match e {});
        self.asserted = true;
    }

    /// Deactivate the reader (drive high).
    pub fn deassert(&mut self) {
        self.pin.set_high().unwrap_or_else(|e| match e {});
        self.asserted = false;
    }
}

impl<P> EnableLine<P> {
    /// Whether the reader is currently activated.
    #[inline]
    #[must_use]
    pub fn is_asserted(&self) -> bool {
        self.asserted
    }

    /// Give the pin back.
    pub fn release(self) -> P {
        self.pin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockPin;

    #[test]
    fn test_new_drives_inactive() {
        let line = EnableLine::new(MockPin::new());
        assert!(!line.is_asserted());

        let pin = line.release();
        assert_eq!(pin.level(), Some(true));
        assert_eq!(pin.writes(), 1);
    }

    #[test]
    fn test_assert_deassert() {
        let mut line = EnableLine::new(MockPin::new());

        line.assert();
        assert!(line.is_asserted());

        line.deassert();
        assert!(!line.is_asserted());

        let pin = line.release();
        assert_eq!(pin.level(), Some(true));
        assert_eq!(pin.writes(), 3);
    }

    #[test]
    fn test_assert_drives_low() {
        let mut line = EnableLine::new(MockPin::new());
        line.assert();
        assert_eq!(line.release().level(), Some(false));
    }
}
