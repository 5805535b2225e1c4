//! Board pin table and reader configuration validation.
//!
//! The reader's serial port occupies fixed pins, so the enable line must be
//! chosen from whatever is left. [`BoardTable`] describes a board's wiring as
//! data; [`ReaderConfig::validate`] checks a requested port/pin pair against
//! it before any peripheral is touched.

use core::fmt;
use heapless::Vec;

/// Maximum number of enable-capable pins a board table may list.
pub const MAX_ENABLE_PINS: usize = 32;

/// A GPIO pin, identified by its number on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pin(pub u8);

impl Pin {
    /// Create a pin from its GPIO number.
    #[inline]
    #[must_use]
    pub const fn new(number: u8) -> Self {
        Self(number)
    }

    /// Get the pin number.
    #[inline]
    #[must_use]
    pub const fn number(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GP{}", self.0)
    }
}

/// A serial port, identified by its hardware index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PortId(pub u8);

impl PortId {
    /// First hardware UART.
    pub const UART0: Self = Self(0);
    /// Second hardware UART.
    pub const UART1: Self = Self(1);
}

impl fmt::Display for PortId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UART{}", self.0)
    }
}

/// Fixed wiring of one serial port.
#[derive(Debug, Clone, Copy)]
pub struct PortWiring {
    /// Port this entry describes.
    pub port: PortId,
    /// Name used to select the port, e.g. `"UART1"`.
    pub name: &'static str,
    /// Pins the port occupies (TX, RX).
    pub reserved: &'static [Pin],
}

impl PortWiring {
    /// Check whether the port occupies `pin`.
    #[inline]
    #[must_use]
    pub fn reserves(&self, pin: Pin) -> bool {
        self.reserved.contains(&pin)
    }
}

/// Data-driven pin/port compatibility table for a board.
#[derive(Debug, Clone, Copy)]
pub struct BoardTable {
    /// Board name, for diagnostics.
    pub name: &'static str,
    /// Serial ports a reader may be attached to.
    pub ports: &'static [PortWiring],
    /// Pins that can drive the reader's enable line.
    pub enable_pins: &'static [Pin],
}

/// Raspberry Pi Pico wiring.
///
/// | Port  | TX  | RX  |
/// |-------|-----|-----|
/// | UART0 | GP0 | GP1 |
/// | UART1 | GP8 | GP9 |
///
/// Enable-capable pins are the header GPIOs GP0-GP22 and GP26-GP28.
pub const PICO: BoardTable = BoardTable {
    name: "Raspberry Pi Pico",
    ports: &[
        PortWiring {
            port: PortId::UART0,
            name: "UART0",
            reserved: &[Pin(0), Pin(1)],
        },
        PortWiring {
            port: PortId::UART1,
            name: "UART1",
            reserved: &[Pin(8), Pin(9)],
        },
    ],
    enable_pins: &[
        Pin(0),
        Pin(1),
        Pin(2),
        Pin(3),
        Pin(4),
        Pin(5),
        Pin(6),
        Pin(7),
        Pin(8),
        Pin(9),
        Pin(10),
        Pin(11),
        Pin(12),
        Pin(13),
        Pin(14),
        Pin(15),
        Pin(16),
        Pin(17),
        Pin(18),
        Pin(19),
        Pin(20),
        Pin(21),
        Pin(22),
        Pin(26),
        Pin(27),
        Pin(28),
    ],
};

impl BoardTable {
    /// Look up a port's wiring.
    #[must_use]
    pub fn wiring(&self, port: PortId) -> Option<&PortWiring> {
        self.ports.iter().find(|w| w.port == port)
    }

    /// Look up a port by name (case-insensitive).
    #[must_use]
    pub fn port_by_name(&self, name: &str) -> Option<PortId> {
        self.ports
            .iter()
            .find(|w| w.name.eq_ignore_ascii_case(name))
            .map(|w| w.port)
    }

    /// Enable-capable pins left over once `wiring` is reserved.
    ///
    /// Tables listing more than [`MAX_ENABLE_PINS`] pins are truncated.
    #[must_use]
    pub fn available_enable_pins(&self, wiring: &PortWiring) -> Vec<Pin, MAX_ENABLE_PINS> {
        let mut available = Vec::new();
        for &pin in self.enable_pins.iter().filter(|&&p| !wiring.reserves(p)) {
            if available.push(pin).is_err() {
                break;
            }
        }
        available
    }
}

/// Configuration error, raised before any I/O is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// No serial port given.
    MissingPort,
    /// Port name does not match any port of the board.
    UnknownPortName,
    /// Port is not wired for a reader on this board.
    UnsupportedPort(PortId),
    /// Enable pin is occupied by the selected port.
    PinReserved { port: PortId, pin: Pin },
    /// Pin cannot drive the enable line on this board.
    UnsupportedPin(Pin),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingPort => f.write_str("serial port must be specified"),
            ConfigError::UnknownPortName => f.write_str("unknown serial port name"),
            ConfigError::UnsupportedPort(port) => write!(f, "{} is not supported", port),
            ConfigError::PinReserved { port, pin } => {
                write!(f, "enable pin {} is used by {}", pin, port)
            }
            ConfigError::UnsupportedPin(pin) => write!(f, "enable pin {} is not supported", pin),
        }
    }
}

/// Validated, immutable reader configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReaderConfig {
    port: PortId,
    enable_pin: Pin,
    available_pins: Vec<Pin, MAX_ENABLE_PINS>,
}

impl ReaderConfig {
    /// Validate a port/enable-pin pair against `table`.
    ///
    /// Checks, in order: the port is present, the board wires it, the pin is
    /// not one of the port's own pins, and the pin can drive an output.
    pub fn validate(
        table: &BoardTable,
        port: Option<PortId>,
        enable_pin: Pin,
    ) -> Result<Self, ConfigError> {
        let port = port.ok_or(ConfigError::MissingPort)?;
        let wiring = table
            .wiring(port)
            .ok_or(ConfigError::UnsupportedPort(port))?;

        if wiring.reserves(enable_pin) {
            return Err(ConfigError::PinReserved {
                port,
                pin: enable_pin,
            });
        }

        let available_pins = table.available_enable_pins(wiring);
        if !available_pins.contains(&enable_pin) {
            return Err(ConfigError::UnsupportedPin(enable_pin));
        }

        Ok(Self {
            port,
            enable_pin,
            available_pins,
        })
    }

    /// Validate using a port name such as `"UART1"`.
    pub fn validate_by_name(
        table: &BoardTable,
        port_name: Option<&str>,
        enable_pin: Pin,
    ) -> Result<Self, ConfigError> {
        let name = port_name.ok_or(ConfigError::MissingPort)?;
        let port = table
            .port_by_name(name)
            .ok_or(ConfigError::UnknownPortName)?;
        Self::validate(table, Some(port), enable_pin)
    }

    /// Selected serial port.
    #[inline]
    #[must_use]
    pub fn port(&self) -> PortId {
        self.port
    }

    /// Selected enable pin.
    #[inline]
    #[must_use]
    pub fn enable_pin(&self) -> Pin {
        self.enable_pin
    }

    /// Pins not taken by the serial port, including the enable pin itself.
    #[inline]
    #[must_use]
    pub fn available_pins(&self) -> &[Pin] {
        &self.available_pins
    }
}
