//! I/O ports, virtual ports and pin locations
//!
//! Every I/O port has two register views: the full PORT block and the
//! compact VPORT block in the bit-addressable I/O space. Both views act on
//! the same pins, so a lookup result names only the [`PortId`] and the
//! [`PortBank`] hands out whichever view the caller needs.

use core::fmt;
use core::str::FromStr;

use crate::error::{require, HalError, HalResult};
use crate::gpio::Pin;
use crate::registers::{PortRegisters, VPortRegisters};

/// Number of port letters known to the family (A..F)
pub const PORT_COUNT: usize = 6;

/// Pins per port
pub const PINS_PER_PORT: u8 = 8;

/// Physical I/O port
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PortId {
    A,
    B,
    C,
    D,
    E,
    F,
}

impl PortId {
    /// All port letters in address order
    pub const ALL: [PortId; PORT_COUNT] =
        [PortId::A, PortId::B, PortId::C, PortId::D, PortId::E, PortId::F];

    /// Zero-based index (A = 0)
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Port letter
    pub const fn letter(self) -> char {
        match self {
            PortId::A => 'A',
            PortId::B => 'B',
            PortId::C => 'C',
            PortId::D => 'D',
            PortId::E => 'E',
            PortId::F => 'F',
        }
    }

    /// Port from its letter (either case)
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'A' => Some(PortId::A),
            'B' => Some(PortId::B),
            'C' => Some(PortId::C),
            'D' => Some(PortId::D),
            'E' => Some(PortId::E),
            'F' => Some(PortId::F),
            _ => None,
        }
    }
}

/// A physical pin: port plus bit position
///
/// Port and pin number always come out of the same table entry, so they
/// travel together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawPinLocation"))]
pub struct PinLocation {
    port: PortId,
    number: u8,
}

/// Unchecked wire form of [`PinLocation`]; decoding goes through `try_new`
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawPinLocation {
    port: PortId,
    number: u8,
}

#[cfg(feature = "serde")]
impl TryFrom<RawPinLocation> for PinLocation {
    type Error = HalError;

    fn try_from(raw: RawPinLocation) -> Result<Self, Self::Error> {
        Self::try_new(raw.port, raw.number)
    }
}

impl PinLocation {
    /// Create a pin location
    ///
    /// # Panics
    ///
    /// Panics if `number` is not in 0..=7. Tables are literal, so this
    /// only fires on a typo in a table.
    pub const fn new(port: PortId, number: u8) -> Self {
        assert!(number < PINS_PER_PORT, "pin number out of range");
        Self { port, number }
    }

    /// Create a pin location from runtime data
    pub fn try_new(port: PortId, number: u8) -> HalResult<Self> {
        require(number < PINS_PER_PORT, HalError::InvalidPin)?;
        Ok(Self { port, number })
    }

    /// Port carrying this pin
    pub const fn port(self) -> PortId {
        self.port
    }

    /// Bit position within the port (0-7)
    pub const fn number(self) -> u8 {
        self.number
    }

    /// Single-bit mask for this pin
    pub const fn mask(self) -> u8 {
        1 << self.number
    }
}

impl fmt::Display for PinLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}{}", self.port.letter(), self.number)
    }
}

/// Parse a pin name
///
/// Supports formats:
/// - "PA6" -> (Port A, Pin 6)
/// - "pc2" -> (Port C, Pin 2)
impl FromStr for PinLocation {
    type Err = HalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut chars = s.chars();

        if !matches!(chars.next(), Some('P' | 'p')) {
            return Err(HalError::InvalidPin);
        }

        let port = chars
            .next()
            .and_then(PortId::from_letter)
            .ok_or(HalError::InvalidPin)?;

        let number: u8 = chars.as_str().parse().map_err(|_| HalError::InvalidPin)?;

        Self::try_new(port, number)
    }
}

/// Register views for every port of a chip
///
/// Ports the chip does not have stay empty and resolve to
/// [`HalError::UnknownPort`].
#[derive(Clone, Copy)]
pub struct PortBank<'a> {
    ports: [Option<(&'a PortRegisters, &'a VPortRegisters)>; PORT_COUNT],
}

impl<'a> Default for PortBank<'a> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> PortBank<'a> {
    /// Create an empty bank
    pub const fn new() -> Self {
        Self {
            ports: [None; PORT_COUNT],
        }
    }

    /// Register the two views of one port
    pub fn with_port(mut self, id: PortId, port: &'a PortRegisters, vport: &'a VPortRegisters) -> Self {
        self.ports[id.index()] = Some((port, vport));
        self
    }

    /// Check if the port is present
    pub fn contains(&self, id: PortId) -> bool {
        self.ports[id.index()].is_some()
    }

    /// Full PORT view
    pub fn port(&self, id: PortId) -> HalResult<&'a PortRegisters> {
        self.ports[id.index()]
            .map(|(port, _)| port)
            .ok_or(HalError::UnknownPort)
    }

    /// Virtual port view
    pub fn vport(&self, id: PortId) -> HalResult<&'a VPortRegisters> {
        self.ports[id.index()]
            .map(|(_, vport)| vport)
            .ok_or(HalError::UnknownPort)
    }

    /// GPIO handle for a resolved pin
    pub fn pin(&self, location: PinLocation) -> HalResult<Pin<'a>> {
        let port = self.port(location.port())?;
        let vport = self.vport(location.port())?;
        Ok(Pin::new(port, vport, location))
    }
}

#[cfg(test)]
mod tests {
    use std::string::ToString;

    use super::*;

    #[test]
    fn test_pin_location() {
        let pin = PinLocation::new(PortId::A, 7);
        assert_eq!(pin.port(), PortId::A);
        assert_eq!(pin.number(), 7);
        assert_eq!(pin.mask(), 0b1000_0000);
        assert_eq!(PinLocation::new(PortId::C, 0).mask(), 0b0000_0001);
    }

    #[test]
    fn test_try_new_rejects_out_of_range() {
        assert_eq!(PinLocation::try_new(PortId::B, 8), Err(HalError::InvalidPin));
        assert!(PinLocation::try_new(PortId::B, 5).is_ok());
    }

    #[test]
    fn test_parse_pin_names() {
        assert_eq!("PA6".parse(), Ok(PinLocation::new(PortId::A, 6)));
        assert_eq!(" pf3 ".parse(), Ok(PinLocation::new(PortId::F, 3)));
        assert_eq!("PG1".parse::<PinLocation>(), Err(HalError::InvalidPin));
        assert_eq!("PA8".parse::<PinLocation>(), Err(HalError::InvalidPin));
        assert_eq!("A6".parse::<PinLocation>(), Err(HalError::InvalidPin));
        assert_eq!("PA".parse::<PinLocation>(), Err(HalError::InvalidPin));
    }

    #[test]
    fn test_display_matches_parse() {
        let pin = PinLocation::new(PortId::E, 2);
        assert_eq!(pin.to_string(), "PE2");
        assert_eq!(pin.to_string().parse(), Ok(pin));
    }

    #[test]
    fn test_port_letters() {
        for id in PortId::ALL {
            assert_eq!(PortId::from_letter(id.letter()), Some(id));
        }
        assert_eq!(PortId::from_letter('g'), None);
    }

    #[test]
    fn test_port_bank_views() {
        let porta = PortRegisters::new();
        let vporta = VPortRegisters::new();
        let bank = PortBank::new().with_port(PortId::A, &porta, &vporta);

        assert!(bank.contains(PortId::A));
        assert!(!bank.contains(PortId::B));
        assert!(core::ptr::eq(bank.port(PortId::A).unwrap(), &porta));
        assert!(core::ptr::eq(bank.vport(PortId::A).unwrap(), &vporta));
        assert_eq!(bank.port(PortId::E).err(), Some(HalError::UnknownPort));
        assert!(bank.pin(PinLocation::new(PortId::B, 1)).is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_decode_rejects_out_of_range_pin() {
        assert_eq!(
            postcard::from_bytes::<PinLocation>(&[0, 6]).ok(),
            Some(PinLocation::new(PortId::A, 6))
        );
        assert!(postcard::from_bytes::<PinLocation>(&[0, 9]).is_err());
        assert!(postcard::from_bytes::<PinLocation>(&[2, 8]).is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_encode_decode_pin() {
        let pin = PinLocation::new(PortId::F, 3);
        let mut buf = [0u8; 8];
        let bytes = postcard::to_slice(&pin, &mut buf).unwrap();
        assert_eq!(bytes, &[5, 3]);
        assert_eq!(postcard::from_bytes::<PinLocation>(bytes).ok(), Some(pin));
    }
}
