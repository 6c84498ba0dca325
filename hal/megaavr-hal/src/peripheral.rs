//! Peripheral identities and route values
//!
//! Identities form a closed set across the family. Which of them a chip
//! actually has is a property of the chip variant (see [`crate::chip`]).

use crate::chip::Chip;
use crate::error::{HalError, HalResult};

/// SPI instances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Spi {
    Spi0,
}

/// TWI instances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Twi {
    Twi0,
}

/// USART instances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Usart {
    Usart0,
    Usart1,
    Usart2,
    Usart3,
}

impl Usart {
    /// Instance number
    pub const fn index(self) -> u8 {
        self as u8
    }
}

/// Any multiplexed peripheral instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Peripheral {
    Spi(Spi),
    Twi(Twi),
    Usart(Usart),
}

impl From<Spi> for Peripheral {
    fn from(spi: Spi) -> Self {
        Peripheral::Spi(spi)
    }
}

impl From<Twi> for Peripheral {
    fn from(twi: Twi) -> Self {
        Peripheral::Twi(twi)
    }
}

impl From<Usart> for Peripheral {
    fn from(usart: Usart) -> Self {
        Peripheral::Usart(usart)
    }
}

/// Route value stored in a multiplexer field
pub trait RouteValue: Copy + Eq + core::fmt::Debug + 'static {
    /// The value that disconnects the peripheral from all pins
    const NONE: Self;

    /// Every encodable route
    const ALL: &'static [Self];

    /// Field bit pattern
    fn bits(self) -> u8;

    /// Decode a field bit pattern
    fn from_bits(bits: u8) -> HalResult<Self>;

    /// Check if the peripheral is connected to pins at all
    fn is_connected(self) -> bool {
        self != Self::NONE
    }
}

/// SPI route selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpiRoute {
    #[default]
    Default,
    Alt1,
    Alt2,
    None,
}

impl RouteValue for SpiRoute {
    const NONE: Self = SpiRoute::None;
    const ALL: &'static [Self] = &[SpiRoute::Default, SpiRoute::Alt1, SpiRoute::Alt2, SpiRoute::None];

    fn bits(self) -> u8 {
        match self {
            SpiRoute::Default => 0x0,
            SpiRoute::Alt1 => 0x1,
            SpiRoute::Alt2 => 0x2,
            SpiRoute::None => 0x3,
        }
    }

    fn from_bits(bits: u8) -> HalResult<Self> {
        match bits {
            0x0 => Ok(SpiRoute::Default),
            0x1 => Ok(SpiRoute::Alt1),
            0x2 => Ok(SpiRoute::Alt2),
            0x3 => Ok(SpiRoute::None),
            other => Err(HalError::ReservedValue(other)),
        }
    }
}

/// TWI route selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TwiRoute {
    #[default]
    Default,
    Alt1,
    Alt2,
    None,
}

impl RouteValue for TwiRoute {
    const NONE: Self = TwiRoute::None;
    const ALL: &'static [Self] = &[TwiRoute::Default, TwiRoute::Alt1, TwiRoute::Alt2, TwiRoute::None];

    fn bits(self) -> u8 {
        match self {
            TwiRoute::Default => 0x0,
            TwiRoute::Alt1 => 0x1,
            TwiRoute::Alt2 => 0x2,
            TwiRoute::None => 0x3,
        }
    }

    fn from_bits(bits: u8) -> HalResult<Self> {
        match bits {
            0x0 => Ok(TwiRoute::Default),
            0x1 => Ok(TwiRoute::Alt1),
            0x2 => Ok(TwiRoute::Alt2),
            0x3 => Ok(TwiRoute::None),
            other => Err(HalError::ReservedValue(other)),
        }
    }
}

/// USART route selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UsartRoute {
    #[default]
    Default,
    Alt,
    None,
}

impl RouteValue for UsartRoute {
    const NONE: Self = UsartRoute::None;
    const ALL: &'static [Self] = &[UsartRoute::Default, UsartRoute::Alt, UsartRoute::None];

    fn bits(self) -> u8 {
        match self {
            UsartRoute::Default => 0x0,
            UsartRoute::Alt => 0x1,
            UsartRoute::None => 0x3,
        }
    }

    fn from_bits(bits: u8) -> HalResult<Self> {
        match bits {
            0x0 => Ok(UsartRoute::Default),
            0x1 => Ok(UsartRoute::Alt),
            0x3 => Ok(UsartRoute::None),
            // 0x2 is reserved
            other => Err(HalError::ReservedValue(other)),
        }
    }
}

/// A peripheral whose signals go through the port multiplexer
pub trait Multiplexed: Copy + Into<Peripheral> {
    /// Route type stored in this peripheral's multiplexer field
    type Route: RouteValue;

    /// Check that `route` can be selected on chip `C`
    fn supports<C: Chip>(self, route: Self::Route) -> HalResult<()>;
}

impl Multiplexed for Spi {
    type Route = SpiRoute;

    fn supports<C: Chip>(self, route: SpiRoute) -> HalResult<()> {
        crate::spi::supports::<C>(self, route)
    }
}

impl Multiplexed for Twi {
    type Route = TwiRoute;

    fn supports<C: Chip>(self, route: TwiRoute) -> HalResult<()> {
        crate::twi::supports::<C>(self, route)
    }
}

impl Multiplexed for Usart {
    type Route = UsartRoute;

    fn supports<C: Chip>(self, route: UsartRoute) -> HalResult<()> {
        crate::usart::supports::<C>(self, route)
    }
}
