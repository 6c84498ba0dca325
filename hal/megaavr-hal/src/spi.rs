//! SPI pin routing
//!
//! Resolves which port and pin carry SCK, MOSI, MISO and SS of an SPI
//! instance for a given route. The tables themselves belong to the chip
//! variant; this module adds the presence and `NONE` checks and the derived
//! accessors.

use crate::chip::{self, Chip};
use crate::error::{require, HalError, HalResult};
use crate::peripheral::{RouteValue, Spi, SpiRoute};
use crate::port::{PinLocation, PortId};

/// SPI signal lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpiSignal {
    /// Serial clock
    Sck,
    /// Controller out, peripheral in
    Mosi,
    /// Controller in, peripheral out
    Miso,
    /// Slave select
    Ss,
}

impl SpiSignal {
    pub const ALL: [SpiSignal; 4] = [SpiSignal::Sck, SpiSignal::Mosi, SpiSignal::Miso, SpiSignal::Ss];
}

/// Pins of one SPI instance on one route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpiPins {
    pub mosi: PinLocation,
    pub miso: PinLocation,
    pub sck: PinLocation,
    pub ss: PinLocation,
}

impl SpiPins {
    /// Pin carrying a signal
    pub fn get(&self, signal: SpiSignal) -> PinLocation {
        match signal {
            SpiSignal::Sck => self.sck,
            SpiSignal::Mosi => self.mosi,
            SpiSignal::Miso => self.miso,
            SpiSignal::Ss => self.ss,
        }
    }

    /// All signals with their pins
    pub fn signals(&self) -> [(SpiSignal, PinLocation); 4] {
        SpiSignal::ALL.map(|signal| (signal, self.get(signal)))
    }
}

/// Full pin set of an SPI instance on a route
pub fn pins<C: Chip>(spi: Spi, route: SpiRoute) -> HalResult<SpiPins> {
    chip::ensure_present::<C>(spi)?;
    require(route.is_connected(), HalError::Disconnected)?;
    C::spi_pins(spi, route)
}

/// Check that a route can be selected for an SPI instance
///
/// `NONE` is always selectable.
pub fn supports<C: Chip>(spi: Spi, route: SpiRoute) -> HalResult<()> {
    chip::ensure_present::<C>(spi)?;
    if route.is_connected() {
        C::spi_pins(spi, route)?;
    }
    Ok(())
}

/// Pin carrying `signal`
pub fn pin<C: Chip>(spi: Spi, route: SpiRoute, signal: SpiSignal) -> HalResult<PinLocation> {
    pins::<C>(spi, route).map(|pins| pins.get(signal))
}

/// Port carrying `signal`
pub fn port<C: Chip>(spi: Spi, route: SpiRoute, signal: SpiSignal) -> HalResult<PortId> {
    pin::<C>(spi, route, signal).map(PinLocation::port)
}

/// Bit position of `signal` within its port
pub fn pin_number<C: Chip>(spi: Spi, route: SpiRoute, signal: SpiSignal) -> HalResult<u8> {
    pin::<C>(spi, route, signal).map(PinLocation::number)
}

/// Single-bit mask of `signal` within its port
pub fn pin_mask<C: Chip>(spi: Spi, route: SpiRoute, signal: SpiSignal) -> HalResult<u8> {
    pin::<C>(spi, route, signal).map(PinLocation::mask)
}

pin_aliases! {
    (spi: Spi, route: SpiRoute);
    /// SCK pin
    sck, sck_number, sck_mask => pin::<C>(spi, route, SpiSignal::Sck);
    /// MOSI pin
    mosi, mosi_number, mosi_mask => pin::<C>(spi, route, SpiSignal::Mosi);
    /// MISO pin
    miso, miso_number, miso_mask => pin::<C>(spi, route, SpiSignal::Miso);
    /// SS pin
    ss, ss_number, ss_mask => pin::<C>(spi, route, SpiSignal::Ss);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chip::test_chip::TestChip;

    #[test]
    fn test_default_route() {
        let sck = sck::<TestChip>(Spi::Spi0, SpiRoute::Default).unwrap();
        assert_eq!(sck, PinLocation::new(PortId::A, 6));
        assert_eq!(ss_mask::<TestChip>(Spi::Spi0, SpiRoute::Default), Ok(0b1000_0000));
        assert_eq!(mosi_number::<TestChip>(Spi::Spi0, SpiRoute::Default), Ok(4));
    }

    #[test]
    fn test_alternate_route() {
        assert_eq!(sck_number::<TestChip>(Spi::Spi0, SpiRoute::Alt1), Ok(2));
        assert_eq!(port::<TestChip>(Spi::Spi0, SpiRoute::Alt1, SpiSignal::Miso), Ok(PortId::C));
    }

    #[test]
    fn test_none_route_rejected() {
        for signal in SpiSignal::ALL {
            assert_eq!(pin::<TestChip>(Spi::Spi0, SpiRoute::None, signal), Err(HalError::Disconnected));
        }
        assert_eq!(sck_mask::<TestChip>(Spi::Spi0, SpiRoute::None), Err(HalError::Disconnected));
    }

    #[test]
    fn test_unwired_route_rejected() {
        assert_eq!(pins::<TestChip>(Spi::Spi0, SpiRoute::Alt2), Err(HalError::UnsupportedRoute));
        assert_eq!(supports::<TestChip>(Spi::Spi0, SpiRoute::Alt2), Err(HalError::UnsupportedRoute));
        assert_eq!(supports::<TestChip>(Spi::Spi0, SpiRoute::None), Ok(()));
    }

    #[test]
    fn test_aliases_match_generic_lookup() {
        for route in [SpiRoute::Default, SpiRoute::Alt1] {
            assert_eq!(sck::<TestChip>(Spi::Spi0, route), pin::<TestChip>(Spi::Spi0, route, SpiSignal::Sck));
            assert_eq!(mosi::<TestChip>(Spi::Spi0, route), pin::<TestChip>(Spi::Spi0, route, SpiSignal::Mosi));
            assert_eq!(miso::<TestChip>(Spi::Spi0, route), pin::<TestChip>(Spi::Spi0, route, SpiSignal::Miso));
            assert_eq!(ss::<TestChip>(Spi::Spi0, route), pin::<TestChip>(Spi::Spi0, route, SpiSignal::Ss));
        }
    }

    #[test]
    fn test_signals_listing() {
        let pins = pins::<TestChip>(Spi::Spi0, SpiRoute::Default).unwrap();
        let signals = pins.signals();
        assert_eq!(signals[0], (SpiSignal::Sck, PinLocation::new(PortId::A, 6)));
        assert_eq!(signals[3], (SpiSignal::Ss, PinLocation::new(PortId::A, 7)));
    }
}
