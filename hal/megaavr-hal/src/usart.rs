//! USART pin routing
//!
//! TXD and RXD exist on every connected route. XCK (synchronous clock) and
//! XDIR (RS-485 direction) are missing on some alternate routes; asking for
//! them there fails with [`HalError::SignalNotRouted`].

use crate::chip::{self, Chip};
use crate::error::{require, HalError, HalResult};
use crate::peripheral::{RouteValue, Usart, UsartRoute};
use crate::port::{PinLocation, PortId};

/// USART signal lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UsartSignal {
    /// Transmit data
    Txd,
    /// Receive data
    Rxd,
    /// Transfer clock
    Xck,
    /// Transmit direction
    Xdir,
}

impl UsartSignal {
    pub const ALL: [UsartSignal; 4] = [UsartSignal::Txd, UsartSignal::Rxd, UsartSignal::Xck, UsartSignal::Xdir];
}

/// Pins of one USART instance on one route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UsartPins {
    pub txd: PinLocation,
    pub rxd: PinLocation,
    pub xck: Option<PinLocation>,
    pub xdir: Option<PinLocation>,
}

impl UsartPins {
    /// Pin carrying a signal
    pub fn get(&self, signal: UsartSignal) -> HalResult<PinLocation> {
        match signal {
            UsartSignal::Txd => Ok(self.txd),
            UsartSignal::Rxd => Ok(self.rxd),
            UsartSignal::Xck => self.xck.ok_or(HalError::SignalNotRouted),
            UsartSignal::Xdir => self.xdir.ok_or(HalError::SignalNotRouted),
        }
    }
}

/// Full pin set of a USART instance on a route
pub fn pins<C: Chip>(usart: Usart, route: UsartRoute) -> HalResult<UsartPins> {
    chip::ensure_present::<C>(usart)?;
    require(route.is_connected(), HalError::Disconnected)?;
    C::usart_pins(usart, route)
}

/// Check that a route can be selected for a USART instance
pub fn supports<C: Chip>(usart: Usart, route: UsartRoute) -> HalResult<()> {
    chip::ensure_present::<C>(usart)?;
    if route.is_connected() {
        C::usart_pins(usart, route)?;
    }
    Ok(())
}

/// Pin carrying `signal`
pub fn pin<C: Chip>(usart: Usart, route: UsartRoute, signal: UsartSignal) -> HalResult<PinLocation> {
    pins::<C>(usart, route)?.get(signal)
}

/// Port carrying `signal`
pub fn port<C: Chip>(usart: Usart, route: UsartRoute, signal: UsartSignal) -> HalResult<PortId> {
    pin::<C>(usart, route, signal).map(PinLocation::port)
}

/// Bit position of `signal` within its port
pub fn pin_number<C: Chip>(usart: Usart, route: UsartRoute, signal: UsartSignal) -> HalResult<u8> {
    pin::<C>(usart, route, signal).map(PinLocation::number)
}

/// Single-bit mask of `signal` within its port
pub fn pin_mask<C: Chip>(usart: Usart, route: UsartRoute, signal: UsartSignal) -> HalResult<u8> {
    pin::<C>(usart, route, signal).map(PinLocation::mask)
}

pin_aliases! {
    (usart: Usart, route: UsartRoute);
    /// TXD pin
    txd, txd_number, txd_mask => pin::<C>(usart, route, UsartSignal::Txd);
    /// RXD pin
    rxd, rxd_number, rxd_mask => pin::<C>(usart, route, UsartSignal::Rxd);
    /// XCK pin
    xck, xck_number, xck_mask => pin::<C>(usart, route, UsartSignal::Xck);
    /// XDIR pin
    xdir, xdir_number, xdir_mask => pin::<C>(usart, route, UsartSignal::Xdir);
}
