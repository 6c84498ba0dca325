//! TWI pin routing
//!
//! A TWI instance exposes two SCL/SDA pairs under the same route: the
//! controller (host) pins and, in dual mode, a separate pair for the device
//! (client) side. Both pairs are selected by the one route field.

use crate::chip::{self, Chip};
use crate::error::{require, HalError, HalResult};
use crate::peripheral::{RouteValue, Twi, TwiRoute};
use crate::port::{PinLocation, PortId};

/// TWI signal lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TwiSignal {
    Scl,
    Sda,
}

impl TwiSignal {
    pub const ALL: [TwiSignal; 2] = [TwiSignal::Scl, TwiSignal::Sda];
}

/// Which side of a dual-mode TWI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TwiRole {
    /// Host side; the only side in single mode
    Controller,
    /// Client side in dual mode
    Device,
}

impl TwiRole {
    pub const ALL: [TwiRole; 2] = [TwiRole::Controller, TwiRole::Device];
}

/// SCL/SDA pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TwiPair {
    pub sda: PinLocation,
    pub scl: PinLocation,
}

impl TwiPair {
    /// Pin carrying a signal
    pub fn get(&self, signal: TwiSignal) -> PinLocation {
        match signal {
            TwiSignal::Scl => self.scl,
            TwiSignal::Sda => self.sda,
        }
    }
}

/// Pins of one TWI instance on one route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TwiPins {
    pub controller: TwiPair,
    pub device: TwiPair,
}

impl TwiPins {
    /// Pair used by a role
    pub fn pair(&self, role: TwiRole) -> TwiPair {
        match role {
            TwiRole::Controller => self.controller,
            TwiRole::Device => self.device,
        }
    }

    /// Pin carrying `signal` for `role`
    pub fn get(&self, role: TwiRole, signal: TwiSignal) -> PinLocation {
        self.pair(role).get(signal)
    }
}

/// Full pin set of a TWI instance on a route
pub fn pins<C: Chip>(twi: Twi, route: TwiRoute) -> HalResult<TwiPins> {
    chip::ensure_present::<C>(twi)?;
    require(route.is_connected(), HalError::Disconnected)?;
    C::twi_pins(twi, route)
}

/// Check that a route can be selected for a TWI instance
pub fn supports<C: Chip>(twi: Twi, route: TwiRoute) -> HalResult<()> {
    chip::ensure_present::<C>(twi)?;
    if route.is_connected() {
        C::twi_pins(twi, route)?;
    }
    Ok(())
}

/// Pin carrying `signal` for `role`
pub fn pin<C: Chip>(twi: Twi, route: TwiRoute, role: TwiRole, signal: TwiSignal) -> HalResult<PinLocation> {
    pins::<C>(twi, route).map(|pins| pins.get(role, signal))
}

/// Port carrying `signal` for `role`
pub fn port<C: Chip>(twi: Twi, route: TwiRoute, role: TwiRole, signal: TwiSignal) -> HalResult<PortId> {
    pin::<C>(twi, route, role, signal).map(PinLocation::port)
}

/// Bit position of `signal` for `role`
pub fn pin_number<C: Chip>(twi: Twi, route: TwiRoute, role: TwiRole, signal: TwiSignal) -> HalResult<u8> {
    pin::<C>(twi, route, role, signal).map(PinLocation::number)
}

/// Single-bit mask of `signal` for `role`
pub fn pin_mask<C: Chip>(twi: Twi, route: TwiRoute, role: TwiRole, signal: TwiSignal) -> HalResult<u8> {
    pin::<C>(twi, route, role, signal).map(PinLocation::mask)
}

pin_aliases! {
    (twi: Twi, route: TwiRoute);
    /// Controller SCL pin
    controller_scl, controller_scl_number, controller_scl_mask =>
        pin::<C>(twi, route, TwiRole::Controller, TwiSignal::Scl);
    /// Controller SDA pin
    controller_sda, controller_sda_number, controller_sda_mask =>
        pin::<C>(twi, route, TwiRole::Controller, TwiSignal::Sda);
    /// Device SCL pin (dual mode)
    device_scl, device_scl_number, device_scl_mask =>
        pin::<C>(twi, route, TwiRole::Device, TwiSignal::Scl);
    /// Device SDA pin (dual mode)
    device_sda, device_sda_number, device_sda_mask =>
        pin::<C>(twi, route, TwiRole::Device, TwiSignal::Sda);
    /// SCL pin in single mode, same as [`controller_scl`]
    scl, scl_number, scl_mask => controller_scl::<C>(twi, route);
    /// SDA pin in single mode, same as [`controller_sda`]
    sda, sda_number, sda_mask => controller_sda::<C>(twi, route);
}
