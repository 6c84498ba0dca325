//! Chip variant description
//!
//! A chip variant supplies the data the router consumes: which peripheral
//! instances and ports exist, where their register blocks live, where each
//! route field sits in the multiplexer, and the literal pin tables. The
//! router itself never looks at a variant directly; it goes through the
//! checked helpers in this module so absent peripherals are rejected before
//! any table is consulted.

use crate::error::{require, HalError, HalResult};
use crate::peripheral::{Peripheral, Spi, SpiRoute, Twi, TwiRoute, Usart, UsartRoute};
use crate::port::PortId;
use crate::registers::RouteField;
use crate::spi::SpiPins;
use crate::twi::TwiPins;
use crate::usart::UsartPins;

/// Static description of one chip variant
///
/// Table functions are only called for peripherals and ports listed in
/// [`Chip::PERIPHERALS`] and [`Chip::PORTS`]. Pin tables must return
/// [`HalError::UnsupportedRoute`] for every route the variant does not wire
/// out, including `NONE`.
pub trait Chip {
    /// Marketing name, e.g. "ATmega4809"
    const NAME: &'static str;

    /// Multiplexed peripheral instances present on this variant
    const PERIPHERALS: &'static [Peripheral];

    /// I/O ports present on this variant
    const PORTS: &'static [PortId];

    /// PORTMUX block base address
    const PORTMUX_ADDRESS: u16;

    /// CLKCTRL block base address
    const CLKCTRL_ADDRESS: u16;

    /// CPU.CCP register address
    const CCP_ADDRESS: u16;

    /// Base address of a peripheral's control registers
    fn base_address(peripheral: Peripheral) -> u16;

    /// PORT block base address
    fn port_address(port: PortId) -> u16;

    /// VPORT block base address
    fn vport_address(port: PortId) -> u16;

    /// Multiplexer field holding a peripheral's route
    fn route_field(peripheral: Peripheral) -> RouteField;

    /// SPI pin table
    fn spi_pins(spi: Spi, route: SpiRoute) -> HalResult<SpiPins>;

    /// TWI pin table
    fn twi_pins(twi: Twi, route: TwiRoute) -> HalResult<TwiPins>;

    /// USART pin table
    fn usart_pins(usart: Usart, route: UsartRoute) -> HalResult<UsartPins>;
}

/// Check if a peripheral exists on the chip
pub fn has_peripheral<C: Chip>(peripheral: impl Into<Peripheral>) -> bool {
    C::PERIPHERALS.contains(&peripheral.into())
}

/// Check if a port exists on the chip
pub fn has_port<C: Chip>(port: PortId) -> bool {
    C::PORTS.contains(&port)
}

/// Fail with [`HalError::UnknownPeripheral`] for absent peripherals
pub fn ensure_present<C: Chip>(peripheral: impl Into<Peripheral>) -> HalResult<()> {
    require(has_peripheral::<C>(peripheral), HalError::UnknownPeripheral)
}

/// Multiplexer field for a present peripheral
pub fn route_field<C: Chip>(peripheral: impl Into<Peripheral>) -> HalResult<RouteField> {
    let peripheral = peripheral.into();
    ensure_present::<C>(peripheral)?;
    Ok(C::route_field(peripheral))
}

/// Base address of a present peripheral
pub fn base_address<C: Chip>(peripheral: impl Into<Peripheral>) -> HalResult<u16> {
    let peripheral = peripheral.into();
    ensure_present::<C>(peripheral)?;
    Ok(C::base_address(peripheral))
}

/// PORT base address of a present port
pub fn port_address<C: Chip>(port: PortId) -> HalResult<u16> {
    require(has_port::<C>(port), HalError::UnknownPort)?;
    Ok(C::port_address(port))
}

/// VPORT base address of a present port
pub fn vport_address<C: Chip>(port: PortId) -> HalResult<u16> {
    require(has_port::<C>(port), HalError::UnknownPort)?;
    Ok(C::vport_address(port))
}

/// Resolve a register block base address to the peripheral it belongs to
///
/// Only peripherals present on the chip are considered.
pub fn identify<C: Chip>(address: u16) -> HalResult<Peripheral> {
    C::PERIPHERALS
        .iter()
        .copied()
        .find(|&peripheral| C::base_address(peripheral) == address)
        .ok_or(HalError::UnknownPeripheral)
}

/// Resolve a PORT or VPORT base address to its port
pub fn identify_port<C: Chip>(address: u16) -> HalResult<PortId> {
    C::PORTS
        .iter()
        .copied()
        .find(|&port| C::port_address(port) == address || C::vport_address(port) == address)
        .ok_or(HalError::UnknownPort)
}

impl Spi {
    /// Resolve an SPI instance from its base address
    pub fn from_address<C: Chip>(address: u16) -> HalResult<Self> {
        match identify::<C>(address)? {
            Peripheral::Spi(spi) => Ok(spi),
            _ => Err(HalError::UnknownPeripheral),
        }
    }
}

impl Twi {
    /// Resolve a TWI instance from its base address
    pub fn from_address<C: Chip>(address: u16) -> HalResult<Self> {
        match identify::<C>(address)? {
            Peripheral::Twi(twi) => Ok(twi),
            _ => Err(HalError::UnknownPeripheral),
        }
    }
}

impl Usart {
    /// Resolve a USART instance from its base address
    pub fn from_address<C: Chip>(address: u16) -> HalResult<Self> {
        match identify::<C>(address)? {
            Peripheral::Usart(usart) => Ok(usart),
            _ => Err(HalError::UnknownPeripheral),
        }
    }
}
