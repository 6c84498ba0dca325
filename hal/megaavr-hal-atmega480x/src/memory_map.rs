//! Register addresses and multiplexer fields shared by the ATmega480x
//! variants
//!
//! Both packages use the same die, so addresses and field positions are
//! identical. Only the wired-out routes differ.

use megaavr_hal::field::Field;
use megaavr_hal::registers::{RouteField, RouteRegister};
use megaavr_hal::{Peripheral, PortId, Usart};

pub const CCP_ADDRESS: u16 = 0x0034;
pub const CLKCTRL_ADDRESS: u16 = 0x0060;
pub const PORTMUX_ADDRESS: u16 = 0x05E0;

pub const VPORT_BASE: u16 = 0x0000;
pub const VPORT_STRIDE: u16 = 0x04;
pub const PORT_BASE: u16 = 0x0400;
pub const PORT_STRIDE: u16 = 0x20;

pub const USART_BASE: u16 = 0x0800;
pub const USART_STRIDE: u16 = 0x20;
pub const TWI0_ADDRESS: u16 = 0x08A0;
pub const SPI0_ADDRESS: u16 = 0x08C0;

const SPI0_ROUTE: RouteField = RouteField::new(RouteRegister::TwiSpiRouteA, Field::new(0, 2));
const TWI0_ROUTE: RouteField = RouteField::new(RouteRegister::TwiSpiRouteA, Field::new(4, 2));

pub fn base_address(peripheral: Peripheral) -> u16 {
    match peripheral {
        Peripheral::Spi(_) => SPI0_ADDRESS,
        Peripheral::Twi(_) => TWI0_ADDRESS,
        Peripheral::Usart(usart) => USART_BASE + USART_STRIDE * usart.index() as u16,
    }
}

pub fn port_address(port: PortId) -> u16 {
    PORT_BASE + PORT_STRIDE * port.index() as u16
}

pub fn vport_address(port: PortId) -> u16 {
    VPORT_BASE + VPORT_STRIDE * port.index() as u16
}

/// USARTn route lives in USARTROUTEA bits [2n+1:2n]
fn usart_route(usart: Usart) -> RouteField {
    RouteField::new(RouteRegister::UsartRouteA, Field::new(2 * usart.index(), 2))
}

pub fn route_field(peripheral: Peripheral) -> RouteField {
    match peripheral {
        Peripheral::Spi(_) => SPI0_ROUTE,
        Peripheral::Twi(_) => TWI0_ROUTE,
        Peripheral::Usart(usart) => usart_route(usart),
    }
}
