//! ATmega4809 (48-pin)

use megaavr_hal::chip::Chip;
use megaavr_hal::registers::RouteField;
use megaavr_hal::spi::SpiPins;
use megaavr_hal::twi::TwiPins;
use megaavr_hal::usart::UsartPins;
use megaavr_hal::{HalError, HalResult, Peripheral, PortId, Spi, SpiRoute, Twi, TwiRoute, Usart, UsartRoute};

use crate::memory_map;
use crate::pinout::*;

/// ATmega4809 in the 48-pin package
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Atmega4809;

impl Chip for Atmega4809 {
    const NAME: &'static str = "ATmega4809";

    const PERIPHERALS: &'static [Peripheral] = &[
        Peripheral::Spi(Spi::Spi0),
        Peripheral::Twi(Twi::Twi0),
        Peripheral::Usart(Usart::Usart0),
        Peripheral::Usart(Usart::Usart1),
        Peripheral::Usart(Usart::Usart2),
        Peripheral::Usart(Usart::Usart3),
    ];

    const PORTS: &'static [PortId] = &[PortId::A, PortId::B, PortId::C, PortId::D, PortId::E, PortId::F];

    const PORTMUX_ADDRESS: u16 = memory_map::PORTMUX_ADDRESS;
    const CLKCTRL_ADDRESS: u16 = memory_map::CLKCTRL_ADDRESS;
    const CCP_ADDRESS: u16 = memory_map::CCP_ADDRESS;

    fn base_address(peripheral: Peripheral) -> u16 {
        memory_map::base_address(peripheral)
    }

    fn port_address(port: PortId) -> u16 {
        memory_map::port_address(port)
    }

    fn vport_address(port: PortId) -> u16 {
        memory_map::vport_address(port)
    }

    fn route_field(peripheral: Peripheral) -> RouteField {
        memory_map::route_field(peripheral)
    }

    fn spi_pins(spi: Spi, route: SpiRoute) -> HalResult<SpiPins> {
        match (spi, route) {
            (Spi::Spi0, SpiRoute::Default) => Ok(SPI0_DEFAULT),
            (Spi::Spi0, SpiRoute::Alt1) => Ok(SPI0_ALT1),
            (Spi::Spi0, SpiRoute::Alt2) => Ok(SPI0_ALT2),
            (Spi::Spi0, SpiRoute::None) => Err(HalError::UnsupportedRoute),
        }
    }

    fn twi_pins(twi: Twi, route: TwiRoute) -> HalResult<TwiPins> {
        match (twi, route) {
            (Twi::Twi0, TwiRoute::Default) => Ok(TWI0_DEFAULT),
            (Twi::Twi0, TwiRoute::Alt1) => Ok(TWI0_ALT1),
            (Twi::Twi0, TwiRoute::Alt2) => Ok(TWI0_ALT2),
            (Twi::Twi0, TwiRoute::None) => Err(HalError::UnsupportedRoute),
        }
    }

    fn usart_pins(usart: Usart, route: UsartRoute) -> HalResult<UsartPins> {
        match (usart, route) {
            (Usart::Usart0, UsartRoute::Default) => Ok(USART0_DEFAULT),
            (Usart::Usart0, UsartRoute::Alt) => Ok(USART0_ALT),
            (Usart::Usart1, UsartRoute::Default) => Ok(USART1_DEFAULT),
            (Usart::Usart1, UsartRoute::Alt) => Ok(USART1_ALT),
            (Usart::Usart2, UsartRoute::Default) => Ok(USART2_DEFAULT),
            (Usart::Usart2, UsartRoute::Alt) => Ok(USART2_ALT),
            (Usart::Usart3, UsartRoute::Default) => Ok(USART3_DEFAULT),
            (Usart::Usart3, UsartRoute::Alt) => Ok(USART3_ALT),
            (_, UsartRoute::None) => Err(HalError::UnsupportedRoute),
        }
    }
}
