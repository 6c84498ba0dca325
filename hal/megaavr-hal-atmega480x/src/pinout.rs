//! Pin groups of the ATmega480x die
//!
//! Every group the die can route to, named after peripheral and route.
//! Each package picks the groups whose pins it actually bonds out.

use megaavr_hal::port::{PinLocation, PortId};
use megaavr_hal::spi::SpiPins;
use megaavr_hal::twi::{TwiPair, TwiPins};
use megaavr_hal::usart::UsartPins;

const fn pin(port: PortId, number: u8) -> PinLocation {
    PinLocation::new(port, number)
}

const fn spi_group(port: PortId, first: u8) -> SpiPins {
    SpiPins {
        mosi: pin(port, first),
        miso: pin(port, first + 1),
        sck: pin(port, first + 2),
        ss: pin(port, first + 3),
    }
}

const fn twi_pair(port: PortId) -> TwiPair {
    TwiPair {
        sda: pin(port, 2),
        scl: pin(port, 3),
    }
}

const fn usart_group(port: PortId, first: u8) -> UsartPins {
    UsartPins {
        txd: pin(port, first),
        rxd: pin(port, first + 1),
        xck: Some(pin(port, first + 2)),
        xdir: Some(pin(port, first + 3)),
    }
}

pub const SPI0_DEFAULT: SpiPins = spi_group(PortId::A, 4);
pub const SPI0_ALT1: SpiPins = spi_group(PortId::C, 0);
pub const SPI0_ALT2: SpiPins = spi_group(PortId::E, 0);

pub const TWI0_DEFAULT: TwiPins = TwiPins {
    controller: twi_pair(PortId::A),
    device: twi_pair(PortId::C),
};
pub const TWI0_ALT1: TwiPins = TwiPins {
    controller: twi_pair(PortId::A),
    device: twi_pair(PortId::F),
};
pub const TWI0_ALT2: TwiPins = TwiPins {
    controller: twi_pair(PortId::C),
    device: twi_pair(PortId::F),
};

pub const USART0_DEFAULT: UsartPins = usart_group(PortId::A, 0);
pub const USART0_ALT: UsartPins = usart_group(PortId::A, 4);
pub const USART1_DEFAULT: UsartPins = usart_group(PortId::C, 0);
pub const USART1_ALT: UsartPins = usart_group(PortId::C, 4);
pub const USART2_DEFAULT: UsartPins = usart_group(PortId::F, 0);
/// PF7 is UPDI, so there is no XDIR
pub const USART2_ALT: UsartPins = UsartPins {
    xdir: None,
    ..usart_group(PortId::F, 4)
};
pub const USART3_DEFAULT: UsartPins = usart_group(PortId::B, 0);
pub const USART3_ALT: UsartPins = UsartPins {
    txd: pin(PortId::B, 4),
    rxd: pin(PortId::B, 5),
    xck: None,
    xdir: None,
};
