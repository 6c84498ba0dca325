//! ATmega480x support for megaavr-hal
//!
//! Pin tables, register addresses and multiplexer field positions for the
//! ATmega4809 (48-pin) and ATmega4808 (32-pin). Both variants are always
//! compiled; the chip feature selects [`Selected`] and the hardware handle
//! used by the firmware.
//!
//! # Features
//!
//! - `atmega4809` - Target the 48-pin ATmega4809
//! - `atmega4808` - Target the 32-pin ATmega4808
//! - `defmt` - Enable debug formatting support
//! - `serde` - Serialize routing configurations
//!
//! # Usage
//!
//! ```ignore
//! let mut p = Peripherals::<Selected>::take(ClockConfig::default()).unwrap();
//! p.portmux.set_route(Spi::Spi0, SpiRoute::Alt1)?;
//! let mut ss = p.ports.pin(p.portmux.ss(Spi::Spi0)?)?.into_output();
//! ```

#![no_std]

#[cfg(all(feature = "atmega4809", feature = "atmega4808"))]
compile_error!("features `atmega4809` and `atmega4808` are mutually exclusive");

#[cfg(test)]
extern crate std;

mod atmega4808;
mod atmega4809;
pub mod memory_map;
pub mod peripherals;
pub mod pinout;

pub use atmega4808::Atmega4808;
pub use atmega4809::Atmega4809;
pub use peripherals::Peripherals;

// Re-export the router for convenience
pub use megaavr_hal;

/// Chip variant chosen by feature
#[cfg(feature = "atmega4809")]
pub type Selected = Atmega4809;

/// Chip variant chosen by feature
#[cfg(feature = "atmega4808")]
pub type Selected = Atmega4808;

#[cfg(test)]
mod tests {
    use megaavr_hal::chip::{self, Chip};
    use megaavr_hal::peripheral::RouteValue;
    use megaavr_hal::registers::PortmuxRegisters;
    use megaavr_hal::spi::SpiSignal;
    use megaavr_hal::twi::{TwiRole, TwiSignal};
    use megaavr_hal::usart::UsartSignal;
    use megaavr_hal::{spi, twi, usart, HalError, Portmux, Spi, SpiRoute, Twi, TwiRoute, Usart, UsartRoute};
    use proptest::prelude::*;

    use super::*;

    const USARTS: &[Usart] = &[Usart::Usart0, Usart::Usart1, Usart::Usart2, Usart::Usart3];

    fn any_usart() -> impl Strategy<Value = Usart> {
        proptest::sample::select(USARTS)
    }

    fn any_spi_route() -> impl Strategy<Value = SpiRoute> {
        proptest::sample::select(SpiRoute::ALL)
    }

    fn any_twi_route() -> impl Strategy<Value = TwiRoute> {
        proptest::sample::select(TwiRoute::ALL)
    }

    fn any_usart_route() -> impl Strategy<Value = UsartRoute> {
        proptest::sample::select(UsartRoute::ALL)
    }

    /// Every signal of every supported route resolves to a pin on a
    /// present port, with a one-hot mask
    fn check_totality<C: Chip>() {
        for &route in SpiRoute::ALL {
            if route.is_connected() && spi::supports::<C>(Spi::Spi0, route).is_ok() {
                for signal in SpiSignal::ALL {
                    let pin = spi::pin::<C>(Spi::Spi0, route, signal).unwrap();
                    assert!(chip::has_port::<C>(pin.port()));
                    assert!(pin.number() <= 7);
                    assert_eq!(spi::pin_mask::<C>(Spi::Spi0, route, signal), Ok(1 << pin.number()));
                }
            }
        }
        for &route in TwiRoute::ALL {
            if route.is_connected() && twi::supports::<C>(Twi::Twi0, route).is_ok() {
                for role in TwiRole::ALL {
                    for signal in TwiSignal::ALL {
                        let pin = twi::pin::<C>(Twi::Twi0, route, role, signal).unwrap();
                        assert!(chip::has_port::<C>(pin.port()));
                        assert_eq!(twi::pin_mask::<C>(Twi::Twi0, route, role, signal), Ok(pin.mask()));
                    }
                }
            }
        }
        for &usart in USARTS {
            for &route in UsartRoute::ALL {
                if route.is_connected() && usart::supports::<C>(usart, route).is_ok() {
                    for signal in UsartSignal::ALL {
                        match usart::pin::<C>(usart, route, signal) {
                            Ok(pin) => {
                                assert!(chip::has_port::<C>(pin.port()));
                                assert_eq!(usart::pin_number::<C>(usart, route, signal), Ok(pin.number()));
                                assert_eq!(usart::pin_mask::<C>(usart, route, signal), Ok(pin.mask()));
                            }
                            Err(err) => {
                                assert_eq!(err, HalError::SignalNotRouted);
                                assert!(matches!(signal, UsartSignal::Xck | UsartSignal::Xdir));
                            }
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_totality_atmega4809() {
        check_totality::<Atmega4809>();
    }

    #[test]
    fn test_totality_atmega4808() {
        check_totality::<Atmega4808>();
    }

    #[test]
    fn test_peripheral_addresses_identify() {
        for &peripheral in Atmega4809::PERIPHERALS {
            let address = Atmega4809::base_address(peripheral);
            assert_eq!(chip::identify::<Atmega4809>(address), Ok(peripheral));
        }
        for &port in Atmega4808::PORTS {
            assert_eq!(chip::identify_port::<Atmega4808>(Atmega4808::port_address(port)), Ok(port));
            assert_eq!(chip::identify_port::<Atmega4808>(Atmega4808::vport_address(port)), Ok(port));
        }
    }

    proptest! {
        #[test]
        fn test_route_roundtrip_keeps_neighbours(
            a in any_usart(),
            b in any_usart(),
            route_a in any_usart_route(),
            route_b in any_usart_route(),
        ) {
            prop_assume!(a != b);
            prop_assume!(usart::supports::<Atmega4809>(a, route_a).is_ok());
            prop_assume!(usart::supports::<Atmega4809>(b, route_b).is_ok());

            let regs = PortmuxRegisters::new();
            let mut mux = Portmux::<Atmega4809>::new(&regs);
            mux.set_route(a, route_a).unwrap();
            mux.set_route(b, route_b).unwrap();

            prop_assert_eq!(mux.route(a), Ok(route_a));
            prop_assert_eq!(mux.route(b), Ok(route_b));
        }

        #[test]
        fn test_spi_twi_share_register(spi_route in any_spi_route(), twi_route in any_twi_route(), noise: u8) {
            let regs = PortmuxRegisters::new();
            regs.twispiroutea.set(noise);
            let mut mux = Portmux::<Atmega4809>::new(&regs);

            mux.set_route(Twi::Twi0, twi_route).unwrap();
            mux.set_route(Spi::Spi0, spi_route).unwrap();

            prop_assert_eq!(mux.route(Twi::Twi0), Ok(twi_route));
            prop_assert_eq!(mux.route(Spi::Spi0), Ok(spi_route));
            // Bits outside both fields untouched
            prop_assert_eq!(regs.twispiroutea.get() & 0b1100_1100, noise & 0b1100_1100);
        }

        #[test]
        fn test_current_route_matches_explicit(usart in any_usart(), route in any_usart_route()) {
            prop_assume!(usart::supports::<Atmega4809>(usart, route).is_ok());

            let regs = PortmuxRegisters::new();
            let mut mux = Portmux::<Atmega4809>::new(&regs);
            mux.set_route(usart, route).unwrap();

            for signal in UsartSignal::ALL {
                prop_assert_eq!(mux.usart_pin(usart, signal), usart::pin::<Atmega4809>(usart, route, signal));
            }
            prop_assert_eq!(mux.txd(usart), usart::txd::<Atmega4809>(usart, route));
            prop_assert_eq!(mux.xdir_mask(usart), usart::xdir_mask::<Atmega4809>(usart, route));
        }

        #[test]
        fn test_current_twi_route_matches_explicit(route in any_twi_route()) {
            let regs = PortmuxRegisters::new();
            let mut mux = Portmux::<Atmega4809>::new(&regs);
            mux.set_route(Twi::Twi0, route).unwrap();

            for role in TwiRole::ALL {
                for signal in TwiSignal::ALL {
                    prop_assert_eq!(
                        mux.twi_pin(Twi::Twi0, role, signal),
                        twi::pin::<Atmega4809>(Twi::Twi0, route, role, signal)
                    );
                }
            }
            prop_assert_eq!(mux.device_scl(Twi::Twi0), twi::device_scl::<Atmega4809>(Twi::Twi0, route));
        }

        #[test]
        fn test_aliases_match_raw_lookup(usart in any_usart(), route in any_usart_route()) {
            prop_assert_eq!(
                usart::xck::<Atmega4809>(usart, route),
                usart::pin::<Atmega4809>(usart, route, UsartSignal::Xck)
            );
            prop_assert_eq!(
                usart::rxd_number::<Atmega4809>(usart, route),
                usart::pin_number::<Atmega4809>(usart, route, UsartSignal::Rxd)
            );
        }

        #[test]
        fn test_none_route_never_resolves(usart in any_usart()) {
            for signal in UsartSignal::ALL {
                prop_assert_eq!(
                    usart::pin::<Atmega4809>(usart, UsartRoute::None, signal),
                    Err(HalError::Disconnected)
                );
            }
            for signal in SpiSignal::ALL {
                prop_assert!(spi::pin::<Atmega4808>(Spi::Spi0, SpiRoute::None, signal).is_err());
            }
        }

        #[test]
        fn test_unknown_addresses_rejected(address: u16) {
            let known = Atmega4809::PERIPHERALS
                .iter()
                .any(|&p| Atmega4809::base_address(p) == address);
            prop_assume!(!known);
            prop_assert_eq!(chip::identify::<Atmega4809>(address), Err(HalError::UnknownPeripheral));
        }
    }
}
