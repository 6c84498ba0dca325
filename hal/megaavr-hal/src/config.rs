//! Board routing configuration
//!
//! A [`MuxConfig`] lists the route chosen for each multiplexed peripheral a
//! board uses, plus which optional signals it needs. Validating it checks
//! every route against the chip tables and makes sure no two routed signals
//! land on the same pin.

use heapless::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::allocator::PinAllocator;
use crate::chip::{self, Chip};
use crate::error::{require, HalError, HalResult};
use crate::peripheral::{Multiplexed, Peripheral, RouteValue, Spi, SpiRoute, Twi, TwiRoute, Usart, UsartRoute};
use crate::portmux::Portmux;
use crate::spi::SpiSignal;
use crate::twi::TwiRole;
use crate::usart::UsartSignal;

/// Maximum route assignments per config
pub const MAX_ASSIGNMENTS: usize = 8;

/// Route chosen for one peripheral
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RouteAssignment {
    Spi {
        spi: Spi,
        route: SpiRoute,
    },
    Twi {
        twi: Twi,
        route: TwiRoute,
        /// Device pins are used as well (dual mode)
        dual_mode: bool,
    },
    Usart {
        usart: Usart,
        route: UsartRoute,
        /// Synchronous clock pin is used
        xck: bool,
        /// RS-485 direction pin is used
        xdir: bool,
    },
}

impl RouteAssignment {
    /// Peripheral this assignment routes
    pub fn peripheral(&self) -> Peripheral {
        match *self {
            RouteAssignment::Spi { spi, .. } => spi.into(),
            RouteAssignment::Twi { twi, .. } => twi.into(),
            RouteAssignment::Usart { usart, .. } => usart.into(),
        }
    }

    fn check<C: Chip, P: Multiplexed>(peripheral: P, route: P::Route) -> HalResult<bool> {
        chip::ensure_present::<C>(peripheral)?;
        peripheral.supports::<C>(route)?;
        Ok(route.is_connected())
    }

    /// Check the route and claim every pin it uses
    fn claim<C: Chip>(&self, allocator: &mut PinAllocator) -> HalResult<()> {
        match *self {
            RouteAssignment::Spi { spi, route } => {
                if Self::check::<C, _>(spi, route)? {
                    let pins = crate::spi::pins::<C>(spi, route)?;
                    for signal in SpiSignal::ALL {
                        allocator.claim(pins.get(signal))?;
                    }
                }
            }
            RouteAssignment::Twi { twi, route, dual_mode } => {
                if Self::check::<C, _>(twi, route)? {
                    let pins = crate::twi::pins::<C>(twi, route)?;
                    let roles: &[TwiRole] = if dual_mode { &TwiRole::ALL } else { &[TwiRole::Controller] };
                    for &role in roles {
                        let pair = pins.pair(role);
                        allocator.claim(pair.sda)?;
                        allocator.claim(pair.scl)?;
                    }
                }
            }
            RouteAssignment::Usart { usart, route, xck, xdir } => {
                if Self::check::<C, _>(usart, route)? {
                    let pins = crate::usart::pins::<C>(usart, route)?;
                    allocator.claim(pins.txd)?;
                    allocator.claim(pins.rxd)?;
                    if xck {
                        allocator.claim(pins.get(UsartSignal::Xck)?)?;
                    }
                    if xdir {
                        allocator.claim(pins.get(UsartSignal::Xdir)?)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn apply<C: Chip>(&self, portmux: &mut Portmux<'_, C>) -> HalResult<()> {
        match *self {
            RouteAssignment::Spi { spi, route } => portmux.set_route(spi, route),
            RouteAssignment::Twi { twi, route, .. } => portmux.set_route(twi, route),
            RouteAssignment::Usart { usart, route, .. } => portmux.set_route(usart, route),
        }
    }
}

/// Routing configuration for a board
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MuxConfig {
    assignments: Vec<RouteAssignment, MAX_ASSIGNMENTS>,
}

impl MuxConfig {
    /// Create an empty config
    pub const fn new() -> Self {
        Self { assignments: Vec::new() }
    }

    /// Add an assignment
    pub fn push(&mut self, assignment: RouteAssignment) -> HalResult<()> {
        self.assignments
            .push(assignment)
            .map_err(|_| HalError::TooManyAssignments)
    }

    /// Builder form of [`MuxConfig::push`]
    pub fn with(mut self, assignment: RouteAssignment) -> HalResult<Self> {
        self.push(assignment)?;
        Ok(self)
    }

    /// Assignments in insertion order
    pub fn assignments(&self) -> &[RouteAssignment] {
        &self.assignments
    }

    /// Check every assignment against chip `C`
    ///
    /// Returns the allocator holding every pin the config routes.
    pub fn validate<C: Chip>(&self) -> HalResult<PinAllocator> {
        let mut allocator = PinAllocator::new();

        for (i, assignment) in self.assignments.iter().enumerate() {
            let peripheral = assignment.peripheral();
            require(
                !self.assignments[..i].iter().any(|a| a.peripheral() == peripheral),
                HalError::DuplicateAssignment,
            )?;
            assignment.claim::<C>(&mut allocator)?;
        }

        Ok(allocator)
    }

    /// Validate, then write every route
    ///
    /// Nothing is written if validation fails.
    pub fn apply<C: Chip>(&self, portmux: &mut Portmux<'_, C>) -> HalResult<PinAllocator> {
        let allocator = self.validate::<C>()?;
        for assignment in &self.assignments {
            assignment.apply(portmux)?;
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("portmux: applied {} routes", self.assignments.len());

        Ok(allocator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chip::test_chip::TestChip;
    use crate::port::{PinLocation, PortId};
    use crate::registers::PortmuxRegisters;

    fn usart(usart: Usart, route: UsartRoute) -> RouteAssignment {
        RouteAssignment::Usart {
            usart,
            route,
            xck: false,
            xdir: false,
        }
    }

    #[test]
    fn test_validate_claims_routed_pins() {
        let config = MuxConfig::new()
            .with(RouteAssignment::Spi { spi: Spi::Spi0, route: SpiRoute::Alt1 })
            .unwrap()
            .with(usart(Usart::Usart0, UsartRoute::Default))
            .unwrap();

        let alloc = config.validate::<TestChip>().unwrap();
        assert_eq!(alloc.claimed_mask(PortId::C), 0b0000_1111);
        assert_eq!(alloc.claimed_mask(PortId::A), 0b0000_0011);
    }

    #[test]
    fn test_pin_conflict_detected() {
        // USART0 ALT sits on PA4/PA5, same as SPI0 DEFAULT MOSI/MISO
        let config = MuxConfig::new()
            .with(RouteAssignment::Spi { spi: Spi::Spi0, route: SpiRoute::Default })
            .unwrap()
            .with(usart(Usart::Usart0, UsartRoute::Alt))
            .unwrap();

        assert_eq!(
            config.validate::<TestChip>().err(),
            Some(HalError::PinConflict(PinLocation::new(PortId::A, 4)))
        );
    }

    #[test]
    fn test_twi_dual_mode_claims_device_pair() {
        let single = MuxConfig::new()
            .with(RouteAssignment::Twi { twi: Twi::Twi0, route: TwiRoute::Default, dual_mode: false })
            .unwrap();
        let alloc = single.validate::<TestChip>().unwrap();
        assert_eq!(alloc.claimed_mask(PortId::C), 0);

        // Dual mode device pins collide with USART1 XCK/XDIR on PC2/PC3
        let dual = MuxConfig::new()
            .with(RouteAssignment::Twi { twi: Twi::Twi0, route: TwiRoute::Default, dual_mode: true })
            .unwrap()
            .with(RouteAssignment::Usart { usart: Usart::Usart1, route: UsartRoute::Default, xck: true, xdir: false })
            .unwrap();
        assert_eq!(
            dual.validate::<TestChip>().err(),
            Some(HalError::PinConflict(PinLocation::new(PortId::C, 2)))
        );
    }

    #[test]
    fn test_disconnected_claims_nothing() {
        let config = MuxConfig::new()
            .with(RouteAssignment::Spi { spi: Spi::Spi0, route: SpiRoute::None })
            .unwrap();
        assert_eq!(config.validate::<TestChip>().unwrap().count(), 0);
    }

    #[test]
    fn test_rejections() {
        let absent = MuxConfig::new().with(usart(Usart::Usart3, UsartRoute::Default)).unwrap();
        assert_eq!(absent.validate::<TestChip>().err(), Some(HalError::UnknownPeripheral));

        let unwired = MuxConfig::new().with(usart(Usart::Usart1, UsartRoute::Alt)).unwrap();
        assert_eq!(unwired.validate::<TestChip>().err(), Some(HalError::UnsupportedRoute));

        let duplicate = MuxConfig::new()
            .with(usart(Usart::Usart0, UsartRoute::Default))
            .unwrap()
            .with(usart(Usart::Usart0, UsartRoute::None))
            .unwrap();
        assert_eq!(duplicate.validate::<TestChip>().err(), Some(HalError::DuplicateAssignment));

        let missing_xdir = MuxConfig::new()
            .with(RouteAssignment::Usart { usart: Usart::Usart0, route: UsartRoute::Alt, xck: false, xdir: true })
            .unwrap();
        assert_eq!(missing_xdir.validate::<TestChip>().err(), Some(HalError::SignalNotRouted));
    }

    #[test]
    fn test_capacity() {
        let mut config = MuxConfig::new();
        for _ in 0..MAX_ASSIGNMENTS {
            config.push(usart(Usart::Usart0, UsartRoute::None)).unwrap();
        }
        assert_eq!(config.push(usart(Usart::Usart0, UsartRoute::None)), Err(HalError::TooManyAssignments));
    }

    #[test]
    fn test_apply_writes_routes() {
        let regs = PortmuxRegisters::new();
        let mut mux = Portmux::<TestChip>::new(&regs);
        let config = MuxConfig::new()
            .with(RouteAssignment::Twi { twi: Twi::Twi0, route: TwiRoute::Alt2, dual_mode: false })
            .unwrap()
            .with(usart(Usart::Usart1, UsartRoute::None))
            .unwrap();

        config.apply(&mut mux).unwrap();
        assert_eq!(mux.route(Twi::Twi0), Ok(TwiRoute::Alt2));
        assert_eq!(mux.route(Usart::Usart1), Ok(UsartRoute::None));
    }

    #[test]
    fn test_apply_is_all_or_nothing() {
        let regs = PortmuxRegisters::new();
        let mut mux = Portmux::<TestChip>::new(&regs);
        let config = MuxConfig::new()
            .with(RouteAssignment::Spi { spi: Spi::Spi0, route: SpiRoute::Alt1 })
            .unwrap()
            .with(usart(Usart::Usart1, UsartRoute::Alt))
            .unwrap();

        assert_eq!(config.apply(&mut mux).err(), Some(HalError::UnsupportedRoute));
        assert_eq!(regs.twispiroutea.get(), 0);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_postcard_roundtrip() {
        let config = MuxConfig::new()
            .with(RouteAssignment::Usart { usart: Usart::Usart0, route: UsartRoute::Alt, xck: true, xdir: false })
            .unwrap()
            .with(RouteAssignment::Twi { twi: Twi::Twi0, route: TwiRoute::Alt1, dual_mode: true })
            .unwrap();

        let mut buf = [0u8; 64];
        let bytes = postcard::to_slice(&config, &mut buf).unwrap();
        let decoded: MuxConfig = postcard::from_bytes(bytes).unwrap();
        assert_eq!(decoded, config);
    }
}
