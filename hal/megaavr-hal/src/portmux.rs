//! Port multiplexer route register access
//!
//! Several peripherals share one multiplexer register, each owning a small
//! field in it. [`Portmux::set_route`] is a plain read-modify-write of that
//! register: it keeps every other field intact, but it is not atomic. If
//! the same register is also written from interrupt context, use
//! [`Portmux::set_route_critical`] or serialize the callers some other way.

use core::marker::PhantomData;

use vcell::VolatileCell;

use crate::chip::{self, Chip};
use crate::error::HalResult;
use crate::peripheral::{Multiplexed, RouteValue, Spi, Twi, Usart};
use crate::port::PinLocation;
use crate::registers::{PortmuxRegisters, RouteField};
use crate::spi::{SpiPins, SpiSignal};
use crate::twi::{TwiPins, TwiRole, TwiSignal};
use crate::usart::{UsartPins, UsartSignal};

/// Route register accessor for chip variant `C`
pub struct Portmux<'a, C: Chip> {
    regs: &'a PortmuxRegisters,
    _chip: PhantomData<C>,
}

impl<'a, C: Chip> Portmux<'a, C> {
    /// Wrap the PORTMUX register block
    pub fn new(regs: &'a PortmuxRegisters) -> Self {
        Self {
            regs,
            _chip: PhantomData,
        }
    }

    /// Underlying register block
    pub fn registers(&self) -> &'a PortmuxRegisters {
        self.regs
    }

    fn field_register(&self, field: RouteField) -> &'a VolatileCell<u8> {
        self.regs.route_register(field.register)
    }

    /// Route currently selected for a peripheral
    pub fn route<P: Multiplexed>(&self, peripheral: P) -> HalResult<P::Route> {
        let field = chip::route_field::<C>(peripheral)?;
        let bits = field.field.extract(self.field_register(field).get());
        P::Route::from_bits(bits)
    }

    /// Check if a peripheral is connected to any pins
    pub fn is_routed<P: Multiplexed>(&self, peripheral: P) -> HalResult<bool> {
        self.route(peripheral).map(RouteValue::is_connected)
    }

    /// Select a route for a peripheral
    ///
    /// Only this peripheral's field changes. Routes the chip does not wire
    /// out for this peripheral are rejected before the register is touched.
    pub fn set_route<P: Multiplexed>(&mut self, peripheral: P, route: P::Route) -> HalResult<()> {
        let field = chip::route_field::<C>(peripheral)?;
        peripheral.supports::<C>(route)?;

        let reg = self.field_register(field);
        let value = field.field.insert(reg.get(), route.bits());
        reg.set(value);

        #[cfg(feature = "defmt")]
        {
            let target: crate::peripheral::Peripheral = peripheral.into();
            defmt::debug!("portmux: {} -> {} ({=u8:#04x})", target, defmt::Debug2Format(&route), value);
        }

        Ok(())
    }

    /// [`Portmux::set_route`] inside a critical section
    pub fn set_route_critical<P: Multiplexed>(&mut self, peripheral: P, route: P::Route) -> HalResult<()> {
        critical_section::with(|_| self.set_route(peripheral, route))
    }

    /// Disconnect a peripheral from all pins
    pub fn disconnect<P: Multiplexed>(&mut self, peripheral: P) -> HalResult<()> {
        self.set_route(peripheral, P::Route::NONE)
    }

    /// SPI pins on the current route
    pub fn spi_pins(&self, spi: Spi) -> HalResult<SpiPins> {
        crate::spi::pins::<C>(spi, self.route(spi)?)
    }

    /// SPI signal pin on the current route
    pub fn spi_pin(&self, spi: Spi, signal: SpiSignal) -> HalResult<PinLocation> {
        crate::spi::pin::<C>(spi, self.route(spi)?, signal)
    }

    /// SPI signal mask on the current route
    pub fn spi_pin_mask(&self, spi: Spi, signal: SpiSignal) -> HalResult<u8> {
        crate::spi::pin_mask::<C>(spi, self.route(spi)?, signal)
    }

    /// TWI pins on the current route
    pub fn twi_pins(&self, twi: Twi) -> HalResult<TwiPins> {
        crate::twi::pins::<C>(twi, self.route(twi)?)
    }

    /// TWI signal pin on the current route
    pub fn twi_pin(&self, twi: Twi, role: TwiRole, signal: TwiSignal) -> HalResult<PinLocation> {
        crate::twi::pin::<C>(twi, self.route(twi)?, role, signal)
    }

    /// TWI signal mask on the current route
    pub fn twi_pin_mask(&self, twi: Twi, role: TwiRole, signal: TwiSignal) -> HalResult<u8> {
        crate::twi::pin_mask::<C>(twi, self.route(twi)?, role, signal)
    }

    /// USART pins on the current route
    pub fn usart_pins(&self, usart: Usart) -> HalResult<UsartPins> {
        crate::usart::pins::<C>(usart, self.route(usart)?)
    }

    /// USART signal pin on the current route
    pub fn usart_pin(&self, usart: Usart, signal: UsartSignal) -> HalResult<PinLocation> {
        crate::usart::pin::<C>(usart, self.route(usart)?, signal)
    }

    /// USART signal mask on the current route
    pub fn usart_pin_mask(&self, usart: Usart, signal: UsartSignal) -> HalResult<u8> {
        crate::usart::pin_mask::<C>(usart, self.route(usart)?, signal)
    }

    current_pin_aliases! {
        spi, spi: Spi;
        sck, sck_number, sck_mask;
        mosi, mosi_number, mosi_mask;
        miso, miso_number, miso_mask;
        ss, ss_number, ss_mask;
    }

    current_pin_aliases! {
        twi, twi: Twi;
        controller_scl, controller_scl_number, controller_scl_mask;
        controller_sda, controller_sda_number, controller_sda_mask;
        device_scl, device_scl_number, device_scl_mask;
        device_sda, device_sda_number, device_sda_mask;
        scl, scl_number, scl_mask;
        sda, sda_number, sda_mask;
    }

    current_pin_aliases! {
        usart, usart: Usart;
        txd, txd_number, txd_mask;
        rxd, rxd_number, rxd_mask;
        xck, xck_number, xck_mask;
        xdir, xdir_number, xdir_mask;
    }
}
