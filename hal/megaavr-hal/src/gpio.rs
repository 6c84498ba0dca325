//! GPIO pins on resolved locations
//!
//! A [`Pin`] is normally obtained from [`crate::port::PortBank::pin`] with a
//! location returned by the router, e.g. to drive SS by hand or to enable
//! the pull-ups on a TWI pair. Level and direction go through the VPORT
//! view; pin configuration lives in the PORT block's PINnCTRL registers.
//!
//! Level and direction changes are read-modify-write on the VPORT
//! registers. Pins of the same port touched from interrupt context need
//! external serialization.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin, StatefulOutputPin};

use crate::port::PinLocation;
use crate::registers::{PortRegisters, VPortRegisters, PINCTRL_INVEN, PINCTRL_PULLUPEN};

/// A single GPIO pin
pub struct Pin<'a> {
    port: &'a PortRegisters,
    vport: &'a VPortRegisters,
    location: PinLocation,
}

impl<'a> Pin<'a> {
    /// Create a pin from its two register views
    pub fn new(port: &'a PortRegisters, vport: &'a VPortRegisters, location: PinLocation) -> Self {
        Self { port, vport, location }
    }

    /// Location of this pin
    pub fn location(&self) -> PinLocation {
        self.location
    }

    fn mask(&self) -> u8 {
        self.location.mask()
    }

    /// Configure as output
    pub fn into_output(self) -> Self {
        self.vport.dir.set(self.vport.dir.get() | self.mask());
        self
    }

    /// Configure as input
    pub fn into_input(self) -> Self {
        self.vport.dir.set(self.vport.dir.get() & !self.mask());
        self
    }

    /// Check if the pin drives its output
    pub fn is_output(&self) -> bool {
        self.vport.dir.get() & self.mask() != 0
    }

    fn pinctrl_update(&self, f: impl FnOnce(u8) -> u8) {
        let reg = &self.port.pinctrl[self.location.number() as usize];
        reg.set(f(reg.get()));
    }

    /// Enable or disable the internal pull-up
    pub fn set_pull_up(&mut self, enabled: bool) {
        self.pinctrl_update(|v| PINCTRL_PULLUPEN.insert(v, enabled as u8));
    }

    /// Invert input and output levels in hardware
    pub fn set_inverted(&mut self, inverted: bool) {
        self.pinctrl_update(|v| PINCTRL_INVEN.insert(v, inverted as u8));
    }

    /// Check if the internal pull-up is enabled
    pub fn is_pull_up(&self) -> bool {
        PINCTRL_PULLUPEN.extract(self.port.pinctrl[self.location.number() as usize].get()) != 0
    }
}

impl ErrorType for Pin<'_> {
    type Error = Infallible;
}

impl OutputPin for Pin<'_> {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.vport.out.set(self.vport.out.get() & !self.mask());
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.vport.out.set(self.vport.out.get() | self.mask());
        Ok(())
    }
}

impl StatefulOutputPin for Pin<'_> {
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.vport.out.get() & self.mask() != 0)
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        self.is_set_high().map(|high| !high)
    }
}

impl InputPin for Pin<'_> {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.vport.input.get() & self.mask() != 0)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}
