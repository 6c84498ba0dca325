//! Process-wide handle to the routing and clock registers
//!
//! The register blocks exist for the lifetime of the program and are never
//! constructed in software. [`Peripherals::take`] hands them out once; after
//! that, the only way to reach them is through the returned handle.

use core::cell::Cell;

use critical_section::Mutex;
use megaavr_hal::chip::Chip;
use megaavr_hal::registers::{ClkctrlRegisters, PortmuxRegisters};
use megaavr_hal::{Clkctrl, ClockConfig, PortBank, Portmux, VolatileCell};

static TAKEN: Mutex<Cell<bool>> = Mutex::new(Cell::new(false));

/// Mark the hardware handle as taken, returning `false` if it already was
#[cfg_attr(not(target_arch = "avr"), allow(dead_code))]
pub(crate) fn claim() -> bool {
    critical_section::with(|cs| !TAKEN.borrow(cs).replace(true))
}

/// Routing, clock and port access for chip `C`
pub struct Peripherals<'a, C: Chip> {
    pub portmux: Portmux<'a, C>,
    pub clkctrl: Clkctrl<'a>,
    pub ports: PortBank<'a>,
}

impl<'a, C: Chip> Peripherals<'a, C> {
    /// Build the handle from register blocks at any location
    pub fn new(
        portmux: &'a PortmuxRegisters,
        clkctrl: &'a ClkctrlRegisters,
        ccp: &'a VolatileCell<u8>,
        ports: PortBank<'a>,
        config: ClockConfig,
    ) -> Self {
        Self {
            portmux: Portmux::new(portmux),
            clkctrl: Clkctrl::new(clkctrl, ccp, config),
            ports,
        }
    }
}

#[cfg(target_arch = "avr")]
impl<C: Chip> Peripherals<'static, C> {
    /// Take the hardware registers, once
    pub fn take(config: ClockConfig) -> Option<Self> {
        if !claim() {
            return None;
        }
        // SAFETY: first and only handle, guarded by `TAKEN`
        Some(unsafe { Self::steal(config) })
    }

    /// Create a handle without checking whether one exists
    ///
    /// # Safety
    ///
    /// Aliasing handles can interleave read-modify-write sequences on the
    /// same register.
    pub unsafe fn steal(config: ClockConfig) -> Self {
        use megaavr_hal::registers::{PortRegisters, VPortRegisters};

        unsafe fn at<T>(address: u16) -> &'static T {
            &*(address as usize as *const T)
        }

        let mut ports = PortBank::new();
        for &port in C::PORTS {
            let regs: &'static PortRegisters = at(C::port_address(port));
            let vregs: &'static VPortRegisters = at(C::vport_address(port));
            ports = ports.with_port(port, regs, vregs);
        }

        Self::new(at(C::PORTMUX_ADDRESS), at(C::CLKCTRL_ADDRESS), at(C::CCP_ADDRESS), ports, config)
    }
}
