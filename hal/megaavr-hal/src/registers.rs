//! Register block layouts
//!
//! Each block mirrors the datasheet layout byte for byte so a reference to
//! it can be placed on the peripheral's base address. The same blocks can
//! be instantiated in RAM in their reset state, which is how the host tests
//! drive the router and the clock controller.

use vcell::VolatileCell;

use crate::field::Field;

/// Multiplexer register that holds a route field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RouteRegister {
    /// USARTROUTEA (USART0..USART3)
    UsartRouteA,
    /// TWISPIROUTEA (SPI0, TWI0)
    TwiSpiRouteA,
}

/// Location of one peripheral's route field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RouteField {
    pub register: RouteRegister,
    pub field: Field,
}

impl RouteField {
    pub const fn new(register: RouteRegister, field: Field) -> Self {
        Self { register, field }
    }
}

/// PORTMUX register block
#[repr(C)]
pub struct PortmuxRegisters {
    pub evsysroutea: VolatileCell<u8>,
    pub cclroutea: VolatileCell<u8>,
    pub usartroutea: VolatileCell<u8>,
    pub twispiroutea: VolatileCell<u8>,
    pub tcaroutea: VolatileCell<u8>,
    pub tcbroutea: VolatileCell<u8>,
}

impl PortmuxRegisters {
    /// Block in its reset state (every peripheral on its default route)
    pub fn new() -> Self {
        Self {
            evsysroutea: VolatileCell::new(0),
            cclroutea: VolatileCell::new(0),
            usartroutea: VolatileCell::new(0),
            twispiroutea: VolatileCell::new(0),
            tcaroutea: VolatileCell::new(0),
            tcbroutea: VolatileCell::new(0),
        }
    }

    /// Register holding the given route field
    pub fn route_register(&self, register: RouteRegister) -> &VolatileCell<u8> {
        match register {
            RouteRegister::UsartRouteA => &self.usartroutea,
            RouteRegister::TwiSpiRouteA => &self.twispiroutea,
        }
    }
}

impl Default for PortmuxRegisters {
    fn default() -> Self {
        Self::new()
    }
}

/// PORT register block
#[repr(C)]
pub struct PortRegisters {
    pub dir: VolatileCell<u8>,
    pub dirset: VolatileCell<u8>,
    pub dirclr: VolatileCell<u8>,
    pub dirtgl: VolatileCell<u8>,
    pub out: VolatileCell<u8>,
    pub outset: VolatileCell<u8>,
    pub outclr: VolatileCell<u8>,
    pub outtgl: VolatileCell<u8>,
    pub input: VolatileCell<u8>,
    pub intflags: VolatileCell<u8>,
    pub portctrl: VolatileCell<u8>,
    _reserved: [u8; 5],
    pub pinctrl: [VolatileCell<u8>; 8],
}

/// PINnCTRL input/sense configuration
pub const PINCTRL_ISC: Field = Field::new(0, 3);
/// PINnCTRL pull-up enable
pub const PINCTRL_PULLUPEN: Field = Field::bit(3);
/// PINnCTRL inverted I/O enable
pub const PINCTRL_INVEN: Field = Field::bit(7);

impl PortRegisters {
    pub fn new() -> Self {
        Self {
            dir: VolatileCell::new(0),
            dirset: VolatileCell::new(0),
            dirclr: VolatileCell::new(0),
            dirtgl: VolatileCell::new(0),
            out: VolatileCell::new(0),
            outset: VolatileCell::new(0),
            outclr: VolatileCell::new(0),
            outtgl: VolatileCell::new(0),
            input: VolatileCell::new(0),
            intflags: VolatileCell::new(0),
            portctrl: VolatileCell::new(0),
            _reserved: [0; 5],
            pinctrl: [
                VolatileCell::new(0),
                VolatileCell::new(0),
                VolatileCell::new(0),
                VolatileCell::new(0),
                VolatileCell::new(0),
                VolatileCell::new(0),
                VolatileCell::new(0),
                VolatileCell::new(0),
            ],
        }
    }
}

impl Default for PortRegisters {
    fn default() -> Self {
        Self::new()
    }
}

/// VPORT register block (bit-addressable view of a PORT)
#[repr(C)]
pub struct VPortRegisters {
    pub dir: VolatileCell<u8>,
    pub out: VolatileCell<u8>,
    pub input: VolatileCell<u8>,
    pub intflags: VolatileCell<u8>,
}

impl VPortRegisters {
    pub fn new() -> Self {
        Self {
            dir: VolatileCell::new(0),
            out: VolatileCell::new(0),
            input: VolatileCell::new(0),
            intflags: VolatileCell::new(0),
        }
    }
}

impl Default for VPortRegisters {
    fn default() -> Self {
        Self::new()
    }
}

/// CLKCTRL register block
#[repr(C)]
pub struct ClkctrlRegisters {
    pub mclkctrla: VolatileCell<u8>,
    pub mclkctrlb: VolatileCell<u8>,
    pub mclklock: VolatileCell<u8>,
    pub mclkstatus: VolatileCell<u8>,
    _reserved0: [u8; 12],
    pub osc20mctrla: VolatileCell<u8>,
    pub osc20mcaliba: VolatileCell<u8>,
    pub osc20mcalibb: VolatileCell<u8>,
    _reserved1: [u8; 5],
    pub osc32kctrla: VolatileCell<u8>,
    _reserved2: [u8; 3],
    pub xosc32kctrla: VolatileCell<u8>,
}

/// MCLKCTRLB reset value: prescaler enabled, divide by 6
pub const MCLKCTRLB_RESET: u8 = 0x11;

impl ClkctrlRegisters {
    pub fn new() -> Self {
        Self {
            mclkctrla: VolatileCell::new(0),
            mclkctrlb: VolatileCell::new(MCLKCTRLB_RESET),
            mclklock: VolatileCell::new(0),
            mclkstatus: VolatileCell::new(0),
            _reserved0: [0; 12],
            osc20mctrla: VolatileCell::new(0),
            osc20mcaliba: VolatileCell::new(0),
            osc20mcalibb: VolatileCell::new(0),
            _reserved1: [0; 5],
            osc32kctrla: VolatileCell::new(0),
            _reserved2: [0; 3],
            xosc32kctrla: VolatileCell::new(0),
        }
    }
}

impl Default for ClkctrlRegisters {
    fn default() -> Self {
        Self::new()
    }
}
