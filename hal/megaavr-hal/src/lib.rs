//! megaAVR 0-series Hardware Abstraction Layer
//!
//! This crate resolves which physical pins carry the signals of the SPI,
//! TWI and USART peripherals, given the route selected in the port
//! multiplexer (PORTMUX), and reads and writes those routes in hardware.
//! Chip-specific crates supply the pin tables by implementing [`Chip`].
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application / board support            │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  megaavr-hal (this crate - router)      │
//! │  portmux, spi, twi, usart, config       │
//! └─────────────────────────────────────────┘
//!                     │ Chip trait
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  megaavr-hal-atmega480x                 │
//! │  ATmega4809 / ATmega4808 tables         │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`portmux::Portmux`] - Route register get/set
//! - [`spi`], [`twi`], [`usart`] - Pin tables and derived accessors
//! - [`chip`] - Chip variant description and peripheral identity
//! - [`config::MuxConfig`] - Board routing with pin conflict checks
//! - [`clkctrl::Clkctrl`] - Main clock control
//! - [`gpio::Pin`] - Digital I/O on resolved pins
//!
//! Register blocks are plain `#[repr(C)]` structs of volatile cells, so
//! everything in this crate runs against RAM copies on the host.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

pub mod allocator;
pub mod chip;
pub mod clkctrl;
pub mod config;
pub mod error;
pub mod field;
pub mod gpio;
pub mod peripheral;
pub mod port;
pub mod portmux;
pub mod registers;
pub mod spi;
pub mod twi;
pub mod usart;

// Re-export key types at crate root for convenience
pub use allocator::PinAllocator;
pub use chip::Chip;
pub use clkctrl::{Clkctrl, ClockConfig, ClockSource, ClockStatus, Oscillator, Prescaler};
pub use config::{MuxConfig, RouteAssignment};
pub use error::{halt, require, ErrorClass, HalError, HalResult, OrHalt};
pub use gpio::Pin;
pub use peripheral::{Multiplexed, Peripheral, RouteValue, Spi, SpiRoute, Twi, TwiRoute, Usart, UsartRoute};
pub use port::{PinLocation, PortBank, PortId};
pub use portmux::Portmux;
pub use spi::{SpiPins, SpiSignal};
pub use twi::{TwiPair, TwiPins, TwiRole, TwiSignal};
pub use usart::{UsartPins, UsartSignal};
pub use vcell::VolatileCell;
