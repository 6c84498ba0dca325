//! Pin ownership tracking
//!
//! Routing two peripherals onto the same physical pin is legal as far as
//! the multiplexer is concerned, but one of them will not work. The
//! allocator records which pins a configuration has handed out.

use crate::error::{HalError, HalResult};
use crate::port::{PinLocation, PortId, PORT_COUNT};

/// Pin allocator, one bitmask per port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinAllocator {
    allocated: [u8; PORT_COUNT],
}

impl PinAllocator {
    /// Create an allocator with every pin free
    pub const fn new() -> Self {
        Self {
            allocated: [0; PORT_COUNT],
        }
    }

    /// Claim a pin
    pub fn claim(&mut self, pin: PinLocation) -> HalResult<()> {
        let slot = &mut self.allocated[pin.port().index()];
        if *slot & pin.mask() != 0 {
            return Err(HalError::PinConflict(pin));
        }
        *slot |= pin.mask();
        Ok(())
    }

    /// Release a pin
    pub fn release(&mut self, pin: PinLocation) {
        self.allocated[pin.port().index()] &= !pin.mask();
    }

    /// Check if a pin is claimed
    pub fn is_claimed(&self, pin: PinLocation) -> bool {
        self.allocated[pin.port().index()] & pin.mask() != 0
    }

    /// Claimed pins of one port as a bitmask
    pub fn claimed_mask(&self, port: PortId) -> u8 {
        self.allocated[port.index()]
    }

    /// Number of claimed pins
    pub fn count(&self) -> u32 {
        self.allocated.iter().map(|mask| mask.count_ones()).sum()
    }
}
