//! Common error types for HAL operations
//!
//! Every lookup either resolves completely or fails with one of these
//! errors. Nothing in this crate falls back to a default route or pin.

use core::fmt;

use crate::port::PinLocation;

/// HAL operation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HalError {
    /// Peripheral instance is not present on the active chip variant
    UnknownPeripheral,
    /// Port is not present on the active chip variant
    UnknownPort,
    /// Route is not wired out for this peripheral on this chip variant
    UnsupportedRoute,
    /// Peripheral is routed to `NONE`, so it has no pins
    Disconnected,
    /// Signal has no pin on the requested route
    SignalNotRouted,
    /// Register field holds a reserved bit pattern
    ReservedValue(u8),
    /// Pin number outside 0..=7 or malformed pin name
    InvalidPin,
    /// Two routed signals claim the same physical pin
    PinConflict(PinLocation),
    /// The same peripheral appears twice in a routing configuration
    DuplicateAssignment,
    /// Routing configuration is full
    TooManyAssignments,
    /// Clock controller registers are locked until the next reset
    Locked,
}

/// How an error should be treated by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ErrorClass {
    /// Caller passed something the chip does not know about
    InvalidArgument,
    /// Programming error; continuing could drive the wrong pin
    Fatal,
}

impl HalError {
    /// Classify this error
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::UnsupportedRoute
            | Self::Disconnected
            | Self::SignalNotRouted
            | Self::ReservedValue(_) => ErrorClass::Fatal,
            Self::UnknownPeripheral
            | Self::UnknownPort
            | Self::InvalidPin
            | Self::PinConflict(_)
            | Self::DuplicateAssignment
            | Self::TooManyAssignments
            | Self::Locked => ErrorClass::InvalidArgument,
        }
    }

    /// Check if this error must stop the system
    pub const fn is_fatal(&self) -> bool {
        matches!(self.class(), ErrorClass::Fatal)
    }
}

impl fmt::Display for HalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownPeripheral => write!(f, "unknown peripheral"),
            Self::UnknownPort => write!(f, "unknown port"),
            Self::UnsupportedRoute => write!(f, "route not supported on this chip"),
            Self::Disconnected => write!(f, "peripheral is not routed to any pins"),
            Self::SignalNotRouted => write!(f, "signal has no pin on this route"),
            Self::ReservedValue(bits) => write!(f, "reserved register value: {:#04x}", bits),
            Self::InvalidPin => write!(f, "invalid pin"),
            Self::PinConflict(pin) => write!(f, "pin {} claimed twice", pin),
            Self::DuplicateAssignment => write!(f, "peripheral assigned twice"),
            Self::TooManyAssignments => write!(f, "too many route assignments"),
            Self::Locked => write!(f, "clock controller locked"),
        }
    }
}

/// Result type for HAL operations
pub type HalResult<T> = Result<T, HalError>;

/// Precondition check
///
/// Returns `err` when `condition` is false.
#[inline]
pub fn require(condition: bool, err: HalError) -> HalResult<()> {
    if condition {
        Ok(())
    } else {
        Err(err)
    }
}

/// Stop execution on an error that cannot be propagated
///
/// On the target this ends in the panic handler, which halts or resets
/// the chip. Use it where a `Result` cannot be returned.
#[cold]
#[inline(never)]
pub fn halt(err: HalError) -> ! {
    #[cfg(feature = "defmt")]
    defmt::error!("halting: {}", err);
    panic!("{}", err)
}

/// Extension for unwrapping HAL results by halting
pub trait OrHalt<T> {
    /// Return the value or halt with the error
    fn or_halt(self) -> T;
}

impl<T> OrHalt<T> for HalResult<T> {
    #[inline]
    fn or_halt(self) -> T {
        match self {
            Ok(value) => value,
            Err(err) => halt(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::string::ToString;

    use super::*;
    use crate::port::PortId;

    #[test]
    fn test_error_classes() {
        assert_eq!(HalError::UnknownPeripheral.class(), ErrorClass::InvalidArgument);
        assert_eq!(HalError::Disconnected.class(), ErrorClass::Fatal);
        assert_eq!(HalError::UnsupportedRoute.class(), ErrorClass::Fatal);
        assert!(HalError::SignalNotRouted.is_fatal());
        assert!(!HalError::Locked.is_fatal());
    }

    #[test]
    fn test_require() {
        assert_eq!(require(true, HalError::UnknownPort), Ok(()));
        assert_eq!(require(false, HalError::UnknownPort), Err(HalError::UnknownPort));
    }

    #[test]
    fn test_display() {
        let conflict = HalError::PinConflict(PinLocation::new(PortId::A, 6));
        assert_eq!(conflict.to_string(), "pin PA6 claimed twice");
        assert_eq!(HalError::ReservedValue(2).to_string(), "reserved register value: 0x02");
    }

    #[test]
    #[should_panic(expected = "peripheral is not routed to any pins")]
    fn test_or_halt_panics() {
        let result: HalResult<u8> = Err(HalError::Disconnected);
        result.or_halt();
    }

    #[test]
    fn test_or_halt_passes_value() {
        let result: HalResult<u8> = Ok(7);
        assert_eq!(result.or_halt(), 7);
    }
}
