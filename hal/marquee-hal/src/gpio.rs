//! GPIO bank abstraction
//!
//! A bank groups the pins controlled by one register block. Pins are
//! addressed by their SoC number rather than by header position.

/// Pin multiplexer setting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinFunction {
    /// Digital input
    Input,
    /// Digital output
    Output,
    /// Alternate function 0-5
    Alt(u8),
}

/// GPIO errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GpioError {
    /// Pin number outside the range the bank may drive
    InvalidPin(u8),
    /// Alternate function number not supported by the chip
    InvalidFunction,
}

/// Register-level control over a bank of GPIO pins
pub trait GpioBank {
    /// Select the function of a pin
    ///
    /// Only the pin's own function field is touched.
    fn set_function(&self, pin: u8, function: PinFunction) -> Result<(), GpioError>;

    /// Drive an output pin high
    fn set_high(&self, pin: u8) -> Result<(), GpioError>;

    /// Drive an output pin low
    fn set_low(&self, pin: u8) -> Result<(), GpioError>;

    /// Read the current level of a pin
    fn is_high(&self, pin: u8) -> Result<bool, GpioError>;

    /// Drive a pin to the given level
    fn set_level(&self, pin: u8, high: bool) -> Result<(), GpioError> {
        if high {
            self.set_high(pin)
        } else {
            self.set_low(pin)
        }
    }
}
