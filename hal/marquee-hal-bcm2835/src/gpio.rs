//! GPIO controller
//!
//! Each pin has a 3-bit function field in one of the GPFSELn registers.
//! Output levels are changed through the write-only GPSETn/GPCLRn strobe
//! registers, so driving one pin never disturbs another.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, OutputPin};
use marquee_hal::{GpioBank, GpioError, PinFunction, RegisterBlock};

use crate::GPIO_BLOCK_LEN;

/// GPIO register offsets (bytes from the controller base)
pub mod reg {
    /// Function select, pins 0-9
    pub const GPFSEL0: usize = 0x00;
    /// Function select, pins 10-19
    pub const GPFSEL1: usize = 0x04;
    /// Function select, pins 20-29
    pub const GPFSEL2: usize = 0x08;
    /// Output set, pins 0-31
    pub const GPSET0: usize = 0x1C;
    /// Output clear, pins 0-31
    pub const GPCLR0: usize = 0x28;
    /// Pin level, pins 0-31
    pub const GPLEV0: usize = 0x34;
}

/// Lowest pin the bank will drive (0 and 1 are the ID EEPROM pins)
pub const MIN_PIN: u8 = 2;

/// Highest pin routed to the 40-pin header
pub const MAX_PIN: u8 = 27;

/// Pin number to (function select register, field shift)
static FSEL: [(usize, u8); 28] = [
    (reg::GPFSEL0, 0),
    (reg::GPFSEL0, 3),
    (reg::GPFSEL0, 6),
    (reg::GPFSEL0, 9),
    (reg::GPFSEL0, 12),
    (reg::GPFSEL0, 15),
    (reg::GPFSEL0, 18),
    (reg::GPFSEL0, 21),
    (reg::GPFSEL0, 24),
    (reg::GPFSEL0, 27),
    (reg::GPFSEL1, 0),
    (reg::GPFSEL1, 3),
    (reg::GPFSEL1, 6),
    (reg::GPFSEL1, 9),
    (reg::GPFSEL1, 12),
    (reg::GPFSEL1, 15),
    (reg::GPFSEL1, 18),
    (reg::GPFSEL1, 21),
    (reg::GPFSEL1, 24),
    (reg::GPFSEL1, 27),
    (reg::GPFSEL2, 0),
    (reg::GPFSEL2, 3),
    (reg::GPFSEL2, 6),
    (reg::GPFSEL2, 9),
    (reg::GPFSEL2, 12),
    (reg::GPFSEL2, 15),
    (reg::GPFSEL2, 18),
    (reg::GPFSEL2, 21),
];

const FSEL_MASK: u32 = 0b111;

/// Function select field encoding
fn fsel_bits(function: PinFunction) -> Result<u32, GpioError> {
    match function {
        PinFunction::Input => Ok(0b000),
        PinFunction::Output => Ok(0b001),
        PinFunction::Alt(0) => Ok(0b100),
        PinFunction::Alt(1) => Ok(0b101),
        PinFunction::Alt(2) => Ok(0b110),
        PinFunction::Alt(3) => Ok(0b111),
        PinFunction::Alt(4) => Ok(0b011),
        PinFunction::Alt(5) => Ok(0b010),
        PinFunction::Alt(_) => Err(GpioError::InvalidFunction),
    }
}

/// Check that a pin may be driven by this bank
pub fn check_pin(pin: u8) -> Result<u8, GpioError> {
    if (MIN_PIN..=MAX_PIN).contains(&pin) {
        Ok(pin)
    } else {
        Err(GpioError::InvalidPin(pin))
    }
}

/// BCM2835 GPIO controller over a register window
#[derive(Debug, Clone)]
pub struct Bcm2835Gpio<R> {
    regs: R,
}

impl<R: RegisterBlock> Bcm2835Gpio<R> {
    /// Wrap a register window that starts at the GPIO controller base
    ///
    /// The window must be at least [`GPIO_BLOCK_LEN`] bytes long.
    pub fn new(regs: R) -> Self {
        Self { regs }
    }

    /// Length of the register window this controller expects
    pub const fn block_len() -> usize {
        GPIO_BLOCK_LEN
    }

    /// Configure `pin` as an output and hand back an owned pin handle
    pub fn output(&self, pin: u8) -> Result<GpioOutput<R>, GpioError>
    where
        R: Clone,
    {
        self.set_function(pin, PinFunction::Output)?;
        Ok(GpioOutput {
            regs: self.regs.clone(),
            mask: 1 << pin,
            pin,
        })
    }

    /// Give back the register window
    pub fn release(self) -> R {
        self.regs
    }
}

impl<R: RegisterBlock> GpioBank for Bcm2835Gpio<R> {
    fn set_function(&self, pin: u8, function: PinFunction) -> Result<(), GpioError> {
        let pin = check_pin(pin)?;
        let bits = fsel_bits(function)?;
        let (offset, shift) = FSEL[pin as usize];
        self.regs
            .modify32(offset, |v| (v & !(FSEL_MASK << shift)) | (bits << shift));
        Ok(())
    }

    fn set_high(&self, pin: u8) -> Result<(), GpioError> {
        let pin = check_pin(pin)?;
        self.regs.write32(reg::GPSET0, 1 << pin);
        Ok(())
    }

    fn set_low(&self, pin: u8) -> Result<(), GpioError> {
        let pin = check_pin(pin)?;
        self.regs.write32(reg::GPCLR0, 1 << pin);
        Ok(())
    }

    fn is_high(&self, pin: u8) -> Result<bool, GpioError> {
        let pin = check_pin(pin)?;
        Ok(self.regs.read32(reg::GPLEV0) & (1 << pin) != 0)
    }
}

/// A pin already switched to output mode
///
/// Created by [`Bcm2835Gpio::output`], which validates the pin number, so
/// level changes cannot fail.
#[derive(Debug, Clone)]
pub struct GpioOutput<R> {
    regs: R,
    mask: u32,
    pin: u8,
}

impl<R> GpioOutput<R> {
    /// SoC pin number
    pub fn pin(&self) -> u8 {
        self.pin
    }
}

impl<R: RegisterBlock> GpioOutput<R> {
    /// Read back the pin level from GPLEV0
    pub fn is_set_high(&self) -> bool {
        self.regs.read32(reg::GPLEV0) & self.mask != 0
    }
}

impl<R> ErrorType for GpioOutput<R> {
    type Error = Infallible;
}

impl<R: RegisterBlock> OutputPin for GpioOutput<R> {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.regs.write32(reg::GPCLR0, self.mask);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.regs.write32(reg::GPSET0, self.mask);
        Ok(())
    }
}
