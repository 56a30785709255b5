//! Wire transport trait for the MAX7219 serial link

use crate::max7219::{Frame, Register};

/// Errors that can occur while sending a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError {
    /// SPI peripheral reported an error
    Bus,
    /// GPIO pin could not be driven
    Pin,
    /// Device node accepted fewer than two bytes
    ShortWrite,
    /// Device node write failed
    Io,
}

/// Sends 16-bit register frames to the chip
///
/// Calls are synchronous: when `send` returns `Ok` the frame has been
/// shifted out and latched. A failed frame is not retried here; callers
/// decide whether to drop it.
pub trait WireTransport {
    /// Write `value` to `register`
    fn send(&mut self, register: Register, value: u8) -> Result<(), TransportError>;

    /// Write a prepared frame
    fn send_frame(&mut self, frame: Frame) -> Result<(), TransportError> {
        self.send(frame.register, frame.value)
    }
}

impl<T: WireTransport + ?Sized> WireTransport for &mut T {
    fn send(&mut self, register: Register, value: u8) -> Result<(), TransportError> {
        (**self).send(register, value)
    }
}
