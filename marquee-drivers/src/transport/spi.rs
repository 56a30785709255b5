//! SPI peripheral transport
//!
//! The peripheral generates the clock and the device driver toggles chip
//! select (wired to LOAD) around each two-byte write, which latches the
//! frame. Use SPI mode 0 at up to 10 MHz.

use embedded_hal::spi::SpiDevice;
use marquee_core::max7219::{Frame, Register};
use marquee_core::traits::{TransportError, WireTransport};

/// MAX7219 frames over an `embedded-hal` SPI device
pub struct SpiTransport<S> {
    spi: S,
}

impl<S: SpiDevice> SpiTransport<S> {
    pub fn new(spi: S) -> Self {
        Self { spi }
    }

    /// Give back the SPI device
    pub fn release(self) -> S {
        self.spi
    }
}

impl<S: SpiDevice> WireTransport for SpiTransport<S> {
    fn send(&mut self, register: Register, value: u8) -> Result<(), TransportError> {
        self.spi
            .write(&Frame::new(register, value).to_bytes())
            .map_err(|_| TransportError::Bus)
    }
}
