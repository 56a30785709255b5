//! GPIO bit-bang transport
//!
//! Shifts frames out on three plain output pins:
//!
//! ```text
//! LOAD ‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾\_/‾‾
//! CLK  ‾‾\_/‾‾\_/‾‾ ... \_/‾‾\_/‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾
//! DIN    <D15 ><D14 >   <D1 ><D0 >
//! ```
//!
//! DIN changes while CLK is low and the chip samples it on the rising
//! edge. The LOAD pulse at the end moves the shift register into the
//! addressed register. Every pin change is followed by a settle delay.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{OutputPin, PinState};
use marquee_core::max7219::{Frame, Register};
use marquee_core::traits::{TransportError, WireTransport};

/// Default settle time after each pin change, in microseconds
pub const DEFAULT_SETTLE_US: u32 = 50;

/// The three pins of the MAX7219 serial interface
pub struct BitBangPins<P> {
    /// Serial clock
    pub clk: P,
    /// Serial data in
    pub din: P,
    /// Latch (LOAD/CS)
    pub load: P,
}

/// MAX7219 frames clocked out by toggling GPIO pins
pub struct BitBangTransport<P, D> {
    pins: BitBangPins<P>,
    delay: D,
    settle_us: u32,
}

impl<P: OutputPin, D: DelayNs> BitBangTransport<P, D> {
    /// Create a transport; `settle_us` of 0 disables the delays
    pub fn new(pins: BitBangPins<P>, delay: D, settle_us: u32) -> Self {
        Self {
            pins,
            delay,
            settle_us,
        }
    }

    /// Shift one 16-bit word out, MSB first, and latch it
    pub fn shift_word(&mut self, word: u16) -> Result<(), P::Error> {
        self.pins.load.set_high()?;
        self.settle();

        for bit in (0..16).rev() {
            self.pins.clk.set_low()?;
            self.settle();
            self.pins
                .din
                .set_state(PinState::from(word & (1 << bit) != 0))?;
            self.settle();
            self.pins.clk.set_high()?;
            self.settle();
        }

        self.pins.load.set_low()?;
        self.settle();
        self.pins.load.set_high()?;
        self.settle();
        Ok(())
    }

    /// Give back the pins and delay
    pub fn release(self) -> (BitBangPins<P>, D) {
        (self.pins, self.delay)
    }

    fn settle(&mut self) {
        if self.settle_us > 0 {
            self.delay.delay_us(self.settle_us);
        }
    }
}

impl<P: OutputPin, D: DelayNs> WireTransport for BitBangTransport<P, D> {
    fn send(&mut self, register: Register, value: u8) -> Result<(), TransportError> {
        self.shift_word(Frame::new(register, value).word())
            .map_err(|_| TransportError::Pin)
    }
}
