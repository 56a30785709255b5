//! MAX7219 8-digit display driver
//!
//! Wraps a [`WireTransport`] with the chip-level operations: the startup
//! register sequence, blanking, the factory-style test pattern and one
//! scroll refresh. Digits are always addressed in no-decode mode.
//!
//! Every operation sends all of its frames even if some fail, and reports
//! the first failure. A dropped frame is simply repainted on the next
//! refresh.

use marquee_core::buffer::ScrollBuffer;
use marquee_core::config::ChipSettings;
use marquee_core::glyph::Glyph;
use marquee_core::max7219::{Frame, DIGITS_LEFT_TO_RIGHT, DIGIT_COUNT};
use marquee_core::refresh::{refresh_cycle, CycleReport};
use marquee_core::text::encode_text;
use marquee_core::traits::{TransportError, WireTransport};

/// Text shown by [`Max7219::show_test_pattern`]
pub const TEST_PATTERN: &str = "1.2.3.4.5.6.7.8.";

/// MAX7219 chip driver
pub struct Max7219<T> {
    transport: T,
}

impl<T: WireTransport> Max7219<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Send the startup register sequence
    pub fn init(&mut self, settings: &ChipSettings) -> Result<(), TransportError> {
        self.send_all(settings.init_frames())
    }

    /// Blank all eight digits
    pub fn clear(&mut self) -> Result<(), TransportError> {
        self.write_digits(&[Glyph::BLANK; DIGIT_COUNT])
    }

    /// Write eight glyphs, leftmost digit first
    pub fn write_digits(&mut self, glyphs: &[Glyph; DIGIT_COUNT]) -> Result<(), TransportError> {
        let mut frames = [Frame::new(DIGITS_LEFT_TO_RIGHT[0], 0); DIGIT_COUNT];
        for (frame, (&register, glyph)) in frames
            .iter_mut()
            .zip(DIGITS_LEFT_TO_RIGHT.iter().zip(glyphs))
        {
            *frame = Frame::digit(register, *glyph);
        }
        self.send_all(frames)
    }

    /// Show `1.2.3.4.5.6.7.8.` across the display
    pub fn show_test_pattern(&mut self) -> Result<(), TransportError> {
        let mut buffer = ScrollBuffer::new();
        encode_text(TEST_PATTERN, &mut buffer);
        self.write_digits(&buffer.window())
    }

    /// Paint the window at the buffer cursor and scroll by one glyph
    pub fn refresh(&mut self, buffer: &mut ScrollBuffer) -> CycleReport {
        refresh_cycle(buffer, &mut self.transport)
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Give back the transport
    pub fn release(self) -> T {
        self.transport
    }

    fn send_all<I>(&mut self, frames: I) -> Result<(), TransportError>
    where
        I: IntoIterator<Item = Frame>,
    {
        let mut first_error = None;
        for frame in frames {
            if let Err(err) = self.transport.send_frame(frame) {
                first_error.get_or_insert(err);
            }
        }
        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marquee_core::max7219::Register;

    /// Transport that records frames and fails a set number of sends
    struct RecordingTransport {
        frames: heapless::Vec<Frame, 64>,
        failures_left: usize,
    }

    impl RecordingTransport {
        fn new() -> Self {
            Self {
                frames: heapless::Vec::new(),
                failures_left: 0,
            }
        }

        fn words(&self) -> heapless::Vec<u16, 64> {
            self.frames.iter().map(|f| f.word()).collect()
        }
    }

    impl WireTransport for RecordingTransport {
        fn send(&mut self, register: Register, value: u8) -> Result<(), TransportError> {
            if self.failures_left > 0 {
                self.failures_left -= 1;
                return Err(TransportError::ShortWrite);
            }
            self.frames.push(Frame::new(register, value)).unwrap();
            Ok(())
        }
    }

    #[test]
    fn test_init_sequence() {
        let mut chip = Max7219::new(RecordingTransport::new());
        chip.init(&ChipSettings::default()).unwrap();

        assert_eq!(
            chip.release().words().as_slice(),
            &[0x0B07, 0x0900, 0x0F00, 0x0A0F, 0x0C01]
        );
    }

    #[test]
    fn test_clear_blanks_every_digit() {
        let mut chip = Max7219::new(RecordingTransport::new());
        chip.clear().unwrap();

        let t = chip.release();
        assert_eq!(t.frames.len(), 8);
        for (frame, register) in t.frames.iter().zip(DIGITS_LEFT_TO_RIGHT) {
            assert_eq!(*frame, Frame::new(register, 0));
        }
    }

    #[test]
    fn test_pattern() {
        let mut chip = Max7219::new(RecordingTransport::new());
        chip.show_test_pattern().unwrap();

        let t = chip.release();
        assert_eq!(t.frames[0], Frame::new(Register::Digit7, 0x30 | 0x80));
        assert_eq!(t.frames[7], Frame::new(Register::Digit0, 0x7F | 0x80));
        assert!(t.frames.iter().all(|f| f.value & 0x80 != 0));
    }

    #[test]
    fn test_failures_do_not_stop_sequence() {
        let mut transport = RecordingTransport::new();
        transport.failures_left = 2;
        let mut chip = Max7219::new(transport);

        assert_eq!(
            chip.init(&ChipSettings::default()),
            Err(TransportError::ShortWrite)
        );
        // The first two frames were dropped, the rest still went out
        assert_eq!(chip.release().words().as_slice(), &[0x0F00, 0x0A0F, 0x0C01]);
    }

    #[test]
    fn test_refresh_through_driver() {
        let mut buffer = ScrollBuffer::new();
        encode_text("HELLO", &mut buffer);
        let mut chip = Max7219::new(RecordingTransport::new());

        let report = chip.refresh(&mut buffer);

        assert!(report.is_complete());
        assert_eq!(buffer.cursor(), 1);
        let h = Glyph::from_char('H').unwrap().bits();
        assert_eq!(chip.transport_mut().frames[0].value, h);
        assert_eq!(chip.transport_mut().frames[5].value, h);
    }
}
