//! Refresh cycle
//!
//! One cycle paints the 8-glyph window that starts at the buffer cursor
//! onto digits 7 (leftmost) down to 0, then scrolls the cursor by one
//! glyph. The caller owns the cadence; this module never sleeps.

use crate::buffer::ScrollBuffer;
use crate::max7219::{DIGITS_LEFT_TO_RIGHT, DIGIT_COUNT};
use crate::traits::{TransportError, WireTransport};

/// Outcome of one refresh cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CycleReport {
    /// Frames accepted by the transport
    pub sent: u8,
    /// Frames dropped after a transport error
    pub dropped: u8,
    /// First transport error of the cycle
    pub first_error: Option<TransportError>,
}

impl CycleReport {
    pub fn is_complete(&self) -> bool {
        self.sent as usize == DIGIT_COUNT
    }
}

/// Paint the current window and advance the cursor
///
/// A frame the transport rejects is dropped and the cycle moves on to the
/// next digit. The cursor advances even if every frame failed.
pub fn refresh_cycle<T>(buffer: &mut ScrollBuffer, transport: &mut T) -> CycleReport
where
    T: WireTransport + ?Sized,
{
    let mut report = CycleReport::default();
    let mut index = buffer.cursor();

    for register in DIGITS_LEFT_TO_RIGHT {
        match transport.send(register, buffer.get(index).bits()) {
            Ok(()) => report.sent += 1,
            Err(err) => {
                report.dropped += 1;
                report.first_error.get_or_insert(err);
            }
        }
        index = buffer.advance(index);
    }

    buffer.advance_cursor();
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glyph::Glyph;
    use crate::max7219::{Frame, Register};
    use crate::text::encode_text;

    /// Transport that records frames and can fail selected digits
    struct RecordingTransport {
        frames: heapless::Vec<Frame, 64>,
        fail_on: Option<Register>,
    }

    impl RecordingTransport {
        fn new() -> Self {
            Self {
                frames: heapless::Vec::new(),
                fail_on: None,
            }
        }

        fn values(&self) -> heapless::Vec<u8, 64> {
            self.frames.iter().map(|f| f.value).collect()
        }
    }

    impl WireTransport for RecordingTransport {
        fn send(&mut self, register: Register, value: u8) -> Result<(), TransportError> {
            if self.fail_on == Some(register) {
                return Err(TransportError::Bus);
            }
            self.frames.push(Frame::new(register, value)).unwrap();
            Ok(())
        }
    }

    fn buffer_of(bits: &[u8]) -> ScrollBuffer {
        let mut buf = ScrollBuffer::new();
        for &b in bits {
            buf.append(Glyph::from_bits(b)).unwrap();
        }
        buf
    }

    #[test]
    fn test_cycle_emits_eight_frames_in_order() {
        let mut buf = buffer_of(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
        let mut t = RecordingTransport::new();

        let report = refresh_cycle(&mut buf, &mut t);

        assert!(report.is_complete());
        let registers: heapless::Vec<Register, 8> = t.frames.iter().map(|f| f.register).collect();
        assert_eq!(registers.as_slice(), &DIGITS_LEFT_TO_RIGHT);
        assert_eq!(t.values().as_slice(), &[1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(buf.cursor(), 1);
    }

    #[test]
    fn test_short_message_wraps() {
        let mut buf = buffer_of(&[0xA, 0xB, 0xC]);
        let mut t = RecordingTransport::new();

        refresh_cycle(&mut buf, &mut t);
        assert_eq!(
            t.values().as_slice(),
            &[0xA, 0xB, 0xC, 0xA, 0xB, 0xC, 0xA, 0xB]
        );
        assert_eq!(buf.take_bounds_violations(), 0);
    }

    #[test]
    fn test_scrolls_one_glyph_per_cycle() {
        let mut buf = ScrollBuffer::new();
        encode_text("0123456789", &mut buf);
        let mut t = RecordingTransport::new();

        refresh_cycle(&mut buf, &mut t);
        refresh_cycle(&mut buf, &mut t);

        let second = &t.frames[8..16];
        assert_eq!(second[0].value, Glyph::from_char('1').unwrap().bits());
        assert_eq!(second[7].value, Glyph::from_char('8').unwrap().bits());
        assert_eq!(buf.cursor(), 2);
    }

    #[test]
    fn test_cursor_wraps_after_full_pass() {
        let mut buf = buffer_of(&[1, 2, 3]);
        let mut t = RecordingTransport::new();
        for _ in 0..3 {
            refresh_cycle(&mut buf, &mut t);
        }
        assert_eq!(buf.cursor(), 0);
    }

    #[test]
    fn test_empty_buffer_blanks_display() {
        let mut buf = ScrollBuffer::new();
        let mut t = RecordingTransport::new();

        let report = refresh_cycle(&mut buf, &mut t);
        assert!(report.is_complete());
        assert!(t.values().iter().all(|&v| v == 0));
        assert_eq!(buf.cursor(), 0);
        assert_eq!(buf.take_bounds_violations(), 0);
    }

    #[test]
    fn test_failed_frame_is_dropped() {
        let mut buf = buffer_of(&[1, 2, 3, 4, 5, 6, 7, 8]);
        let mut t = RecordingTransport::new();
        t.fail_on = Some(Register::Digit4);

        let report = refresh_cycle(&mut buf, &mut t);

        assert_eq!(report.sent, 7);
        assert_eq!(report.dropped, 1);
        assert_eq!(report.first_error, Some(TransportError::Bus));
        assert_eq!(t.values().as_slice(), &[1, 2, 3, 5, 6, 7, 8]);
        assert_eq!(buf.cursor(), 1);
    }
}
