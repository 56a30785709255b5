//! Text to glyph compilation
//!
//! Turns a line of text into the glyph sequence of a [`ScrollBuffer`].
//!
//! # Decimal points
//!
//! `.` and `,` do not take a digit of their own. They light the decimal
//! point of the glyph before them, so `"1.2.3"` compiles to three glyphs.
//! A dot at the very start of the text has nothing to attach to; it opens a
//! dot-only slot and the next character is merged into it, so `".5"` is a
//! single glyph `5.`.

use crate::buffer::ScrollBuffer;
use crate::glyph::{is_dot, EncodingError, Glyph};

/// Outcome of compiling one line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EncodeReport {
    /// Glyphs written to the buffer
    pub glyphs: usize,
    /// Characters replaced by a blank glyph
    pub unsupported: usize,
    /// First character that could not be encoded
    pub first_error: Option<EncodingError>,
    /// Input left over after the buffer filled up
    pub truncated: bool,
}

impl EncodeReport {
    pub fn is_clean(&self) -> bool {
        self.unsupported == 0 && !self.truncated
    }

    fn record(&mut self, err: EncodingError) {
        self.unsupported += 1;
        self.first_error.get_or_insert(err);
    }
}

/// Replace the buffer contents with the glyphs for `text`
///
/// Unsupported characters become blank glyphs and are counted in the
/// report. Input past the buffer capacity is dropped.
pub fn encode_text(text: &str, buffer: &mut ScrollBuffer) -> EncodeReport {
    buffer.reset();
    let mut report = EncodeReport::default();
    // Leading dot slot waiting for its character
    let mut pending_dot = false;

    for c in text.chars() {
        if is_dot(c) {
            match buffer.last_mut() {
                Some(last) => *last = last.with_dot(),
                None => {
                    // Empty buffer always has room
                    let _ = buffer.append(Glyph::DOT);
                    pending_dot = true;
                }
            }
            continue;
        }

        // A pending dot slot takes the character without needing room
        if !pending_dot && buffer.is_full() {
            report.truncated = true;
            break;
        }

        let glyph = Glyph::from_char(c).unwrap_or_else(|err| {
            report.record(err);
            Glyph::BLANK
        });

        if pending_dot {
            pending_dot = false;
            if let Some(last) = buffer.last_mut() {
                *last = last.merge(glyph);
            }
            continue;
        }

        if buffer.append(glyph).is_err() {
            report.truncated = true;
            break;
        }
    }

    report.glyphs = buffer.len();
    report
}
