//! Scroll buffer
//!
//! Holds the compiled glyphs of one message. Writes are linear (append
//! only, while a message is being compiled); reads are circular, so the
//! refresh loop can walk past the end and wrap back to the first glyph.
//!
//! Invariant: `cursor < len` whenever `len > 0`, and `cursor == 0` when the
//! buffer is empty.

use core::cell::Cell;

use crate::glyph::Glyph;
use crate::max7219::DIGIT_COUNT;

/// Number of glyph slots
pub const BUFFER_CAPACITY: usize = 128;

/// Append rejected because every slot is in use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BufferFull;

/// Index outside `[0, len)` passed to a circular read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BoundsViolation {
    pub index: usize,
    pub len: usize,
}

/// Fixed-capacity glyph sequence with circular read addressing
#[derive(Debug, Clone)]
pub struct ScrollBuffer {
    data: [Glyph; BUFFER_CAPACITY],
    len: usize,
    cursor: usize,
    /// Out-of-range indices seen by [`ScrollBuffer::advance`] since the
    /// last [`ScrollBuffer::take_bounds_violations`]
    violations: Cell<u32>,
}

impl Default for ScrollBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollBuffer {
    pub const fn new() -> Self {
        Self {
            data: [Glyph::BLANK; BUFFER_CAPACITY],
            len: 0,
            cursor: 0,
            violations: Cell::new(0),
        }
    }

    /// Clear every slot and rewind the cursor
    pub fn reset(&mut self) {
        self.data = [Glyph::BLANK; BUFFER_CAPACITY];
        self.len = 0;
        self.cursor = 0;
    }

    /// Append a glyph, returning the slot it landed in
    ///
    /// A full buffer is left untouched.
    pub fn append(&mut self, glyph: Glyph) -> Result<usize, BufferFull> {
        if self.len == BUFFER_CAPACITY {
            return Err(BufferFull);
        }
        let index = self.len;
        self.data[index] = glyph;
        self.len += 1;
        Ok(index)
    }

    /// Most recently appended glyph
    pub fn last_mut(&mut self) -> Option<&mut Glyph> {
        match self.len {
            0 => None,
            n => Some(&mut self.data[n - 1]),
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == BUFFER_CAPACITY
    }

    pub const fn capacity(&self) -> usize {
        BUFFER_CAPACITY
    }

    /// Index of the glyph shown on the leftmost digit
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Glyphs written so far
    pub fn as_slice(&self) -> &[Glyph] {
        &self.data[..self.len]
    }

    /// Glyph at a slot, blank past the written region
    pub fn get(&self, index: usize) -> Glyph {
        self.as_slice().get(index).copied().unwrap_or(Glyph::BLANK)
    }

    /// Next index in circular order
    ///
    /// An empty buffer, or an index outside `[0, len)`, returns the input
    /// unchanged. The out-of-range case is also counted as a bounds
    /// violation; see [`ScrollBuffer::take_bounds_violations`].
    pub fn advance(&self, index: usize) -> usize {
        match self.try_advance(index) {
            Ok(next) => next,
            Err(_) => {
                self.violations.set(self.violations.get().saturating_add(1));
                index
            }
        }
    }

    /// Next index in circular order, reporting out-of-range input
    ///
    /// An empty buffer is not a violation; the index comes back unchanged.
    pub fn try_advance(&self, index: usize) -> Result<usize, BoundsViolation> {
        if self.len == 0 {
            return Ok(index);
        }
        if index >= self.len {
            return Err(BoundsViolation {
                index,
                len: self.len,
            });
        }
        if index == self.len - 1 {
            Ok(0)
        } else {
            Ok(index + 1)
        }
    }

    /// Move the cursor one glyph to the right, wrapping at the end
    pub fn advance_cursor(&mut self) {
        self.cursor = self.advance(self.cursor);
    }

    /// The glyphs currently visible, leftmost first
    ///
    /// Reads wrap around, so a message shorter than the display repeats.
    pub fn window(&self) -> [Glyph; DIGIT_COUNT] {
        let mut out = [Glyph::BLANK; DIGIT_COUNT];
        let mut index = self.cursor;
        for slot in out.iter_mut() {
            *slot = self.get(index);
            index = self.advance(index);
        }
        out
    }

    /// Return and reset the number of bounds violations seen
    pub fn take_bounds_violations(&self) -> u32 {
        self.violations.replace(0)
    }
}
