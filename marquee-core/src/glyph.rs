//! Seven-segment glyphs
//!
//! A glyph is one byte in the MAX7219 "no decode" layout:
//!
//! ```text
//!  bit:  7  6  5  4  3  2  1  0
//!  seg:  DP A  B  C  D  E  F  G
//!
//!        --A--
//!       |     |
//!       F     B
//!       |     |
//!        --G--
//!       |     |
//!       E     C
//!       |     |
//!        --D--  .DP
//! ```

/// Segment bit masks
pub mod seg {
    pub const DP: u8 = 0x80;
    pub const A: u8 = 0x40;
    pub const B: u8 = 0x20;
    pub const C: u8 = 0x10;
    pub const D: u8 = 0x08;
    pub const E: u8 = 0x04;
    pub const F: u8 = 0x02;
    pub const G: u8 = 0x01;
}

/// Encoding errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EncodingError {
    /// Character has no seven-segment representation
    Unsupported(char),
}

/// One digit's worth of lit segments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct Glyph(u8);

impl Glyph {
    /// All segments off
    pub const BLANK: Self = Self(0x00);
    /// Decimal point only
    pub const DOT: Self = Self(seg::DP);

    /// Wrap a raw segment byte
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    /// Raw segment byte as written to a digit register
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Same glyph with the decimal point lit
    pub const fn with_dot(self) -> Self {
        Self(self.0 | seg::DP)
    }

    /// Whether the decimal point is lit
    pub const fn has_dot(self) -> bool {
        self.0 & seg::DP != 0
    }

    /// Combine the lit segments of two glyphs
    pub const fn merge(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn is_blank(self) -> bool {
        self.0 == 0
    }

    /// Look up the glyph for a character
    ///
    /// `.` and `,` are not glyphs on their own; the text encoder folds them
    /// into the preceding digit as a decimal point.
    pub fn from_char(c: char) -> Result<Self, EncodingError> {
        GLYPH_TABLE
            .iter()
            .find(|(ch, _)| *ch == c)
            .map(|&(_, bits)| Self(bits))
            .ok_or(EncodingError::Unsupported(c))
    }
}

impl From<Glyph> for u8 {
    fn from(glyph: Glyph) -> u8 {
        glyph.0
    }
}

/// Whether a character is rendered as a decimal point
pub const fn is_dot(c: char) -> bool {
    matches!(c, '.' | ',')
}

/// Every supported character and its segment pattern
///
/// Letters without a usable seven-segment shape (K, M, V, W, X, Z) are
/// absent. Some letters only exist in one case and the other case maps to
/// the same shape.
pub static GLYPH_TABLE: [(char, u8); 56] = [
    // Digits
    ('0', 0x7E),
    ('1', 0x30),
    ('2', 0x6D),
    ('3', 0x79),
    ('4', 0x33),
    ('5', 0x5B),
    ('6', 0x5F),
    ('7', 0x70),
    ('8', 0x7F),
    ('9', 0x7B),
    // Letters
    ('A', 0x77),
    ('a', 0x77),
    ('B', 0x7F),
    ('b', 0x1F),
    ('C', 0x4E),
    ('c', 0x0D),
    ('D', 0x3D),
    ('d', 0x3D),
    ('E', 0x4F),
    ('e', 0x4F),
    ('F', 0x47),
    ('f', 0x47),
    ('G', 0x5E),
    ('g', 0x7B),
    ('H', 0x37),
    ('h', 0x17),
    ('I', 0x30),
    ('i', 0x50),
    ('J', 0x78),
    ('j', 0x58),
    ('L', 0x0E),
    ('l', 0x06),
    ('N', 0x76),
    ('n', 0x15),
    ('O', 0x7E),
    ('o', 0x1D),
    ('P', 0x67),
    ('p', 0x67),
    ('Q', 0x73),
    ('q', 0x73),
    ('R', 0x05),
    ('r', 0x05),
    ('S', 0x5B),
    ('s', 0x5B),
    ('T', 0x0F),
    ('t', 0x0F),
    ('U', 0x3E),
    ('u', 0x1C),
    ('Y', 0x33),
    ('y', 0x33),
    // Symbols
    (' ', 0x00),
    ('-', 0x01),
    ('_', 0x08),
    ('"', 0x22),
    ('\'', 0x02),
    ('=', 0x09),
];

/// Pairs of different characters that light the same segments
///
/// Readers cannot tell these apart on the display. Case variants of the
/// same letter are not listed; those share a shape on purpose.
pub static AMBIGUOUS_PAIRS: [(char, char); 8] = [
    ('0', 'O'),
    ('1', 'I'),
    ('4', 'Y'),
    ('4', 'y'),
    ('5', 'S'),
    ('5', 's'),
    ('8', 'B'),
    ('9', 'g'),
];

/// Whether two characters render identically without being the same letter
pub fn is_ambiguous(a: char, b: char) -> bool {
    AMBIGUOUS_PAIRS
        .iter()
        .any(|&(x, y)| (x == a && y == b) || (x == b && y == a))
}
