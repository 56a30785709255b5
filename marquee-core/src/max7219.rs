//! MAX7219/MAX7221 register map and settings
//!
//! Every write to the chip is one 16-bit frame, shifted MSB first:
//!
//! ```text
//! | 15..12 | 11..8    | 7..0  |
//! | unused | register | value |
//! ```
//!
//! Digit 0 is the rightmost digit of a standard 8-digit module and digit 7
//! the leftmost.

use core::fmt;

use crate::glyph::Glyph;

/// Number of digit registers
pub const DIGIT_COUNT: usize = 8;

/// Chip registers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Register {
    NoOp = 0x00,
    Digit0 = 0x01,
    Digit1 = 0x02,
    Digit2 = 0x03,
    Digit3 = 0x04,
    Digit4 = 0x05,
    Digit5 = 0x06,
    Digit6 = 0x07,
    Digit7 = 0x08,
    DecodeMode = 0x09,
    Intensity = 0x0A,
    ScanLimit = 0x0B,
    Shutdown = 0x0C,
    DisplayTest = 0x0F,
}

impl Register {
    /// Register address as sent on the wire
    pub const fn addr(self) -> u8 {
        self as u8
    }

    /// Digit register for a position, 0 being the rightmost digit
    pub const fn digit(position: u8) -> Option<Self> {
        match position {
            0 => Some(Self::Digit0),
            1 => Some(Self::Digit1),
            2 => Some(Self::Digit2),
            3 => Some(Self::Digit3),
            4 => Some(Self::Digit4),
            5 => Some(Self::Digit5),
            6 => Some(Self::Digit6),
            7 => Some(Self::Digit7),
            _ => None,
        }
    }

    /// Decode a register address
    pub const fn from_addr(addr: u8) -> Option<Self> {
        match addr {
            0x00 => Some(Self::NoOp),
            0x01..=0x08 => Self::digit(addr - 1),
            0x09 => Some(Self::DecodeMode),
            0x0A => Some(Self::Intensity),
            0x0B => Some(Self::ScanLimit),
            0x0C => Some(Self::Shutdown),
            0x0F => Some(Self::DisplayTest),
            _ => None,
        }
    }
}

/// Digit registers in display order, leftmost digit first
pub const DIGITS_LEFT_TO_RIGHT: [Register; DIGIT_COUNT] = [
    Register::Digit7,
    Register::Digit6,
    Register::Digit5,
    Register::Digit4,
    Register::Digit3,
    Register::Digit2,
    Register::Digit1,
    Register::Digit0,
];

/// One register write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    pub register: Register,
    pub value: u8,
}

impl Frame {
    pub const fn new(register: Register, value: u8) -> Self {
        Self { register, value }
    }

    /// Write a glyph to a digit register
    pub const fn digit(register: Register, glyph: Glyph) -> Self {
        Self::new(register, glyph.bits())
    }

    /// 16-bit wire word, register in the high byte
    pub const fn word(self) -> u16 {
        ((self.register.addr() as u16) << 8) | self.value as u16
    }

    /// Wire bytes in transmission order
    pub const fn to_bytes(self) -> [u8; 2] {
        self.word().to_be_bytes()
    }

    /// Decode a wire word; unknown register addresses yield `None`
    pub const fn from_word(word: u16) -> Option<Self> {
        let [addr, value] = word.to_be_bytes();
        match Register::from_addr(addr & 0x0F) {
            Some(register) => Some(Self::new(register, value)),
            None => None,
        }
    }
}

/// Setting value outside the range the chip accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SettingError {
    Intensity(u8),
    ScanLimit(u8),
}

impl fmt::Display for SettingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Intensity(v) => write!(f, "intensity {} out of range (0-15)", v),
            Self::ScanLimit(v) => write!(f, "scan limit {} out of range (0-7)", v),
        }
    }
}

/// Display brightness, 0 (1/32 duty) to 15 (31/32 duty)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(try_from = "u8"))]
pub struct Intensity(u8);

impl Intensity {
    pub const MIN: Self = Self(0);
    pub const MAX: Self = Self(15);

    pub const fn new(level: u8) -> Option<Self> {
        if level <= 15 {
            Some(Self(level))
        } else {
            None
        }
    }

    pub const fn level(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Intensity {
    type Error = SettingError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        Self::new(level).ok_or(SettingError::Intensity(level))
    }
}

impl Default for Intensity {
    fn default() -> Self {
        Self::MAX
    }
}

/// Index of the last scanned digit (0 scans digit 0 only, 7 scans all)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(try_from = "u8"))]
pub struct ScanLimit(u8);

impl ScanLimit {
    pub const ALL: Self = Self(7);

    pub const fn new(last_digit: u8) -> Option<Self> {
        if last_digit <= 7 {
            Some(Self(last_digit))
        } else {
            None
        }
    }

    pub const fn last_digit(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for ScanLimit {
    type Error = SettingError;

    fn try_from(last_digit: u8) -> Result<Self, Self::Error> {
        Self::new(last_digit).ok_or(SettingError::ScanLimit(last_digit))
    }
}

impl Default for ScanLimit {
    fn default() -> Self {
        Self::ALL
    }
}

/// BCD decode selection per digit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum DecodeMode {
    /// Raw segment bytes on every digit
    #[default]
    NoDecode = 0x00,
    /// Code B on digit 0 only
    Digit0 = 0x01,
    /// Code B on digits 0-3
    Digits0To3 = 0x0F,
    /// Code B on all digits
    All = 0xFF,
}

/// Shutdown register values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ShutdownMode {
    Shutdown = 0x00,
    Normal = 0x01,
}

/// Display-test register values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum TestMode {
    Off = 0x00,
    On = 0x01,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_addresses() {
        assert_eq!(Register::NoOp.addr(), 0x00);
        assert_eq!(Register::Digit0.addr(), 0x01);
        assert_eq!(Register::Digit7.addr(), 0x08);
        assert_eq!(Register::DecodeMode.addr(), 0x09);
        assert_eq!(Register::Intensity.addr(), 0x0A);
        assert_eq!(Register::ScanLimit.addr(), 0x0B);
        assert_eq!(Register::Shutdown.addr(), 0x0C);
        assert_eq!(Register::DisplayTest.addr(), 0x0F);
    }

    #[test]
    fn test_digit_lookup() {
        for position in 0..8u8 {
            let reg = Register::digit(position).unwrap();
            assert_eq!(reg.addr(), position + 1);
        }
        assert_eq!(Register::digit(8), None);
    }

    #[test]
    fn test_display_order() {
        assert_eq!(DIGITS_LEFT_TO_RIGHT[0], Register::Digit7);
        assert_eq!(DIGITS_LEFT_TO_RIGHT[7], Register::Digit0);
    }

    #[test]
    fn test_frame_word() {
        let frame = Frame::new(Register::Intensity, 0x0F);
        assert_eq!(frame.word(), 0x0A0F);
        assert_eq!(frame.to_bytes(), [0x0A, 0x0F]);

        let frame = Frame::digit(Register::Digit7, Glyph::from_bits(0xB0));
        assert_eq!(frame.word(), 0x08B0);
    }

    #[test]
    fn test_frame_from_word() {
        assert_eq!(
            Frame::from_word(0x0C01),
            Some(Frame::new(Register::Shutdown, 0x01))
        );
        // Upper nibble is ignored by the chip
        assert_eq!(
            Frame::from_word(0xF301),
            Some(Frame::new(Register::Digit2, 0x01))
        );
        assert_eq!(Frame::from_word(0x0D00), None);
    }

    #[test]
    fn test_setting_ranges() {
        assert_eq!(Intensity::new(15), Some(Intensity::MAX));
        assert_eq!(Intensity::new(16), None);
        assert_eq!(ScanLimit::new(7), Some(ScanLimit::ALL));
        assert_eq!(ScanLimit::new(8), None);
        assert_eq!(Intensity::try_from(20), Err(SettingError::Intensity(20)));
        assert_eq!(ScanLimit::try_from(3).map(ScanLimit::last_digit), Ok(3));
        assert_eq!(DecodeMode::default() as u8, 0x00);
        assert_eq!(ShutdownMode::Normal as u8, 0x01);
        assert_eq!(TestMode::Off as u8, 0x00);
    }
}
