//! Display settings
//!
//! Values the application reads from its configuration file and hands to
//! the driver and refresh loop.

use crate::max7219::{DecodeMode, Frame, Intensity, Register, ScanLimit, ShutdownMode, TestMode};

/// Delay between two refresh cycles
pub const DEFAULT_REFRESH_INTERVAL_MS: u32 = 500;

/// Input line that ends the session
pub const DEFAULT_EXIT_COMMAND: &str = "exit";

/// Chip register settings applied at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChipSettings {
    pub intensity: Intensity,
    pub scan_limit: ScanLimit,
    pub decode_mode: DecodeMode,
}

impl ChipSettings {
    /// Register writes that bring the chip out of power-on state
    ///
    /// Shutdown must be released last.
    pub fn init_frames(&self) -> [Frame; 5] {
        [
            Frame::new(Register::ScanLimit, self.scan_limit.last_digit()),
            Frame::new(Register::DecodeMode, self.decode_mode as u8),
            Frame::new(Register::DisplayTest, TestMode::Off as u8),
            Frame::new(Register::Intensity, self.intensity.level()),
            Frame::new(Register::Shutdown, ShutdownMode::Normal as u8),
        ]
    }
}
