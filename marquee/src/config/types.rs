//! Configuration types
//!
//! Mirrors the layout of `marquee.toml`. Every key has a default, so an
//! empty file is a valid configuration.

use std::path::PathBuf;

use embassy_time::Duration;
use marquee_core::config::{ChipSettings, DEFAULT_EXIT_COMMAND, DEFAULT_REFRESH_INTERVAL_MS};
use marquee_core::max7219::{DecodeMode, Intensity, ScanLimit};
use marquee_drivers::transport::DEFAULT_SETTLE_US;
use serde::Deserialize;

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarqueeConfig {
    pub display: DisplayConfig,
    pub backend: BackendConfig,
}

/// `[display]` section
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    /// Brightness, 0-15
    pub intensity: Intensity,
    /// Last scanned digit, 0-7
    pub scan_limit: ScanLimit,
    /// Delay between scroll steps
    pub refresh_interval_ms: u32,
    /// Input line that ends the session
    pub exit_command: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            intensity: Intensity::MAX,
            scan_limit: ScanLimit::ALL,
            refresh_interval_ms: DEFAULT_REFRESH_INTERVAL_MS,
            exit_command: DEFAULT_EXIT_COMMAND.into(),
        }
    }
}

impl DisplayConfig {
    /// Register values for the startup sequence
    pub fn chip_settings(&self) -> ChipSettings {
        ChipSettings {
            intensity: self.intensity,
            scan_limit: self.scan_limit,
            decode_mode: DecodeMode::NoDecode,
        }
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms as u64)
    }
}

/// Which wire transport to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum BackendKind {
    /// Kernel spidev device, hardware clocked
    Spi,
    /// Character device of the bit-banging kernel module
    #[default]
    DeviceNode,
    /// Memory-mapped GPIO registers, bit-banged in process
    Mmio,
}

/// `[backend]` section
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BackendConfig {
    pub kind: BackendKind,
    pub spi: SpiConfig,
    pub device_node: DeviceNodeConfig,
    pub mmio: MmioConfig,
}

/// `[backend.spi]` section
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpiConfig {
    pub path: PathBuf,
    pub clock_hz: u32,
}

impl Default for SpiConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("/dev/spidev0.0"),
            clock_hz: 1_000_000,
        }
    }
}

/// `[backend.device_node]` section
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeviceNodeConfig {
    pub path: PathBuf,
}

impl Default for DeviceNodeConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("/dev/gpio_bitbang"),
        }
    }
}

/// `[backend.mmio]` section
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MmioConfig {
    /// Device to map (`/dev/gpiomem` or `/dev/mem`)
    pub path: PathBuf,
    /// Byte offset of the GPIO block within `path`
    pub offset: u64,
    pub clk_pin: u8,
    pub din_pin: u8,
    pub load_pin: u8,
    /// Settle time after each pin change
    pub settle_delay_us: u32,
}

impl Default for MmioConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("/dev/gpiomem"),
            offset: 0,
            clk_pin: 22,
            din_pin: 17,
            load_pin: 27,
            settle_delay_us: DEFAULT_SETTLE_US,
        }
    }
}

impl MmioConfig {
    /// Pins with their role names, in CLK, DIN, LOAD order
    pub fn pins(&self) -> [(&'static str, u8); 3] {
        [
            ("clk", self.clk_pin),
            ("din", self.din_pin),
            ("load", self.load_pin),
        ]
    }
}
