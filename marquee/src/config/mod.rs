//! Configuration loading and parsing
//!
//! Settings come from a TOML file (`--config`) or, when none is given, the
//! defaults compiled into the binary from `marquee.toml`.

pub mod loader;
pub mod types;

pub use loader::{load, parse, ConfigError, EMBEDDED_CONFIG};
pub use types::{
    BackendConfig, BackendKind, DeviceNodeConfig, DisplayConfig, MarqueeConfig, MmioConfig,
    SpiConfig,
};
