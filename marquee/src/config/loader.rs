//! Configuration file loading and validation

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use marquee_hal_bcm2835::gpio::{check_pin, MAX_PIN, MIN_PIN};
use thiserror::Error;
use tracing::{debug, info};

use super::types::{BackendKind, MarqueeConfig};

/// Embedded default configuration
pub const EMBEDDED_CONFIG: &str = include_str!("../../marquee.toml");

/// Longest accepted exit command
const MAX_EXIT_COMMAND_LEN: usize = 32;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("refresh_interval_ms must be greater than zero")]
    ZeroInterval,
    #[error(
        "exit_command must be 1 to {} characters without surrounding whitespace",
        MAX_EXIT_COMMAND_LEN
    )]
    InvalidExitCommand,
    #[error("mmio {name} pin {pin} outside {}..={}", MIN_PIN, MAX_PIN)]
    InvalidPin { name: &'static str, pin: u8 },
    #[error("mmio pin {0} assigned to more than one signal")]
    DuplicatePin(u8),
}

/// Load configuration from `path`, or the embedded defaults when `None`
pub fn load(path: Option<&Path>) -> Result<MarqueeConfig, ConfigError> {
    match path {
        Some(path) => {
            info!(path = %path.display(), "Loading configuration");
            let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            parse(&text)
        }
        None => {
            debug!("No configuration file given, using embedded defaults");
            parse(EMBEDDED_CONFIG)
        }
    }
}

/// Parse and validate a TOML document
pub fn parse(text: &str) -> Result<MarqueeConfig, ConfigError> {
    let config: MarqueeConfig = toml::from_str(text)?;
    config.validate()?;
    Ok(config)
}

impl MarqueeConfig {
    /// Check cross-field constraints serde cannot express
    ///
    /// Intensity and scan limit ranges are enforced while parsing.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.display.refresh_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }

        let exit = &self.display.exit_command;
        if exit.is_empty() || exit.len() > MAX_EXIT_COMMAND_LEN || exit.trim() != exit {
            return Err(ConfigError::InvalidExitCommand);
        }

        // Pins only matter to the backend that drives them
        if self.backend.kind != BackendKind::Mmio {
            return Ok(());
        }

        let pins = self.backend.mmio.pins();
        for (i, &(name, pin)) in pins.iter().enumerate() {
            check_pin(pin).map_err(|_| ConfigError::InvalidPin { name, pin })?;
            if pins[..i].iter().any(|&(_, other)| other == pin) {
                return Err(ConfigError::DuplicatePin(pin));
            }
        }

        Ok(())
    }
}
