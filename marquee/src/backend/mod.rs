//! Wire transport backends
//!
//! The backend is chosen once at startup from configuration. All three
//! produce the same frames; they differ in who toggles the pins:
//!
//! - `spi`: the SoC SPI peripheral through the kernel spidev driver
//! - `device-node`: the `gpio_bitbang` kernel module, one 2-byte write per frame
//! - `mmio`: this process, through memory-mapped GPIO registers

pub mod device_node;
pub mod mmio;
pub mod spi;

use std::io;
use std::path::PathBuf;

use marquee_core::max7219::Register;
use marquee_core::traits::{TransportError, WireTransport};
use marquee_drivers::SpiTransport;
use marquee_hal::GpioError;
use thiserror::Error;
use tracing::{info, trace};

use crate::config::{BackendConfig, BackendKind};

pub use device_node::DeviceNodeTransport;
pub use mmio::{MappedRegisters, MmioTransport};
pub use spi::SpidevDevice;

/// Backend could not be brought up
#[derive(Debug, Error)]
pub enum InitError {
    #[error("cannot open SPI device {}", .path.display())]
    Spi {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot open device node {}", .path.display())]
    DeviceNode {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot map GPIO registers from {}", .path.display())]
    Map {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("GPIO setup failed: {0:?}")]
    Gpio(GpioError),
}

impl From<GpioError> for InitError {
    fn from(e: GpioError) -> Self {
        InitError::Gpio(e)
    }
}

/// The transport selected at startup
pub enum Backend {
    Spi(SpiTransport<SpidevDevice>),
    DeviceNode(DeviceNodeTransport),
    Mmio(MmioTransport),
}

impl Backend {
    /// Open the backend named by `config.kind`
    pub fn open(config: &BackendConfig) -> Result<Self, InitError> {
        let backend = match config.kind {
            BackendKind::Spi => Backend::Spi(SpiTransport::new(SpidevDevice::open(&config.spi)?)),
            BackendKind::DeviceNode => {
                Backend::DeviceNode(DeviceNodeTransport::open(&config.device_node.path)?)
            }
            BackendKind::Mmio => Backend::Mmio(mmio::open(&config.mmio)?),
        };
        info!(backend = ?config.kind, "Transport ready");
        Ok(backend)
    }

    pub fn kind(&self) -> BackendKind {
        match self {
            Backend::Spi(_) => BackendKind::Spi,
            Backend::DeviceNode(_) => BackendKind::DeviceNode,
            Backend::Mmio(_) => BackendKind::Mmio,
        }
    }
}

impl WireTransport for Backend {
    fn send(&mut self, register: Register, value: u8) -> Result<(), TransportError> {
        trace!(?register, value, "frame");
        match self {
            Backend::Spi(t) => t.send(register, value),
            Backend::DeviceNode(t) => t.send(register, value),
            Backend::Mmio(t) => t.send(register, value),
        }
    }
}
