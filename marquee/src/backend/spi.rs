//! spidev SPI device
//!
//! Adapts a kernel spidev handle to `embedded_hal::spi::SpiDevice` so the
//! generic [`marquee_drivers::SpiTransport`] can drive it. The kernel
//! asserts chip select for the duration of one `SPI_IOC_MESSAGE`, which
//! maps onto one `SpiDevice` transaction.

use std::fmt;
use std::io;

use embedded_hal::spi::{self, ErrorKind, ErrorType, Operation, SpiDevice};
use spidev::{SpiModeFlags, Spidev, SpidevOptions, SpidevTransfer};
use tracing::debug;

use super::InitError;
use crate::config::SpiConfig;

/// spidev errors
#[derive(Debug)]
pub enum SpidevError {
    Io(io::Error),
    /// Full-duplex operations are not needed by the display
    Unsupported,
}

impl fmt::Display for SpidevError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpidevError::Io(e) => write!(f, "spidev transfer failed: {}", e),
            SpidevError::Unsupported => f.write_str("unsupported SPI operation"),
        }
    }
}

impl spi::Error for SpidevError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// A spidev handle configured for the MAX7219
pub struct SpidevDevice {
    spi: Spidev,
}

impl SpidevDevice {
    /// Open and configure the device: mode 0, 8-bit words, MSB first
    pub fn open(config: &SpiConfig) -> Result<Self, InitError> {
        let init_err = |source| InitError::Spi {
            path: config.path.clone(),
            source,
        };

        let mut spi = Spidev::open(&config.path).map_err(init_err)?;
        let options = SpidevOptions::new()
            .bits_per_word(8)
            .max_speed_hz(config.clock_hz)
            .lsb_first(false)
            .mode(SpiModeFlags::SPI_MODE_0)
            .build();
        spi.configure(&options).map_err(init_err)?;

        debug!(path = %config.path.display(), clock_hz = config.clock_hz, "spidev configured");
        Ok(Self { spi })
    }
}

impl ErrorType for SpidevDevice {
    type Error = SpidevError;
}

impl SpiDevice for SpidevDevice {
    fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), Self::Error> {
        let mut transfers = Vec::with_capacity(operations.len());
        for op in operations.iter_mut() {
            let transfer = match op {
                Operation::Write(buf) => SpidevTransfer::write(*buf),
                Operation::Read(buf) => SpidevTransfer::read(buf),
                Operation::DelayNs(ns) => {
                    let us = ns.div_ceil(1000).min(u16::MAX as u32) as u16;
                    SpidevTransfer::delay(us)
                }
                Operation::Transfer(..) | Operation::TransferInPlace(_) => {
                    return Err(SpidevError::Unsupported)
                }
            };
            transfers.push(transfer);
        }
        self.spi
            .transfer_multiple(&mut transfers)
            .map_err(SpidevError::Io)
    }
}
