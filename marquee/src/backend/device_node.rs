//! Device node transport
//!
//! The `gpio_bitbang` kernel module exposes a character device that takes
//! exactly two bytes per `write` and bit-bangs them as one frame. It
//! assembles the word as `buf[1] << 8 | buf[0]`, so the frame goes out in
//! little-endian byte order.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use marquee_core::max7219::{Frame, Register};
use marquee_core::traits::{TransportError, WireTransport};
use tracing::debug;

use super::InitError;

/// Frames written to a bit-banging character device
pub struct DeviceNodeTransport {
    file: File,
    path: PathBuf,
}

impl DeviceNodeTransport {
    /// Open the device node for writing
    pub fn open(path: &Path) -> Result<Self, InitError> {
        let file = OpenOptions::new()
            .write(true)
            .open(path)
            .map_err(|source| InitError::DeviceNode {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Bytes of one `write` call for a frame
    pub fn encode(frame: Frame) -> [u8; 2] {
        frame.word().to_le_bytes()
    }
}

impl WireTransport for DeviceNodeTransport {
    fn send(&mut self, register: Register, value: u8) -> Result<(), TransportError> {
        let bytes = Self::encode(Frame::new(register, value));
        match self.file.write(&bytes) {
            Ok(2) => Ok(()),
            Ok(written) => {
                debug!(written, path = %self.path.display(), "Short write to device node");
                Err(TransportError::ShortWrite)
            }
            Err(e) => {
                debug!(error = %e, path = %self.path.display(), "Device node write failed");
                Err(TransportError::Io)
            }
        }
    }
}
