//! Memory-mapped GPIO backend
//!
//! Maps the BCM2835 GPIO register block into the process and bit-bangs
//! frames on three output pins. `/dev/gpiomem` exposes just the GPIO block
//! at offset 0 and needs no root; `/dev/mem` needs root and the physical
//! GPIO base as offset.

#![allow(unsafe_code)]

use std::fs::OpenOptions;
use std::io;
use std::os::unix::fs::OpenOptionsExt;
use std::os::unix::io::AsRawFd;
use std::path::Path;
use std::ptr::{self, NonNull};
use std::sync::Arc;

use embassy_time::Delay;
use marquee_drivers::{BitBangPins, BitBangTransport};
use marquee_hal::RegisterBlock;
use marquee_hal_bcm2835::{Bcm2835Gpio, GpioOutput, GPIO_BLOCK_LEN};
use tracing::{debug, info};

use super::InitError;
use crate::config::MmioConfig;

/// Bit-bang transport over mapped GPIO pins
pub type MmioTransport = BitBangTransport<GpioOutput<MappedRegisters>, Delay>;

/// An `mmap`ed register window, unmapped on drop
struct Mapping {
    base: NonNull<u32>,
    len: usize,
}

// The mapping is plain device memory; every access is a volatile 32-bit
// load or store.
unsafe impl Send for Mapping {}
unsafe impl Sync for Mapping {}

impl Drop for Mapping {
    fn drop(&mut self) {
        unsafe {
            libc::munmap(self.base.as_ptr().cast(), self.len);
        }
    }
}

/// Shared handle to a mapped register window
///
/// Clones share one mapping, which is released when the last clone drops.
/// Offsets past the end of the window read as zero and writes to them are
/// ignored.
#[derive(Clone)]
pub struct MappedRegisters {
    map: Arc<Mapping>,
}

impl MappedRegisters {
    /// Map `len` bytes of `path` starting at byte `offset`
    pub fn map(path: &Path, offset: u64, len: usize) -> Result<Self, InitError> {
        let map_err = |source| InitError::Map {
            path: path.to_path_buf(),
            source,
        };

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .custom_flags(libc::O_SYNC)
            .open(path)
            .map_err(map_err)?;
        let offset = libc::off_t::try_from(offset)
            .map_err(|_| map_err(io::Error::from(io::ErrorKind::InvalidInput)))?;

        let addr = unsafe {
            libc::mmap(
                ptr::null_mut(),
                len,
                libc::PROT_READ | libc::PROT_WRITE,
                libc::MAP_SHARED,
                file.as_raw_fd(),
                offset,
            )
        };
        if addr == libc::MAP_FAILED {
            return Err(map_err(io::Error::last_os_error()));
        }
        let base = NonNull::new(addr.cast::<u32>())
            .ok_or_else(|| map_err(io::Error::from(io::ErrorKind::AddrNotAvailable)))?;

        debug!(path = %path.display(), offset, len, "Mapped register window");
        Ok(Self {
            map: Arc::new(Mapping { base, len }),
        })
    }

    pub fn len(&self) -> usize {
        self.map.len
    }

    pub fn is_empty(&self) -> bool {
        self.map.len == 0
    }

    fn word(&self, offset: usize) -> Option<*mut u32> {
        if offset % 4 == 0 && offset + 4 <= self.map.len {
            // In bounds of the mapping checked above
            Some(unsafe { self.map.base.as_ptr().add(offset / 4) })
        } else {
            None
        }
    }
}

impl RegisterBlock for MappedRegisters {
    fn read32(&self, offset: usize) -> u32 {
        match self.word(offset) {
            Some(reg) => unsafe { ptr::read_volatile(reg) },
            None => 0,
        }
    }

    fn write32(&self, offset: usize, value: u32) {
        if let Some(reg) = self.word(offset) {
            unsafe { ptr::write_volatile(reg, value) }
        }
    }
}

/// Map the GPIO block and claim the CLK, DIN and LOAD pins as outputs
pub fn open(config: &MmioConfig) -> Result<MmioTransport, InitError> {
    let regs = MappedRegisters::map(&config.path, config.offset, GPIO_BLOCK_LEN)?;
    let gpio = Bcm2835Gpio::new(regs);

    let pins = BitBangPins {
        clk: gpio.output(config.clk_pin)?,
        din: gpio.output(config.din_pin)?,
        load: gpio.output(config.load_pin)?,
    };
    info!(
        clk = config.clk_pin,
        din = config.din_pin,
        load = config.load_pin,
        "GPIO pins configured as outputs"
    );

    Ok(BitBangTransport::new(pins, Delay, config.settle_delay_us))
}
