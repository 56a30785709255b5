//! Memory-mapped register access
//!
//! Peripheral blocks are exposed as a window of 32-bit registers addressed
//! by byte offset from the start of the block. Implementations decide how
//! the window is obtained (an `mmap` of `/dev/gpiomem`, a test double, ...).

/// A window of 32-bit peripheral registers
///
/// Accesses take `&self` because the hardware, not Rust, owns the state
/// behind each register. Offsets are in bytes and must be 4-byte aligned.
pub trait RegisterBlock {
    /// Read the register at `offset`
    fn read32(&self, offset: usize) -> u32;

    /// Write `value` to the register at `offset`
    fn write32(&self, offset: usize, value: u32);

    /// Read, transform and write back a register
    ///
    /// Not atomic with respect to other writers of the same register.
    fn modify32<F>(&self, offset: usize, f: F)
    where
        F: FnOnce(u32) -> u32,
    {
        let value = self.read32(offset);
        self.write32(offset, f(value));
    }
}

impl<T: RegisterBlock + ?Sized> RegisterBlock for &T {
    fn read32(&self, offset: usize) -> u32 {
        (**self).read32(offset)
    }

    fn write32(&self, offset: usize, value: u32) {
        (**self).write32(offset, value)
    }
}
