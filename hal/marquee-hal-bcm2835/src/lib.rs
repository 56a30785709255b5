//! BCM2835 implementation of the Marquee HAL
//!
//! Covers the GPIO controller of the Broadcom SoC family used on Raspberry
//! Pi boards. The register layout is shared by BCM2835, BCM2836 and BCM2837;
//! only the peripheral base address differs.
//!
//! The crate never maps memory itself. It works on any
//! [`marquee_hal::RegisterBlock`], so the application decides whether the
//! window comes from `/dev/gpiomem`, `/dev/mem` or a test double.

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;

pub use gpio::{Bcm2835Gpio, GpioOutput};

/// Peripheral base of the BCM2835 (Pi 1, Zero)
pub const PERIPHERAL_BASE_BCM2835: u32 = 0x2000_0000;

/// Peripheral base of the BCM2836/BCM2837 (Pi 2, Pi 3)
pub const PERIPHERAL_BASE_BCM2836: u32 = 0x3F00_0000;

/// Offset of the GPIO controller from the peripheral base
pub const GPIO_OFFSET: u32 = 0x0020_0000;

/// Size of the GPIO register window in bytes
pub const GPIO_BLOCK_LEN: usize = 0xB4;

/// Physical address of the GPIO controller for a given peripheral base
pub const fn gpio_base(peripheral_base: u32) -> u32 {
    peripheral_base + GPIO_OFFSET
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gpio_base() {
        assert_eq!(gpio_base(PERIPHERAL_BASE_BCM2836), 0x3F20_0000);
        assert_eq!(gpio_base(PERIPHERAL_BASE_BCM2835), 0x2020_0000);
    }
}
