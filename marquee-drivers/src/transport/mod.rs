//! Wire transports
//!
//! Both transports produce the same 16-bit MSB-first frame; they differ in
//! who generates the clock.

pub mod bitbang;
pub mod spi;

pub use bitbang::{BitBangPins, BitBangTransport, DEFAULT_SETTLE_US};
pub use spi::SpiTransport;
