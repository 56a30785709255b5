//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in marquee-core:
//!
//! - Wire transports (GPIO bit-bang, SPI peripheral)
//! - MAX7219 chip driver (startup sequence, clear, test pattern, refresh)

#![no_std]
#![deny(unsafe_code)]

pub mod max7219;
pub mod transport;

pub use max7219::Max7219;
pub use transport::{BitBangPins, BitBangTransport, SpiTransport};
