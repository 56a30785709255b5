//! Marquee Hardware Abstraction Layer
//!
//! This crate defines the traits that sit between the display drivers and
//! a concrete SoC. A chip crate implements them over its own register map,
//! and the application wires the result into a transport.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (marquee)                  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  marquee-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ marquee-hal-  │
//!             │    bcm2835    │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`mmio::RegisterBlock`] - 32-bit memory-mapped register access
//! - [`gpio::GpioBank`] - Pin function select and level control

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod mmio;

// Re-export commonly used types at crate root
pub use gpio::{GpioBank, GpioError, PinFunction};
pub use mmio::RegisterBlock;
