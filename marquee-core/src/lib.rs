//! Board-agnostic core logic for the Marquee display
//!
//! This crate contains everything that does not depend on how frames reach
//! the chip:
//!
//! - Seven-segment glyph table and text encoding
//! - Scroll buffer with circular read addressing
//! - MAX7219 register map and setting types
//! - Wire transport trait
//! - Refresh cycle and session state machine
//! - Display settings

#![no_std]
#![deny(unsafe_code)]

pub mod buffer;
pub mod config;
pub mod glyph;
pub mod max7219;
pub mod refresh;
pub mod session;
pub mod text;
pub mod traits;

pub use buffer::{BoundsViolation, BufferFull, ScrollBuffer, BUFFER_CAPACITY};
pub use glyph::{EncodingError, Glyph};
pub use max7219::{Frame, Register};
pub use traits::{TransportError, WireTransport};
