//! Hardware abstraction traits
//!
//! These traits define the interface between the display logic and the
//! hardware-specific ways of reaching the chip.

pub mod transport;

pub use transport::{TransportError, WireTransport};
