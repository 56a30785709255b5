//! Marquee - scrolling text on a MAX7219 seven-segment display
//!
//! Linux application crate. Reads lines from stdin and scrolls them across
//! an 8-digit display driven through one of three backends:
//!
//! - `spi`: kernel spidev device
//! - `device-node`: the `gpio_bitbang` kernel module's character device
//! - `mmio`: memory-mapped BCM2835 GPIO registers
//!
//! The refresh loop runs as an embassy task on the std executor; the
//! session loop in `main` feeds it new messages.

#![deny(unsafe_code)]

pub mod backend;
pub mod channels;
pub mod cli;
pub mod config;
pub mod input;
pub mod logging;
pub mod session;
pub mod tasks;
