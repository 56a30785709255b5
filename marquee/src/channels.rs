//! Inter-task communication channels
//!
//! Defines the statics shared between the stdin reader thread, the session
//! loop and the refresh task. Uses embassy-sync primitives over the std
//! critical-section implementation.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

use marquee_core::session::InputLine;
use marquee_core::ScrollBuffer;

/// Channel capacity for input lines
const INPUT_CHANNEL_SIZE: usize = 4;

/// Events produced by the stdin reader
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// One line, line ending stripped and truncated
    Line(InputLine),
    /// End of input
    Closed,
}

/// Channel type between the stdin reader and the session loop
pub type InputChannel = Channel<CriticalSectionRawMutex, InputEvent, INPUT_CHANNEL_SIZE>;

/// Lines typed by the user
pub static INPUT_CHANNEL: InputChannel = Channel::new();

/// Hand-off points between the session and the refresh task
///
/// The refresh task is the only owner of the live buffer and the
/// transport. The session talks to it exclusively through these signals.
pub struct RefreshControl {
    /// Newly compiled message, adopted at the next cycle boundary
    pub replace: Signal<CriticalSectionRawMutex, ScrollBuffer>,
    /// Request to stop after the current cycle
    pub stop: Signal<CriticalSectionRawMutex, ()>,
    /// Raised by the refresh task once the transport has been released
    pub stopped: Signal<CriticalSectionRawMutex, ()>,
}

impl RefreshControl {
    pub const fn new() -> Self {
        Self {
            replace: Signal::new(),
            stop: Signal::new(),
            stopped: Signal::new(),
        }
    }
}

impl Default for RefreshControl {
    fn default() -> Self {
        Self::new()
    }
}

/// Control signals of the running refresh task
pub static REFRESH: RefreshControl = RefreshControl::new();
