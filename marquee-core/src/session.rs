//! Session state machine and input commands
//!
//! A session starts uninitialized, becomes ready once the chip has been
//! configured, starts scrolling on the first message and closes on the exit
//! command or end of input. Closing is final.

/// Longest input line kept, in characters
pub const MAX_INPUT_CHARS: usize = 128;

/// Byte capacity needed for [`MAX_INPUT_CHARS`] characters of UTF-8
pub const MAX_INPUT_BYTES: usize = MAX_INPUT_CHARS * 4;

/// One line of user input
pub type InputLine = heapless::String<MAX_INPUT_BYTES>;

/// Session states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SessionState {
    /// Transport open, chip not configured yet
    Uninitialized,
    /// Chip configured, waiting for the first message
    Ready,
    /// Refresh loop running
    Scrolling,
    /// Torn down; the transport has been released
    Closed,
}

/// Session events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SessionEvent {
    /// Startup register sequence sent
    Initialized,
    /// New message compiled and handed to the refresh loop
    MessageAccepted,
    /// Exit command or end of input
    Shutdown,
}

impl SessionState {
    /// Process an event and return the next state
    pub fn transition(self, event: SessionEvent) -> Self {
        use SessionEvent::*;
        use SessionState::*;

        match (self, event) {
            (Uninitialized, Initialized) => Ready,
            (Ready, MessageAccepted) => Scrolling,
            (Scrolling, MessageAccepted) => Scrolling,
            (Closed, _) => Closed,
            (_, Shutdown) => Closed,
            _ => self,
        }
    }

    /// Check if new messages are accepted
    pub fn accepts_input(&self) -> bool {
        matches!(self, SessionState::Ready | SessionState::Scrolling)
    }

    /// Check if the refresh loop has been started
    pub fn refresh_running(&self) -> bool {
        matches!(self, SessionState::Scrolling)
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, SessionState::Closed)
    }
}

/// What an input line asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command<'a> {
    /// Replace the scrolling message
    Show(&'a str),
    /// End the session
    Exit,
}

impl<'a> Command<'a> {
    /// Interpret a line; surrounding whitespace is ignored for the exit check
    pub fn parse(line: &'a str, exit_command: &str) -> Self {
        if line.trim() == exit_command {
            Command::Exit
        } else {
            Command::Show(line)
        }
    }
}

/// Strip the line ending and keep at most [`MAX_INPUT_CHARS`] characters
pub fn truncate_line(line: &str) -> InputLine {
    let line = line.trim_end_matches(&['\r', '\n'][..]);
    let mut out = InputLine::new();
    for c in line.chars().take(MAX_INPUT_CHARS) {
        // Capacity covers MAX_INPUT_CHARS of any width
        let _ = out.push(c);
    }
    out
}
