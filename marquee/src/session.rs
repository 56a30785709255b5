//! Command session
//!
//! Owns the user side of the display: compiles each input line into a
//! fresh scroll buffer, hands it to the refresh task, starts that task on
//! the first message and tears everything down on exit.

use embassy_time::{with_timeout, Duration};
use marquee_core::config::ChipSettings;
use marquee_core::session::{Command, SessionEvent, SessionState};
use marquee_core::text::{encode_text, EncodeReport};
use marquee_core::traits::WireTransport;
use marquee_core::{ScrollBuffer, BUFFER_CAPACITY};
use marquee_drivers::Max7219;
use tracing::{info, warn};

use crate::channels::RefreshControl;

/// Result of handling one input line
pub enum Outcome<T> {
    /// Message queued for display
    Shown {
        report: EncodeReport,
        /// Driver to start the refresh task with; only on the first message
        start: Option<Max7219<T>>,
    },
    /// Session is not accepting input
    Ignored,
    /// Exit command received
    Exit,
}

/// One display session, from chip setup to teardown
///
/// The refresh task is spawned by the caller; the `stop` and `stopped`
/// signals in [`RefreshControl`] plus a bounded wait replace a join handle.
pub struct DisplaySession<'a, T> {
    state: SessionState,
    /// Held until the refresh task takes ownership
    driver: Option<Max7219<T>>,
    control: &'a RefreshControl,
    exit_command: String,
}

impl<'a, T: WireTransport> DisplaySession<'a, T> {
    /// Configure the chip and blank the display
    ///
    /// Register writes that fail are logged and skipped; the chip picks up
    /// the digit contents on the next refresh regardless.
    pub fn start(
        mut driver: Max7219<T>,
        chip: &ChipSettings,
        exit_command: &str,
        control: &'a RefreshControl,
    ) -> Self {
        if let Err(e) = driver.init(chip) {
            warn!(error = ?e, "Startup register write failed");
        }
        if let Err(e) = driver.clear() {
            warn!(error = ?e, "Failed to clear display");
        }
        info!(
            intensity = chip.intensity.level(),
            scan_limit = chip.scan_limit.last_digit(),
            "Display initialized"
        );

        Self {
            state: SessionState::Uninitialized.transition(SessionEvent::Initialized),
            driver: Some(driver),
            control,
            exit_command: exit_command.into(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Handle one input line
    pub fn handle_line(&mut self, line: &str) -> Outcome<T> {
        if !self.state.accepts_input() {
            return Outcome::Ignored;
        }

        let text = match Command::parse(line, &self.exit_command) {
            Command::Exit => return Outcome::Exit,
            Command::Show(text) => text,
        };

        let mut buffer = ScrollBuffer::new();
        let report = encode_text(text, &mut buffer);
        if let Some(e) = report.first_error {
            warn!(
                count = report.unsupported,
                first = ?e,
                "Unsupported characters shown as blanks"
            );
        }
        if report.truncated {
            warn!(capacity = BUFFER_CAPACITY, "Message truncated");
        }
        info!(glyphs = report.glyphs, "Message accepted");

        self.control.replace.signal(buffer);
        let start = if self.state.refresh_running() {
            None
        } else {
            self.driver.take()
        };
        self.state = self.state.transition(SessionEvent::MessageAccepted);

        Outcome::Shown { report, start }
    }

    /// Stop the refresh task and release the transport
    ///
    /// Waits at most `timeout` for the refresh task. If it never started,
    /// the display is cleared here and the transport is returned.
    pub async fn shutdown(mut self, timeout: Duration) -> Option<T> {
        let released = match self.driver.take() {
            Some(mut driver) => {
                if let Err(e) = driver.clear() {
                    warn!(error = ?e, "Failed to clear display");
                }
                Some(driver.release())
            }
            None => {
                self.control.stop.signal(());
                if with_timeout(timeout, self.control.stopped.wait())
                    .await
                    .is_err()
                {
                    warn!(
                        timeout_ms = timeout.as_millis(),
                        "Refresh task did not stop in time"
                    );
                }
                None
            }
        };

        self.state = self.state.transition(SessionEvent::Shutdown);
        info!("Session closed");
        released
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::run_refresh;
    use embassy_futures::block_on;
    use embassy_futures::join::join;
    use embassy_time::Timer;
    use marquee_core::max7219::{Frame, Register};
    use marquee_core::traits::TransportError;
    use marquee_core::Glyph;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Transport whose frame log outlives it
    #[derive(Clone, Default)]
    struct SharedTransport {
        frames: Rc<RefCell<Vec<Frame>>>,
    }

    impl WireTransport for SharedTransport {
        fn send(&mut self, register: Register, value: u8) -> Result<(), TransportError> {
            self.frames.borrow_mut().push(Frame::new(register, value));
            Ok(())
        }
    }

    fn start(control: &RefreshControl) -> (DisplaySession<'_, SharedTransport>, SharedTransport) {
        let transport = SharedTransport::default();
        let session = DisplaySession::start(
            Max7219::new(transport.clone()),
            &ChipSettings::default(),
            "exit",
            control,
        );
        (session, transport)
    }

    #[test]
    fn test_start_sends_init_then_clear() {
        let control = RefreshControl::new();
        let (session, transport) = start(&control);

        assert_eq!(session.state(), SessionState::Ready);
        let words: Vec<u16> = transport.frames.borrow().iter().map(|f| f.word()).collect();
        assert_eq!(&words[..5], &[0x0B07, 0x0900, 0x0F00, 0x0A0F, 0x0C01]);
        assert_eq!(words.len(), 13);
        assert!(words[5..].iter().all(|w| w & 0xFF == 0));
    }

    #[test]
    fn test_first_message_hands_over_driver_once() {
        let control = RefreshControl::new();
        let (mut session, _) = start(&control);

        let Outcome::Shown { report, start } = session.handle_line("HELLO") else {
            panic!("expected message");
        };
        assert_eq!(report.glyphs, 5);
        assert!(start.is_some());
        assert_eq!(session.state(), SessionState::Scrolling);

        let Outcome::Shown { start, .. } = session.handle_line("WORLD") else {
            panic!("expected message");
        };
        assert!(start.is_none());

        // Only the latest message is pending
        let pending = control.replace.try_take().unwrap();
        assert_eq!(pending.len(), 5);
        assert_eq!(pending.get(0), Glyph::BLANK); // 'W' has no glyph
        assert_eq!(pending.get(1), Glyph::from_char('O').unwrap());
    }

    #[test]
    fn test_exit_command() {
        let control = RefreshControl::new();
        let (mut session, _) = start(&control);

        assert!(matches!(session.handle_line("exit"), Outcome::Exit));
        assert!(!control.replace.signaled());
    }

    #[test]
    fn test_shutdown_without_refresh_returns_transport() {
        let control = RefreshControl::new();
        let (session, transport) = start(&control);

        let released = block_on(session.shutdown(Duration::from_millis(10)));
        assert!(released.is_some());
        // init + clear + clear on shutdown
        assert_eq!(transport.frames.borrow().len(), 21);
        assert!(!control.stop.signaled());
    }

    #[test]
    fn test_shutdown_stops_refresh_task() {
        let control = RefreshControl::new();
        let (mut session, transport) = start(&control);

        let Outcome::Shown {
            start: Some(driver),
            ..
        } = session.handle_line("1.2.3.")
        else {
            panic!("expected driver hand-over");
        };

        let (_, released) = block_on(join(
            async {
                let t = run_refresh(driver, &control, Duration::from_millis(1)).await;
                drop(t);
                control.stopped.signal(());
            },
            async {
                Timer::after(Duration::from_millis(10)).await;
                session.shutdown(Duration::from_secs(1)).await
            },
        ));

        assert!(released.is_none());
        let frames = transport.frames.borrow();
        let dotted_one = Glyph::from_char('1').unwrap().with_dot().bits();
        assert!(frames.iter().any(|f| f.value == dotted_one));
        // Display is left blank
        assert!(frames[frames.len() - 8..].iter().all(|f| f.value == 0));
    }

    #[test]
    fn test_shutdown_times_out() {
        let control = RefreshControl::new();
        let (mut session, _) = start(&control);
        let _driver = match session.handle_line("HI") {
            Outcome::Shown { start, .. } => start,
            _ => None,
        };

        // Nobody runs the refresh loop, so nobody raises `stopped`
        let released = block_on(session.shutdown(Duration::from_millis(5)));
        assert!(released.is_none());
        assert!(control.stop.signaled());
    }
}
