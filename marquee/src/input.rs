//! stdin reader
//!
//! Reading a terminal blocks, so it runs on its own thread and feeds lines
//! into [`INPUT_CHANNEL`] for the session loop on the executor.

use std::io::{self, BufRead, IsTerminal, Write};
use std::thread::{self, JoinHandle};

use embassy_futures::block_on;
use marquee_core::session::truncate_line;
use tracing::{debug, warn};

use crate::channels::{InputChannel, InputEvent, INPUT_CHANNEL};

/// Prompt shown before each line on an interactive terminal
const PROMPT: &str = "Text to scroll: ";

/// Start the reader thread on stdin
pub fn spawn_stdin_reader() -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("stdin-reader".into())
        .spawn(|| {
            let stdin = io::stdin();
            let prompt = stdin.is_terminal().then_some(PROMPT);
            read_lines(stdin.lock(), prompt, &INPUT_CHANNEL);
        })
}

/// Forward lines from `reader` until end of input or a read error
///
/// Always finishes with [`InputEvent::Closed`].
pub fn read_lines<R: BufRead>(mut reader: R, prompt: Option<&str>, channel: &InputChannel) {
    let mut line = String::new();
    loop {
        if let Some(prompt) = prompt {
            print!("{}", prompt);
            let _ = io::stdout().flush();
        }

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => {
                debug!("End of input");
                break;
            }
            Ok(_) => block_on(channel.send(InputEvent::Line(truncate_line(&line)))),
            Err(e) => {
                warn!(error = %e, "Failed to read input");
                break;
            }
        }
    }
    block_on(channel.send(InputEvent::Closed));
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_sync::channel::Channel;
    use marquee_core::session::MAX_INPUT_CHARS;

    #[test]
    fn test_lines_then_closed() {
        let channel: InputChannel = Channel::new();
        read_lines("HELLO\r\n1.2.3\n".as_bytes(), None, &channel);

        let events: Vec<InputEvent> = std::iter::from_fn(|| channel.try_receive().ok()).collect();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0], InputEvent::Line("HELLO".try_into().unwrap()));
        assert_eq!(events[1], InputEvent::Line("1.2.3".try_into().unwrap()));
        assert_eq!(events[2], InputEvent::Closed);
    }

    #[test]
    fn test_last_line_without_newline() {
        let channel: InputChannel = Channel::new();
        read_lines("exit".as_bytes(), None, &channel);

        assert_eq!(
            channel.try_receive().ok(),
            Some(InputEvent::Line("exit".try_into().unwrap()))
        );
        assert_eq!(channel.try_receive().ok(), Some(InputEvent::Closed));
    }

    #[test]
    fn test_long_line_truncated() {
        let channel: InputChannel = Channel::new();
        let long = "8".repeat(300) + "\n";
        read_lines(long.as_bytes(), None, &channel);

        match channel.try_receive() {
            Ok(InputEvent::Line(line)) => assert_eq!(line.len(), MAX_INPUT_CHARS),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_empty_input_closes() {
        let channel: InputChannel = Channel::new();
        read_lines(io::empty(), None, &channel);
        assert_eq!(channel.try_receive().ok(), Some(InputEvent::Closed));
    }
}
