//! Marquee - scrolling text for MAX7219 seven-segment displays
//!
//! Main binary. Loads configuration, opens the transport backend, configures
//! the chip and then scrolls every line typed on stdin until the exit
//! command or end of input.

use anyhow::{anyhow, Context};
use clap::Parser;
use embassy_executor::Spawner;
use embassy_time::Duration;
use tracing::{error, info, warn};

use marquee::backend::Backend;
use marquee::channels::{InputEvent, INPUT_CHANNEL, REFRESH};
use marquee::cli::Cli;
use marquee::config;
use marquee::input::spawn_stdin_reader;
use marquee::logging::setup_logging;
use marquee::session::{DisplaySession, Outcome};
use marquee::tasks::refresh_task;
use marquee_drivers::Max7219;

/// Upper bound on waiting for the refresh task at exit
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(2);

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    setup_logging();

    let code = match run(spawner).await {
        Ok(()) => 0,
        Err(e) => {
            error!("{:#}", e);
            1
        }
    };

    // The executor never returns on its own
    std::process::exit(code);
}

async fn run(spawner: Spawner) -> anyhow::Result<()> {
    let cli = Cli::parse();
    info!("Marquee starting...");

    let mut config = config::load(cli.config.as_deref()).context("loading configuration")?;
    if let Some(kind) = cli.backend {
        config.backend.kind = kind;
    }

    let backend = Backend::open(&config.backend)?;
    let mut driver = Max7219::new(backend);
    let chip = config.display.chip_settings();

    if cli.test_pattern {
        if let Err(e) = driver.init(&chip) {
            warn!(error = ?e, "Startup register write failed");
        }
        driver
            .show_test_pattern()
            .map_err(|e| anyhow!("test pattern not fully written: {:?}", e))?;
        info!("Test pattern shown");
        return Ok(());
    }

    let exit_command = config.display.exit_command.as_str();
    let mut session = DisplaySession::start(driver, &chip, exit_command, &REFRESH);
    spawn_stdin_reader().context("starting stdin reader")?;
    info!("Type \"{}\" to quit", exit_command);

    loop {
        match INPUT_CHANNEL.receive().await {
            InputEvent::Line(line) => match session.handle_line(&line) {
                Outcome::Shown {
                    start: Some(driver),
                    ..
                } => {
                    spawner
                        .spawn(refresh_task(driver, config.display.refresh_interval()))
                        .map_err(|e| anyhow!("failed to start refresh task: {:?}", e))?;
                }
                Outcome::Shown { .. } | Outcome::Ignored => {}
                Outcome::Exit => {
                    info!("Exit command received");
                    break;
                }
            },
            InputEvent::Closed => {
                info!("Input closed");
                break;
            }
        }
    }

    session.shutdown(SHUTDOWN_TIMEOUT).await;
    info!("Quitting");
    Ok(())
}
