//! Refresh task
//!
//! Repaints the display and scrolls the message by one glyph per cycle.
//! New messages and the stop request arrive through [`RefreshControl`];
//! both are only acted on between cycles, so a frame is never cut short.

use embassy_futures::select::{select, Either};
use embassy_time::{Duration, Timer};
use marquee_core::traits::WireTransport;
use marquee_core::ScrollBuffer;
use marquee_drivers::Max7219;
use tracing::{debug, info, trace, warn};

use crate::backend::Backend;
use crate::channels::{RefreshControl, REFRESH};

/// Refresh task - owns the display until told to stop
#[embassy_executor::task]
pub async fn refresh_task(driver: Max7219<Backend>, interval: Duration) {
    let transport = run_refresh(driver, &REFRESH, interval).await;
    drop(transport);
    info!("Refresh task stopped, transport released");
    REFRESH.stopped.signal(());
}

/// Refresh loop body; returns the transport once stopped
pub async fn run_refresh<T: WireTransport>(
    mut driver: Max7219<T>,
    control: &RefreshControl,
    interval: Duration,
) -> T {
    info!(interval_ms = interval.as_millis(), "Refresh task started");
    let mut buffer = ScrollBuffer::new();

    loop {
        if let Some(next) = control.replace.try_take() {
            buffer = next;
            debug!(glyphs = buffer.len(), "New message adopted");
            if let Err(e) = driver.clear() {
                warn!(error = ?e, "Failed to clear display");
            }
        }

        let report = driver.refresh(&mut buffer);
        if let Some(e) = report.first_error {
            warn!(dropped = report.dropped, error = ?e, "Frames dropped");
        }

        let violations = buffer.take_bounds_violations();
        if violations > 0 {
            warn!(violations, len = buffer.len(), "Scroll index out of range");
        }
        trace!(cursor = buffer.cursor(), "Refresh cycle done");

        if let Either::Second(()) = select(Timer::after(interval), control.stop.wait()).await {
            break;
        }
    }

    if let Err(e) = driver.clear() {
        warn!(error = ?e, "Failed to clear display on stop");
    }
    driver.release()
}
