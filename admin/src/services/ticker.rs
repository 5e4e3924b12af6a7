use std::sync::atomic::Ordering;
use std::time::Duration;

use scorewatch_shared::format_remaining;
use tracing::debug;

use crate::config::tick_interval;
use crate::state::AppState;

/// Start the 1-second local countdown ticker.
///
/// Idempotent: exactly one ticker is live per process. Returns false when one
/// is already running and no new task was spawned.
pub fn spawn(state: AppState) -> bool {
    if state.ticker_live.swap(true, Ordering::AcqRel) {
        debug!("countdown ticker already running, not spawning another");
        return false;
    }
    tokio::spawn(run_with(state, tick_interval()));
    true
}

async fn run_with(state: AppState, tick: Duration) {
    let mut interval = tokio::time::interval(tick);
    // Consume the immediate first tick so the first decrement lands a full
    // interval after the authoritative value was applied.
    interval.tick().await;

    loop {
        interval.tick().await;

        let remaining = {
            let mut admin = state.admin.write().await;
            admin.countdown.tick();
            admin.countdown.remaining()
        };
        if let Some(remaining) = remaining {
            println!("countdown: {}", format_remaining(remaining));
        }
    }
}
