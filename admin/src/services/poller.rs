use chrono::{DateTime, Utc};
use scorewatch_shared::{SessionsSnapshot, format_remaining};
use tracing::{debug, warn};

use crate::config::poll_interval;
use crate::state::{AdminState, AppState};

pub async fn run(state: AppState) {
    let mut interval = tokio::time::interval(poll_interval());

    loop {
        tokio::select! {
            _ = interval.tick() => {}
            _ = state.wake.notified() => {}
        }

        // Fire-and-forget, same as the leaderboard poller: overlapping
        // responses race and the last write wins, with no sequence token.
        tokio::spawn(poll_once(state.clone()));
    }
}

pub async fn poll_once(state: AppState) {
    match crate::api::fetch_sessions(&state.http_client, &state.base_url).await {
        Ok(snapshot) => {
            let fetched_at = Utc::now();
            let line = {
                let mut admin = state.admin.write().await;
                apply_sessions(&mut admin, snapshot, fetched_at);
                status_line(&admin)
            };
            debug!(fetched_at = %fetched_at, "applied session snapshot");
            println!("{line}");
        }
        Err(e) => {
            warn!("session poll failed: {e}");
        }
    }
}

/// Apply one session snapshot wholesale: countdown overwritten from the
/// authoritative elapsed time, optimistic active-question id corrected.
pub fn apply_sessions(
    admin: &mut AdminState,
    snapshot: SessionsSnapshot,
    fetched_at: DateTime<Utc>,
) {
    admin.countdown.apply(&snapshot);
    admin.active_question_id = snapshot.active_session().map(|s| s.question_id);
    admin.sessions = Some(snapshot);
    admin.fetched_at = Some(fetched_at);
}

pub fn status_line(admin: &AdminState) -> String {
    let active = admin
        .sessions
        .as_ref()
        .and_then(|snapshot| snapshot.active_session());
    match (active, admin.countdown.remaining()) {
        (Some(session), Some(remaining)) => format!(
            "Q{} active | {} remaining | {} submissions | {} completed",
            session.question_id,
            format_remaining(remaining),
            session.total_submissions,
            session.completed_teams,
        ),
        _ => "no active session".to_string(),
    }
}
