use std::sync::Arc;

use chrono::{DateTime, Utc};
use scorewatch_shared::ScoreboardSnapshot;
use tokio::sync::{Notify, RwLock};
use tracing::warn;

use crate::config::{base_url, connect_timeout, http_timeout};
use crate::view::Tab;

/// Everything the leaderboard view derives from. Mutated only through the
/// write lock in `AppState`, which is the single exclusive-access boundary
/// for this process; overlapping poll responses serialize on it and the last
/// writer wins.
#[derive(Debug, Default)]
pub struct ViewState {
    pub current_tab: Tab,
    /// Last successfully fetched snapshot. Replaced wholesale; a failed poll
    /// leaves it untouched.
    pub snapshot: Option<ScoreboardSnapshot>,
    pub fetched_at: Option<DateTime<Utc>>,
}

#[derive(Clone)]
pub struct AppState {
    pub view: Arc<RwLock<ViewState>>,
    /// Poked for an out-of-band poll (manual refresh, the visibility-regain
    /// analog). Does not disturb the regular interval.
    pub wake: Arc<Notify>,
    pub http_client: reqwest::Client,
    pub base_url: String,
}

impl AppState {
    pub fn new() -> Self {
        let request_timeout = http_timeout();
        let conn_timeout = connect_timeout();
        let http_client = reqwest::Client::builder()
            .user_agent("scorewatch-leaderboard/0.1")
            .timeout(request_timeout)
            .connect_timeout(conn_timeout)
            .build()
            .or_else(|e| {
                warn!(
                    error = %e,
                    "failed to build configured HTTP client, retrying without custom user-agent"
                );
                reqwest::Client::builder()
                    .timeout(request_timeout)
                    .connect_timeout(conn_timeout)
                    .build()
            })
            .unwrap_or_else(|e| {
                panic!("failed to build timeout-configured HTTP client: {e}");
            });

        Self {
            view: Arc::new(RwLock::new(ViewState::default())),
            wake: Arc::new(Notify::new()),
            http_client,
            base_url: base_url(),
        }
    }
}
