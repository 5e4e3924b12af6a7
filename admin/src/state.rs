use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use chrono::{DateTime, Utc};
use scorewatch_shared::{Countdown, QuestionConfig, SessionsSnapshot};
use tokio::sync::{Notify, RwLock};
use tracing::warn;

use crate::config::{base_url, connect_timeout, http_timeout};
use crate::log::CommandLog;

/// Admin-side view state. One write lock is the exclusive-access boundary for
/// every mutation (polls, ticks, dispatched commands); overlapping poll
/// responses serialize on it, last writer wins.
#[derive(Debug, Default)]
pub struct AdminState {
    /// Last successfully fetched session snapshot, replaced wholesale.
    pub sessions: Option<SessionsSnapshot>,
    pub fetched_at: Option<DateTime<Utc>>,
    /// Updated optimistically by the dispatcher, then corrected by the next
    /// authoritative poll.
    pub active_question_id: Option<u32>,
    pub countdown: Countdown,
    /// Static question metadata, loaded once at startup, read-only after.
    pub question_config: HashMap<u32, QuestionConfig>,
    pub log: CommandLog,
}

#[derive(Clone)]
pub struct AppState {
    pub admin: Arc<RwLock<AdminState>>,
    /// Poked for an immediate out-of-band poll (after a confirmed command, or
    /// an operator refresh). Does not disturb the regular interval.
    pub wake: Arc<Notify>,
    /// Guard keeping the local countdown ticker single-instance.
    pub ticker_live: Arc<AtomicBool>,
    pub http_client: reqwest::Client,
    pub base_url: String,
}

impl AppState {
    pub fn new() -> Self {
        let request_timeout = http_timeout();
        let conn_timeout = connect_timeout();
        let http_client = reqwest::Client::builder()
            .user_agent("scorewatch-admin/0.1")
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
            admin: Arc::new(RwLock::new(AdminState::default())),
            wake: Arc::new(Notify::new()),
            ticker_live: Arc::new(AtomicBool::new(false)),
            http_client,
            base_url: base_url(),
        }
    }
}
