use serde::{Deserialize, Serialize};

use crate::model::SessionsSnapshot;

/// Seconds left in a session given server-reported timing fields.
///
/// Buffer time counts as additional countdown duration. The result is floored
/// to whole seconds and clamped at 0.
pub fn remaining_seconds(time_limit: u32, buffer_time: u32, elapsed_time: f64) -> u64 {
    let remaining = f64::from(time_limit) + f64::from(buffer_time) - elapsed_time;
    if remaining <= 0.0 {
        return 0;
    }
    remaining.floor() as u64
}

/// Format whole seconds as `m:ss` (minutes unpadded, seconds zero-padded).
pub fn format_remaining(total_secs: u64) -> String {
    format!("{}:{:02}", total_secs / 60, total_secs % 60)
}

/// Locally-ticking countdown for the admin view.
///
/// The server snapshot is authoritative: every successful session poll
/// overwrites whatever the local tick has drifted to. Between polls `tick`
/// decrements once per second, clamped at 0 and never re-incrementing.
/// A poll reporting no active session is a transition to `Inactive`, which is
/// a distinct display state rather than a zero reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Countdown {
    #[default]
    Inactive,
    Running {
        remaining: u64,
    },
}

impl Countdown {
    /// Overwrite local state from an authoritative session snapshot.
    pub fn apply(&mut self, snapshot: &SessionsSnapshot) {
        *self = match snapshot.active_session() {
            Some(session) => Countdown::Running {
                remaining: remaining_seconds(
                    session.time_limit,
                    session.buffer_time,
                    session.elapsed_time,
                ),
            },
            None => Countdown::Inactive,
        };
    }

    /// One local 1-second tick between polls. No-op while inactive.
    pub fn tick(&mut self) {
        if let Countdown::Running { remaining } = self {
            *remaining = remaining.saturating_sub(1);
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, Countdown::Running { .. })
    }

    pub fn remaining(&self) -> Option<u64> {
        match self {
            Countdown::Running { remaining } => Some(*remaining),
            Countdown::Inactive => None,
        }
    }
}
