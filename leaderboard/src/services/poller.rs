use chrono::{DateTime, Utc};
use scorewatch_shared::ScoreboardSnapshot;
use tracing::{debug, warn};

use crate::config::poll_interval;
use crate::render::{format_indicator, format_view};
use crate::state::{AppState, ViewState};
use crate::view::{Indicator, TabView, indicator};

/// What a successful poll asks the renderer to draw: the always-visible
/// indicator plus the currently selected tab's view. The non-selected tab is
/// not derived until selected.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewUpdate {
    pub indicator: Indicator,
    pub view: TabView,
}

pub async fn run(state: AppState) {
    let mut interval = tokio::time::interval(poll_interval());

    loop {
        tokio::select! {
            _ = interval.tick() => {}
            _ = state.wake.notified() => {}
        }

        // Fire-and-forget: a slow response may still be in flight when the
        // next tick fires. Both proceed; whichever takes the write lock last
        // wins. There is no sequence token discarding out-of-order responses.
        tokio::spawn(poll_once(state.clone()));
    }
}

pub async fn poll_once(state: AppState) {
    match crate::api::fetch_scoreboard(&state.http_client, &state.base_url).await {
        Ok(snapshot) => {
            let fetched_at = Utc::now();
            let update = {
                let mut view = state.view.write().await;
                apply_scoreboard(&mut view, snapshot, fetched_at)
            };
            debug!(fetched_at = %fetched_at, "applied scoreboard snapshot");
            println!("{}", format_indicator(update.indicator));
            println!("{}", format_view(&update.view));
        }
        Err(e) => {
            // Last-known-good display state stays untouched.
            warn!("scoreboard poll failed: {e}");
        }
    }
}

/// Apply one snapshot wholesale and derive what to redraw.
pub fn apply_scoreboard(
    view: &mut ViewState,
    snapshot: ScoreboardSnapshot,
    fetched_at: DateTime<Utc>,
) -> ViewUpdate {
    view.snapshot = Some(snapshot);
    view.fetched_at = Some(fetched_at);
    ViewUpdate {
        indicator: indicator(view.snapshot.as_ref()),
        view: view.current_view(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use chrono::Utc;
    use scorewatch_shared::{QuestionResult, ScoreboardSnapshot, Team};

    use super::apply_scoreboard;
    use crate::state::ViewState;
    use crate::view::{Indicator, OverallView, RealtimeView, Tab, TabView};

    fn snapshot_with_team() -> ScoreboardSnapshot {
        let mut questions = HashMap::new();
        questions.insert(
            1,
            QuestionResult {
                score: 80.0,
                correct_count: 1,
                wrong_count: 0,
            },
        );
        ScoreboardSnapshot {
            active_question_id: Some(1),
            questions: vec![1],
            teams: vec![Team {
                team_name: "Alpha".to_string(),
                is_real: true,
                total_score: 80.0,
                questions,
            }],
        }
    }

    #[test]
    fn applying_the_same_snapshot_twice_is_idempotent() {
        let mut state = ViewState::default();
        let snapshot = snapshot_with_team();

        let first = apply_scoreboard(&mut state, snapshot.clone(), Utc::now());
        let second = apply_scoreboard(&mut state, snapshot, Utc::now());
        assert_eq!(first, second);

        match second.view {
            TabView::Realtime(RealtimeView::Ranked { rows, .. }) => {
                assert_eq!(rows.len(), 1);
            }
            other => panic!("expected ranked view, got {other:?}"),
        }
    }

    #[test]
    fn only_the_selected_tab_is_derived() {
        let mut state = ViewState::default();
        state.current_tab = Tab::Overall;

        let update = apply_scoreboard(&mut state, snapshot_with_team(), Utc::now());
        assert!(matches!(update.view, TabView::Overall(OverallView::Table { .. })));
        assert_eq!(update.indicator, Indicator::Active(1));
    }

    #[test]
    fn indicator_goes_inactive_when_snapshot_has_no_active_question() {
        let mut state = ViewState::default();
        let mut snapshot = snapshot_with_team();
        snapshot.active_question_id = None;

        let update = apply_scoreboard(&mut state, snapshot, Utc::now());
        assert_eq!(update.indicator, Indicator::Inactive);
        assert_eq!(
            update.view,
            TabView::Realtime(RealtimeView::NoActiveQuestion)
        );
    }

    #[test]
    fn later_apply_wins_wholesale() {
        let mut state = ViewState::default();
        apply_scoreboard(&mut state, snapshot_with_team(), Utc::now());

        let replacement = ScoreboardSnapshot {
            active_question_id: Some(2),
            questions: vec![1, 2],
            teams: vec![],
        };
        let update = apply_scoreboard(&mut state, replacement.clone(), Utc::now());
        assert_eq!(update.indicator, Indicator::Active(2));
        assert_eq!(state.snapshot, Some(replacement));
    }
}
