use scorewatch_shared::{
    OverallStanding, QuestionStanding, ScoreboardSnapshot, rank_for_question, rank_overall,
};

use crate::state::ViewState;

/// Which leaderboard table is currently selected. Switching tabs is a local
/// presentation change over the cached snapshot; it never forces a fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Realtime,
    Overall,
}

/// Always-visible summary, derived on every snapshot regardless of tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
    Active(u32),
    Inactive,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RealtimeView {
    /// Nothing has ever been fetched.
    NoData,
    /// A snapshot exists but reports no active question. Explicit state, not
    /// an empty or zero-filled table.
    NoActiveQuestion,
    WaitingForTeams,
    Ranked {
        question_id: u32,
        rows: Vec<QuestionStanding>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum OverallView {
    NoData,
    WaitingForTeams,
    Table {
        question_ids: Vec<u32>,
        rows: Vec<OverallStanding>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum TabView {
    Realtime(RealtimeView),
    Overall(OverallView),
}

pub fn indicator(snapshot: Option<&ScoreboardSnapshot>) -> Indicator {
    match snapshot.and_then(|s| s.active_question_id) {
        Some(id) => Indicator::Active(id),
        None => Indicator::Inactive,
    }
}

pub fn realtime_view(snapshot: Option<&ScoreboardSnapshot>) -> RealtimeView {
    let Some(snapshot) = snapshot else {
        return RealtimeView::NoData;
    };
    let Some(question_id) = snapshot.active_question_id else {
        return RealtimeView::NoActiveQuestion;
    };
    if snapshot.teams.is_empty() {
        return RealtimeView::WaitingForTeams;
    }
    RealtimeView::Ranked {
        question_id,
        rows: rank_for_question(&snapshot.teams, question_id),
    }
}

pub fn overall_view(snapshot: Option<&ScoreboardSnapshot>) -> OverallView {
    let Some(snapshot) = snapshot else {
        return OverallView::NoData;
    };
    if snapshot.teams.is_empty() {
        return OverallView::WaitingForTeams;
    }
    OverallView::Table {
        question_ids: snapshot.questions.clone(),
        rows: rank_overall(&snapshot.teams, &snapshot.questions),
    }
}

pub fn derive_tab(tab: Tab, snapshot: Option<&ScoreboardSnapshot>) -> TabView {
    match tab {
        Tab::Realtime => TabView::Realtime(realtime_view(snapshot)),
        Tab::Overall => TabView::Overall(overall_view(snapshot)),
    }
}

impl ViewState {
    /// Re-derive the view for the already-selected tab.
    pub fn current_view(&self) -> TabView {
        derive_tab(self.current_tab, self.snapshot.as_ref())
    }

    /// Switch tabs and derive from the cached snapshot, without any fetch.
    pub fn select_tab(&mut self, tab: Tab) -> TabView {
        self.current_tab = tab;
        self.current_view()
    }
}
