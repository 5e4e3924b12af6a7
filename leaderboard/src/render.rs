use std::fmt::Write;

use scorewatch_shared::ScoreCell;

use crate::view::{Indicator, OverallView, RealtimeView, TabView};

/// Marker for a question a team never attempted. Distinct from "0.0".
const NO_ATTEMPT: &str = "-";

pub fn format_indicator(indicator: Indicator) -> String {
    match indicator {
        Indicator::Active(id) => format!("active question: Q{id}"),
        Indicator::Inactive => "no active question".to_string(),
    }
}

pub fn format_view(view: &TabView) -> String {
    match view {
        TabView::Realtime(realtime) => format_realtime(realtime),
        TabView::Overall(overall) => format_overall(overall),
    }
}

fn format_realtime(view: &RealtimeView) -> String {
    match view {
        RealtimeView::NoData => "[realtime] waiting for first snapshot".to_string(),
        RealtimeView::NoActiveQuestion => "[realtime] no active question".to_string(),
        RealtimeView::WaitingForTeams => "[realtime] waiting for teams".to_string(),
        RealtimeView::Ranked { question_id, rows } => {
            let mut out = String::new();
            let _ = writeln!(out, "[realtime] Q{question_id} standings");
            let _ = writeln!(
                out,
                "{:>4}  {:<28} {:>8}  {:>5} {:>5}",
                "#", "team", "score", "ok", "wrong"
            );
            for row in rows {
                let _ = writeln!(
                    out,
                    "{:>4}  {:<28} {:>8}  {:>5} {:>5}",
                    row.rank,
                    tag_name(&row.team_name, row.is_real),
                    if row.attempted {
                        format!("{:.1}", row.score)
                    } else {
                        NO_ATTEMPT.to_string()
                    },
                    row.correct_count,
                    row.wrong_count,
                );
            }
            out
        }
    }
}

fn format_overall(view: &OverallView) -> String {
    match view {
        OverallView::NoData => "[overall] waiting for first snapshot".to_string(),
        OverallView::WaitingForTeams => "[overall] waiting for teams".to_string(),
        OverallView::Table { question_ids, rows } => {
            let mut out = String::new();
            let _ = writeln!(out, "[overall] standings");
            let mut header = format!("{:>4}  {:<28} {:>8} ", "#", "team", "total");
            for qid in question_ids {
                let _ = write!(header, " {:>8}", format!("Q{qid}"));
            }
            let _ = writeln!(out, "{header}");
            for row in rows {
                let _ = write!(
                    out,
                    "{:>4}  {:<28} {:>8.1} ",
                    row.rank,
                    tag_name(&row.team_name, row.is_real),
                    row.total_score,
                );
                for cell in &row.cells {
                    match cell {
                        ScoreCell::Score(score) => {
                            let _ = write!(out, " {:>8.1}", score);
                        }
                        ScoreCell::NoAttempt => {
                            let _ = write!(out, " {NO_ATTEMPT:>8}");
                        }
                    }
                }
                out.push('\n');
            }
            out
        }
    }
}

fn tag_name(name: &str, is_real: bool) -> String {
    if is_real {
        name.to_string()
    } else {
        format!("{name} (bot)")
    }
}
