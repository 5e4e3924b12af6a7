use serde::{Deserialize, Serialize};

use crate::model::Team;

/// One row of the per-question ("realtime") ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionStanding {
    pub rank: usize,
    pub team_name: String,
    pub is_real: bool,
    /// Score used for ordering: the team's result for the ranked question,
    /// or 0.0 when the team has not attempted it.
    pub score: f64,
    pub attempted: bool,
    pub correct_count: u32,
    pub wrong_count: u32,
}

/// One row of the aggregate ("overall") ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallStanding {
    pub rank: usize,
    pub team_name: String,
    pub is_real: bool,
    pub total_score: f64,
    /// One cell per known question id, in the order the ids were given.
    pub cells: Vec<ScoreCell>,
}

/// A single question cell in the aggregate table. `NoAttempt` and
/// `Score(0.0)` are different states and must never collapse.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ScoreCell {
    NoAttempt,
    Score(f64),
}

/// Rank all teams by their score on `question_id`, descending.
///
/// Teams without a result for the question rank with score 0 and are never
/// filtered out. Ties break real teams above non-real teams; remaining ties
/// keep input order (the sort is stable, not comparator-dependent).
pub fn rank_for_question(teams: &[Team], question_id: u32) -> Vec<QuestionStanding> {
    let mut rows: Vec<QuestionStanding> = teams
        .iter()
        .map(|team| {
            let result = team.questions.get(&question_id);
            QuestionStanding {
                rank: 0,
                team_name: team.team_name.clone(),
                is_real: team.is_real,
                score: result.map_or(0.0, |r| r.score),
                attempted: result.is_some(),
                correct_count: result.map_or(0, |r| r.correct_count),
                wrong_count: result.map_or(0, |r| r.wrong_count),
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| b.is_real.cmp(&a.is_real))
    });
    for (idx, row) in rows.iter_mut().enumerate() {
        row.rank = idx + 1;
    }
    rows
}

/// Rank all teams by aggregate `total_score`, descending.
///
/// There is deliberately no secondary key: equal totals keep the
/// backend-reported order. `question_ids` drives the cell columns; a team
/// with no result for a listed question gets `ScoreCell::NoAttempt`.
pub fn rank_overall(teams: &[Team], question_ids: &[u32]) -> Vec<OverallStanding> {
    let mut rows: Vec<OverallStanding> = teams
        .iter()
        .map(|team| OverallStanding {
            rank: 0,
            team_name: team.team_name.clone(),
            is_real: team.is_real,
            total_score: team.total_score,
            cells: question_ids
                .iter()
                .map(|qid| match team.questions.get(qid) {
                    Some(result) => ScoreCell::Score(result.score),
                    None => ScoreCell::NoAttempt,
                })
                .collect(),
        })
        .collect();

    rows.sort_by(|a, b| b.total_score.total_cmp(&a.total_score));
    for (idx, row) in rows.iter_mut().enumerate() {
        row.rank = idx + 1;
    }
    rows
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::{ScoreCell, rank_for_question, rank_overall};
    use crate::model::{QuestionResult, Team};

    fn team(name: &str, is_real: bool, total: f64, results: &[(u32, f64)]) -> Team {
        let mut questions = HashMap::new();
        for &(qid, score) in results {
            questions.insert(
                qid,
                QuestionResult {
                    score,
                    correct_count: 1,
                    wrong_count: 0,
                },
            );
        }
        Team {
            team_name: name.to_string(),
            is_real,
            total_score: total,
            questions,
        }
    }

    #[test]
    fn orders_by_question_score_descending() {
        let teams = vec![
            team("Low", true, 0.0, &[(1, 20.0)]),
            team("High", true, 0.0, &[(1, 95.5)]),
            team("Mid", true, 0.0, &[(1, 60.0)]),
        ];

        let rows = rank_for_question(&teams, 1);
        let names: Vec<&str> = rows.iter().map(|r| r.team_name.as_str()).collect();
        assert_eq!(names, vec!["High", "Mid", "Low"]);
        assert_eq!(rows[0].rank, 1);
        assert_eq!(rows[2].rank, 3);
    }

    #[test]
    fn missing_result_ranks_as_zero_without_filtering() {
        let teams = vec![
            team("Attempted", true, 0.0, &[(1, 0.0)]),
            team("Absent", true, 0.0, &[]),
        ];

        let rows = rank_for_question(&teams, 1);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].score, 0.0);
        assert_eq!(rows[1].score, 0.0);
        assert!(rows[0].attempted);
        assert!(!rows[1].attempted);
        // Equal effective score, equal is_real: input order preserved.
        assert_eq!(rows[0].team_name, "Attempted");
    }

    #[test]
    fn real_team_outranks_bot_on_equal_score() {
        let teams = vec![
            team("Bravo", false, 0.0, &[(1, 80.0)]),
            team("Alpha", true, 0.0, &[(1, 80.0)]),
        ];

        let rows = rank_for_question(&teams, 1);
        assert_eq!(rows[0].team_name, "Alpha");
        assert_eq!(rows[1].team_name, "Bravo");
    }

    #[test]
    fn real_flag_does_not_outweigh_score() {
        let teams = vec![
            team("Bot", false, 0.0, &[(1, 81.0)]),
            team("Real", true, 0.0, &[(1, 80.0)]),
        ];

        let rows = rank_for_question(&teams, 1);
        assert_eq!(rows[0].team_name, "Bot");
    }

    #[test]
    fn ranking_is_deterministic_across_runs() {
        let teams = vec![
            team("A", false, 0.0, &[(2, 50.0)]),
            team("B", true, 0.0, &[(2, 50.0)]),
            team("C", false, 0.0, &[(2, 50.0)]),
            team("D", true, 0.0, &[]),
        ];

        let first = rank_for_question(&teams, 2);
        let second = rank_for_question(&teams, 2);
        assert_eq!(first, second);
        let names: Vec<&str> = first.iter().map(|r| r.team_name.as_str()).collect();
        assert_eq!(names, vec!["B", "A", "C", "D"]);
    }

    #[test]
    fn empty_team_list_yields_empty_sequence() {
        assert!(rank_for_question(&[], 1).is_empty());
        assert!(rank_overall(&[], &[1, 2]).is_empty());
    }

    #[test]
    fn overall_orders_by_total_and_keeps_input_order_on_ties() {
        let teams = vec![
            team("First", false, 120.0, &[]),
            team("Second", true, 120.0, &[]),
            team("Top", false, 200.0, &[]),
        ];

        let rows = rank_overall(&teams, &[]);
        let names: Vec<&str> = rows.iter().map(|r| r.team_name.as_str()).collect();
        // No secondary tie-break on the overall view: reported order holds.
        assert_eq!(names, vec!["Top", "First", "Second"]);
    }

    #[test]
    fn overall_cells_distinguish_no_attempt_from_zero() {
        let teams = vec![team("Alpha", true, 40.0, &[(1, 40.0), (5, 0.0)])];

        let rows = rank_overall(&teams, &[1, 3, 5]);
        assert_eq!(
            rows[0].cells,
            vec![
                ScoreCell::Score(40.0),
                ScoreCell::NoAttempt,
                ScoreCell::Score(0.0),
            ]
        );
    }
}
