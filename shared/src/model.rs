use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One team row as reported by the scoring backend.
///
/// `questions` maps question id to that team's result; a missing key means the
/// team never attempted the question, which is distinct from a zero-score
/// attempt and must stay distinct all the way to the display layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub team_name: String,
    #[serde(default)]
    pub is_real: bool,
    #[serde(default)]
    pub total_score: f64,
    #[serde(default)]
    pub questions: HashMap<u32, QuestionResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionResult {
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub correct_count: u32,
    #[serde(default)]
    pub wrong_count: u32,
}

/// One timed activation window for a question, tracked server-side.
///
/// `elapsed_time` is server-authoritative and monotonically non-decreasing
/// while the session is active; clients derive countdowns from it and never
/// measure elapsed time themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub question_id: u32,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub time_limit: u32,
    #[serde(default)]
    pub buffer_time: u32,
    #[serde(default)]
    pub elapsed_time: f64,
    #[serde(default)]
    pub total_submissions: u32,
    #[serde(default)]
    pub completed_teams: u32,
}

/// Complete leaderboard poll response. Applied wholesale, never merged.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoreboardSnapshot {
    #[serde(default)]
    pub active_question_id: Option<u32>,
    #[serde(default)]
    pub questions: Vec<u32>,
    #[serde(default)]
    pub teams: Vec<Team>,
}

/// Complete admin session-status poll response.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SessionsSnapshot {
    #[serde(default)]
    pub sessions: Vec<Session>,
}

impl SessionsSnapshot {
    /// The session the client treats as current.
    ///
    /// The backend should report at most one `is_active` session, but if it
    /// reports several the last one in reported order wins (the backend lists
    /// sessions in start order, so that is the most recently started).
    pub fn active_session(&self) -> Option<&Session> {
        self.sessions.iter().filter(|s| s.is_active).next_back()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestionType {
    #[serde(alias = "kis")]
    KIS,
    #[serde(alias = "qa")]
    QA,
    #[serde(alias = "tr")]
    TR,
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            QuestionType::KIS => "KIS",
            QuestionType::QA => "QA",
            QuestionType::TR => "TR",
        };
        f.write_str(name)
    }
}

/// Static per-question metadata, loaded once per admin process and read-only
/// for its lifetime. Used for display enrichment and start-command validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionConfig {
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    #[serde(default)]
    pub scene_id: Option<u32>,
    #[serde(default)]
    pub video_id: Option<String>,
    #[serde(default)]
    pub num_events: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QuestionConfigMap {
    #[serde(default)]
    pub questions: HashMap<u32, QuestionConfig>,
}

/// Backend acknowledgement for admin mutation commands.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CommandOutcome {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::{QuestionType, ScoreboardSnapshot, SessionsSnapshot};

    #[test]
    fn scoreboard_payload_parses_with_string_question_keys() {
        let payload = r#"{
            "active_question_id": 3,
            "questions": [1, 2, 3],
            "teams": [
                {
                    "team_name": "Alpha",
                    "is_real": true,
                    "total_score": 142.5,
                    "questions": {
                        "1": {"score": 80.0, "correct_count": 1, "wrong_count": 2},
                        "3": {"score": 62.5, "correct_count": 1, "wrong_count": 0}
                    }
                }
            ]
        }"#;

        let snapshot: ScoreboardSnapshot =
            serde_json::from_str(payload).expect("scoreboard payload should parse");
        assert_eq!(snapshot.active_question_id, Some(3));
        assert_eq!(snapshot.questions, vec![1, 2, 3]);
        let alpha = &snapshot.teams[0];
        assert!(alpha.is_real);
        assert_eq!(alpha.questions.len(), 2);
        assert!(!alpha.questions.contains_key(&2));
        assert_eq!(alpha.questions[&1].wrong_count, 2);
    }

    #[test]
    fn scoreboard_payload_tolerates_missing_fields() {
        let payload = r#"{"teams": [{"team_name": "Bravo"}]}"#;

        let snapshot: ScoreboardSnapshot =
            serde_json::from_str(payload).expect("sparse payload should parse");
        assert_eq!(snapshot.active_question_id, None);
        assert!(snapshot.questions.is_empty());
        let bravo = &snapshot.teams[0];
        assert!(!bravo.is_real);
        assert_eq!(bravo.total_score, 0.0);
        assert!(bravo.questions.is_empty());
    }

    #[test]
    fn active_session_picks_last_active_in_reported_order() {
        let payload = r#"{"sessions": [
            {"question_id": 1, "is_active": true, "time_limit": 300, "buffer_time": 10, "elapsed_time": 250.0},
            {"question_id": 2, "is_active": false, "time_limit": 300, "buffer_time": 10, "elapsed_time": 310.0},
            {"question_id": 3, "is_active": true, "time_limit": 120, "buffer_time": 10, "elapsed_time": 5.0}
        ]}"#;

        let snapshot: SessionsSnapshot =
            serde_json::from_str(payload).expect("sessions payload should parse");
        let active = snapshot.active_session().expect("an active session exists");
        assert_eq!(active.question_id, 3);
    }

    #[test]
    fn active_session_is_none_when_nothing_is_active() {
        let payload = r#"{"sessions": [
            {"question_id": 1, "is_active": false, "elapsed_time": 400.0}
        ]}"#;

        let snapshot: SessionsSnapshot =
            serde_json::from_str(payload).expect("sessions payload should parse");
        assert!(snapshot.active_session().is_none());

        let empty = SessionsSnapshot::default();
        assert!(empty.active_session().is_none());
    }

    #[test]
    fn question_type_accepts_lowercase_aliases() {
        assert_eq!(
            serde_json::from_str::<QuestionType>(r#""kis""#).expect("lowercase kis"),
            QuestionType::KIS
        );
        assert_eq!(
            serde_json::from_str::<QuestionType>(r#""QA""#).expect("uppercase qa"),
            QuestionType::QA
        );
    }
}
