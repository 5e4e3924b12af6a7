use std::collections::HashMap;

use scorewatch_shared::{CommandOutcome, FetchError, QuestionConfig};
use thiserror::Error;
use tracing::info;

use crate::log::Severity;
use crate::state::{AdminState, AppState};

/// Local rejection of a command before any network call is made.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("question {0} is not in the loaded question config")]
    UnknownQuestion(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Start { question_id: u32 },
    Stop { question_id: u32 },
    Reset,
}

impl Command {
    fn describe(&self) -> String {
        match self {
            Command::Start { question_id } => format!("start Q{question_id}"),
            Command::Stop { question_id } => format!("stop Q{question_id}"),
            Command::Reset => "reset all sessions".to_string(),
        }
    }
}

/// Start a question session. Validated against the loaded config first; an
/// unknown id is logged locally and never reaches the network.
pub async fn start_question(state: &AppState, question_id: u32, time_limit: u32, buffer_time: u32) {
    {
        let mut admin = state.admin.write().await;
        if let Err(e) = validate_start(&admin.question_config, question_id) {
            admin
                .log
                .push(Severity::Warning, format!("start Q{question_id} rejected: {e}"));
            return;
        }
    }

    info!(question_id, time_limit, buffer_time, "dispatching start");
    let result = crate::api::post_start(
        &state.http_client,
        &state.base_url,
        question_id,
        time_limit,
        buffer_time,
    )
    .await;
    finish(state, Command::Start { question_id }, result).await;
}

/// Stop a question session. The id was already parsed at the command surface;
/// the backend is authoritative on whether it is stoppable.
pub async fn stop_question(state: &AppState, question_id: u32) {
    info!(question_id, "dispatching stop");
    let result = crate::api::post_stop(&state.http_client, &state.base_url, question_id).await;
    finish(state, Command::Stop { question_id }, result).await;
}

/// Reset all sessions. Destructive; callers must have confirmed with the
/// operator before invoking this.
pub async fn reset_all(state: &AppState) {
    info!("dispatching reset-all");
    let result = crate::api::post_reset(&state.http_client, &state.base_url).await;
    finish(state, Command::Reset, result).await;
}

async fn finish(state: &AppState, command: Command, result: Result<CommandOutcome, FetchError>) {
    let confirmed = {
        let mut admin = state.admin.write().await;
        apply_outcome(&mut admin, command, result)
    };
    if confirmed {
        // Refresh session state now instead of waiting for the next tick.
        state.wake.notify_one();
    }
}

fn validate_start(
    config: &HashMap<u32, QuestionConfig>,
    question_id: u32,
) -> Result<(), ValidationError> {
    if config.contains_key(&question_id) {
        Ok(())
    } else {
        Err(ValidationError::UnknownQuestion(question_id))
    }
}

/// Reconcile a backend response with local state. On a confirmed success the
/// active-question id is updated optimistically (the next poll corrects it if
/// needed); on any failure local state is left unchanged. Returns whether the
/// command was confirmed.
fn apply_outcome(
    admin: &mut AdminState,
    command: Command,
    result: Result<CommandOutcome, FetchError>,
) -> bool {
    match result {
        Ok(outcome) if outcome.success => {
            match command {
                Command::Start { question_id } => {
                    admin.active_question_id = Some(question_id);
                }
                Command::Stop { question_id } => {
                    if admin.active_question_id == Some(question_id) {
                        admin.active_question_id = None;
                    }
                }
                Command::Reset => {
                    admin.active_question_id = None;
                }
            }
            let message = outcome
                .message
                .unwrap_or_else(|| format!("{} confirmed", command.describe()));
            admin.log.push(Severity::Success, message);
            true
        }
        Ok(outcome) => {
            let reason = outcome.message.unwrap_or_else(|| "no reason given".to_string());
            admin.log.push(
                Severity::Error,
                format!("{} refused by backend: {reason}", command.describe()),
            );
            false
        }
        Err(e) => {
            admin
                .log
                .push(Severity::Error, format!("{} failed: {e}", command.describe()));
            false
        }
    }
}
