use serde::de::DeserializeOwned;
use serde_json::json;

use scorewatch_shared::error::body_preview;
use scorewatch_shared::{CommandOutcome, FetchError, QuestionConfigMap, SessionsSnapshot};

use crate::config::{CONFIG_PATH, RESET_PATH, SESSIONS_PATH, START_PATH, STOP_PATH};

pub async fn fetch_question_config(
    client: &reqwest::Client,
    base_url: &str,
) -> Result<QuestionConfigMap, FetchError> {
    request_json(client.get(format!("{base_url}{CONFIG_PATH}"))).await
}

pub async fn fetch_sessions(
    client: &reqwest::Client,
    base_url: &str,
) -> Result<SessionsSnapshot, FetchError> {
    request_json(client.get(format!("{base_url}{SESSIONS_PATH}"))).await
}

pub async fn post_start(
    client: &reqwest::Client,
    base_url: &str,
    question_id: u32,
    time_limit: u32,
    buffer_time: u32,
) -> Result<CommandOutcome, FetchError> {
    let body = json!({
        "question_id": question_id,
        "time_limit": time_limit,
        "buffer_time": buffer_time,
    });
    request_json(client.post(format!("{base_url}{START_PATH}")).json(&body)).await
}

pub async fn post_stop(
    client: &reqwest::Client,
    base_url: &str,
    question_id: u32,
) -> Result<CommandOutcome, FetchError> {
    let body = json!({ "question_id": question_id });
    request_json(client.post(format!("{base_url}{STOP_PATH}")).json(&body)).await
}

pub async fn post_reset(
    client: &reqwest::Client,
    base_url: &str,
) -> Result<CommandOutcome, FetchError> {
    request_json(client.post(format!("{base_url}{RESET_PATH}"))).await
}

async fn request_json<T: DeserializeOwned>(
    builder: reqwest::RequestBuilder,
) -> Result<T, FetchError> {
    let resp = builder
        .send()
        .await
        .map_err(|e| FetchError::Transport(e.to_string()))?;
    let status = resp.status();
    let bytes = resp
        .bytes()
        .await
        .map_err(|e| FetchError::Transport(format!("failed to read response body: {e}")))?;

    if !status.is_success() {
        return Err(FetchError::Status {
            status: status.as_u16(),
            preview: body_preview(&bytes),
        });
    }

    serde_json::from_slice(&bytes).map_err(|e| FetchError::Decode {
        reason: e.to_string(),
        preview: body_preview(&bytes),
    })
}
