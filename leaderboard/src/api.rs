use scorewatch_shared::error::body_preview;
use scorewatch_shared::{FetchError, ScoreboardSnapshot};

use crate::config::SCOREBOARD_PATH;

pub async fn fetch_scoreboard(
    client: &reqwest::Client,
    base_url: &str,
) -> Result<ScoreboardSnapshot, FetchError> {
    let resp = client
        .get(format!("{base_url}{SCOREBOARD_PATH}"))
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
