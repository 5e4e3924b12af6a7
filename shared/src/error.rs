use thiserror::Error;

/// Why a poll or command request produced no usable snapshot.
///
/// A failed fetch is always discarded whole: the caller keeps its previous
/// display state untouched and logs the failure. There is no retry or backoff;
/// the next scheduled poll is the retry.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("upstream status {status}; body preview: {preview}")]
    Status { status: u16, preview: String },
    #[error("failed to decode payload: {reason}; body preview: {preview}")]
    Decode { reason: String, preview: String },
}

/// First 200 characters of a response body, for log context on failures.
pub fn body_preview(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).chars().take(200).collect()
}
