use std::time::Duration;

pub const CONFIG_PATH: &str = "/api/admin/config";
pub const SESSIONS_PATH: &str = "/api/admin/sessions";
pub const START_PATH: &str = "/api/admin/start_question";
pub const STOP_PATH: &str = "/api/admin/stop_question";
pub const RESET_PATH: &str = "/api/admin/reset_all";

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 2000;
/// Local countdown tick between authoritative polls.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 1000;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 3;

/// Backend defaults for a started question, applied when the operator omits
/// them: 5 minutes plus a 10-second grace buffer.
pub const DEFAULT_TIME_LIMIT_SECS: u32 = 300;
pub const DEFAULT_BUFFER_TIME_SECS: u32 = 10;

pub fn base_url() -> String {
    std::env::var("SCOREWATCH_BASE_URL")
        .ok()
        .map(|value| value.trim().trim_end_matches('/').to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
}

pub fn poll_interval() -> Duration {
    std::env::var("SCOREWATCH_POLL_INTERVAL_MS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .filter(|value| *value > 0)
        .map(Duration::from_millis)
        .unwrap_or_else(|| Duration::from_millis(DEFAULT_POLL_INTERVAL_MS))
}

pub fn tick_interval() -> Duration {
    std::env::var("SCOREWATCH_TICK_INTERVAL_MS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .filter(|value| *value > 0)
        .map(Duration::from_millis)
        .unwrap_or_else(|| Duration::from_millis(DEFAULT_TICK_INTERVAL_MS))
}

pub fn http_timeout() -> Duration {
    std::env::var("SCOREWATCH_HTTP_TIMEOUT_SECS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .filter(|value| *value > 0)
        .map(Duration::from_secs)
        .unwrap_or_else(|| Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS))
}

pub fn connect_timeout() -> Duration {
    std::env::var("SCOREWATCH_CONNECT_TIMEOUT_SECS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .filter(|value| *value > 0)
        .map(Duration::from_secs)
        .unwrap_or_else(|| Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
}
