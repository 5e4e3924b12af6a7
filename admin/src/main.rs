mod api;
mod config;
mod dispatcher;
mod log;
mod services;
mod state;

use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::{DEFAULT_BUFFER_TIME_SECS, DEFAULT_TIME_LIMIT_SECS};
use crate::log::Severity;
use crate::state::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let state = AppState::new();
    info!(
        base_url = %state.base_url,
        interval_ms = config::poll_interval().as_millis() as u64,
        "admin client starting"
    );

    // Static question metadata, fetched once for the life of the process.
    match api::fetch_question_config(&state.http_client, &state.base_url).await {
        Ok(map) => {
            let count = map.questions.len();
            state.admin.write().await.question_config = map.questions;
            info!("loaded config for {count} questions");
        }
        Err(e) => {
            warn!("failed to load question config: {e}; start commands will fail validation");
        }
    }

    tokio::spawn(services::poller::run(state.clone()));
    services::ticker::spawn(state.clone());

    command_loop(state).await;
    info!("admin client exiting");
}

async fn command_loop(state: AppState) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Ok(Some(line)) = lines.next_line().await {
        let parts: Vec<&str> = line.split_whitespace().collect();
        match parts.as_slice() {
            [] => {}
            ["start", rest @ ..] => handle_start(&state, rest).await,
            ["stop", rest @ ..] => handle_stop(&state, rest).await,
            ["reset"] => handle_reset(&state, &mut lines).await,
            ["log"] => print_log(&state).await,
            ["questions"] => print_questions(&state).await,
            ["refresh"] => state.wake.notify_one(),
            ["quit"] | ["exit"] => break,
            other => {
                println!(
                    "unknown command: {} (start <id> [time_limit] [buffer] | stop <id> | reset | questions | log | refresh | quit)",
                    other.join(" ")
                );
            }
        }
    }
}

async fn handle_start(state: &AppState, args: &[&str]) {
    let Some(question_id) = args.first().and_then(|v| v.parse::<u32>().ok()) else {
        reject_locally(state, "start requires a numeric question id").await;
        return;
    };
    let time_limit = args
        .get(1)
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(DEFAULT_TIME_LIMIT_SECS);
    let buffer_time = args
        .get(2)
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(DEFAULT_BUFFER_TIME_SECS);

    dispatcher::start_question(state, question_id, time_limit, buffer_time).await;
    print_newest_entry(state).await;
}

async fn handle_stop(state: &AppState, args: &[&str]) {
    let Some(question_id) = args.first().and_then(|v| v.parse::<u32>().ok()) else {
        reject_locally(state, "stop requires a numeric question id").await;
        return;
    };

    dispatcher::stop_question(state, question_id).await;
    print_newest_entry(state).await;
}

/// Destructive and irreversible from the client's side, so it needs an
/// explicit confirmation before anything is dispatched.
async fn handle_reset(state: &AppState, lines: &mut Lines<BufReader<Stdin>>) {
    println!("reset all sessions? this cannot be undone [y/N]");
    let confirmed = matches!(
        lines.next_line().await,
        Ok(Some(answer)) if matches!(answer.trim(), "y" | "Y" | "yes")
    );
    if !confirmed {
        println!("reset cancelled");
        return;
    }

    dispatcher::reset_all(state).await;
    print_newest_entry(state).await;
}

async fn reject_locally(state: &AppState, message: &str) {
    state
        .admin
        .write()
        .await
        .log
        .push(Severity::Warning, message);
    println!("{message}");
}

async fn print_newest_entry(state: &AppState) {
    if let Some(entry) = state.admin.read().await.log.entries().next() {
        println!("{entry}");
    }
}

async fn print_questions(state: &AppState) {
    let admin = state.admin.read().await;
    if admin.question_config.is_empty() {
        println!("no question config loaded");
        return;
    }
    let mut ids: Vec<u32> = admin.question_config.keys().copied().collect();
    ids.sort_unstable();
    for id in ids {
        let question = &admin.question_config[&id];
        let mut line = format!("Q{id} [{}]", question.question_type);
        if let Some(scene_id) = question.scene_id {
            line.push_str(&format!(" scene {scene_id}"));
        }
        if let Some(video_id) = &question.video_id {
            line.push_str(&format!(" video {video_id}"));
        }
        if let Some(num_events) = question.num_events {
            line.push_str(&format!(" {num_events} events"));
        }
        println!("{line}");
    }
}

async fn print_log(state: &AppState) {
    let admin = state.admin.read().await;
    if admin.log.is_empty() {
        println!("log is empty");
        return;
    }
    for entry in admin.log.entries() {
        println!("{entry}");
    }
}
