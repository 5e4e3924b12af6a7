mod api;
mod config;
mod render;
mod services;
mod state;
mod view;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::render::format_view;
use crate::state::AppState;
use crate::view::Tab;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let state = AppState::new();
    info!(
        base_url = %state.base_url,
        interval_ms = config::poll_interval().as_millis() as u64,
        "leaderboard client starting"
    );

    tokio::spawn(services::poller::run(state.clone()));

    command_loop(state).await;
    info!("leaderboard client exiting");
}

/// Line commands standing in for the page's tab buttons and visibility hook:
/// `realtime` / `overall` switch tabs locally, `refresh` forces an
/// out-of-band poll, `quit` exits.
async fn command_loop(state: AppState) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Ok(Some(line)) = lines.next_line().await {
        match line.trim() {
            "" => {}
            "realtime" => {
                let view = state.view.write().await.select_tab(Tab::Realtime);
                println!("{}", format_view(&view));
            }
            "overall" => {
                let view = state.view.write().await.select_tab(Tab::Overall);
                println!("{}", format_view(&view));
            }
            "refresh" => state.wake.notify_one(),
            "quit" | "exit" => break,
            other => {
                println!("unknown command: {other} (realtime | overall | refresh | quit)");
            }
        }
    }
}
