//! Geoquiz · Geography Trivia Backend
//!
//! - Axum HTTP + WebSocket API driving multiple-choice geography quizzes
//! - Bundled reference data, or a JSON dataset from config/env
//! - Static SPA fallback (./static/index.html)
//!
//! Important env variables:
//!   PORT                : u16 (default 3000)
//!   GEOQUIZ_CONFIG_PATH : path to TOML config (sizes, odds, locale, prompt overrides)
//!   DATASET_PATH        : JSON dataset, overrides `dataset_path` from the config
//!   LOG_LEVEL           : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT          : "pretty" (default) or "json"
//!
//! Sessions idle past `session_idle_secs` are swept once a minute.

mod telemetry;
mod util;
mod error;
mod domain;
mod config;
mod locale;
mod seeds;
mod store;
mod similarity;
mod assembler;
mod generator;
mod session;
mod state;
mod protocol;
mod logic;
mod routes;

use std::{net::SocketAddr, sync::Arc, time::Duration};
use tokio::net::TcpListener;
use tracing::{info, instrument};

use crate::routes::build_router;
use crate::state::AppState;

#[instrument(level = "info", skip_all)]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  // Shared application state (reference store, sessions, quiz config).
  let state = Arc::new(AppState::new());

  // Idle session sweep.
  let sweeper = state.clone();
  tokio::spawn(async move {
    let mut tick = tokio::time::interval(Duration::from_secs(60));
    loop {
      tick.tick().await;
      sweeper.evict_idle().await;
    }
  });

  let app = build_router(state.clone());

  let addr: SocketAddr = std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .map(|port| SocketAddr::from(([0, 0, 0, 0], port)))
    .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

  let listener = TcpListener::bind(addr).await?;
  info!(target: "geoquiz", %addr, "HTTP server listening");
  axum::serve(listener, app).await?;
  Ok(())
}
