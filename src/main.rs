//! Speța · Legal Case Authoring Backend
//!
//! - Axum HTTP API: five-step wizard, one-shot case generation, draft
//!   editing, validated save into the case store
//! - Optional OpenAI-compatible generation endpoint (via environment variables)
//! - Optional REST case store (PostgREST dialect)
//! - Static SPA fallback (./static/index.html)
//!
//! Important env variables:
//!   PORT                : u16 (default 3000)
//!   OPENAI_API_KEY      : enables case generation if present
//!   OPENAI_BASE_URL     : default "https://api.openai.com/v1"
//!   OPENAI_FAST_MODEL   : default "gpt-4o-mini" (classification)
//!   OPENAI_STRONG_MODEL : default "gpt-4o" (case generation)
//!   STORE_URL           : base URL of the case store; enables saving
//!   STORE_SERVICE_KEY   : service key for the case store
//!   CASEGEN_CONFIG_PATH : path to TOML config (prompt overrides)
//!   LOG_LEVEL           : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT          : "pretty" (default) or "json"

mod telemetry;
mod util;
mod domain;
mod catalog;
mod config;
mod editor;
mod validate;
mod wizard;
mod generator;
mod store;
mod saga;
mod state;
mod protocol;
mod logic;
mod routes;

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::{info, instrument};

use crate::routes::build_router;
use crate::state::AppState;

#[instrument(level = "info", skip_all)]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  // Build shared application state (sessions, prompts, optional clients).
  let state = Arc::new(AppState::new());

  // Build the HTTP router with routes, CORS and tracing layers.
  let app = build_router(state.clone());

  // Read port from env or default to 3000.
  let addr: SocketAddr = std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .map(|port| SocketAddr::from(([0, 0, 0, 0], port)))
    .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

  let listener = TcpListener::bind(addr).await?;
  info!(target: "speta_backend", %addr, "HTTP server listening");
  axum::serve(listener, app).await?;
  Ok(())
}
