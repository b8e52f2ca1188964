//! Admissions Forms · Assessment form service
//!
//! - Axum HTTP API acting as the page controller for each assessment form
//! - Records loaded from / saved to the admissions admin REST API
//! - Static page shell fallback (./static/index.html)
//!
//! Important env variables:
//!   PORT                : u16 (default 3000)
//!   ADMIN_API_BASE_URL  : admin API origin (default "http://127.0.0.1:8080")
//!   ADMIN_API_TOKEN     : bearer token forwarded to the admin API
//!   FORMS_CONFIG_PATH   : path to TOML config (api, messages, sessions, debug_payloads)
//!   LOG_LEVEL           : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT          : "pretty" (default) or "json"

mod api;
mod codec;
mod config;
mod domain;
mod error;
mod form_state;
mod forms;
mod loader;
mod logic;
mod protocol;
mod routes;
mod schema;
mod scoring;
mod state;
mod submitter;
mod telemetry;
mod util;

#[cfg(test)]
mod testing;

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::{info, instrument};

use crate::routes::build_router;
use crate::state::AppState;

#[instrument(level = "info", skip_all)]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  // Shared state: session store, admin API client, form registry.
  let state = Arc::new(AppState::from_env()?);
  state.spawn_session_sweeper();

  let app = build_router(state.clone());

  // Read port from env or default to 3000.
  let addr: SocketAddr = std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .map(|port| SocketAddr::from(([0, 0, 0, 0], port)))
    .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

  let listener = TcpListener::bind(addr).await?;
  info!(target: "admissions_forms", %addr, "HTTP server listening");
  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;
  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::error!(target: "admissions_forms", error = %e, "Failed to listen for shutdown signal");
    std::future::pending::<()>().await;
  }
  info!(target: "admissions_forms", "Shutdown signal received");
}
