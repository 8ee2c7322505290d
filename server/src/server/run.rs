// Router assembly and the serve loop.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use axum::{
    routing::{get, post},
    Json, Router,
};

use crate::server::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/health",
            get(|| async { Json(serde_json::json!({ "ok": true })) }),
        )
        .route("/ws", get(crate::server::ws::ws_handler))
        .route("/api/message", post(crate::server::http::message_handler))
        .with_state(state)
}

pub async fn run_server(addr: SocketAddr, state: AppState) -> Result<()> {
    let app = build_router(state);
    tracing::info!(%addr, "Firedeck server running");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding to {}", addr))?;
    axum::serve(listener, app).await.context("serving HTTP")?;
    Ok(())
}
