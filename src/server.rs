//! HTTP surface: health check, manual push trigger and carbon Q&A.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::routing::get;
use axum::routing::post;
use log::info;
use serde::Deserialize;
use serde::Serialize;

use crate::service::Services;
use crate::service::daily_push_service::PushOutcome;

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub question: String,
}

#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub answer: String,
}

pub fn router(services: Arc<Services>) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/push-daily", get(push_daily))
        .route("/carbon/ask", post(carbon_ask))
        .with_state(services)
}

/// Serves until Ctrl+C.
pub async fn serve(services: Arc<Services>, addr: SocketAddr) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("HTTP server listening on {addr}");

    axum::serve(listener, router(services))
        .with_graceful_shutdown(async {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Ctrl+C received, shutting down.");
            }
        })
        .await?;
    Ok(())
}

async fn health() -> Json<StatusResponse> {
    Json(StatusResponse { status: "running" })
}

/// Runs a cycle to completion before answering.
async fn push_daily(State(services): State<Arc<Services>>) -> Json<StatusResponse> {
    info!("Manual daily push requested.");
    let status = match services.daily_push.run_daily_push().await {
        PushOutcome::AlreadyRunning => "push already running",
        _ => "push triggered",
    };
    Json(StatusResponse { status })
}

async fn carbon_ask(
    State(services): State<Arc<Services>>,
    Json(request): Json<AskRequest>,
) -> Json<AskResponse> {
    let answer = services.carbon.ask(&request.question).await;
    Json(AskResponse { answer })
}
