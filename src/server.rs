use anyhow::{Context, Result};
use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, State},
    http::header,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use std::sync::Arc;
use tokio::{net::TcpListener, signal};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{error, info};

use crate::error::WebhookError;
use crate::evaluator;
use crate::kubernetes::PodCounter;
use crate::types::{CheckRequest, Config};

/// Larger bodies are rejected with `413 Payload Too Large`.
pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

#[derive(Clone)]
struct AppState {
    counter: Arc<dyn PodCounter>,
}

/// Builds the webhook router. Only `POST` is routed on the check path, so
/// other methods get `405 Method Not Allowed`.
pub fn router(cfg: &Config, counter: Arc<dyn PodCounter>) -> Router {
    Router::new()
        .route(&cfg.check_path, post(check_pod_count))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TimeoutLayer::new(cfg.request_timeout))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { counter })
}

pub async fn serve(cfg: &Config, counter: Arc<dyn PodCounter>) -> Result<()> {
    let app = router(cfg, counter);
    let listener = TcpListener::bind(cfg.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", cfg.listen_addr))?;
    info!("Pod count webhook listening on {}{}", cfg.listen_addr, cfg.check_path);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Pod count webhook stopped");
    Ok(())
}

async fn check_pod_count(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, WebhookError> {
    let req = parse_request(&body)?;
    let count = state.counter.count().await.map_err(WebhookError::PodCount)?;
    let resp = evaluator::check(count, &req)?;
    info!(count, severity = %resp.code, "pod count checked");

    let body = serde_json::to_vec(&resp).map_err(WebhookError::Serialization)?;
    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}

/// A JSON `null` body carries no thresholds. Key matching follows
/// `CheckRequest`'s deserializer.
pub fn parse_request(body: &[u8]) -> Result<CheckRequest, WebhookError> {
    serde_json::from_slice::<Option<CheckRequest>>(body)
        .map(Option::unwrap_or_default)
        .map_err(WebhookError::MalformedBody)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, shutting down gracefully");
        },
        () = terminate => {
            info!("Received SIGTERM, shutting down gracefully");
        },
    }
}
