//! Local generation endpoint.
//!
//! `POST /api/generate` takes `{"prompt": "..."}` and answers with the
//! generated text as a raw, unframed UTF-8 stream. Chunks are forwarded as
//! the upstream produces them.

use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::Router;
use serde::Deserialize;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::assistant::{GenerateRequest, GenerateTransport};
use crate::error::AssistError;

pub const GENERATE_PATH: &str = "/api/generate";
pub const NO_PROMPT_MESSAGE: &str = "No prompt in the request";

#[derive(Clone)]
pub struct AppState {
    upstream: Arc<dyn GenerateTransport>,
}

impl AppState {
    pub fn new(upstream: Arc<dyn GenerateTransport>) -> Self {
        Self { upstream }
    }
}

#[derive(Debug, Deserialize)]
struct PromptBody {
    #[serde(default)]
    prompt: Option<String>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(GENERATE_PATH, post(generate))
        .with_state(state)
}

/// Serves the endpoint on `listener` until `shutdown` resolves.
///
/// In-flight responses are allowed to finish after shutdown starts.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, path = GENERATE_PATH, "generation endpoint listening");
    }

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
}

async fn generate(State(state): State<AppState>, body: Bytes) -> Response {
    // Malformed JSON, a missing field and an empty string all count as "no prompt".
    let prompt = serde_json::from_slice::<PromptBody>(&body)
        .ok()
        .and_then(|b| b.prompt)
        .filter(|p| !p.is_empty());

    let Some(prompt) = prompt else {
        tracing::warn!(bytes = body.len(), "rejected request without prompt");
        return (StatusCode::BAD_REQUEST, NO_PROMPT_MESSAGE).into_response();
    };

    tracing::info!(prompt_chars = prompt.chars().count(), "generate request");

    match state.upstream.generate(&GenerateRequest { prompt }).await {
        Ok(Some(stream)) => text_response(Body::from_stream(stream)),
        Ok(None) => text_response(Body::empty()),
        Err(e) => error_response(&e),
    }
}

fn text_response(body: Body) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        body,
    )
        .into_response()
}

fn error_response(err: &AssistError) -> Response {
    let status = match err {
        AssistError::Request { status, .. } => {
            StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
        }
        AssistError::Connect { .. } | AssistError::Stream(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };

    tracing::warn!(%status, error = %err, "upstream request failed");

    let text = match err {
        AssistError::Request { status_text, .. } => status_text.clone(),
        _ => status
            .canonical_reason()
            .unwrap_or("Upstream error")
            .to_string(),
    };

    (status, text).into_response()
}
