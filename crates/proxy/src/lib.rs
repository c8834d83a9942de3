//! A local proxy that forwards a chat conversation to a fixed upstream.
//!
//! The proxy exposes a single route, `POST /api/chat`, taking
//! `{ "messages": [...] }` and answering `{ "reply": "..." }`. Upstream
//! failures never reach the caller: they are logged and answered with a
//! canned reply, so the chat surface always stays responsive.

#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

use std::sync::Arc;

use agri_chat_core::RelayClient;
use agri_chat_model::{CannedReplies, ChatMessage, RelayRequest};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

/// Configuration for the proxy.
#[derive(Clone, Debug)]
pub struct ProxyConfig {
    /// Where conversations are forwarded to.
    pub upstream: String,
    /// The replies used when the upstream fails.
    pub fallback_replies: CannedReplies,
}

/// Shared state of the proxy handlers.
#[derive(Clone)]
pub struct ProxyState {
    relay: RelayClient,
    config: Arc<ProxyConfig>,
}

impl ProxyState {
    /// Creates the state with the relay used to reach the upstream.
    #[inline]
    pub fn new(relay: RelayClient, config: ProxyConfig) -> Self {
        Self {
            relay,
            config: Arc::new(config),
        }
    }
}

/// The body accepted by `POST /api/chat`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The conversation so far.
    pub messages: Vec<ChatMessage>,
}

/// The body returned by `POST /api/chat`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    /// The reply text.
    pub reply: String,
}

/// The body returned for rejected requests.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// What went wrong.
    pub error: String,
}

impl ErrorResponse {
    fn new<S: Into<String>>(error: S) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Creates the proxy router.
pub fn create_router(state: ProxyState) -> Router {
    Router::new()
        .route("/api/chat", post(chat).fallback(method_not_allowed))
        .with_state(state)
}

async fn chat(
    State(state): State<ProxyState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Response {
    let Json(ChatRequest { messages }) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            warn!("rejected a chat request: {rejection}");
            let body = Json(ErrorResponse::new(rejection.body_text()));
            return (StatusCode::BAD_REQUEST, body).into_response();
        }
    };

    debug!("forwarding {} messages", messages.len());
    let req = RelayRequest::forward(state.config.upstream.as_str(), messages);
    let reply = match state.relay.send(req).await {
        Ok(reply) => reply,
        Err(err) => {
            error!("upstream failed: {err}");
            state.config.fallback_replies.pick_random().to_owned()
        }
    };

    Json(ChatResponse { reply }).into_response()
}

async fn method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorResponse::new("Method not allowed")),
    )
}
