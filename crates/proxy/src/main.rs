//! Runs the chat proxy.
//!
//! Configuration comes from the environment:
//!
//! - `AGRI_PROXY_ADDR`: address to listen on, `127.0.0.1:3000` by default.
//! - `AGRI_PROXY_UPSTREAM`: where conversations are forwarded to.
//! - `AGRI_PROXY_FALLBACK_REPLIES`: optional path to a JSON array of
//!   replies used when the upstream fails.

#[macro_use]
extern crate tracing;

use std::env;
use std::fs;

use agri_chat_core::RelayClient;
use agri_chat_http_relay::{EncodingMode, HttpRelay, HttpRelayConfigBuilder};
use agri_chat_model::{CannedReplies, default_fallback_replies};
use agri_chat_proxy::{ProxyConfig, ProxyState, create_router};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

const DEFAULT_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_UPSTREAM: &str = "https://your-backend-api.com/chat";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let addr = env::var("AGRI_PROXY_ADDR")
        .unwrap_or_else(|_| DEFAULT_ADDR.to_owned());
    let upstream = env::var("AGRI_PROXY_UPSTREAM")
        .unwrap_or_else(|_| DEFAULT_UPSTREAM.to_owned());
    let fallback_replies = match env::var("AGRI_PROXY_FALLBACK_REPLIES") {
        Ok(path) => match load_replies(&path) {
            Ok(replies) => replies,
            Err(err) => {
                eprintln!("failed to load replies from {path}: {err}");
                return;
            }
        },
        Err(_) => default_fallback_replies(),
    };

    let relay = HttpRelay::new(
        HttpRelayConfigBuilder::with_mode(EncodingMode::Conversation).build(),
    );
    let state = ProxyState::new(
        RelayClient::new(relay),
        ProxyConfig {
            upstream: upstream.clone(),
            fallback_replies,
        },
    );
    let app = create_router(state).layer(TraceLayer::new_for_http());

    let listener = match TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(err) => {
            eprintln!("failed to listen on {addr}: {err}");
            return;
        }
    };
    info!("listening on {addr}, forwarding to {upstream}");

    if let Err(err) = axum::serve(listener, app).await {
        error!("server error: {err}");
    }
}

fn load_replies(path: &str) -> Result<CannedReplies, Box<dyn std::error::Error>> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}
