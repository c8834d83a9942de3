//! A relay that posts drafts to an HTTP endpoint.
//!
//! Each submission is exactly one `POST`. Depending on the deployment, the
//! body is either a JSON conversation log or a multipart form, see
//! [`EncodingMode`]. A `200` response with a JSON `reply` (or `message`)
//! string is a success; everything else is a [`RelayError`].

#[macro_use]
extern crate tracing;

mod config;
mod proto;

use std::sync::Arc;

use agri_chat_model::{Relay, RelayError, RelayRequest};
use reqwest::{Client, RequestBuilder, StatusCode};

pub use config::{
    EncodingMode, HttpRelayConfig, HttpRelayConfigBuilder, UnknownEncodingMode,
};
use proto::ConversationPayload;

/// HTTP relay.
#[derive(Clone, Debug)]
pub struct HttpRelay {
    client: Client,
    config: Arc<HttpRelayConfig>,
}

impl HttpRelay {
    /// Creates a new `HttpRelay` with the given configuration.
    #[inline]
    pub fn new(config: HttpRelayConfig) -> Self {
        Self {
            client: Client::new(),
            config: Arc::new(config),
        }
    }

    fn build_request(
        &self,
        req: &RelayRequest,
    ) -> Result<RequestBuilder, RelayError> {
        let builder = self.client.post(&req.endpoint);
        let use_form = self.config.mode() == EncodingMode::Form
            || req.attachment.is_some();

        if use_form {
            debug!("encoding request as multipart form");
            let form = proto::create_form(
                req.text.as_deref(),
                req.attachment.as_ref(),
            )?;
            Ok(builder.multipart(form))
        } else {
            debug!("encoding request as conversation log");
            Ok(builder.json(&ConversationPayload {
                messages: &req.messages,
            }))
        }
    }
}

impl Relay for HttpRelay {
    fn send(
        &self,
        req: &RelayRequest,
    ) -> impl Future<Output = Result<String, RelayError>> + Send + 'static
    {
        let builder = self.build_request(req);
        let fallback_reply = self.config.fallback_reply.clone();

        async move {
            let resp = match builder?.send().await {
                Ok(resp) => resp,
                Err(err) => {
                    return Err(RelayError::network_failure()
                        .with_message(format!("{err}")));
                }
            };

            let status = resp.status();
            if status != StatusCode::OK {
                return Err(RelayError::upstream_error()
                    .with_message(format!("unexpected status {status}")));
            }

            let body = resp.bytes().await.map_err(|err| {
                RelayError::network_failure()
                    .with_message(format!("failed to read body: {err}"))
            })?;
            trace!("got a response body of {} bytes", body.len());
            proto::parse_reply(&body, fallback_reply.as_deref())
        }
    }
}
