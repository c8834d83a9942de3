use std::pin::Pin;
use std::sync::Arc;

use agri_chat_model::{
    Attachment, ChatMessage, Relay, RelayError, RelayRequest,
};
use tracing::Instrument;

type SendResult = Result<String, RelayError>;
/// The future returned by [`RelayClient::send`].
pub type BoxedSendFuture = Pin<Box<dyn Future<Output = SendResult> + Send>>;
type HandlerFn = Arc<dyn Fn(RelayRequest) -> BoxedSendFuture + Send + Sync>;

/// A wrapper around a relay that provides a type-erased interface for the
/// session and the proxy.
#[derive(Clone)]
pub struct RelayClient {
    handler_fn: HandlerFn,
}

impl RelayClient {
    /// Wraps the given relay.
    #[inline]
    pub fn new<R: Relay + 'static>(relay: R) -> Self {
        // We have to erase the type `R`, since `RelayClient` doesn't have a
        // generic parameter and we don't want it either.
        let handler_fn: HandlerFn = Arc::new(move |req| {
            let fut = relay.send(&req);
            Box::pin(
                async move {
                    trace!("sending to {}", req.endpoint);
                    let result = fut.await;
                    match &result {
                        Ok(reply) => trace!("got a reply: {reply:?}"),
                        Err(err) => warn!("relay failed: {err}"),
                    }
                    result
                }
                .instrument(trace_span!("relay request")),
            )
        });
        Self { handler_fn }
    }

    /// Sends a prepared request.
    ///
    /// The returned future owns everything it needs, so the caller is free
    /// to mutate its own state while the request is in flight.
    #[inline]
    pub fn send(&self, req: RelayRequest) -> BoxedSendFuture {
        (self.handler_fn)(req)
    }

    /// Validates a draft and sends it to `endpoint`.
    ///
    /// Fails with `InvalidEndpoint` or `EmptyDraft` without touching the
    /// network.
    pub async fn submit(
        &self,
        endpoint: &str,
        history: Vec<ChatMessage>,
        text: Option<String>,
        attachment: Option<Attachment>,
    ) -> SendResult {
        let req = RelayRequest::from_draft(endpoint, history, text, attachment)?;
        self.send(req).await
    }
}
