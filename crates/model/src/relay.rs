use crate::error::RelayError;
use crate::request::RelayRequest;

/// A type that delivers a request to a reply-generating service and
/// returns its reply text.
///
/// Implementations perform exactly one round trip per call. They should not
/// retry, and should map every failure into a [`RelayError`] with a
/// network-stage kind.
pub trait Relay: Send + Sync {
    /// Sends the request and waits for the reply.
    fn send(
        &self,
        req: &RelayRequest,
    ) -> impl Future<Output = Result<String, RelayError>> + Send + 'static;
}
