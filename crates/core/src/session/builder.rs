use agri_chat_model::{CannedReplies, Message, Relay};

use super::Session;
use crate::conversation::Conversation;
use crate::relay_client::RelayClient;

/// [`Session`] builder.
pub struct SessionBuilder {
    pub(crate) relay: RelayClient,
    pub(crate) endpoint: String,
    pub(crate) failure_replies: Option<CannedReplies>,
    pub(crate) on_log_changed: Option<Box<dyn Fn(&[Message]) + Send + Sync>>,
}

impl SessionBuilder {
    /// Creates a new builder with the specified relay.
    #[inline]
    pub fn with_relay<R: Relay + 'static>(relay: R) -> Self {
        Self::with_relay_client(RelayClient::new(relay))
    }

    /// Creates a new builder with an already wrapped relay.
    #[inline]
    pub fn with_relay_client(relay: RelayClient) -> Self {
        Self {
            relay,
            endpoint: String::new(),
            failure_replies: None,
            on_log_changed: None,
        }
    }

    /// Sets the initial endpoint.
    #[inline]
    pub fn with_endpoint<S: Into<String>>(mut self, endpoint: S) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Sets the lines shown when a reply could not be obtained.
    ///
    /// Without a pool, the notice depends on what went wrong.
    #[inline]
    pub fn with_failure_replies(mut self, replies: CannedReplies) -> Self {
        self.failure_replies = Some(replies);
        self
    }

    /// Attaches a callback to be invoked whenever the message log changes.
    #[inline]
    pub fn on_log_changed(
        mut self,
        on_log_changed: impl Fn(&[Message]) + Send + Sync + 'static,
    ) -> Self {
        self.on_log_changed = Some(Box::new(on_log_changed));
        self
    }

    /// Builds the session.
    pub fn build(self) -> Session {
        let SessionBuilder {
            relay,
            endpoint,
            failure_replies,
            on_log_changed,
        } = self;

        let mut conversation = Conversation::new();
        if let Some(on_log_changed) = on_log_changed {
            conversation.set_observer(on_log_changed);
        }

        Session {
            conversation,
            endpoint,
            in_flight: false,
            relay,
            failure_replies,
        }
    }
}
