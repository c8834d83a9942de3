mod builder;

use std::fmt::{self, Debug, Formatter};

use agri_chat_model::{
    CannedReplies, RelayError, RelayRequest, default_failure_notice,
};

use crate::conversation::Conversation;
use crate::draft::Draft;
use crate::relay_client::{BoxedSendFuture, RelayClient};
pub use builder::SessionBuilder;

/// How a submission ended up in the log.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// The placeholder was replaced with the reply.
    Reply(String),
    /// The placeholder was replaced with a canned failure notice.
    Failure {
        /// What went wrong.
        error: RelayError,
        /// The text shown instead of a reply.
        notice: String,
    },
}

/// A chat session, like a window that displays messages and has an input
/// box.
///
/// The session owns the conversation, the endpoint requests go to, and the
/// in-flight flag. At most one request is in flight at a time: the
/// submission that would start a second one is rejected.
pub struct Session {
    conversation: Conversation,
    endpoint: String,
    in_flight: bool,
    relay: RelayClient,
    failure_replies: Option<CannedReplies>,
}

/// A request started by [`Session::begin_submit`].
///
/// Await [`wait`](PendingReply::wait) and hand the result back to
/// [`Session::finish_submit`].
#[must_use = "the placeholder stays pending until the reply is handed back"]
pub struct PendingReply {
    fut: BoxedSendFuture,
}

impl PendingReply {
    /// Waits for the relay round trip to complete.
    #[inline]
    pub async fn wait(self) -> Result<String, RelayError> {
        self.fut.await
    }
}

impl Debug for PendingReply {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingReply").finish_non_exhaustive()
    }
}

impl Session {
    /// Returns the conversation.
    #[inline]
    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Returns the draft for editing.
    ///
    /// The log itself is only changed by the submit flow.
    #[inline]
    pub fn draft_mut(&mut self) -> &mut Draft {
        self.conversation.draft_mut()
    }

    /// Returns the endpoint requests go to.
    #[inline]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Changes the endpoint requests go to.
    #[inline]
    pub fn set_endpoint<S: Into<String>>(&mut self, endpoint: S) {
        self.endpoint = endpoint.into();
        debug!("endpoint set to {:?}", self.endpoint);
    }

    /// Returns `true` while a request is in flight.
    #[inline]
    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Submits the draft and waits for the reply.
    ///
    /// Pre-flight problems (no endpoint, empty draft, another request in
    /// flight) are returned as errors and leave the session untouched.
    /// Everything that goes wrong after the request left is shown in the
    /// log as a canned notice and reported through [`Resolution::Failure`].
    ///
    /// # Cancel safety
    ///
    /// If this future is dropped before the reply arrives, the placeholder
    /// is resolved with a failure notice and the session accepts new
    /// submissions again.
    pub async fn submit(&mut self) -> Result<Resolution, RelayError> {
        let pending = self.begin_submit()?;
        let mut guard = SubmitGuard {
            session: self,
            finished: false,
        };
        let result = pending.wait().await;
        guard.finished = true;
        Ok(guard.session.finish_submit(result))
    }

    /// Starts a submission without waiting for the reply.
    ///
    /// On success, the user message and the placeholder have been
    /// appended, the draft has been cleared and the session is in flight.
    /// Hosts that cannot hold the session across an await point use this
    /// together with [`finish_submit`](Self::finish_submit).
    pub fn begin_submit(&mut self) -> Result<PendingReply, RelayError> {
        if self.in_flight || self.conversation.is_loading() {
            return Err(RelayError::request_in_flight());
        }

        let draft = self.conversation.draft();
        let req = RelayRequest::from_draft(
            &self.endpoint,
            self.conversation.history(),
            Some(draft.text().to_owned()),
            draft.attachment().cloned(),
        )?;

        let content = draft.to_content();
        if !self.conversation.append_user(content) {
            return Err(RelayError::empty_draft());
        }
        self.conversation.clear_draft();
        if !self.conversation.append_placeholder() {
            return Err(RelayError::request_in_flight());
        }
        self.in_flight = true;
        debug!("submitted to {}", req.endpoint);

        Ok(PendingReply {
            fut: self.relay.send(req),
        })
    }

    /// Resolves the placeholder with the outcome of a request started by
    /// [`begin_submit`](Self::begin_submit).
    ///
    /// Failure notices come from the injected pool, or, without one, from
    /// the default line for the error kind.
    pub fn finish_submit(
        &mut self,
        result: Result<String, RelayError>,
    ) -> Resolution {
        if !self.in_flight {
            warn!("finishing a submission that is not in flight");
        }
        self.in_flight = false;

        match result {
            Ok(reply) => {
                self.conversation.resolve_placeholder(reply.as_str());
                Resolution::Reply(reply)
            }
            Err(error) => {
                error!("failed to get a reply: {error}");
                let notice = match &self.failure_replies {
                    Some(pool) => pool.pick_random().to_owned(),
                    None => default_failure_notice(error.kind()).to_owned(),
                };
                self.conversation.fail_placeholder(notice.as_str());
                Resolution::Failure { error, notice }
            }
        }
    }
}

impl Debug for Session {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("conversation", &self.conversation)
            .field("endpoint", &self.endpoint)
            .field("in_flight", &self.in_flight)
            .finish_non_exhaustive()
    }
}

struct SubmitGuard<'a> {
    session: &'a mut Session,
    finished: bool,
}

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        if !self.finished {
            debug!("submission dropped while in flight");
            self.session.finish_submit(Err(
                RelayError::network_failure().with_message("cancelled")
            ));
        }
    }
}
