//! The conversation store.
//!
//! [`Conversation`] holds the ordered message log and the draft. The log is
//! append-only, except that the pending placeholder is replaced once when
//! the reply (or a failure notice) arrives. Every change to the log is
//! reported to the registered observer, which is where the presentation
//! layer hooks its auto-scroll.

use std::fmt::{self, Debug, Formatter};

use agri_chat_model::{ChatMessage, Content, Message, MessageKind};

use crate::draft::Draft;

/// The fixed content of a placeholder.
pub const PLACEHOLDER_TEXT: &str = "Loading...";

/// A callback invoked with the whole log after each change.
pub type LogObserver = Box<dyn Fn(&[Message]) + Send + Sync>;

/// Represents a conversation.
#[derive(Default)]
pub struct Conversation {
    messages: Vec<Message>,
    draft: Draft,
    // Index of the placeholder awaiting its reply.
    pending: Option<usize>,
    observer: Option<LogObserver>,
}

impl Conversation {
    /// Creates an empty conversation.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the callback invoked after each change to the log.
    #[inline]
    pub fn set_observer(&mut self, observer: LogObserver) {
        self.observer = Some(observer);
    }

    /// Returns all messages in order.
    #[inline]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Returns the latest message.
    #[inline]
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Returns the number of messages.
    #[inline]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns `true` if the log has no messages.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Returns `true` while a placeholder is waiting for its reply.
    #[inline]
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Returns the draft.
    #[inline]
    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Returns the draft for editing.
    #[inline]
    pub fn draft_mut(&mut self) -> &mut Draft {
        &mut self.draft
    }

    /// Appends a user message.
    ///
    /// Does nothing and returns `false` if the content has neither text
    /// nor an attachment.
    pub fn append_user<C: Into<Content>>(&mut self, content: C) -> bool {
        let content = content.into();
        if content.is_empty() {
            debug!("ignored an empty user message");
            return false;
        }
        self.push(Message::user(content));
        true
    }

    /// Appends the placeholder shown while a request is in flight.
    ///
    /// Returns `false` without appending if a placeholder is already
    /// pending.
    pub fn append_placeholder(&mut self) -> bool {
        if self.pending.is_some() {
            warn!("a placeholder is already pending");
            return false;
        }
        self.pending = Some(self.messages.len());
        self.push(
            Message::assistant(PLACEHOLDER_TEXT)
                .with_kind(MessageKind::Placeholder),
        );
        true
    }

    /// Replaces the pending placeholder with the reply.
    ///
    /// Returns `false` if no placeholder is pending.
    #[inline]
    pub fn resolve_placeholder<C: Into<Content>>(&mut self, content: C) -> bool {
        self.replace_placeholder(
            Message::assistant(content).with_kind(MessageKind::Regular),
        )
    }

    /// Replaces the pending placeholder with failure text.
    ///
    /// Returns `false` if no placeholder is pending.
    #[inline]
    pub fn fail_placeholder<S: Into<String>>(&mut self, notice: S) -> bool {
        self.replace_placeholder(
            Message::assistant(notice.into()).with_kind(MessageKind::Notice),
        )
    }

    /// Resets the draft, releasing its attachment preview.
    #[inline]
    pub fn clear_draft(&mut self) {
        self.draft.clear();
    }

    /// Returns the regular messages that carry text as role/content pairs.
    ///
    /// Placeholders and failure notices are not part of the history a
    /// backend gets to see.
    pub fn history(&self) -> Vec<ChatMessage> {
        self.messages
            .iter()
            .filter(|msg| msg.kind == MessageKind::Regular)
            .filter(|msg| !msg.text().trim().is_empty())
            .map(|msg| ChatMessage::new(msg.role, msg.text()))
            .collect()
    }

    fn replace_placeholder(&mut self, msg: Message) -> bool {
        let Some(idx) = self.pending.take() else {
            warn!("no pending placeholder to resolve");
            return false;
        };
        self.messages[idx] = msg;
        self.notify();
        true
    }

    fn push(&mut self, msg: Message) {
        self.messages.push(msg);
        self.notify();
    }

    fn notify(&self) {
        trace!("log changed, {} messages", self.messages.len());
        if let Some(observer) = &self.observer {
            observer(&self.messages);
        }
    }
}

impl Debug for Conversation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Conversation")
            .field("messages", &self.messages)
            .field("draft", &self.draft)
            .field("pending", &self.pending)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use agri_chat_model::{Attachment, Role};

    use super::*;

    #[test]
    fn test_append_user_grows_by_one() {
        let mut conversation = Conversation::new();
        assert!(conversation.append_user("first"));
        assert!(conversation.append_user("second"));
        assert_eq!(conversation.len(), 2);

        assert!(conversation.append_user("third"));
        let texts: Vec<_> =
            conversation.messages().iter().map(Message::text).collect();
        assert_eq!(texts, ["first", "second", "third"]);
        assert!(conversation.messages().iter().all(|m| m.role == Role::User));
    }

    #[test]
    fn test_append_empty_user_is_noop() {
        let mut conversation = Conversation::new();
        conversation.append_user("Hello");
        assert!(!conversation.append_user(""));
        assert!(!conversation.append_user("  \t"));
        assert_eq!(conversation.len(), 1);
    }

    #[test]
    fn test_append_attachment_only() {
        let attachment =
            Attachment::new("leaf.png", mime::IMAGE_PNG, vec![1, 2]).unwrap();
        let mut conversation = Conversation::new();
        assert!(
            conversation
                .append_user(Content::default().with_attachment(attachment.to_ref()))
        );
        assert_eq!(conversation.len(), 1);
        // Nothing to say as history.
        assert!(conversation.history().is_empty());
    }

    #[test]
    fn test_resolve_placeholder() {
        let mut conversation = Conversation::new();
        conversation.append_user("Hello");
        assert!(conversation.append_placeholder());
        assert!(conversation.is_loading());
        let len = conversation.len();
        assert_eq!(conversation.last().unwrap().text(), PLACEHOLDER_TEXT);

        assert!(conversation.resolve_placeholder("Hi there"));
        assert!(!conversation.is_loading());
        assert_eq!(conversation.len(), len);
        let last = conversation.last().unwrap();
        assert_eq!(last.role, Role::Assistant);
        assert_eq!(last.text(), "Hi there");
        assert_eq!(last.kind, MessageKind::Regular);
    }

    #[test]
    fn test_resolve_without_placeholder_is_noop() {
        let mut conversation = Conversation::new();
        conversation.append_user("Hello");
        assert!(!conversation.resolve_placeholder("Hi there"));
        assert_eq!(conversation.messages(), [Message::user("Hello")]);
    }

    #[test]
    fn test_only_one_pending_placeholder() {
        let mut conversation = Conversation::new();
        assert!(conversation.append_placeholder());
        assert!(!conversation.append_placeholder());
        assert_eq!(conversation.len(), 1);
    }

    #[test]
    fn test_history_skips_placeholders_and_notices() {
        let mut conversation = Conversation::new();
        conversation.append_user("Hello");
        conversation.append_placeholder();
        conversation.fail_placeholder("Error: Could not communicate.");
        conversation.append_user("Hello again");
        conversation.append_placeholder();
        assert_eq!(
            conversation.history(),
            [
                ChatMessage::new(Role::User, "Hello"),
                ChatMessage::new(Role::User, "Hello again"),
            ]
        );

        conversation.resolve_placeholder("Hi!");
        assert_eq!(conversation.history().len(), 3);
    }

    #[test]
    fn test_every_log_change_notifies() {
        let changes = Arc::new(AtomicUsize::new(0));
        let mut conversation = Conversation::new();
        conversation.set_observer({
            let changes = Arc::clone(&changes);
            Box::new(move |_| {
                changes.fetch_add(1, Ordering::SeqCst);
            })
        });

        conversation.append_user("Hello");
        conversation.append_user("");
        conversation.append_placeholder();
        conversation.resolve_placeholder("Hi there");
        conversation.draft_mut().set_text("not a log change");
        assert_eq!(changes.load(Ordering::SeqCst), 3);
    }
}
