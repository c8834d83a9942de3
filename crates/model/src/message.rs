use serde::{Deserialize, Serialize};

use crate::AttachmentRef;

/// Who produced a message.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Produced by draft submission.
    User,
    /// Produced by the relay.
    Assistant,
}

/// What a log entry stands for.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
pub enum MessageKind {
    /// A user input or a real reply.
    #[default]
    Regular,
    /// The transient entry shown while a request is in flight.
    Placeholder,
    /// Canned text shown in place of a failed reply.
    Notice,
}

/// The content of a message: text, an inline attachment, or both.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Content {
    /// The text part, may be empty.
    pub text: String,
    /// The attachment part.
    pub attachment: Option<AttachmentRef>,
}

impl Content {
    /// Creates a text-only content.
    #[inline]
    pub fn text<S: Into<String>>(text: S) -> Self {
        Self {
            text: text.into(),
            attachment: None,
        }
    }

    /// Sets the attachment part.
    #[inline]
    pub fn with_attachment(mut self, attachment: AttachmentRef) -> Self {
        self.attachment = Some(attachment);
        self
    }

    /// Returns `true` if there is neither meaningful text nor an
    /// attachment.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty() && self.attachment.is_none()
    }
}

impl From<&str> for Content {
    #[inline]
    fn from(text: &str) -> Self {
        Self::text(text)
    }
}

impl From<String> for Content {
    #[inline]
    fn from(text: String) -> Self {
        Self::text(text)
    }
}

/// An entry in the conversation log.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Message {
    /// Who produced this message.
    pub role: Role,
    /// The message body.
    pub content: Content,
    /// What this entry stands for.
    #[serde(default)]
    pub kind: MessageKind,
}

impl Message {
    /// Creates a regular user message.
    #[inline]
    pub fn user<C: Into<Content>>(content: C) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            kind: MessageKind::Regular,
        }
    }

    /// Creates a regular assistant message.
    #[inline]
    pub fn assistant<C: Into<Content>>(content: C) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            kind: MessageKind::Regular,
        }
    }

    /// Sets the kind of this message.
    #[inline]
    pub fn with_kind(mut self, kind: MessageKind) -> Self {
        self.kind = kind;
        self
    }

    /// Returns the text part of the content.
    #[inline]
    pub fn text(&self) -> &str {
        &self.content.text
    }
}
