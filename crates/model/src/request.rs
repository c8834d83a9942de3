use serde::{Deserialize, Serialize};

use crate::{Attachment, RelayError, Role};

/// A role/content pair, the unit of conversation history on the wire.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Who produced the message.
    pub role: Role,
    /// The message text.
    pub content: String,
}

impl ChatMessage {
    /// Creates a new `ChatMessage`.
    #[inline]
    pub fn new<S: Into<String>>(role: Role, content: S) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// A request to be sent through a relay.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelayRequest {
    /// Where the request goes.
    pub endpoint: String,
    /// The conversation so far, ending with the new user input if it has
    /// any text. Backends that keep context read this.
    pub messages: Vec<ChatMessage>,
    /// The text of the new user input.
    pub text: Option<String>,
    /// The file attached to the new user input.
    pub attachment: Option<Attachment>,
}

impl RelayRequest {
    /// Builds a request from a draft, rejecting it before it reaches the
    /// network if the endpoint or the draft is empty.
    pub fn from_draft(
        endpoint: &str,
        history: Vec<ChatMessage>,
        text: Option<String>,
        attachment: Option<Attachment>,
    ) -> Result<Self, RelayError> {
        let endpoint = endpoint.trim();
        if endpoint.is_empty() {
            return Err(RelayError::invalid_endpoint());
        }

        let text = text.filter(|text| !text.trim().is_empty());
        if text.is_none() && attachment.is_none() {
            return Err(RelayError::empty_draft());
        }

        let mut messages = history;
        if let Some(text) = &text {
            messages.push(ChatMessage::new(Role::User, text.clone()));
        }

        Ok(Self {
            endpoint: endpoint.to_owned(),
            messages,
            text,
            attachment,
        })
    }

    /// Builds a request that forwards an existing conversation as is.
    pub fn forward<S: Into<String>>(
        endpoint: S,
        messages: Vec<ChatMessage>,
    ) -> Self {
        let text = messages
            .iter()
            .rev()
            .find(|msg| msg.role == Role::User)
            .map(|msg| msg.content.clone());
        Self {
            endpoint: endpoint.into(),
            messages,
            text,
            attachment: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_rejects_empty_endpoint() {
        let err = RelayRequest::from_draft(
            "  ",
            vec![],
            Some("Hello".to_owned()),
            None,
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidEndpoint);
    }

    #[test]
    fn test_rejects_empty_draft() {
        let err = RelayRequest::from_draft(
            "http://localhost/chat",
            vec![],
            Some(" ".to_owned()),
            None,
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EmptyDraft);
    }

    #[test]
    fn test_appends_user_text_to_history() {
        let history = vec![
            ChatMessage::new(Role::User, "Hi"),
            ChatMessage::new(Role::Assistant, "Hello!"),
        ];
        let req = RelayRequest::from_draft(
            "http://localhost/chat",
            history,
            Some("How are my crops?".to_owned()),
            None,
        )
        .unwrap();
        assert_eq!(req.messages.len(), 3);
        assert_eq!(
            req.messages[2],
            ChatMessage::new(Role::User, "How are my crops?")
        );
    }

    #[test]
    fn test_forward_picks_last_user_text() {
        let req = RelayRequest::forward(
            "http://upstream/chat",
            vec![
                ChatMessage::new(Role::User, "first"),
                ChatMessage::new(Role::Assistant, "reply"),
                ChatMessage::new(Role::User, "second"),
            ],
        );
        assert_eq!(req.text.as_deref(), Some("second"));
        assert!(req.attachment.is_none());
    }
}
