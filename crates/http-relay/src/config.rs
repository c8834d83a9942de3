use std::fmt::{self, Display};
use std::str::FromStr;

/// How drafts are encoded on the wire. Fixed per deployment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EncodingMode {
    /// JSON `{ "messages": [...] }` carrying the whole history, for
    /// context-aware backends. Drafts with an attachment still go out as
    /// multipart.
    Conversation,
    /// `multipart/form-data` with a `message` text field and a `file`
    /// field, both optional.
    #[default]
    Form,
}

impl FromStr for EncodingMode {
    type Err = UnknownEncodingMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "conversation" | "json" => Ok(EncodingMode::Conversation),
            "form" | "multipart" => Ok(EncodingMode::Form),
            _ => Err(UnknownEncodingMode(s.to_owned())),
        }
    }
}

/// The error returned when parsing an unknown [`EncodingMode`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownEncodingMode(String);

impl Display for UnknownEncodingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown encoding mode {:?}, expected `conversation` or `form`",
            self.0
        )
    }
}

impl std::error::Error for UnknownEncodingMode {}

/// Builder for [`HttpRelayConfig`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct HttpRelayConfigBuilder {
    mode: EncodingMode,
    fallback_reply: Option<String>,
}

impl HttpRelayConfigBuilder {
    /// Creates a builder with the given encoding mode.
    #[inline]
    pub fn with_mode(mode: EncodingMode) -> Self {
        Self {
            mode,
            fallback_reply: None,
        }
    }

    /// Sets the reply used when a successful response carries neither a
    /// `reply` nor a `message` field.
    #[inline]
    pub fn with_fallback_reply<S: Into<String>>(mut self, reply: S) -> Self {
        self.fallback_reply = Some(reply.into());
        self
    }

    /// Builds the configuration.
    #[inline]
    pub fn build(self) -> HttpRelayConfig {
        HttpRelayConfig {
            mode: self.mode,
            fallback_reply: self.fallback_reply,
        }
    }
}

/// Configuration for [`HttpRelay`](crate::HttpRelay).
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct HttpRelayConfig {
    pub(crate) mode: EncodingMode,
    pub(crate) fallback_reply: Option<String>,
}

impl HttpRelayConfig {
    /// Returns the encoding mode.
    #[inline]
    pub fn mode(&self) -> EncodingMode {
        self.mode
    }
}
