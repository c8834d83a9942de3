use std::error::Error;
use std::fmt::{self, Display};

/// The kind of error that occurred.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The endpoint is empty or unset.
    InvalidEndpoint,
    /// The draft has neither text nor an attachment.
    EmptyDraft,
    /// Another request is still in flight.
    RequestInFlight,
    /// The request never got a response from the endpoint.
    NetworkFailure,
    /// The endpoint answered with a non-200 status or a malformed body.
    UpstreamError,
}

impl ErrorKind {
    /// Returns `true` if the error was raised before anything was sent
    /// over the network.
    #[inline]
    pub fn is_pre_flight(self) -> bool {
        matches!(
            self,
            ErrorKind::InvalidEndpoint
                | ErrorKind::EmptyDraft
                | ErrorKind::RequestInFlight
        )
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::InvalidEndpoint => write!(f, "Invalid endpoint"),
            ErrorKind::EmptyDraft => write!(f, "Empty draft"),
            ErrorKind::RequestInFlight => write!(f, "Request in flight"),
            ErrorKind::NetworkFailure => write!(f, "Network failure"),
            ErrorKind::UpstreamError => write!(f, "Upstream error"),
        }
    }
}

/// Describes a relay failure.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RelayError {
    kind: ErrorKind,
    message: Option<String>,
}

impl RelayError {
    /// Creates an error of the given kind without a message.
    #[inline]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
        }
    }

    /// Creates a new error with the `InvalidEndpoint` kind.
    #[inline]
    pub fn invalid_endpoint() -> Self {
        Self::new(ErrorKind::InvalidEndpoint)
    }

    /// Creates a new error with the `EmptyDraft` kind.
    #[inline]
    pub fn empty_draft() -> Self {
        Self::new(ErrorKind::EmptyDraft)
    }

    /// Creates a new error with the `RequestInFlight` kind.
    #[inline]
    pub fn request_in_flight() -> Self {
        Self::new(ErrorKind::RequestInFlight)
    }

    /// Creates a new error with the `NetworkFailure` kind.
    #[inline]
    pub fn network_failure() -> Self {
        Self::new(ErrorKind::NetworkFailure)
    }

    /// Creates a new error with the `UpstreamError` kind.
    #[inline]
    pub fn upstream_error() -> Self {
        Self::new(ErrorKind::UpstreamError)
    }

    /// Attaches a message to the error.
    #[inline]
    pub fn with_message<S: Into<String>>(self, message: S) -> Self {
        Self {
            kind: self.kind,
            message: Some(message.into()),
        }
    }

    /// Returns the kind of this error.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the attached message, if any.
    #[inline]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl Display for RelayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => write!(f, "{}: {message}", self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl Error for RelayError {}
