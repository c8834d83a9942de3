use std::error::Error;
use std::fmt::{self, Display};

use bytes::Bytes;
use mime::Mime;
use serde::{Deserialize, Serialize};

/// A file selected by the user to be sent along with the draft.
///
/// Only images are accepted. Cloning is cheap, the contents are shared.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attachment {
    file_name: String,
    mime: Mime,
    bytes: Bytes,
}

impl Attachment {
    /// Creates an attachment, rejecting anything that is not `image/*`.
    pub fn new<S: Into<String>>(
        file_name: S,
        mime: Mime,
        bytes: impl Into<Bytes>,
    ) -> Result<Self, UnsupportedMime> {
        if mime.type_() != mime::IMAGE {
            return Err(UnsupportedMime(mime));
        }
        Ok(Self {
            file_name: file_name.into(),
            mime,
            bytes: bytes.into(),
        })
    }

    /// Returns the file name.
    #[inline]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Returns the MIME type.
    #[inline]
    pub fn mime(&self) -> &Mime {
        &self.mime
    }

    /// Returns the raw contents.
    #[inline]
    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    /// Makes a lightweight reference suitable for the message log.
    pub fn to_ref(&self) -> AttachmentRef {
        AttachmentRef {
            file_name: self.file_name.clone(),
            mime: self.mime.essence_str().to_owned(),
            size: self.bytes.len(),
        }
    }
}

/// A reference to an attachment that was sent, kept inline in the log.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttachmentRef {
    /// Name of the file.
    pub file_name: String,
    /// MIME type essence, e.g. `image/png`.
    pub mime: String,
    /// Size of the contents in bytes.
    pub size: usize,
}

/// The error returned when a non-image file is attached.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnsupportedMime(
    /// The rejected MIME type.
    pub Mime,
);

impl Display for UnsupportedMime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "only images can be attached, got {}", self.0)
    }
}

impl Error for UnsupportedMime {}
