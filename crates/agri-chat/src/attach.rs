use std::error::Error;
use std::fmt::{self, Display};
use std::io;
use std::path::Path;

use agri_chat_model::{Attachment, UnsupportedMime};

/// The error returned when a file cannot be attached.
#[derive(Debug)]
pub enum AttachError {
    /// The file could not be read.
    Io(io::Error),
    /// The file is not an image.
    Unsupported(UnsupportedMime),
}

impl Display for AttachError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttachError::Io(err) => write!(f, "cannot read file: {err}"),
            AttachError::Unsupported(err) => err.fmt(f),
        }
    }
}

impl Error for AttachError {}

/// Reads an image file into an [`Attachment`], guessing its MIME type from
/// the extension.
pub async fn load_attachment<P: AsRef<Path>>(
    path: P,
) -> Result<Attachment, AttachError> {
    let path = path.as_ref();
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_owned());

    // Check the type first so we don't read a large non-image for nothing.
    if mime.type_() != mime::IMAGE {
        return Err(AttachError::Unsupported(UnsupportedMime(mime)));
    }

    let bytes = tokio::fs::read(path).await.map_err(AttachError::Io)?;
    debug!("loaded {} bytes from {}", bytes.len(), path.display());
    Attachment::new(file_name, mime, bytes).map_err(AttachError::Unsupported)
}
