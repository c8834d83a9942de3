//! Local previews of attachments.
//!
//! A preview is a short-lived handle that lets the presentation layer
//! render the attachment currently selected in the draft. Each handle is
//! registered when created and released when dropped, so superseding or
//! clearing an attachment never leaves a stale preview behind.

use std::collections::HashMap;
use std::fmt::{self, Debug, Formatter};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use agri_chat_model::Attachment;

const URL_PREFIX: &str = "preview:";

#[derive(Default)]
struct Registry {
    next_id: u64,
    live: HashMap<u64, Attachment>,
}

/// Keeps track of the previews that are currently alive.
///
/// Clones share the same registry.
#[derive(Clone, Default)]
pub struct PreviewRegistry {
    inner: Arc<Mutex<Registry>>,
}

impl PreviewRegistry {
    /// Registers a preview for the attachment.
    pub fn register(&self, attachment: &Attachment) -> Preview {
        let mut registry = self.lock();
        registry.next_id += 1;
        let id = registry.next_id;
        registry.live.insert(id, attachment.clone());
        trace!("registered preview {id} for {}", attachment.file_name());
        Preview {
            id,
            registry: self.clone(),
        }
    }

    /// Looks up the attachment behind a preview URL, if it is still alive.
    pub fn resolve(&self, url: &str) -> Option<Attachment> {
        let id: u64 = url.strip_prefix(URL_PREFIX)?.parse().ok()?;
        self.lock().live.get(&id).cloned()
    }

    /// Returns the number of previews that have not been released.
    #[inline]
    pub fn live_count(&self) -> usize {
        self.lock().live.len()
    }

    fn release(&self, id: u64) {
        if self.lock().live.remove(&id).is_some() {
            trace!("released preview {id}");
        }
    }

    fn lock(&self) -> MutexGuard<'_, Registry> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Debug for PreviewRegistry {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreviewRegistry")
            .field("live", &self.live_count())
            .finish()
    }
}

/// A registered preview. Released from its registry on drop.
pub struct Preview {
    id: u64,
    registry: PreviewRegistry,
}

impl Preview {
    /// Returns the URL the presentation layer renders from.
    #[inline]
    pub fn url(&self) -> String {
        format!("{URL_PREFIX}{}", self.id)
    }
}

impl Drop for Preview {
    fn drop(&mut self) {
        self.registry.release(self.id);
    }
}

impl Debug for Preview {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Preview").field("id", &self.id).finish()
    }
}
