use agri_chat_model::{Attachment, Content};

use crate::preview::{Preview, PreviewRegistry};

/// The not-yet-submitted user input.
///
/// A draft holds some text and at most one attachment. Selecting a new
/// attachment replaces the previous one and releases its preview.
#[derive(Debug, Default)]
pub struct Draft {
    text: String,
    attachment: Option<(Attachment, Preview)>,
    previews: PreviewRegistry,
}

impl Draft {
    /// Creates an empty draft whose previews go to `previews`.
    #[inline]
    pub fn with_previews(previews: PreviewRegistry) -> Self {
        Self {
            text: String::new(),
            attachment: None,
            previews,
        }
    }

    /// Returns the text typed so far.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replaces the text.
    #[inline]
    pub fn set_text<S: Into<String>>(&mut self, text: S) {
        self.text = text.into();
    }

    /// Returns the selected attachment.
    #[inline]
    pub fn attachment(&self) -> Option<&Attachment> {
        self.attachment.as_ref().map(|(attachment, _)| attachment)
    }

    /// Returns the preview URL of the selected attachment.
    #[inline]
    pub fn preview_url(&self) -> Option<String> {
        self.attachment.as_ref().map(|(_, preview)| preview.url())
    }

    /// Selects an attachment, replacing the previous one.
    ///
    /// Returns the preview URL of the new attachment.
    pub fn attach(&mut self, attachment: Attachment) -> String {
        let preview = self.previews.register(&attachment);
        let url = preview.url();
        // Dropping the old pair releases its preview.
        self.attachment = Some((attachment, preview));
        url
    }

    /// Deselects the attachment, if any.
    #[inline]
    pub fn detach(&mut self) {
        self.attachment = None;
    }

    /// Returns `true` if there is neither meaningful text nor an
    /// attachment.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty() && self.attachment.is_none()
    }

    /// Resets text and attachment.
    #[inline]
    pub fn clear(&mut self) {
        self.text.clear();
        self.attachment = None;
    }

    /// Makes the log content this draft would be submitted as.
    pub fn to_content(&self) -> Content {
        Content {
            text: self.text.clone(),
            attachment: self.attachment().map(Attachment::to_ref),
        }
    }

    /// Returns the registry previews are registered with.
    #[inline]
    pub fn previews(&self) -> &PreviewRegistry {
        &self.previews
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(name: &str) -> Attachment {
        Attachment::new(name, mime::IMAGE_JPEG, vec![0xff, 0xd8]).unwrap()
    }

    #[test]
    fn test_attach_supersedes_previous() {
        let mut draft = Draft::default();
        let first_url = draft.attach(image("a.jpg"));
        assert_eq!(draft.previews().live_count(), 1);

        let second_url = draft.attach(image("b.jpg"));
        assert_eq!(draft.previews().live_count(), 1);
        assert!(draft.previews().resolve(&first_url).is_none());
        assert_eq!(
            draft.previews().resolve(&second_url).unwrap().file_name(),
            "b.jpg"
        );
        assert_eq!(draft.preview_url(), Some(second_url));
    }

    #[test]
    fn test_clear_releases_preview() {
        let mut draft = Draft::default();
        draft.set_text("What is wrong with this leaf?");
        draft.attach(image("leaf.jpg"));
        assert!(!draft.is_empty());

        draft.clear();
        assert!(draft.is_empty());
        assert_eq!(draft.text(), "");
        assert_eq!(draft.previews().live_count(), 0);
    }

    #[test]
    fn test_drop_releases_preview() {
        let previews = PreviewRegistry::default();
        let mut draft = Draft::with_previews(previews.clone());
        draft.attach(image("leaf.jpg"));
        assert_eq!(previews.live_count(), 1);

        drop(draft);
        assert_eq!(previews.live_count(), 0);
    }

    #[test]
    fn test_whitespace_only_is_empty() {
        let mut draft = Draft::default();
        draft.set_text("   ");
        assert!(draft.is_empty());
        assert!(draft.to_content().is_empty());
    }
}
