//! Listeners deciding when an open preview has to be re-rendered.

use crate::provider::ContentProvider;
use crate::uri::DocumentUri;
use std::path::Path;
use std::sync::Arc;

/// Suffixes of the files treated as markdown sources.
pub const MARKDOWN_EXTENSIONS: &[&str] = &[".md", ".mdown", ".markdown", ".markdn"];

/// Whether `file_name` ends with one of [`MARKDOWN_EXTENSIONS`].
///
/// The match is case-sensitive.
///
/// ```
/// use mdpreview_core::is_markdown_file;
///
/// assert!(is_markdown_file("notes.md"));
/// assert!(!is_markdown_file("notes.txt"));
/// assert!(!is_markdown_file("NOTES.MD"));
/// ```
pub fn is_markdown_file(file_name: &str) -> bool {
    MARKDOWN_EXTENSIONS
        .iter()
        .any(|extension| file_name.ends_with(extension))
}

/// Calls [`ContentProvider::update`] in response to host events.
#[derive(Clone)]
pub struct ChangeTriggers {
    provider: Arc<ContentProvider>,
}

impl ChangeTriggers {
    pub fn new(provider: Arc<ContentProvider>) -> Self {
        Self { provider }
    }

    /// A document was saved, its preview is stale if it's a markdown file.
    ///
    /// Returns the preview URI that was updated.
    pub fn on_did_save(&self, path: &Path) -> Option<DocumentUri> {
        if !is_markdown_file(&path.to_string_lossy()) {
            return None;
        }
        let uri = DocumentUri::preview_of(path);
        tracing::debug!(path = ?path, %uri, "Markdown file saved");
        self.provider.update(uri.clone());
        Some(uri)
    }

    /// The configuration changed, every open preview is stale.
    ///
    /// Documents that are not previews are skipped. Returns the number of
    /// updates fired.
    pub fn on_did_change_configuration<'a>(
        &self,
        open_documents: impl IntoIterator<Item = &'a DocumentUri>,
    ) -> usize {
        let mut updated = 0;
        for uri in open_documents.into_iter().filter(|uri| uri.is_preview()) {
            self.provider.update(uri.clone());
            updated += 1;
        }
        tracing::debug!(updated, "Configuration changed, refreshing previews");
        updated
    }
}
