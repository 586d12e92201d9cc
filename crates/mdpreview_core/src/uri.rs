//! Document identifiers routed to the content provider.

use std::fmt;
use std::path::{Path, PathBuf};

/// Scheme of the URIs served by the preview content provider.
pub const PREVIEW_SCHEME: &str = "markdown";

/// A document identifier made of a scheme and a path.
///
/// Preview URIs use [`PREVIEW_SCHEME`] and carry the path of the markdown
/// source they preview, e.g. `markdown:///home/me/notes.md`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentUri {
    scheme: String,
    path: String,
}

impl DocumentUri {
    pub fn new(scheme: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            path: path.into(),
        }
    }

    /// Returns the preview URI for the markdown file at `source`.
    ///
    /// ```
    /// use mdpreview_core::DocumentUri;
    ///
    /// let uri = DocumentUri::preview_of("/docs/notes.md");
    /// assert_eq!(uri.to_string(), "markdown:///docs/notes.md");
    /// ```
    pub fn preview_of(source: impl AsRef<Path>) -> Self {
        let path = source.as_ref().to_string_lossy().replace('\\', "/");
        Self::new(PREVIEW_SCHEME, path)
    }

    /// Parses `scheme://path`, returns `None` if there is no scheme separator.
    pub fn parse(s: &str) -> Option<Self> {
        let (scheme, path) = s.split_once("://")?;
        if scheme.is_empty() {
            return None;
        }
        Some(Self::new(scheme, path))
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Whether this URI is served by the preview content provider.
    pub fn is_preview(&self) -> bool {
        self.scheme == PREVIEW_SCHEME
    }

    /// Filesystem path of the document.
    pub fn fs_path(&self) -> PathBuf {
        PathBuf::from(&self.path)
    }
}

impl fmt::Display for DocumentUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.scheme, self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_of() {
        let uri = DocumentUri::preview_of("/tmp/notes.md");
        assert_eq!(uri.scheme(), PREVIEW_SCHEME);
        assert_eq!(uri.path(), "/tmp/notes.md");
        assert!(uri.is_preview());
        assert_eq!(uri.fs_path(), PathBuf::from("/tmp/notes.md"));
    }

    #[test]
    fn test_equality_follows_source_path() {
        assert_eq!(
            DocumentUri::preview_of("/a/b.md"),
            DocumentUri::preview_of(Path::new("/a/b.md"))
        );
        assert_ne!(
            DocumentUri::preview_of("/a/b.md"),
            DocumentUri::preview_of("/a/c.md")
        );
    }

    #[test]
    fn test_parse() {
        let uri = DocumentUri::parse("markdown:///x/y.md").unwrap();
        assert_eq!(uri, DocumentUri::preview_of("/x/y.md"));

        let file = DocumentUri::parse("file:///x/y.md").unwrap();
        assert!(!file.is_preview());

        assert!(DocumentUri::parse("/x/y.md").is_none());
        assert!(DocumentUri::parse("://x").is_none());
    }

    #[test]
    fn test_display_roundtrip() {
        let uri = DocumentUri::preview_of("/x/y.md");
        assert_eq!(DocumentUri::parse(&uri.to_string()), Some(uri));
    }
}
