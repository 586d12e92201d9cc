//! The previews opened by the `watch` command.

use mdpreview_core::{ContentProvider, DocumentUri, ShowPreview, ViewColumn};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

/// A preview written to an HTML file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewView {
    pub column: ViewColumn,
    pub output: PathBuf,
    shown: bool,
}

/// What happened when a preview was refreshed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Refresh {
    /// No preview is open for the URI.
    NotOpen,
    /// The preview was written to its output file.
    Written(PathBuf),
    /// Rendering or writing failed, the previous output is left as is.
    Failed,
}

#[derive(Debug)]
pub struct PreviewViews {
    output_dir: PathBuf,
    views: BTreeMap<DocumentUri, PreviewView>,
    open_browser: bool,
}

impl PreviewViews {
    pub fn new(output_dir: PathBuf, open_browser: bool) -> Self {
        Self {
            output_dir,
            views: BTreeMap::new(),
            open_browser,
        }
    }

    /// Registers the preview, returns its output file.
    ///
    /// Opening an already open preview moves it to the new column.
    pub fn open(&mut self, show: ShowPreview) -> &Path {
        let ShowPreview { uri, column } = show;

        let output = self
            .views
            .get(&uri)
            .map(|view| view.output.clone())
            .unwrap_or_else(|| self.output_path(&uri));

        let view = self.views.entry(uri).or_insert(PreviewView {
            column,
            output,
            shown: false,
        });
        view.column = column;
        &view.output
    }

    pub fn get(&self, uri: &DocumentUri) -> Option<&PreviewView> {
        self.views.get(uri)
    }

    pub fn uris(&self) -> impl Iterator<Item = &DocumentUri> {
        self.views.keys()
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    /// `<output-dir>/<stem>.html`, suffixed with a counter when another open
    /// preview already uses that name.
    fn output_path(&self, uri: &DocumentUri) -> PathBuf {
        let source = uri.fs_path();
        let stem = source
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "preview".to_string());

        let taken = self
            .views
            .values()
            .map(|view| view.output.as_path())
            .collect::<HashSet<_>>();

        let mut output = self.output_dir.join(format!("{stem}.html"));
        let mut n = 2;
        while taken.contains(output.as_path()) {
            output = self.output_dir.join(format!("{stem}-{n}.html"));
            n += 1;
        }
        output
    }

    /// Re-renders the preview of `uri` into its output file.
    pub async fn refresh(&mut self, provider: &ContentProvider, uri: &DocumentUri) -> Refresh {
        let Some(view) = self.views.get_mut(uri) else {
            tracing::trace!(%uri, "Preview not open, ignoring change");
            return Refresh::NotOpen;
        };

        let html = match provider.provide_content(uri).await {
            Ok(html) => html,
            Err(err) => {
                tracing::error!(?err, %uri, "Failed to render preview");
                return Refresh::Failed;
            }
        };

        if let Err(err) = tokio::fs::write(&view.output, html).await {
            tracing::error!(?err, output = ?view.output, "Failed to write preview");
            return Refresh::Failed;
        }

        tracing::info!(%uri, column = view.column.index(), output = ?view.output, "Preview updated");

        if self.open_browser && !view.shown {
            view.shown = true;
            if let Err(err) = webbrowser::open(&view.output.to_string_lossy()) {
                tracing::error!(?err, output = ?view.output, "Failed to open the browser");
            }
        }

        Refresh::Written(view.output.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::build_provider_with_media_dir;
    use mdpreview_config::{Config, ConfigStore};
    use std::sync::Arc;

    fn show(path: &str, column: ViewColumn) -> ShowPreview {
        ShowPreview {
            uri: DocumentUri::preview_of(path),
            column,
        }
    }

    #[test]
    fn test_output_names() {
        let mut views = PreviewViews::new(PathBuf::from("/out"), false);

        assert_eq!(
            views.open(show("/a/notes.md", ViewColumn::One)),
            Path::new("/out/notes.html")
        );
        assert_eq!(
            views.open(show("/b/notes.md", ViewColumn::One)),
            Path::new("/out/notes-2.html")
        );
        assert_eq!(
            views.open(show("/c/notes.markdown", ViewColumn::Two)),
            Path::new("/out/notes-3.html")
        );

        // Reopening keeps the output and moves the view.
        assert_eq!(
            views.open(show("/a/notes.md", ViewColumn::Two)),
            Path::new("/out/notes.html")
        );
        let uri = DocumentUri::preview_of("/a/notes.md");
        assert_eq!(views.get(&uri).unwrap().column, ViewColumn::Two);
        assert_eq!(views.len(), 3);
    }

    #[tokio::test]
    async fn test_refresh() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("doc.md");
        std::fs::write(&source, "# Title").unwrap();

        let store = Arc::new(ConfigStore::new(
            Config::default(),
            dir.path().join("config.toml"),
        ));
        let provider =
            build_provider_with_media_dir(store, None, &dir.path().join("media")).unwrap();

        let mut views = PreviewViews::new(dir.path().join("out"), false);
        std::fs::create_dir_all(dir.path().join("out")).unwrap();

        let uri = DocumentUri::preview_of(&source);
        assert_eq!(views.refresh(&provider, &uri).await, Refresh::NotOpen);

        views.open(ShowPreview {
            uri: uri.clone(),
            column: ViewColumn::One,
        });
        let output = dir.path().join("out").join("doc.html");
        assert_eq!(
            views.refresh(&provider, &uri).await,
            Refresh::Written(output.clone())
        );
        assert!(std::fs::read_to_string(&output)
            .unwrap()
            .contains("Title</h1>"));

        std::fs::remove_file(&source).unwrap();
        assert_eq!(views.refresh(&provider, &uri).await, Refresh::Failed);
        // The last good render stays in place.
        assert!(output.exists());
    }
}
