//! The content provider serving preview URIs.
//!
//! [`ContentProvider::provide_content`] computes the preview document from
//! scratch on every call: nothing is cached between renders, the output only
//! depends on the file bytes, the theme and the style configuration read
//! during that call.

use crate::assemble::{assemble, FixedAssets};
use crate::emitter::{EventEmitter, Subscription};
use crate::highlight::{highlight_code_block, CodeHighlighter};
use crate::render::{to_html, RenderOptions};
use crate::theme::ThemeVariant;
use crate::uri::DocumentUri;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Error type for render requests.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The source file could not be read.
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The source file is not valid UTF-8.
    #[error("{} is not valid UTF-8: {source}", .path.display())]
    Utf8 {
        path: PathBuf,
        #[source]
        source: std::string::FromUtf8Error,
    },
}

/// User supplied stylesheet references, in link order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleConfig {
    pub styles: Vec<String>,
}

/// Capabilities the content provider needs from its host.
#[async_trait::async_trait]
pub trait PreviewHost: Send + Sync {
    /// Opaque token of the current base theme, e.g. `vs` or `vs-dark`.
    async fn base_theme(&self) -> String;

    /// Reads the file at `path`.
    async fn read_file(&self, path: &Path) -> std::io::Result<Vec<u8>>;

    /// The current style configuration, read fresh on every call.
    fn style_config(&self) -> StyleConfig;
}

/// Turns preview URIs into complete HTML documents on demand.
///
/// Created once per process. Collaborators call [`Self::update`] whenever a
/// preview is stale, the host learns about it through [`Self::on_did_change`]
/// and calls [`Self::provide_content`] again.
pub struct ContentProvider {
    host: Arc<dyn PreviewHost>,
    highlighter: Arc<dyn CodeHighlighter>,
    fixed_assets: FixedAssets,
    render_options: RenderOptions,
    on_did_change: EventEmitter<DocumentUri>,
}

impl ContentProvider {
    pub fn new(
        host: Arc<dyn PreviewHost>,
        highlighter: Arc<dyn CodeHighlighter>,
        fixed_assets: FixedAssets,
    ) -> Self {
        Self {
            host,
            highlighter,
            fixed_assets,
            render_options: RenderOptions::preview(),
            on_did_change: EventEmitter::new(),
        }
    }

    pub fn with_render_options(mut self, render_options: RenderOptions) -> Self {
        self.render_options = render_options;
        self
    }

    /// Renders the markdown file behind `uri` into the preview document.
    ///
    /// Fails if the file can't be read or decoded, no partial document is
    /// produced in that case.
    pub async fn provide_content(&self, uri: &DocumentUri) -> Result<String, ProviderError> {
        let theme_token = self.host.base_theme().await;

        let path = uri.fs_path();
        let bytes = self
            .host
            .read_file(&path)
            .await
            .map_err(|source| ProviderError::Io {
                path: path.clone(),
                source,
            })?;
        let markdown_content =
            String::from_utf8(bytes).map_err(|source| ProviderError::Utf8 { path, source })?;

        let body = to_html(&markdown_content, &self.render_options, |code, language| {
            highlight_code_block(self.highlighter.as_ref(), code, language).into_html()
        });

        let StyleConfig { styles } = self.host.style_config();
        let variant = ThemeVariant::classify(&theme_token);

        tracing::debug!(
            %uri,
            theme = %theme_token,
            %variant,
            styles = styles.len(),
            "Rendered markdown preview"
        );

        Ok(assemble(
            &body,
            variant,
            uri,
            &styles,
            &self.fixed_assets,
        ))
    }

    /// Signals that the content of `uri` is stale.
    pub fn update(&self, uri: DocumentUri) {
        tracing::trace!(%uri, "Preview content changed");
        self.on_did_change.fire(uri);
    }

    /// Stream of URIs whose content changed.
    pub fn on_did_change(&self) -> Subscription<DocumentUri> {
        self.on_did_change.subscribe()
    }

    /// Tears down the change stream, every subscription ends.
    pub fn dispose(&self) {
        self.on_did_change.dispose();
    }
}
