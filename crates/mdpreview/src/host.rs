use async_trait::async_trait;
use mdpreview_config::{Config, ConfigStore};
use mdpreview_core::{ContentProvider, FixedAssets, PreviewHost, StyleConfig};
use mdpreview_syntax::SyntaxHighlighter;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// [`PreviewHost`] backed by the local filesystem and the config store.
pub struct FsHost {
    config: Arc<ConfigStore>,
    theme_override: Option<String>,
}

impl FsHost {
    /// `theme_override` takes precedence over `preview.theme` when set.
    pub fn new(config: Arc<ConfigStore>, theme_override: Option<String>) -> Self {
        Self {
            config,
            theme_override,
        }
    }
}

#[async_trait]
impl PreviewHost for FsHost {
    async fn base_theme(&self) -> String {
        match &self.theme_override {
            Some(theme) => theme.clone(),
            None => self.config.current().preview.theme.clone(),
        }
    }

    async fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        tokio::fs::read(path).await
    }

    fn style_config(&self) -> StyleConfig {
        StyleConfig {
            styles: self.config.current().markdown.styles.clone(),
        }
    }
}

/// Where the embedded stylesheets are installed when `preview.media-dir` is
/// unset.
pub fn default_media_dir() -> PathBuf {
    mdpreview_config::project_dirs()
        .map(|dirs| dirs.cache_dir().join("media"))
        .unwrap_or_else(|| std::env::temp_dir().join("mdpreview").join("media"))
}

/// Stylesheets from `preview.media-dir`, or the embedded ones installed in
/// `default_media_dir`.
pub fn fixed_assets(config: &Config, default_media_dir: &Path) -> io::Result<FixedAssets> {
    match &config.preview.media_dir {
        Some(media_dir) => Ok(FixedAssets::from_media_dir(media_dir)),
        None => FixedAssets::install(default_media_dir),
    }
}

/// Creates the content provider shared by the commands.
///
/// The fixed stylesheets are resolved once here, see
/// [`mdpreview_config::PreviewConfig::media_dir`].
pub fn build_provider(
    config: Arc<ConfigStore>,
    theme_override: Option<String>,
) -> io::Result<Arc<ContentProvider>> {
    build_provider_with_media_dir(config, theme_override, &default_media_dir())
}

pub fn build_provider_with_media_dir(
    config: Arc<ConfigStore>,
    theme_override: Option<String>,
    default_media_dir: &Path,
) -> io::Result<Arc<ContentProvider>> {
    let fixed_assets = fixed_assets(&config.current(), default_media_dir)?;
    let host = FsHost::new(config, theme_override);
    Ok(Arc::new(ContentProvider::new(
        Arc::new(host),
        Arc::new(SyntaxHighlighter::new()),
        fixed_assets,
    )))
}

/// Canonical form of `path` if it exists, otherwise `path` joined to the
/// current directory.
pub fn absolute_path(path: &Path) -> io::Result<PathBuf> {
    match path.canonicalize() {
        Ok(path) => Ok(path),
        Err(_) if path.is_absolute() => Ok(path.to_path_buf()),
        Err(_) => Ok(std::env::current_dir()?.join(path)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdpreview_core::{DocumentUri, ProviderError};

    fn store_with(config: Config, dir: &Path) -> Arc<ConfigStore> {
        Arc::new(ConfigStore::new(config, dir.join("config.toml")))
    }

    fn provider_in(
        store: Arc<ConfigStore>,
        dir: &Path,
        theme_override: Option<String>,
    ) -> Arc<ContentProvider> {
        build_provider_with_media_dir(store, theme_override, &dir.join("media")).unwrap()
    }

    #[tokio::test]
    async fn test_render_with_real_highlighter() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.md");
        std::fs::write(&path, "# Hi\n\n```js\nlet x = 1;\n```\n").unwrap();

        let provider = provider_in(store_with(Config::default(), dir.path()), dir.path(), None);
        let html = provider
            .provide_content(&DocumentUri::preview_of(&path))
            .await
            .unwrap();

        assert_eq!(html.matches("<h1").count(), 1);
        assert_eq!(html.matches(r#"<pre class="hljs">"#).count(), 1);
        assert!(html.contains(r#"<div class="monaco-editor vs">"#));
    }

    #[tokio::test]
    async fn test_unknown_language_is_escaped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.md");
        std::fs::write(&path, "```foobarlang\na < b\n```\n").unwrap();

        let provider = provider_in(store_with(Config::default(), dir.path()), dir.path(), None);
        let html = provider
            .provide_content(&DocumentUri::preview_of(&path))
            .await
            .unwrap();

        assert!(html.contains("<pre><code><div>a &lt; b\n</div></code></pre>"));
        assert!(!html.contains(r#"<pre class="hljs">"#));
    }

    #[tokio::test]
    async fn test_theme_and_styles_follow_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.md");
        std::fs::write(&path, "text").unwrap();

        let mut config = Config::default();
        config.preview.theme = "vs-dark".into();
        config.markdown.styles = vec!["https://example.com/a.css".into()];
        let store = store_with(config, dir.path());

        let provider = provider_in(store.clone(), dir.path(), None);
        let uri = DocumentUri::preview_of(&path);
        let html = provider.provide_content(&uri).await.unwrap();
        assert!(html.contains(r#"<div class="monaco-editor vs-dark">"#));
        assert!(html.contains(r#"href="https://example.com/a.css""#));

        let mut config = Config::default();
        config.preview.theme = "hc-black".into();
        store.replace(config);
        let html = provider.provide_content(&uri).await.unwrap();
        assert!(html.contains(r#"<div class="monaco-editor hc-black">"#));
        assert!(!html.contains("https://example.com/a.css"));

        let provider = provider_in(store, dir.path(), Some("vs".into()));
        let html = provider.provide_content(&uri).await.unwrap();
        assert!(html.contains(r#"<div class="monaco-editor vs">"#));
    }

    #[tokio::test]
    async fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let provider = provider_in(store_with(Config::default(), dir.path()), dir.path(), None);
        let uri = DocumentUri::preview_of(dir.path().join("missing.md"));
        assert!(matches!(
            provider.provide_content(&uri).await,
            Err(ProviderError::Io { .. })
        ));
    }

    #[tokio::test]
    async fn test_fixed_stylesheets_outside_build_tree() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.md");
        std::fs::write(&path, "text").unwrap();

        let store = store_with(Config::default(), dir.path());
        let provider = provider_in(store.clone(), dir.path(), None);
        let html = provider
            .provide_content(&DocumentUri::preview_of(&path))
            .await
            .unwrap();

        let media_dir = dir.path().join("media");
        for name in FixedAssets::STYLESHEETS {
            let stylesheet = media_dir.join(name);
            assert!(stylesheet.is_file());
            assert!(html.contains(&*stylesheet.to_string_lossy()));
        }
        assert!(!html.contains(env!("CARGO_MANIFEST_DIR")));
    }

    #[tokio::test]
    async fn test_media_dir_is_resolved_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.md");
        std::fs::write(&path, "text").unwrap();

        let mut config = Config::default();
        config.preview.media_dir = Some("/first/media".into());
        let store = store_with(config, dir.path());
        let provider = provider_in(store.clone(), dir.path(), None);

        let mut config = Config::default();
        config.preview.media_dir = Some("/second/media".into());
        store.replace(config);

        let html = provider
            .provide_content(&DocumentUri::preview_of(&path))
            .await
            .unwrap();
        assert!(html.contains("/first/media/markdown.css"));
        assert!(!html.contains("/second/media"));
        // Nothing is installed when the directory is overridden.
        assert!(!dir.path().join("media").exists());
    }

    #[test]
    fn test_absolute_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.md");
        std::fs::write(&path, "").unwrap();
        assert_eq!(absolute_path(&path).unwrap(), path.canonicalize().unwrap());

        let missing = dir.path().join("missing.md");
        assert_eq!(absolute_path(&missing).unwrap(), missing);

        assert!(absolute_path(Path::new("relative.md"))
            .unwrap()
            .is_absolute());
    }
}
