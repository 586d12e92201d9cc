//! Composition of the full HTML document shown in the preview.

use crate::highlight::escape_html;
use crate::href::resolve_href;
use crate::theme::ThemeVariant;
use crate::uri::DocumentUri;
use std::io;
use std::path::{Path, PathBuf};

/// Base preview stylesheet.
pub const MARKDOWN_CSS: &str = include_str!("../media/markdown.css");

/// Colors of the `hljs-` classes in highlighted code blocks.
pub const TOMORROW_CSS: &str = include_str!("../media/tomorrow.css");

/// Stylesheets linked unconditionally at the top of every preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedAssets {
    stylesheets: Vec<PathBuf>,
}

impl FixedAssets {
    /// File names of the bundled stylesheets, in link order.
    pub const STYLESHEETS: &'static [&'static str] = &["markdown.css", "tomorrow.css"];

    /// Uses the bundled stylesheets found in `media_dir`.
    pub fn from_media_dir(media_dir: &Path) -> Self {
        Self {
            stylesheets: Self::STYLESHEETS
                .iter()
                .map(|name| media_dir.join(name))
                .collect(),
        }
    }

    /// Writes the embedded stylesheets into `media_dir` and links them from
    /// there.
    ///
    /// Files already holding the embedded content are left untouched.
    pub fn install(media_dir: &Path) -> io::Result<Self> {
        std::fs::create_dir_all(media_dir)?;

        for (name, content) in Self::STYLESHEETS.iter().zip([MARKDOWN_CSS, TOMORROW_CSS]) {
            let path = media_dir.join(name);
            if std::fs::read_to_string(&path).is_ok_and(|existing| existing == content) {
                continue;
            }
            std::fs::write(&path, content)?;
            tracing::debug!(?path, "Installed stylesheet");
        }

        Ok(Self::from_media_dir(media_dir))
    }

    pub fn stylesheets(&self) -> &[PathBuf] {
        &self.stylesheets
    }
}

/// Builds the complete preview document.
///
/// The head links the fixed stylesheets first, then the scrollbar block of
/// `variant`, then every user style resolved against `source`. The rendered
/// body is wrapped in a container whose class names the theme variant and is
/// otherwise passed through untouched.
///
/// The output only depends on the arguments.
pub fn assemble(
    rendered_body: &str,
    variant: ThemeVariant,
    source: &DocumentUri,
    user_styles: &[String],
    fixed_assets: &FixedAssets,
) -> String {
    let source_path = source.fs_path();

    let mut lines = vec![
        "<!DOCTYPE html>".to_string(),
        "<html>".to_string(),
        "<head>".to_string(),
        r#"<meta http-equiv="Content-type" content="text/html;charset=UTF-8">"#.to_string(),
    ];

    lines.extend(fixed_assets.stylesheets().iter().map(|path| {
        format!(
            r#"<link rel="stylesheet" type="text/css" href="{}" >"#,
            escape_html(&path.to_string_lossy())
        )
    }));

    lines.push(variant.scrollbar_css().to_string());

    lines.extend(user_styles.iter().map(|style| {
        format!(
            r#"<link rel="stylesheet" href="{}" type="text/css" media="screen">"#,
            escape_html(&resolve_href(&source_path, style))
        )
    }));

    lines.push("</head>".to_string());
    lines.push("<body>".to_string());
    lines.push(format!(r#"<div class="monaco-editor {}">"#, variant.css_class()));
    lines.push(rendered_body.to_string());
    lines.push("</div>".to_string());
    lines.push("</body>".to_string());
    lines.push("</html>".to_string());

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> DocumentUri {
        DocumentUri::preview_of("/docs/readme.md")
    }

    fn assets() -> FixedAssets {
        FixedAssets::from_media_dir(Path::new("/opt/mdpreview/media"))
    }

    #[test]
    fn test_structure_order() {
        let styles = vec!["custom.css".to_string(), "https://x/y.css".to_string()];
        let html = assemble("<p>hi</p>", ThemeVariant::Dark, &source(), &styles, &assets());

        assert!(html.starts_with("<!DOCTYPE html>\n<html>\n<head>\n"));
        assert!(html.ends_with("</div>\n</body>\n</html>"));

        let markdown_css = html.find("/opt/mdpreview/media/markdown.css").unwrap();
        let tomorrow_css = html.find("/opt/mdpreview/media/tomorrow.css").unwrap();
        let scrollbar = html.find("::-webkit-scrollbar").unwrap();
        let custom = html.find("file:///docs/custom.css").unwrap();
        let remote = html.find("https://x/y.css").unwrap();
        let head_end = html.find("</head>").unwrap();
        let body = html.find("<p>hi</p>").unwrap();

        assert!(markdown_css < tomorrow_css);
        assert!(tomorrow_css < scrollbar);
        assert!(scrollbar < custom);
        assert!(custom < remote);
        assert!(remote < head_end);
        assert!(head_end < body);
    }

    #[test]
    fn test_container_class_per_variant() {
        for (variant, class) in [
            (ThemeVariant::Light, r#"<div class="monaco-editor vs">"#),
            (ThemeVariant::Dark, r#"<div class="monaco-editor vs-dark">"#),
            (
                ThemeVariant::HighContrastBlack,
                r#"<div class="monaco-editor hc-black">"#,
            ),
        ] {
            let html = assemble("", variant, &source(), &[], &assets());
            assert!(html.contains(class));
            assert!(html.contains(variant.scrollbar_css()));
        }
    }

    #[test]
    fn test_deterministic() {
        let styles = vec!["a.css".to_string()];
        let first = assemble("<h1>x</h1>", ThemeVariant::Light, &source(), &styles, &assets());
        let second = assemble("<h1>x</h1>", ThemeVariant::Light, &source(), &styles, &assets());
        assert_eq!(first, second);
    }

    #[test]
    fn test_body_passed_through_uninspected() {
        let body = "<div><p>unclosed";
        let html = assemble(body, ThemeVariant::Light, &source(), &[], &assets());
        assert!(html.contains("\n<div><p>unclosed\n</div>\n"));
    }

    #[test]
    fn test_no_script_emitted() {
        let html = assemble("", ThemeVariant::Light, &source(), &[], &assets());
        assert!(!html.contains("<script"));
    }

    #[test]
    fn test_style_href_is_attribute_escaped() {
        let styles = vec![r#"https://x/"onload="y.css"#.to_string()];
        let html = assemble("", ThemeVariant::Light, &source(), &styles, &assets());
        assert!(html.contains("https://x/&quot;onload=&quot;y.css"));
    }

    #[test]
    fn test_install_writes_embedded_stylesheets() {
        let dir = tempfile::tempdir().unwrap();
        let media_dir = dir.path().join("media");

        let fixed_assets = FixedAssets::install(&media_dir).unwrap();
        assert_eq!(fixed_assets, FixedAssets::from_media_dir(&media_dir));

        let [markdown_css, tomorrow_css] = fixed_assets.stylesheets() else {
            panic!("expected two stylesheets");
        };
        assert!(markdown_css.starts_with(&media_dir));
        assert_eq!(std::fs::read_to_string(markdown_css).unwrap(), MARKDOWN_CSS);
        assert_eq!(std::fs::read_to_string(tomorrow_css).unwrap(), TOMORROW_CSS);
        assert!(MARKDOWN_CSS.contains(".vs-dark"));
        assert!(TOMORROW_CSS.contains(".hljs-"));

        // A stale copy is overwritten, the linked paths don't change.
        std::fs::write(markdown_css, "stale").unwrap();
        assert_eq!(FixedAssets::install(&media_dir).unwrap(), fixed_assets);
        assert_eq!(std::fs::read_to_string(markdown_css).unwrap(), MARKDOWN_CSS);
    }
}
