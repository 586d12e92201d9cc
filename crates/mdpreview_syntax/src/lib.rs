//! Code highlighting backed by syntect.
//!
//! Highlighted code is emitted as `<span>`s carrying one `hljs-` prefixed
//! class per scope atom, e.g. `keyword.control.js` becomes
//! `class="hljs-keyword hljs-control hljs-js"`. The colors come from a
//! stylesheet, either the bundled one or one exported by
//! [`SyntaxHighlighter::theme_css`].

use mdpreview_core::{CodeHighlighter, HighlightError};
use syntect::highlighting::ThemeSet;
use syntect::html::{css_for_theme_with_class_style, ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

/// Class style shared by the generated markup and the exported stylesheets.
pub const CLASS_STYLE: ClassStyle = ClassStyle::SpacedPrefixed { prefix: "hljs-" };

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Theme not found: {0}")]
    ThemeNotFound(String),
    #[error(transparent)]
    Syntect(#[from] syntect::Error),
}

#[derive(Debug)]
pub struct SyntaxHighlighter {
    pub syntax_set: SyntaxSet,
    pub theme_set: ThemeSet,
}

impl Default for SyntaxHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntaxHighlighter {
    pub const DEFAULT_THEME: &'static str = "base16-ocean.dark";

    /// Constructs a new instance of [`SyntaxHighlighter`].
    ///
    /// Loading the syntax definitions is not cheap, should be called only
    /// once at the start of program.
    pub fn new() -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
        }
    }

    /// Looks up a syntax by name or file extension, case-insensitively.
    pub fn find_syntax(&self, language: &str) -> Option<&SyntaxReference> {
        if language.is_empty() {
            return None;
        }
        self.syntax_set.find_syntax_by_token(language)
    }

    pub fn theme_names(&self) -> Vec<String> {
        self.theme_set.themes.keys().cloned().collect()
    }

    pub fn theme_exists(&self, theme: &str) -> bool {
        self.theme_set.themes.contains_key(theme)
    }

    /// Exports the stylesheet of `theme` for the classes in [`CLASS_STYLE`].
    pub fn theme_css(&self, theme: &str) -> Result<String, Error> {
        let theme = self
            .theme_set
            .themes
            .get(theme)
            .ok_or_else(|| Error::ThemeNotFound(theme.to_string()))?;
        Ok(css_for_theme_with_class_style(theme, CLASS_STYLE)?)
    }

    fn highlight_with(&self, syntax: &SyntaxReference, code: &str) -> Result<String, Error> {
        let mut generator =
            ClassedHTMLGenerator::new_with_class_style(syntax, &self.syntax_set, CLASS_STYLE);
        for line in LinesWithEndings::from(code) {
            generator.parse_html_for_line_which_includes_newline(line)?;
        }
        Ok(generator.finalize())
    }
}

impl CodeHighlighter for SyntaxHighlighter {
    fn supports_language(&self, language: &str) -> bool {
        self.find_syntax(language).is_some()
    }

    fn highlight(&self, code: &str, language: &str) -> Result<String, HighlightError> {
        let syntax = self
            .find_syntax(language)
            .ok_or_else(|| HighlightError::UnsupportedLanguage(language.to_string()))?;

        tracing::trace!(language, syntax = %syntax.name, "Highlighting code block");

        self.highlight_with(syntax, code)
            .map_err(|err| HighlightError::Failed(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdpreview_core::{highlight_code_block, CodeBlock};

    #[test]
    fn test_find_syntax_by_token() {
        let highlighter = SyntaxHighlighter::new();
        assert_eq!(highlighter.find_syntax("js").unwrap().name, "JavaScript");
        assert_eq!(highlighter.find_syntax("rs").unwrap().name, "Rust");
        assert_eq!(highlighter.find_syntax("rust").unwrap().name, "Rust");
        assert_eq!(highlighter.find_syntax("Python").unwrap().name, "Python");
        assert!(highlighter.find_syntax("foobarlang").is_none());
        assert!(highlighter.find_syntax("").is_none());
    }

    #[test]
    fn test_highlight_emits_prefixed_classes() {
        let highlighter = SyntaxHighlighter::new();
        let html = highlighter.highlight("let x = 1;\n", "js").unwrap();
        assert!(html.contains("<span class=\"hljs-"));
        assert!(html.contains("hljs-js"));
        assert!(html.contains("let"));
    }

    #[test]
    fn test_highlight_escapes_code() {
        let highlighter = SyntaxHighlighter::new();
        let html = highlighter.highlight("if (a < b) {}\n", "js").unwrap();
        assert!(html.contains("&lt;"));
        assert!(!html.contains("a < b"));
    }

    #[test]
    fn test_unsupported_language() {
        let highlighter = SyntaxHighlighter::new();
        assert!(!highlighter.supports_language("foobarlang"));
        assert!(matches!(
            highlighter.highlight("x", "foobarlang"),
            Err(HighlightError::UnsupportedLanguage(_))
        ));
        assert_eq!(
            highlight_code_block(&highlighter, "a<b", "foobarlang"),
            CodeBlock::Escaped("a&lt;b".to_string())
        );
    }

    #[test]
    fn test_theme_css() {
        let highlighter = SyntaxHighlighter::new();
        assert!(highlighter.theme_exists(SyntaxHighlighter::DEFAULT_THEME));
        assert!(highlighter
            .theme_names()
            .iter()
            .any(|name| name == SyntaxHighlighter::DEFAULT_THEME));

        let css = highlighter
            .theme_css(SyntaxHighlighter::DEFAULT_THEME)
            .unwrap();
        assert!(css.contains(".hljs-"));

        assert!(matches!(
            highlighter.theme_css("no-such-theme"),
            Err(Error::ThemeNotFound(_))
        ));
    }
}
