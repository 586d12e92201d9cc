//! Syntax highlighting of fenced code blocks.
//!
//! Highlighting is an enhancement, never a requirement: any code block the
//! highlighter can't handle is rendered as escaped plain text instead.

/// Error type for highlighting operations.
#[derive(Debug, thiserror::Error)]
pub enum HighlightError {
    /// The highlighter has no grammar for the language.
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// The grammar failed on the given code.
    #[error("Highlighting failed: {0}")]
    Failed(String),
}

/// A syntax highlighter keyed by language name.
pub trait CodeHighlighter: Send + Sync {
    /// Whether `language` is known to this highlighter.
    fn supports_language(&self, language: &str) -> bool;

    /// Returns the highlighted HTML markup of `code`.
    fn highlight(&self, code: &str, language: &str) -> Result<String, HighlightError>;
}

/// The rendered form of a single code block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeBlock {
    /// Markup produced by the highlighter.
    Highlighted(String),
    /// The raw code with HTML special characters escaped.
    Escaped(String),
}

impl CodeBlock {
    /// Wraps the block into the HTML emitted in place of the code block.
    pub fn into_html(self) -> String {
        match self {
            Self::Highlighted(markup) => {
                format!(r#"<pre class="hljs"><code><div>{markup}</div></code></pre>"#)
            }
            Self::Escaped(text) => format!("<pre><code><div>{text}</div></code></pre>"),
        }
    }
}

/// Highlights `code` if possible, falls back to escaped text otherwise.
pub fn highlight_code_block(
    highlighter: &dyn CodeHighlighter,
    code: &str,
    language: &str,
) -> CodeBlock {
    if language.is_empty() || !highlighter.supports_language(language) {
        return CodeBlock::Escaped(escape_html(code));
    }

    match highlighter.highlight(code, language) {
        Ok(markup) => CodeBlock::Highlighted(markup),
        Err(err) => {
            tracing::debug!(?err, language, "Falling back to plain code block");
            CodeBlock::Escaped(escape_html(code))
        }
    }
}

/// Escapes the HTML special characters in `text`.
///
/// ```
/// use mdpreview_core::escape_html;
///
/// assert_eq!(escape_html("<a href=\"x\">&</a>"), "&lt;a href=&quot;x&quot;&gt;&amp;&lt;/a&gt;");
/// ```
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}
