use anyhow::Result;
use clap::Parser;
use mdpreview_syntax::SyntaxHighlighter;
use std::io::Write;

/// Print the stylesheet for the classes of highlighted code blocks.
#[derive(Parser, Debug, Clone)]
pub struct HighlightCss {
    /// Name of the highlighting theme.
    #[clap(long, default_value = SyntaxHighlighter::DEFAULT_THEME)]
    theme: String,

    /// List the available theme names instead.
    #[clap(long)]
    list: bool,
}

impl HighlightCss {
    pub fn run(self) -> Result<()> {
        let highlighter = SyntaxHighlighter::new();

        let stdout = std::io::stdout();
        let mut lock = stdout.lock();

        if self.list {
            let mut theme_names = highlighter.theme_names();
            theme_names.sort();
            for name in theme_names {
                writeln!(lock, "{name}")?;
            }
        } else {
            write!(lock, "{}", highlighter.theme_css(&self.theme)?)?;
        }

        Ok(())
    }
}
