use crate::host::{absolute_path, build_provider};
use anyhow::{Context, Result};
use clap::Parser;
use mdpreview_config::ConfigStore;
use mdpreview_core::DocumentUri;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

/// Render a markdown file into the preview document once.
#[derive(Parser, Debug, Clone)]
pub struct Render {
    /// Markdown file to render.
    #[clap(index = 1)]
    file: PathBuf,

    /// Base theme token, takes precedence over `preview.theme`.
    #[clap(long)]
    theme: Option<String>,

    /// Write the document to this file instead of stdout.
    #[clap(long, short)]
    output: Option<PathBuf>,
}

impl Render {
    pub async fn run(self, config: Arc<ConfigStore>) -> Result<()> {
        let path = absolute_path(&self.file)?;
        let provider =
            build_provider(config, self.theme).context("Failed to install the stylesheets")?;

        let html = provider
            .provide_content(&DocumentUri::preview_of(&path))
            .await
            .with_context(|| format!("Failed to render {}", path.display()))?;

        match self.output {
            Some(output) => tokio::fs::write(&output, html)
                .await
                .with_context(|| format!("Failed to write {}", output.display()))?,
            None => {
                let stdout = std::io::stdout();
                let mut lock = stdout.lock();
                writeln!(lock, "{html}")?;
            }
        }

        Ok(())
    }
}
