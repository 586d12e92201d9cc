use crate::host::{absolute_path, build_provider};
use crate::views::PreviewViews;
use crate::watcher::SaveWatcher;
use anyhow::{Context, Result};
use clap::Parser;
use mdpreview_config::ConfigStore;
use mdpreview_core::{ActiveEditor, ChangeTriggers, PreviewCommand, ViewColumn};
use std::path::PathBuf;
use std::sync::Arc;

/// Keep the previews of markdown files up to date while they are edited.
#[derive(Parser, Debug, Clone)]
pub struct Watch {
    /// Markdown files to preview.
    #[clap(required = true)]
    files: Vec<PathBuf>,

    /// Base theme token, takes precedence over `preview.theme`.
    #[clap(long)]
    theme: Option<String>,

    /// Directory of the rendered previews, defaults to `preview.output-dir`.
    #[clap(long)]
    output_dir: Option<PathBuf>,

    /// Show the previews in the column next to the editor.
    #[clap(long)]
    side: bool,

    /// Open the previews in the browser once rendered.
    #[clap(long)]
    open: bool,
}

impl Watch {
    fn output_dir(&self, config: &ConfigStore) -> PathBuf {
        self.output_dir
            .clone()
            .or_else(|| config.current().preview.output_dir.clone())
            .unwrap_or_else(|| std::env::temp_dir().join("mdpreview"))
    }

    pub async fn run(self, config: Arc<ConfigStore>) -> Result<()> {
        let output_dir = self.output_dir(&config);
        tokio::fs::create_dir_all(&output_dir)
            .await
            .with_context(|| format!("Failed to create {}", output_dir.display()))?;

        let open_browser = self.open || config.current().preview.open_browser;
        let command = if self.side {
            PreviewCommand::PreviewToSide
        } else {
            PreviewCommand::Preview
        };

        let provider = build_provider(config.clone(), self.theme)
            .context("Failed to install the stylesheets")?;
        let triggers = ChangeTriggers::new(provider.clone());
        let mut changes = provider.on_did_change();

        let files = self
            .files
            .iter()
            .map(|file| absolute_path(file))
            .collect::<std::io::Result<Vec<_>>>()?;

        let mut views = PreviewViews::new(output_dir, open_browser);
        for path in &files {
            let active_editor = ActiveEditor {
                path: path.clone(),
                column: ViewColumn::One,
            };
            let Some(show) = command.resolve(Some(&active_editor)) else {
                continue;
            };
            tracing::debug!(command = command.id(), uri = %show.uri, "Opening preview");
            let uri = show.uri.clone();
            views.open(show);
            provider.update(uri);
        }

        let (saved_tx, mut saved_rx) = tokio::sync::mpsc::unbounded_channel();
        let _save_watcher = SaveWatcher::new(files.iter().map(PathBuf::as_path), saved_tx)
            .context("Failed to watch the markdown files")?;

        let (config_tx, mut config_rx) = tokio::sync::mpsc::channel(1);
        if !mdpreview_config::monitor::watch(config.clone(), config_tx) {
            tracing::warn!(config_file = ?config.file_path(), "Config changes won't be picked up");
        }

        tracing::info!(previews = views.len(), "Watching for changes, press Ctrl-C to stop");

        loop {
            tokio::select! {
                Some(uri) = changes.recv() => {
                    views.refresh(&provider, &uri).await;
                }
                Some(path) = saved_rx.recv() => {
                    triggers.on_did_save(&path);
                }
                Some(()) = config_rx.recv() => {
                    triggers.on_did_change_configuration(views.uris());
                }
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Interrupted, shutting down");
                    break;
                }
            }
        }

        provider.dispose();

        Ok(())
    }
}
