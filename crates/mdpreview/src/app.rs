use crate::command;
use anyhow::Result;
use clap::Parser;
use mdpreview_config::ConfigStore;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
pub enum RunCmd {
    /// Render a markdown file to HTML once.
    #[clap(name = "render")]
    Render(command::render::Render),
    /// Keep the previews of markdown files up to date.
    #[clap(name = "watch")]
    Watch(command::watch::Watch),
    /// Print the stylesheet of a highlighting theme.
    #[clap(name = "highlight-css")]
    HighlightCss(command::highlight_css::HighlightCss),
}

/// mdpreview CLI arguments.
#[derive(Parser, Debug)]
pub struct Args {
    /// Enable the logging system.
    #[clap(long, global = true)]
    pub log: Option<PathBuf>,

    /// Specify the path of the config file.
    #[clap(long, global = true)]
    pub config_file: Option<PathBuf>,
}

impl RunCmd {
    pub async fn run(self, args: Args) -> Result<()> {
        let (store, config_err) = ConfigStore::load(args.config_file.clone());

        let _guard = crate::logging::init(args.log.clone(), &store.current().log)?;

        if let Some(err) = config_err {
            tracing::warn!(%err, "Invalid config file, falling back to the defaults");
            eprintln!("warning: {err}");
        }

        tracing::debug!(config_file = ?store.file_path(), "Config loaded");

        let store = Arc::new(store);

        match self {
            Self::Render(render) => render.run(store).await,
            Self::Watch(watch) => watch.run(store).await,
            Self::HighlightCss(highlight_css) => highlight_css.run(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Parser, Debug)]
    struct Cli {
        #[clap(flatten)]
        args: Args,

        #[clap(subcommand)]
        cmd: RunCmd,
    }

    #[test]
    fn test_parse_global_args_after_subcommand() {
        let cli = Cli::parse_from([
            "mdpreview",
            "render",
            "notes.md",
            "--theme",
            "vs-dark",
            "--log",
            "/tmp/mdpreview.log",
        ]);
        assert_eq!(cli.args.log, Some(PathBuf::from("/tmp/mdpreview.log")));
        assert!(matches!(cli.cmd, RunCmd::Render(_)));
    }

    #[test]
    fn test_watch_requires_files() {
        assert!(Cli::try_parse_from(["mdpreview", "watch"]).is_err());
        assert!(Cli::try_parse_from(["mdpreview", "watch", "a.md", "b.md", "--side"]).is_ok());
    }
}
