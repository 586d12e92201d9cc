pub mod monitor;

use arc_swap::ArcSwap;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Error occurred in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Project directories of mdpreview.
pub fn project_dirs() -> Option<&'static ProjectDirs> {
    static CELL: OnceLock<Option<ProjectDirs>> = OnceLock::new();

    CELL.get_or_init(|| ProjectDirs::from("org", "mdpreview", "mdpreview"))
        .as_ref()
}

/// Default location of the config file.
///
/// Linux: ~/.config/mdpreview/config.toml
/// macOS: ~/Library/Application\ Support/org.mdpreview.mdpreview/config.toml
/// Windows: ~\AppData\Roaming\mdpreview\mdpreview\config\config.toml
pub fn default_config_file() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("config.toml"))
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct LogConfig {
    /// Specify the log file path.
    ///
    /// This path must be an absolute path.
    pub log_file: Option<String>,

    /// Specify the max log level.
    pub max_level: String,

    /// Specify the log target to enable more detailed logging.
    ///
    /// Particularly useful for the debugging purpose.
    ///
    /// ```toml
    /// [log]
    /// log-target = "mdpreview_core=trace,mdpreview_syntax=debug"
    /// ```
    pub log_target: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_file: None,
            max_level: "debug".into(),
            log_target: "".into(),
        }
    }
}

/// Settings of the markdown renderer.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct MarkdownConfig {
    /// Extra stylesheets linked into every preview, in order.
    ///
    /// Relative paths are resolved against the directory of the previewed
    /// file, URLs are linked as is.
    pub styles: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct PreviewConfig {
    /// Base theme of the preview: `vs`, `vs-dark` or `hc-black`.
    ///
    /// Unknown themes are rendered in high contrast.
    pub theme: String,

    /// Directory containing `markdown.css` and `tomorrow.css`. By default the
    /// embedded stylesheets are installed in the cache directory and linked
    /// from there.
    ///
    /// Read once when a preview session starts, a config reload doesn't
    /// change the linked stylesheets.
    pub media_dir: Option<PathBuf>,

    /// Directory the rendered previews are written to.
    pub output_dir: Option<PathBuf>,

    /// Whether to open the rendered previews in the browser.
    pub open_browser: bool,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            theme: "vs".into(),
            media_dir: None,
            output_dir: None,
            open_browser: false,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct Config {
    /// Log configuration.
    pub log: LogConfig,

    /// Markdown configuration.
    pub markdown: MarkdownConfig,

    /// Preview configuration.
    pub preview: PreviewConfig,
}

impl Config {
    /// Reads the config from `path`, a missing file yields the defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            }),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

/// The settings store, every reader gets the latest loaded snapshot.
#[derive(Debug)]
pub struct ConfigStore {
    config: ArcSwap<Config>,
    file_path: PathBuf,
}

impl ConfigStore {
    /// Loads the config from `specified_config_file` or the default location.
    ///
    /// A broken config file doesn't prevent the startup, the defaults are used
    /// and the error is returned alongside for reporting.
    pub fn load(specified_config_file: Option<PathBuf>) -> (Self, Option<ConfigError>) {
        let file_path = specified_config_file.unwrap_or_else(|| {
            let config_file = default_config_file();
            if let Some(parent) = config_file.parent() {
                std::fs::create_dir_all(parent).ok();
            }
            config_file
        });

        let (config, maybe_error) = match Config::from_file(&file_path) {
            Ok(config) => (config, None),
            Err(err) => (Config::default(), Some(err)),
        };

        (Self::new(config, file_path), maybe_error)
    }

    pub fn new(config: Config, file_path: PathBuf) -> Self {
        Self {
            config: ArcSwap::from_pointee(config),
            file_path,
        }
    }

    /// Snapshot of the current config.
    pub fn current(&self) -> Arc<Config> {
        self.config.load_full()
    }

    /// Re-reads the config file, the current config is kept on error.
    pub fn reload(&self) -> Result<(), ConfigError> {
        let config = Config::from_file(&self.file_path)?;
        self.config.store(Arc::new(config));
        Ok(())
    }

    /// Replaces the current config without touching the file.
    pub fn replace(&self, config: Config) {
        self.config.store(Arc::new(config));
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }
}
