use anyhow::{anyhow, Result};
use mdpreview_config::LogConfig;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Log files larger than this are truncated on startup.
const MAX_LOG_FILE_SIZE: u64 = 8 * 1024 * 1024;

/// Installs the global tracing subscriber.
///
/// Logs go to the first file among `log_path`, `$MDPREVIEW_LOG_PATH` and
/// `log.log-file`, filtered by `log.max-level` and `log.log-target`. Without
/// a log file, logs go to stderr filtered by `$RUST_LOG`.
///
/// The returned guard must be kept alive to flush the file logs.
pub fn init(log_path: Option<PathBuf>, log_config: &LogConfig) -> Result<Option<WorkerGuard>> {
    let maybe_log = if let Some(log_path) = log_path {
        Some(log_path)
    } else if let Ok(log_path) = std::env::var("MDPREVIEW_LOG_PATH").map(PathBuf::from) {
        Some(log_path)
    } else {
        log_config.log_file.as_ref().map(PathBuf::from)
    };

    let Some(log_path) = maybe_log else {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|err| anyhow!("failed to install the stderr logger: {err}"))?;
        return Ok(None);
    };

    if let Ok(metadata) = std::fs::metadata(&log_path) {
        if log_path.is_file() && metadata.len() > MAX_LOG_FILE_SIZE {
            std::fs::remove_file(&log_path)?;
        }
    }

    let file_name = log_path
        .file_name()
        .ok_or_else(|| anyhow!("no file name in {log_path:?}"))?;

    let directory = log_path
        .parent()
        .ok_or_else(|| anyhow!("{log_path:?} has no parent"))?;

    let file_appender = tracing_appender::rolling::never(directory, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(env_filter(log_config))
        .with_line_number(true)
        .with_writer(non_blocking)
        .with_ansi(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    Ok(Some(guard))
}

fn env_filter(log_config: &LogConfig) -> EnvFilter {
    let max_level = log_config
        .max_level
        .parse::<LevelFilter>()
        .unwrap_or(LevelFilter::DEBUG);

    let max_level = max_level.to_string().to_lowercase();

    if log_config.log_target.is_empty() {
        EnvFilter::new(max_level)
    } else {
        EnvFilter::new(format!("{max_level},{}", log_config.log_target))
    }
}
