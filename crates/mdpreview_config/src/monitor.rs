use std::path::PathBuf;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::time::{Duration, Instant};

use notify::{Config, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::mpsc::Sender;

use crate::ConfigStore;

const DEBOUNCE_DELAY: Duration = Duration::from_millis(10);

/// The fallback for `RecommendedWatcher` polling.
const FALLBACK_POLLING_TIMEOUT: Duration = Duration::from_secs(1);

/// Watches the config file of `store`, reloads the store and notifies
/// `sender` whenever the file changes.
///
/// The directory containing the file is watched rather than the file itself
/// so that editors replacing the file on save are noticed too. Returns `false`
/// if the watcher could not be started.
pub fn watch(store: Arc<ConfigStore>, sender: Sender<()>) -> bool {
    let config_file = store.file_path();

    let (Some(parent), Some(file_name)) = (config_file.parent(), config_file.file_name()) else {
        tracing::error!(path = ?config_file, "Invalid config file path");
        return false;
    };

    let parent = if parent.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        parent.to_path_buf()
    };

    // Canonicalize the directory, notify reports canonical paths.
    let watch_dir = parent.canonicalize().unwrap_or(parent);
    let path = watch_dir.join(file_name);

    let (tx, rx) = mpsc::channel();
    let mut watcher = match RecommendedWatcher::new(
        tx,
        Config::default().with_poll_interval(FALLBACK_POLLING_TIMEOUT),
    ) {
        Ok(watcher) => watcher,
        Err(err) => {
            tracing::error!("Unable to watch config file: {err}");
            return false;
        }
    };

    if let Err(err) = watcher.watch(&watch_dir, RecursiveMode::NonRecursive) {
        tracing::error!(?watch_dir, "Unable to watch config directory: {err}");
        return false;
    }

    let spawned = std::thread::Builder::new()
        .name("config-watcher".into())
        .spawn(move || {
            // Keep the watcher alive as long as the thread.
            let _watcher = watcher;

            // The current debouncing time.
            let mut debouncing_deadline: Option<Instant> = None;

            // The events accumulated during the debounce period.
            let mut received_events = Vec::new();

            loop {
                // We use `recv_timeout` to debounce the events coming from the watcher and reduce
                // the amount of config reloads.
                let event = match debouncing_deadline.as_ref() {
                    Some(debouncing_deadline) => rx.recv_timeout(
                        debouncing_deadline.saturating_duration_since(Instant::now()),
                    ),
                    None => {
                        let event = rx.recv().map_err(Into::into);

                        // Set the debouncing deadline after receiving the event.
                        debouncing_deadline.replace(Instant::now() + DEBOUNCE_DELAY);

                        event
                    }
                };

                match event {
                    Ok(Ok(event)) => match event.kind {
                        EventKind::Any
                        | EventKind::Create(_)
                        | EventKind::Modify(_)
                        | EventKind::Other => {
                            received_events.push(event);
                        }
                        _ => (),
                    },
                    Err(RecvTimeoutError::Timeout) => {
                        // Go back to polling the events.
                        debouncing_deadline = None;

                        if received_events
                            .drain(..)
                            .flat_map(|event| event.paths.into_iter())
                            .any(|modified_path| modified_path.eq(&path))
                        {
                            if let Err(err) = store.reload() {
                                tracing::error!(?err, "Failed to reload config");
                                continue;
                            }

                            tracing::debug!(?path, "Config reloaded");

                            match sender.try_send(()) {
                                Ok(()) | Err(TrySendError::Full(())) => {}
                                Err(TrySendError::Closed(())) => break,
                            }
                        }
                    }
                    Ok(Err(err)) => {
                        tracing::debug!("Config watcher errors: {err:?}");
                    }
                    Err(err) => {
                        tracing::debug!("Config watcher channel dropped unexpectedly: {err}");
                        break;
                    }
                };
            }
        });

    if let Err(err) = spawned {
        tracing::error!("Failed to spawn config-watcher thread: {err}");
        return false;
    }

    true
}
