//! Save notifications for the markdown files being previewed.

use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tokio::sync::mpsc::UnboundedSender;

/// Reports the paths written in the directories of the watched files.
///
/// Parent directories are watched instead of the files themselves so that
/// editors using write-rename on save are noticed too. Watching stops when
/// this is dropped.
pub struct SaveWatcher {
    _watcher: RecommendedWatcher,
    directories: BTreeSet<PathBuf>,
}

impl SaveWatcher {
    pub fn new<'a>(
        files: impl IntoIterator<Item = &'a Path>,
        saved_paths: UnboundedSender<PathBuf>,
    ) -> notify::Result<Self> {
        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if event.kind.is_modify() || event.kind.is_create() {
                        for path in event.paths {
                            // Receiver dropped, nothing listens anymore.
                            if saved_paths.send(path).is_err() {
                                return;
                            }
                        }
                    }
                }
                Err(err) => {
                    tracing::error!(?err, "File watcher error");
                }
            },
            notify::Config::default(),
        )?;

        let directories = files
            .into_iter()
            .filter_map(|file| file.parent().map(Path::to_path_buf))
            .collect::<BTreeSet<_>>();

        for directory in &directories {
            watcher.watch(directory, RecursiveMode::NonRecursive)?;
            tracing::debug!(?directory, "Watching directory for saves");
        }

        Ok(Self {
            _watcher: watcher,
            directories,
        })
    }

    pub fn directories(&self) -> impl Iterator<Item = &Path> {
        self.directories.iter().map(PathBuf::as_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_save_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let dir_path = dir.path().canonicalize().unwrap();
        let file = dir_path.join("doc.md");
        let other = dir_path.join("other.md");
        std::fs::write(&file, "a").unwrap();
        std::fs::write(&other, "a").unwrap();

        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let watcher = SaveWatcher::new([file.as_path(), other.as_path()], tx).unwrap();
        assert_eq!(watcher.directories().count(), 1);

        tokio::time::sleep(Duration::from_millis(100)).await;
        std::fs::write(&file, "b").unwrap();

        let saved = tokio::time::timeout(Duration::from_secs(10), async {
            while let Some(path) = rx.recv().await {
                if path == file {
                    return true;
                }
            }
            false
        })
        .await
        .expect("Save not reported in time");
        assert!(saved);
    }
}
