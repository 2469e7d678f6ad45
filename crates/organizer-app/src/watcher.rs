//! Continuous monitoring ("active" mode).
//!
//! # Design
//! - One `RecommendedWatcher` subscribes every watch folder non-recursively and
//!   forwards raw notifications into an unbounded channel from its own thread.
//! - The async loop handles one notification at a time until the shutdown
//!   future resolves, then unsubscribes and releases the watcher.

use std::path::PathBuf;

use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use organizer_config::AppConfig;
use organizer_events::{Event, EventBus, FileChange};
use organizer_fsops::FileMetadataReader;
use organizer_telemetry::Metrics;
use tokio::sync::mpsc;
use tokio::task;
use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult};

/// Watches the configured folders and publishes metadata for changed files.
#[derive(Debug, Clone)]
pub struct ContinuousWatcher {
    folders: Vec<PathBuf>,
    events: EventBus,
    metrics: Metrics,
}

impl ContinuousWatcher {
    /// Build a watcher over every configured watch folder.
    #[must_use]
    pub fn new(config: &AppConfig, events: EventBus, metrics: Metrics) -> Self {
        Self {
            folders: config.folders().watch_folders().to_vec(),
            events,
            metrics,
        }
    }

    /// Folders that will be subscribed.
    #[must_use]
    pub fn folders(&self) -> &[PathBuf] {
        &self.folders
    }

    /// Monitor the folders until `shutdown` resolves.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Watch` when the watcher cannot be created or a folder
    /// cannot be subscribed. Errors reported while running are logged only.
    pub async fn run(self, shutdown: impl Future<Output = ()>) -> AppResult<()> {
        let (sender, mut receiver) = mpsc::unbounded_channel::<notify::Result<notify::Event>>();
        let mut watcher = RecommendedWatcher::new(
            move |result: notify::Result<notify::Event>| {
                let _ = sender.send(result);
            },
            notify::Config::default(),
        )
        .map_err(|source| AppError::watch("watcher.create", None, source))?;

        for folder in &self.folders {
            watcher
                .watch(folder, RecursiveMode::NonRecursive)
                .map_err(|source| AppError::watch("watcher.watch", Some(folder.clone()), source))?;
        }
        self.metrics.set_active_watch_folders(self.folders.len());
        self.events.publish(Event::WatchStarted {
            folders: self
                .folders
                .iter()
                .map(|folder| folder.display().to_string())
                .collect(),
        });
        info!(folders = self.folders.len(), "watching for file changes");

        tokio::pin!(shutdown);
        let mut notifications = 0_u64;
        loop {
            tokio::select! {
                biased;
                () = &mut shutdown => break,
                received = receiver.recv() => match received {
                    Some(Ok(event)) => {
                        notifications += 1;
                        self.handle(event).await;
                    }
                    Some(Err(err)) => warn!(error = %err, "filesystem watcher reported an error"),
                    None => {
                        warn!("filesystem watcher channel closed");
                        break;
                    }
                },
            }
        }

        for folder in &self.folders {
            if let Err(err) = watcher.unwatch(folder) {
                warn!(error = %err, path = %folder.display(), "failed to unwatch folder");
            }
        }
        drop(watcher);
        self.metrics.set_active_watch_folders(0);
        self.events.publish(Event::WatchStopped {
            folders: self.folders.len(),
            notifications,
        });
        info!(notifications, "stopped watching for file changes");
        Ok(())
    }

    async fn handle(&self, event: notify::Event) {
        let change = match event.kind {
            EventKind::Create(_) => Some(FileChange::Created),
            EventKind::Modify(_) => Some(FileChange::Modified),
            _ => None,
        };
        self.metrics.inc_watch_event(kind_label(&event.kind));

        let Some(change) = change else {
            debug!(kind = ?event.kind, paths = ?event.paths, "ignoring filesystem notification");
            return;
        };

        for path in event.paths {
            let lookup = path.clone();
            let read = task::spawn_blocking(move || FileMetadataReader::read(&lookup));
            let record = match read.await {
                Ok(record) => record,
                Err(err) => {
                    warn!(error = %err, path = %path.display(), "metadata worker failed");
                    None
                }
            };
            let Some(record) = record else {
                continue;
            };
            debug!(path = %record.path.display(), ?change, "file observed");
            self.events.publish(Event::FileObserved {
                path: record.path.display().to_string(),
                size_bytes: record.size_bytes,
                file_type: record.file_type,
                change,
            });
        }
    }
}

const fn kind_label(kind: &EventKind) -> &'static str {
    match kind {
        EventKind::Create(_) => "create",
        EventKind::Modify(_) => "modify",
        EventKind::Remove(_) => "remove",
        EventKind::Access(_) => "access",
        EventKind::Any | EventKind::Other => "other",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{CreateKind, ModifyKind, RemoveKind};

    #[test]
    fn kind_labels_cover_event_kinds() {
        assert_eq!(kind_label(&EventKind::Create(CreateKind::File)), "create");
        assert_eq!(kind_label(&EventKind::Modify(ModifyKind::Any)), "modify");
        assert_eq!(kind_label(&EventKind::Remove(RemoveKind::File)), "remove");
        assert_eq!(kind_label(&EventKind::Other), "other");
    }
}
