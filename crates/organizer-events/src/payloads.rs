//! Event payload types emitted by the collectors.

use chrono::{DateTime, Utc};

/// Identifier assigned to each published event.
pub type EventId = u64;

/// Default buffer size for the in-memory replay ring.
pub const DEFAULT_REPLAY_CAPACITY: usize = 1_024;

/// Typed discovery events.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// A one-shot scan began.
    ScanStarted {
        /// Roots being scanned.
        roots: Vec<String>,
        /// Maximum concurrent metadata reads.
        worker_limit: usize,
    },
    /// A one-shot scan finished and every worker was joined.
    ScanCompleted {
        /// Directories visited.
        directories: usize,
        /// Candidate files found by the traversal.
        files: usize,
        /// Files that produced a metadata record.
        records: usize,
        /// Sum of the sizes of all records.
        total_bytes: u64,
    },
    /// Continuous monitoring subscribed to its folders.
    WatchStarted {
        /// Folders being watched.
        folders: Vec<String>,
    },
    /// A watched file was created or modified and its metadata was read.
    FileObserved {
        /// Absolute path of the file.
        path: String,
        /// Size in bytes at read time.
        size_bytes: u64,
        /// Lowercased extension including the leading dot, or empty.
        file_type: String,
        /// Kind of change that triggered the read.
        change: FileChange,
    },
    /// Continuous monitoring released its subscriptions.
    WatchStopped {
        /// Folders that were unwatched.
        folders: usize,
        /// Filesystem notifications handled while running.
        notifications: u64,
    },
}

impl Event {
    /// Machine-friendly discriminator for log and stream consumers.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::ScanStarted { .. } => "scan_started",
            Self::ScanCompleted { .. } => "scan_completed",
            Self::WatchStarted { .. } => "watch_started",
            Self::FileObserved { .. } => "file_observed",
            Self::WatchStopped { .. } => "watch_stopped",
        }
    }
}

/// Filesystem change that produced a [`Event::FileObserved`].
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FileChange {
    /// The file appeared.
    Created,
    /// The file's contents or metadata changed.
    Modified,
}

/// Metadata wrapper around events. Each envelope tracks the event id and
/// emission timestamp.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct EventEnvelope {
    /// Sequential identifier assigned by the bus.
    pub id: EventId,
    /// Time the event was published.
    pub timestamp: DateTime<Utc>,
    /// Event payload.
    pub event: Event,
}
