//! One-shot batch collection ("dry" mode).
//!
//! # Design
//! - Traversal runs on the blocking pool; metadata reads fan out as blocking
//!   tasks bounded by a semaphore and tracked in a `JoinSet`.
//! - Per-file failures (including panics) are logged and skipped; the batch
//!   always drains every worker before returning.

use std::path::PathBuf;
use std::sync::Arc;
use std::thread;

use organizer_config::AppConfig;
use organizer_events::{Event, EventBus};
use organizer_fsops::{DirectoryScanner, DiscoveryResult, FileMetadataReader, FileRecord};
use organizer_telemetry::Metrics;
use tokio::sync::Semaphore;
use tokio::task::{self, JoinSet};
use tracing::{info, warn};

/// Upper bound on concurrent metadata reads.
const MAX_WORKERS: usize = 64;
/// Workers started per available CPU.
const WORKERS_PER_CPU: usize = 5;

/// Worker bound for a machine with `parallelism` CPUs.
#[must_use]
pub fn worker_limit_for(parallelism: usize) -> usize {
    MAX_WORKERS.min(parallelism.max(1).saturating_mul(WORKERS_PER_CPU))
}

/// Worker bound for the current machine.
#[must_use]
pub fn worker_limit() -> usize {
    worker_limit_for(thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get))
}

/// Everything a batch run found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Directories visited by traversal.
    pub directories: Vec<PathBuf>,
    /// Candidate files found by traversal.
    pub files: Vec<PathBuf>,
    /// Metadata records for the files that could be read, unordered.
    pub records: Vec<FileRecord>,
}

/// Scans the watch folders once and collects metadata for every file found.
#[derive(Debug, Clone)]
pub struct BatchCollector {
    roots: Vec<PathBuf>,
    exclusions: Vec<PathBuf>,
    worker_limit: usize,
    events: EventBus,
    metrics: Metrics,
}

impl BatchCollector {
    /// Build a collector over the configured watch folders with no exclusions.
    #[must_use]
    pub fn new(config: &AppConfig, events: EventBus, metrics: Metrics) -> Self {
        Self {
            roots: config.folders().watch_folders().to_vec(),
            exclusions: Vec::new(),
            worker_limit: worker_limit(),
            events,
            metrics,
        }
    }

    /// Prune `exclusions` (and their descendants) from traversal.
    #[must_use]
    pub fn with_exclusions(mut self, exclusions: Vec<PathBuf>) -> Self {
        self.exclusions = exclusions;
        self
    }

    /// Override the concurrent metadata read bound; zero is raised to one.
    #[must_use]
    pub fn with_worker_limit(mut self, limit: usize) -> Self {
        self.worker_limit = limit.max(1);
        self
    }

    /// Concurrent metadata read bound in effect.
    #[must_use]
    pub const fn worker_limit(&self) -> usize {
        self.worker_limit
    }

    /// Run the batch and return the collected records.
    pub async fn run(&self) -> Vec<FileRecord> {
        self.run_report().await.records
    }

    /// Run the batch and return the traversal lists together with the records.
    pub async fn run_report(&self) -> BatchReport {
        self.events.publish(Event::ScanStarted {
            roots: self
                .roots
                .iter()
                .map(|root| root.display().to_string())
                .collect(),
            worker_limit: self.worker_limit,
        });

        let discovery = self.discover().await;
        self.metrics
            .record_discovery(discovery.directories.len(), discovery.files.len());
        let records = self.collect(&discovery.files).await;

        let total_bytes = records
            .iter()
            .fold(0_u64, |total, record| total.saturating_add(record.size_bytes));
        info!(
            directories = discovery.directories.len(),
            files = discovery.files.len(),
            records = records.len(),
            total_bytes,
            "batch collection complete"
        );
        self.events.publish(Event::ScanCompleted {
            directories: discovery.directories.len(),
            files: discovery.files.len(),
            records: records.len(),
            total_bytes,
        });

        let DiscoveryResult { directories, files } = discovery;
        BatchReport {
            directories,
            files,
            records,
        }
    }

    async fn discover(&self) -> DiscoveryResult {
        let roots = self.roots.clone();
        let exclusions = self.exclusions.clone();
        match task::spawn_blocking(move || DirectoryScanner::scan(&roots, &exclusions)).await {
            Ok(discovery) => discovery,
            Err(err) => {
                warn!(error = %err, "directory scan task failed");
                DiscoveryResult::default()
            }
        }
    }

    async fn collect(&self, files: &[PathBuf]) -> Vec<FileRecord> {
        let semaphore = Arc::new(Semaphore::new(self.worker_limit));
        let mut workers = JoinSet::new();

        for path in files {
            let Ok(permit) = Arc::clone(&semaphore).acquire_owned().await else {
                break;
            };
            let path = path.clone();
            workers.spawn_blocking(move || {
                let _permit = permit;
                FileMetadataReader::read(&path)
            });
        }

        let mut records = Vec::with_capacity(files.len());
        while let Some(joined) = workers.join_next().await {
            match joined {
                Ok(Some(record)) => {
                    self.metrics.inc_file_collected();
                    records.push(record);
                }
                Ok(None) => self.metrics.inc_file_skipped(),
                Err(err) => {
                    warn!(error = %err, "metadata worker failed");
                    self.metrics.inc_file_skipped();
                }
            }
        }
        records
    }
}
