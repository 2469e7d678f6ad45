//! Mode selection and dispatch.
//!
//! # Design
//! - The configured mode maps onto a closed set of collector strategies.
//! - Batch results flow through the registered tasks; task failures are
//!   logged and never abort the run.

use std::sync::Arc;

use organizer_config::{AppConfig, BehaviorSettings, Mode};
use organizer_events::EventBus;
use organizer_fsops::FileRecord;
use organizer_telemetry::Metrics;
use tracing::{info, warn};

use crate::batch::BatchCollector;
use crate::error::{AppError, AppResult};
use crate::tasks::Task;
use crate::watcher::ContinuousWatcher;

/// Collection strategy chosen for a mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectorKind {
    /// Scan once and return.
    Batch,
    /// Monitor until shutdown.
    Continuous,
}

/// Concrete collector ready to run.
#[derive(Debug, Clone)]
pub enum Collector {
    /// One-shot scan.
    Batch(BatchCollector),
    /// Continuous monitoring.
    Continuous(ContinuousWatcher),
}

impl Collector {
    /// Strategy this collector implements.
    #[must_use]
    pub const fn kind(&self) -> CollectorKind {
        match self {
            Self::Batch(_) => CollectorKind::Batch,
            Self::Continuous(_) => CollectorKind::Continuous,
        }
    }
}

/// Result of a dispatched run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Records collected by a batch run.
    Batch(Vec<FileRecord>),
    /// A continuous run finished after shutdown.
    Watched,
}

/// Chooses and runs the collector for the configured mode.
pub struct ModeDispatcher {
    config: Arc<AppConfig>,
    events: EventBus,
    metrics: Metrics,
    tasks: Vec<Arc<dyn Task>>,
}

impl ModeDispatcher {
    /// Map a behavior's mode onto a collector strategy.
    #[must_use]
    pub const fn select(behavior: &BehaviorSettings) -> CollectorKind {
        match behavior.mode() {
            Mode::Active => CollectorKind::Continuous,
            Mode::Dry | Mode::Auto => CollectorKind::Batch,
        }
    }

    /// Build a dispatcher with no registered tasks.
    #[must_use]
    pub fn new(config: Arc<AppConfig>, events: EventBus, metrics: Metrics) -> Self {
        Self {
            config,
            events,
            metrics,
            tasks: Vec::new(),
        }
    }

    /// Build a dispatcher from an optional configuration.
    ///
    /// # Errors
    ///
    /// Returns `AppError::MissingConfig` when `config` is `None`.
    pub fn try_new(
        config: Option<Arc<AppConfig>>,
        events: EventBus,
        metrics: Metrics,
    ) -> AppResult<Self> {
        config
            .map(|config| Self::new(config, events, metrics))
            .ok_or(AppError::MissingConfig)
    }

    /// Register a task to run after each batch collection.
    #[must_use]
    pub fn with_task(mut self, task: Arc<dyn Task>) -> Self {
        self.tasks.push(task);
        self
    }

    /// Strategy selected for the configured mode.
    #[must_use]
    pub fn kind(&self) -> CollectorKind {
        Self::select(self.config.behavior())
    }

    /// Build the collector for the configured mode.
    #[must_use]
    pub fn collector(&self) -> Collector {
        match self.kind() {
            CollectorKind::Batch => Collector::Batch(BatchCollector::new(
                &self.config,
                self.events.clone(),
                self.metrics.clone(),
            )),
            CollectorKind::Continuous => Collector::Continuous(ContinuousWatcher::new(
                &self.config,
                self.events.clone(),
                self.metrics.clone(),
            )),
        }
    }

    /// Run the selected collector.
    ///
    /// `shutdown` only applies to continuous monitoring; a batch run always
    /// completes.
    ///
    /// # Errors
    ///
    /// Returns an error when continuous monitoring cannot subscribe its folders.
    pub async fn run(&self, shutdown: impl Future<Output = ()>) -> AppResult<RunOutcome> {
        let collector = self.collector();
        info!(
            mode = %self.config.behavior().mode(),
            collector = ?collector.kind(),
            "dispatching collector"
        );
        match collector {
            Collector::Batch(batch) => {
                let records = batch.run().await;
                self.run_tasks(&records);
                Ok(RunOutcome::Batch(records))
            }
            Collector::Continuous(watcher) => {
                watcher.run(shutdown).await?;
                Ok(RunOutcome::Watched)
            }
        }
    }

    fn run_tasks(&self, records: &[FileRecord]) {
        for task in &self.tasks {
            if let Err(err) = task.run(records) {
                warn!(task = task.name(), error = ?err, "task failed");
            }
        }
    }
}
