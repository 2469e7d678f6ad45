//! Prometheus-backed metrics registry and snapshot helpers.
//!
//! # Design
//! - Encapsulates collector registration to keep the public API small.
//! - Exposes the counters and gauges the collectors report; nothing is served
//!   over the network, callers render the registry when they need it.

use std::fmt;
use std::sync::Arc;

use prometheus::core::Collector;
use prometheus::{Encoder, IntCounter, IntCounterVec, IntGauge, Opts, Registry, TextEncoder};
use serde::Serialize;

use crate::error::{CollectorStage, Result, TelemetryError};

/// Prometheus-backed metrics registry shared across collectors.
#[derive(Clone)]
pub struct Metrics {
    inner: Arc<MetricsInner>,
}

struct MetricsInner {
    registry: Registry,
    files_discovered_total: IntCounter,
    files_collected_total: IntCounter,
    files_skipped_total: IntCounter,
    directories_visited_total: IntCounter,
    watch_events_total: IntCounterVec,
    active_watch_folders: IntGauge,
}

impl fmt::Debug for Metrics {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("Metrics").finish_non_exhaustive()
    }
}

/// Snapshot of the discovery counters and gauges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    /// Candidate files found by traversal.
    pub files_discovered_total: u64,
    /// Files that produced a metadata record.
    pub files_collected_total: u64,
    /// Files whose metadata could not be read.
    pub files_skipped_total: u64,
    /// Directories visited by traversal.
    pub directories_visited_total: u64,
    /// Folders currently subscribed for change notifications.
    pub active_watch_folders: i64,
}

impl Metrics {
    /// Construct a new metrics registry with the standard collectors registered.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the Prometheus collectors cannot be built or
    /// registered.
    pub fn new() -> Result<Self> {
        let registry = Registry::new();

        let files_discovered_total = counter(
            "files_discovered_total",
            "Candidate files found by directory traversal",
        )?;
        let files_collected_total = counter(
            "files_collected_total",
            "Files whose metadata was collected",
        )?;
        let files_skipped_total = counter(
            "files_skipped_total",
            "Files skipped because metadata could not be read",
        )?;
        let directories_visited_total = counter(
            "directories_visited_total",
            "Directories visited by directory traversal",
        )?;
        let watch_events_total = IntCounterVec::new(
            Opts::new(
                "watch_events_total",
                "Filesystem notifications received while watching, by kind",
            ),
            &["kind"],
        )
        .map_err(|source| build_error("watch_events_total", source))?;
        let active_watch_folders = IntGauge::with_opts(Opts::new(
            "active_watch_folders",
            "Folders currently subscribed for change notifications",
        ))
        .map_err(|source| build_error("active_watch_folders", source))?;

        register(&registry, "files_discovered_total", &files_discovered_total)?;
        register(&registry, "files_collected_total", &files_collected_total)?;
        register(&registry, "files_skipped_total", &files_skipped_total)?;
        register(
            &registry,
            "directories_visited_total",
            &directories_visited_total,
        )?;
        register(&registry, "watch_events_total", &watch_events_total)?;
        register(&registry, "active_watch_folders", &active_watch_folders)?;

        Ok(Self {
            inner: Arc::new(MetricsInner {
                registry,
                files_discovered_total,
                files_collected_total,
                files_skipped_total,
                directories_visited_total,
                watch_events_total,
                active_watch_folders,
            }),
        })
    }

    /// Record the outcome of one traversal pass.
    pub fn record_discovery(&self, directories: usize, files: usize) {
        self.inner
            .directories_visited_total
            .inc_by(Self::count(directories));
        self.inner.files_discovered_total.inc_by(Self::count(files));
    }

    /// Increment the collected-file counter.
    pub fn inc_file_collected(&self) {
        self.inner.files_collected_total.inc();
    }

    /// Increment the skipped-file counter.
    pub fn inc_file_skipped(&self) {
        self.inner.files_skipped_total.inc();
    }

    /// Increment the watch notification counter for the given kind.
    pub fn inc_watch_event(&self, kind: &str) {
        self.inner
            .watch_events_total
            .with_label_values(&[kind])
            .inc();
    }

    /// Set the number of folders currently being watched.
    pub fn set_active_watch_folders(&self, count: usize) {
        self.inner
            .active_watch_folders
            .set(i64::try_from(count).unwrap_or(i64::MAX));
    }

    /// Render the metrics registry using the Prometheus text exposition format.
    ///
    /// # Errors
    ///
    /// Returns an error if the metrics cannot be encoded or if the encoded
    /// buffer is not valid UTF-8.
    pub fn render(&self) -> Result<String> {
        let encoder = TextEncoder::new();
        let metric_families = self.inner.registry.gather();
        let mut buffer = Vec::new();
        encoder
            .encode(&metric_families, &mut buffer)
            .map_err(|source| TelemetryError::Encode { source })?;
        String::from_utf8(buffer).map_err(|source| TelemetryError::Utf8 { source })
    }

    /// Take a point-in-time snapshot of the discovery counters and gauges.
    #[must_use]
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            files_discovered_total: self.inner.files_discovered_total.get(),
            files_collected_total: self.inner.files_collected_total.get(),
            files_skipped_total: self.inner.files_skipped_total.get(),
            directories_visited_total: self.inner.directories_visited_total.get(),
            active_watch_folders: self.inner.active_watch_folders.get(),
        }
    }

    fn count(value: usize) -> u64 {
        u64::try_from(value).unwrap_or(u64::MAX)
    }
}

fn counter(name: &'static str, help: &str) -> Result<IntCounter> {
    IntCounter::with_opts(Opts::new(name, help)).map_err(|source| build_error(name, source))
}

const fn build_error(metric: &'static str, source: prometheus::Error) -> TelemetryError {
    TelemetryError::Collector {
        metric,
        stage: CollectorStage::Build,
        source,
    }
}

fn register<C>(registry: &Registry, name: &'static str, collector: &C) -> Result<()>
where
    C: Collector + Clone + 'static,
{
    registry
        .register(Box::new(collector.clone()))
        .map_err(|source| TelemetryError::Collector {
            metric: name,
            stage: CollectorStage::Register,
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_reflects_updates() -> Result<()> {
        let metrics = Metrics::new()?;
        metrics.record_discovery(3, 7);
        metrics.inc_file_collected();
        metrics.inc_file_collected();
        metrics.inc_file_skipped();
        metrics.set_active_watch_folders(2);

        let snapshot = metrics.snapshot();
        assert_eq!(
            snapshot,
            MetricsSnapshot {
                files_discovered_total: 7,
                files_collected_total: 2,
                files_skipped_total: 1,
                directories_visited_total: 3,
                active_watch_folders: 2,
            }
        );
        Ok(())
    }

    #[test]
    fn render_includes_every_collector() -> Result<()> {
        let metrics = Metrics::new()?;
        metrics.inc_watch_event("create");
        let rendered = metrics.render()?;
        for name in [
            "files_discovered_total",
            "files_collected_total",
            "files_skipped_total",
            "directories_visited_total",
            "watch_events_total",
            "active_watch_folders",
        ] {
            assert!(rendered.contains(name), "missing {name}");
        }
        assert!(rendered.contains("kind=\"create\""));
        Ok(())
    }

    #[test]
    fn clones_share_the_registry() -> Result<()> {
        let metrics = Metrics::new()?;
        let clone = metrics.clone();
        clone.inc_file_skipped();
        assert_eq!(metrics.snapshot().files_skipped_total, 1);
        Ok(())
    }
}
