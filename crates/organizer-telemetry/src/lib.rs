#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::module_name_repetitions)]

//! Telemetry primitives shared across the organizer workspace.
//!
//! This crate centralises logging and metrics so every collector reports
//! through the same subscriber and registry.
//! Layout: init.rs (subscriber setup), context.rs (process span),
//! metrics.rs (Prometheus registry), error.rs (error types).

pub mod context;
pub mod error;
pub mod init;
pub mod metrics;

pub use context::GlobalContextGuard;
pub use error::{CollectorStage, Result, TelemetryError};
pub use init::{DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig, Verbosity, build_sha, init_logging};
pub use metrics::{Metrics, MetricsSnapshot};
