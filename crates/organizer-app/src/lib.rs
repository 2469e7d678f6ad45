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

//! Organizer application wiring.
//!
//! Layout: `batch.rs` (one-shot collection), `watcher.rs` (continuous
//! monitoring), `dispatcher.rs` (mode selection), `tasks.rs` (post-collection
//! hooks), `bootstrap.rs` (process boot sequence).

/// One-shot batch collection.
pub mod batch;
/// Process boot sequence.
pub mod bootstrap;
/// Mode selection and dispatch.
pub mod dispatcher;
/// Application error types.
pub mod error;
/// Post-collection task hooks.
pub mod tasks;
/// Continuous folder monitoring.
pub mod watcher;

pub use batch::{BatchCollector, BatchReport, worker_limit, worker_limit_for};
pub use bootstrap::{Cli, run_app};
pub use dispatcher::{Collector, CollectorKind, ModeDispatcher, RunOutcome};
pub use error::{AppError, AppResult};
pub use tasks::{LogSummaryTask, Task};
pub use watcher::ContinuousWatcher;
