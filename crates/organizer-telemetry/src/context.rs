//! Process-wide span describing the current run.

use std::path::Path;

use tracing::field::Empty;
use tracing::{Span, span::Entered};

use crate::init::build_sha;

/// Keeps the `organizer` span entered until the process exits.
///
/// Every event logged while the guard lives inherits the run's mode, config
/// file, and build SHA.
#[derive(Debug)]
pub struct GlobalContextGuard {
    span: &'static Span,
    _entered: Entered<'static>,
}

impl GlobalContextGuard {
    /// Enter the run span for `mode` loaded from `config`.
    #[must_use]
    pub fn enter(mode: &str, config: &Path) -> Self {
        let span: &'static Span = Box::leak(Box::new(tracing::info_span!(
            "organizer",
            mode,
            config = %config.display(),
            build_sha = build_sha(),
            folders = Empty,
        )));
        Self {
            span,
            _entered: span.enter(),
        }
    }

    /// Record how many watch folders the run covers.
    pub fn record_folders(&self, count: usize) {
        self.span.record("folders", count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_enters_span_and_records_folders() {
        let guard = GlobalContextGuard::enter("dry", Path::new("config.yaml"));
        guard.record_folders(2);
        tracing::info!("inside run span");
        drop(guard);
    }
}
