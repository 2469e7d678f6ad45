//! Post-collection task hooks.
//!
//! Tasks receive the records of a completed batch run. They are the seam where
//! classification and organization stages attach.

use std::collections::BTreeMap;

use organizer_fsops::FileRecord;
use tracing::info;

use crate::error::AppResult;

/// Unit of work applied to the records of a completed batch run.
pub trait Task: Send + Sync {
    /// Stable identifier used in logs and errors.
    fn name(&self) -> &'static str;

    /// Process the collected records.
    ///
    /// # Errors
    ///
    /// Returns an error when the task cannot complete; the dispatcher logs it
    /// and continues with the remaining tasks.
    fn run(&self, records: &[FileRecord]) -> AppResult<()>;
}

/// Logs the record count and total size per file type.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSummaryTask;

impl LogSummaryTask {
    /// Group records by file type as `(count, total bytes)`.
    #[must_use]
    pub fn summarize(records: &[FileRecord]) -> BTreeMap<&str, (usize, u64)> {
        let mut summary: BTreeMap<&str, (usize, u64)> = BTreeMap::new();
        for record in records {
            let entry = summary.entry(record.file_type.as_str()).or_default();
            entry.0 += 1;
            entry.1 = entry.1.saturating_add(record.size_bytes);
        }
        summary
    }
}

impl Task for LogSummaryTask {
    fn name(&self) -> &'static str {
        "log_summary"
    }

    fn run(&self, records: &[FileRecord]) -> AppResult<()> {
        for (file_type, (count, bytes)) in Self::summarize(records) {
            let file_type = if file_type.is_empty() { "(none)" } else { file_type };
            info!(file_type, count, bytes, "collected files by type");
        }
        info!(records = records.len(), "batch summary complete");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn record(name: &str, size: u64, file_type: &str) -> FileRecord {
        FileRecord {
            path: PathBuf::from("/in").join(name),
            filename: name.to_string(),
            size_bytes: size,
            file_type: file_type.to_string(),
        }
    }

    #[test]
    fn summary_groups_by_type() {
        let records = [
            record("a.txt", 5, ".txt"),
            record("b.txt", 7, ".txt"),
            record("c.jpg", 10, ".jpg"),
            record("Makefile", 1, ""),
        ];
        let summary = LogSummaryTask::summarize(&records);
        assert_eq!(summary.get(".txt"), Some(&(2, 12)));
        assert_eq!(summary.get(".jpg"), Some(&(1, 10)));
        assert_eq!(summary.get(""), Some(&(1, 1)));
    }

    #[test]
    fn run_succeeds_on_empty_input() {
        assert!(LogSummaryTask.run(&[]).is_ok());
        assert_eq!(LogSummaryTask.name(), "log_summary");
    }
}
