//! # Design
//!
//! - Constant messages; the failing metric and setup stage travel as fields.
//! - Logging and metrics failures stay in one enum so callers map a single type.

use std::fmt::{self, Display, Formatter};
use std::string::FromUtf8Error;

use thiserror::Error;
use tracing_subscriber::util::TryInitError;

/// Result alias for telemetry operations.
pub type Result<T> = std::result::Result<T, TelemetryError>;

/// Step of collector setup that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectorStage {
    /// Building the collector from its options.
    Build,
    /// Adding the collector to the registry.
    Register,
}

impl Display for CollectorStage {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(match self {
            Self::Build => "build",
            Self::Register => "register",
        })
    }
}

/// Errors raised by telemetry helpers.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// A global tracing subscriber was already installed or could not be set.
    #[error("failed to install tracing subscriber")]
    SubscriberInstall {
        /// Underlying subscriber error.
        source: TryInitError,
    },
    /// A Prometheus collector could not be built or registered.
    #[error("failed to set up metrics collector")]
    Collector {
        /// Metric name tied to the failure.
        metric: &'static str,
        /// Setup step that failed.
        stage: CollectorStage,
        /// Underlying Prometheus error.
        source: prometheus::Error,
    },
    /// The registry could not be encoded in the text exposition format.
    #[error("failed to encode metrics")]
    Encode {
        /// Underlying Prometheus error.
        source: prometheus::Error,
    },
    /// Encoded metrics were not valid UTF-8.
    #[error("metrics output was not valid utf-8")]
    Utf8 {
        /// Underlying conversion error.
        source: FromUtf8Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn collector_errors_carry_metric_and_stage() {
        let err = TelemetryError::Collector {
            metric: "files_discovered_total",
            stage: CollectorStage::Register,
            source: prometheus::Error::AlreadyReg,
        };
        assert_eq!(err.to_string(), "failed to set up metrics collector");
        assert!(err.source().is_some());
        assert!(matches!(
            err,
            TelemetryError::Collector {
                metric: "files_discovered_total",
                stage: CollectorStage::Register,
                ..
            }
        ));
    }

    #[test]
    fn render_errors_keep_their_sources() {
        let encode = TelemetryError::Encode {
            source: prometheus::Error::Msg("broken".to_string()),
        };
        assert_eq!(encode.to_string(), "failed to encode metrics");
        assert!(encode.source().is_some());

        if let Err(source) = String::from_utf8(vec![0, 159]) {
            let utf8 = TelemetryError::Utf8 { source };
            assert_eq!(utf8.to_string(), "metrics output was not valid utf-8");
            assert!(utf8.source().is_some());
        }
    }

    #[test]
    fn stages_render_lowercase() {
        assert_eq!(CollectorStage::Build.to_string(), "build");
        assert_eq!(CollectorStage::Register.to_string(), "register");
    }
}
