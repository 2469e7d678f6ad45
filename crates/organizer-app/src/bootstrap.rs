//! Process boot sequence: configuration, logging, dispatch.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use organizer_config::{AppConfig, BehaviorSettings};
use organizer_events::EventBus;
use organizer_telemetry::{
    GlobalContextGuard, LogFormat, LoggingConfig, Metrics, Verbosity, init_logging,
};
use tracing::{debug, info, warn};

use crate::dispatcher::{ModeDispatcher, RunOutcome};
use crate::error::{AppError, AppResult};
use crate::tasks::LogSummaryTask;

/// Configuration file used when neither `--config` nor `ORGANIZER_CONFIG` is set.
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Command-line arguments for the organizer binary.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "organizer",
    about = "Discover files in watched folders and dispatch them by mode"
)]
pub struct Cli {
    /// YAML configuration document to load.
    #[arg(long, env = "ORGANIZER_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,
}

/// Dependencies required to run the organizer.
pub(crate) struct BootstrapDependencies {
    verbosity: Verbosity,
    config: Arc<AppConfig>,
    events: EventBus,
    metrics: Metrics,
}

impl BootstrapDependencies {
    /// Load configuration and construct the shared services.
    pub(crate) fn from_cli(cli: &Cli) -> AppResult<Self> {
        let config =
            AppConfig::load(&cli.config).map_err(|err| AppError::config("config.load", err))?;
        let metrics =
            Metrics::new().map_err(|err| AppError::telemetry("telemetry.metrics", err))?;
        Ok(Self {
            verbosity: verbosity_for(config.behavior()),
            config: Arc::new(config),
            events: EventBus::new(),
            metrics,
        })
    }
}

/// Log verbosity implied by the behavior flags.
#[must_use]
pub const fn verbosity_for(behavior: &BehaviorSettings) -> Verbosity {
    Verbosity::from_flags(behavior.logging_enabled(), behavior.verbose_cli())
}

/// Entry point for the organizer boot sequence.
///
/// Configuration is read before logging is installed so the behavior flags can
/// shape the subscriber; events emitted while loading are therefore dropped
/// and the loaded configuration is logged again by the dispatch step.
///
/// # Errors
///
/// Returns an error if configuration loading, logging installation, or
/// dispatch fails.
pub async fn run_app() -> AppResult<()> {
    let cli = Cli::parse();
    let dependencies = BootstrapDependencies::from_cli(&cli)?;

    init_logging(&LoggingConfig {
        verbosity: dependencies.verbosity,
        format: LogFormat::infer(),
        build_sha: option_env!("ORGANIZER_BUILD_SHA").unwrap_or("dev"),
    })
    .map_err(|err| AppError::telemetry("telemetry.init", err))?;
    let context =
        GlobalContextGuard::enter(dependencies.config.behavior().mode().as_str(), &cli.config);
    context.record_folders(dependencies.config.folders().watch_folders().len());

    run_app_with(dependencies, shutdown_signal()).await?;
    Ok(())
}

/// Boot sequence that relies entirely on injected dependencies to simplify testing.
pub(crate) async fn run_app_with(
    dependencies: BootstrapDependencies,
    shutdown: impl Future<Output = ()>,
) -> AppResult<RunOutcome> {
    let BootstrapDependencies {
        verbosity: _,
        config,
        events,
        metrics,
    } = dependencies;

    info!(
        source = ?config.source(),
        mode = %config.behavior().mode(),
        folders = %config.folders().as_json(),
        "configuration loaded"
    );
    for folder in config.folders().watch_folders() {
        debug!(path = %folder.display(), "folder ready");
    }

    let dispatcher = ModeDispatcher::new(Arc::clone(&config), events, metrics.clone())
        .with_task(Arc::new(LogSummaryTask));
    let outcome = dispatcher.run(shutdown).await?;

    match &outcome {
        RunOutcome::Batch(records) => info!(records = records.len(), "batch run finished"),
        RunOutcome::Watched => info!("watch run finished"),
    }
    info!(metrics = ?metrics.snapshot(), "organizer shutdown complete");
    match metrics.render() {
        Ok(rendered) => debug!(metrics = %rendered, "final metrics"),
        Err(err) => warn!(error = %err, "failed to render metrics"),
    }
    Ok(outcome)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal; running until killed");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
