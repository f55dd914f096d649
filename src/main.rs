//! Product Dashboard - browse a remote product catalog in the terminal
//!
//! Main entry point for the interactive dashboard.
//!
//! # Overview
//!
//! This binary initializes:
//! - Configuration loading ([`ConfigManager`], `dashboard/dashboard.yaml` + `DASHBOARD_*` env)
//! - Logging infrastructure (file rotation + optional stderr output)
//! - A single-threaded tokio runtime
//! - State management ([`StateManager`])
//! - The session controller ([`SessionController`]), which fetches the
//!   catalog once in the background and reads commands from stdin
//!
//! # Execution Flow
//!
//! 1. Load configuration (writing defaults on first run)
//! 2. Initialize logging → logs/product-dashboard.<date>
//! 3. Create the current-thread tokio runtime
//! 4. Create StateManager from configuration
//! 5. Run the session until `quit` or end of input
//! 6. Log session metrics

use anyhow::{Context, Result};
use product_dashboard::services::HttpProductSource;
use product_dashboard::ui::{SessionController, TerminalSink};
use product_dashboard::{APP_NAME, ConfigManager, DashboardState, Metrics, StateManager, VERSION};
use std::sync::Arc;
use std::time::Duration;

fn main() -> Result<()> {
    let config_manager = ConfigManager::new("dashboard")?;
    if config_manager.ensure_default()? {
        eprintln!(
            "Wrote default configuration to {}",
            config_manager.config_path()
        );
    }
    let config = config_manager.load()?;

    // Hold the guard for the whole program so buffered logs get flushed
    let _log_guard = product_dashboard::logging::setup_logging(&config.logging)?;

    tracing::info!("Starting {} v{}", APP_NAME, VERSION);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to create tokio runtime")?;

    let state_manager = Arc::new(StateManager::with_state(DashboardState::from_config(&config)));
    let metrics = Arc::new(Metrics::new());

    let source = HttpProductSource::new(
        config.endpoint.clone(),
        config.request_timeout_secs.map(Duration::from_secs),
    )
    .context("Failed to create HTTP client")?;
    tracing::info!("Catalog endpoint: {}", source.endpoint());

    let controller = SessionController::new(Arc::clone(&state_manager), Arc::clone(&metrics));

    let result = runtime.block_on(async {
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        let mut sink = TerminalSink::new(std::io::stdout());
        controller.run(Arc::new(source), stdin, &mut sink).await
    });

    metrics.log_summary();
    tracing::info!("Session ended");

    result.map_err(|e| {
        tracing::error!("Session error: {:#}", e);
        e
    })
}
