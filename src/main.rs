//! Riskdesk: disease screening desk
//!
//! Main entry point for the terminal application.

#![allow(non_snake_case)]

use std::io::IsTerminal;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use Riskdesk::adapters::sanitize::SanitizingMakeWriter;
use Riskdesk::application::ModelRegistry;
use Riskdesk::config::AppConfig;
use Riskdesk::tui::App;

fn main() -> Result<()> {
    let config = AppConfig::from_env().context("Invalid configuration")?;

    // Initialize logging.
    //
    // IMPORTANT: writing logs to the terminal will corrupt the TUI (alternate screen).
    // Interactive TTY logs to a file by default, anything else logs to stdout.
    let interactive = std::io::stdout().is_terminal();

    let (writer, _guard) = if config.log.mode.use_file(interactive) {
        if let Some(parent) = config.log.file.parent() {
            // Best-effort: don't fail startup just because the directory is missing.
            let _ = std::fs::create_dir_all(parent);
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&config.log.file)
            .with_context(|| format!("Failed to open log file {:?}", config.log.file))?;
        tracing_appender::non_blocking(file)
    } else {
        tracing_appender::non_blocking(std::io::stdout())
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(SanitizingMakeWriter::new(writer)))
        .init();

    tracing::info!("Starting Riskdesk...");

    // Refuse to start unless all five classifiers load (and verify, if required).
    let registry = ModelRegistry::load(&config.model_dir, &config.integrity)
        .with_context(|| format!("Failed to load models from {:?}", config.model_dir))?;

    let mut app = App::new(Arc::new(registry));
    app.run()?;

    tracing::info!("Riskdesk shutdown complete.");
    Ok(())
}
