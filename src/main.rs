//! dirmirror - keep a live in-memory mirror of a directory tree and push it
//! to a websocket observer on every change.

use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{ColorChoice, Parser};
use dirmirror::actor::{Coordinator, Exit};
use dirmirror::cli::Cli;
use dirmirror::config::MirrorConfig;
use dirmirror::debug;

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    dirmirror::core::setup_shutdown_handler()?;

    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = Arc::new(MirrorConfig::load(&cli)?);
    if let Some(path) = &config.config_path {
        debug!("config"; "loaded {}", path.display());
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    let coordinator = Coordinator::with_config(config)
        .with_shutdown_signal(dirmirror::core::shutdown_signal());

    match runtime.block_on(coordinator.run())? {
        Exit::Shutdown => Ok(()),
        Exit::SourceFailed if dirmirror::core::is_shutdown() => Ok(()),
        Exit::SourceFailed => bail!("stopped watching: event source failed"),
    }
}
