//! Entry point for the tutorial viewer.
//!
//! Responsibilities here are intentionally minimal:
//! - Parse command-line arguments.
//! - Load user configuration from `conf/config.toml` plus cached overrides.
//! - Load the lesson documents.
//! - Launch the GUI application.

mod app;
mod config;
mod theme;

use crate::app::run_app;
use crate::config::{load_config, load_override};
use anyhow::{Context, Result, anyhow, bail};
use std::env;
use std::path::Path;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*, reload};
use tutorial_core::{load_lessons, parse_deep_link};

type ReloadHandle = reload::Handle<EnvFilter, tracing_subscriber::Registry>;

fn main() {
    let reload_handle = init_tracing();
    if let Err(err) = run(&reload_handle) {
        error!("{err:?}");
        std::process::exit(1);
    }
}

fn run(reload_handle: &ReloadHandle) -> Result<()> {
    let requested = parse_args()?;
    let base_config = load_config(Path::new("conf/config.toml"));
    let mut config = base_config.clone();
    if let Some(mut overrides) = load_override(&base_config.cache_path()) {
        info!("Loaded config overrides from cache");
        overrides.keep_base_owned(&base_config);
        config = overrides;
    }
    set_log_level(reload_handle, config.log_level.as_filter_str());
    info!(
        level = %config.log_level,
        lessons = %config.lessons_dir,
        persist_track = config.persist_track,
        "Starting tutorial viewer"
    );

    let lessons = load_lessons(&config.lessons_path())
        .with_context(|| format!("Failed to read lessons from {}", config.lessons_dir))?;
    if lessons.is_empty() {
        bail!("No lessons found in {}", config.lessons_dir);
    }
    info!(count = lessons.len(), "Loaded lessons");

    run_app(config, lessons, requested).context("Failed to start the GUI")?;
    Ok(())
}

/// Optional start tutorial, given as `--tutorial N`, `N` or `#tutorial-N`.
fn parse_args() -> Result<Option<u32>> {
    let mut args = env::args().skip(1);
    let Some(first) = args.next() else {
        return Ok(None);
    };
    let raw = if first == "--tutorial" {
        args.next()
            .ok_or_else(|| anyhow!("Usage: tutorial-viewer [--tutorial <N | #tutorial-N>]"))?
    } else {
        first
    };
    match parse_deep_link(&raw) {
        Some(id) => Ok(Some(id)),
        None => Err(anyhow!("Unknown tutorial: {raw}")),
    }
}

fn init_tracing() -> ReloadHandle {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let (filter_layer, handle) = reload::Layer::new(env_filter);
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_filter(filter_layer),
        )
        .init();
    warn!("Logging initialized; override level with config.log_level or RUST_LOG");
    handle
}

fn set_log_level(handle: &ReloadHandle, level: &str) {
    let parsed = EnvFilter::builder()
        .parse(level)
        .unwrap_or_else(|_| EnvFilter::new("debug"));
    if let Err(err) = handle.modify(|filter| *filter = parsed.clone()) {
        warn!(%level, "Failed to update log level from config: {err}");
    } else {
        info!(%level, "Applied log level from config");
    }
}
