//! Icon generation for game-content packs.
//!
//! Modules:
//! - `config`: Env-driven configuration for both scripts.
//! - `manifest`: Module identifier lookup from `module.json`.
//! - `pack`: Data-file loading and format-preserving write-back.
//! - `prompt`: Spell/item classification and prompt templates.
//! - `client`: Image generation backends (self-hosted and hosted).
//! - `runner`: The record-update and proof-icon drivers.
//! - `utils`: Deterministic icon naming.
//! - `error`: Common error type and alias.
pub mod client;
pub mod config;
pub mod error;
pub mod manifest;
pub mod pack;
pub mod prompt;
pub mod runner;
pub mod utils;

pub use client::{HostedImageClient, ImageGenerator, ImageSize, LocalDiffusionClient};
pub use config::{Config, HostedConfig};
pub use error::{AppError, AppResult};
pub use pack::{Pack, PackFormat};

use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Log to stderr, filtered by `RUST_LOG` (default `info`).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Log a fatal error, echo it to stderr and return the failure exit code.
pub fn report_failure(e: &AppError) -> ExitCode {
    tracing::error!(error = %e, "run failed");
    eprintln!("Error: {}", e);
    ExitCode::from(1)
}
