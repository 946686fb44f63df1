//! Env-driven configuration for both icon scripts.
//!
//! Values are read from the process environment; `dotenv` is loaded on demand
//! by the binaries. Defaults are provided for a local development setup.
use std::env;
use std::path::PathBuf;

use crate::client::ImageSize;
use crate::error::{AppError, AppResult};

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:7860";
pub const DEFAULT_HOSTED_URL: &str = "https://api.openai.com/v1/images/generations";
pub const DEFAULT_HOSTED_MODEL: &str = "gpt-image-1";

#[derive(Debug, Clone)]
pub struct Config {
    pub module_root: PathBuf,
    pub manifest: PathBuf,
    pub packs: PathBuf,
    pub api_url: String,
    pub limit: Option<usize>,
    pub overwrite: bool,
    pub dry_run: bool,
    pub size: u32,
    pub steps: u32,
    pub cfg_scale: f64,
    pub sampler: String,
    pub proof_delay_ms: u64,
}

/// Settings for the hosted image endpoint used by the proof script.
#[derive(Debug, Clone)]
pub struct HostedConfig {
    pub api_key: String,
    pub images_url: String,
    pub model: String,
    pub size: ImageSize,
}

impl Config {
    pub fn dotenv_load() {
        dotenv::dotenv().ok();
    }

    pub fn new() -> AppResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. `new` passes the process
    /// environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());
        Ok(Config {
            module_root: PathBuf::from(get("ICON_MODULE_ROOT", ".")),
            manifest: PathBuf::from(get("ICON_MANIFEST", "module.json")),
            packs: PathBuf::from(get("ICON_PACKS_DIR", "packs")),
            api_url: get("ICON_API_URL", DEFAULT_API_URL),
            limit: parse_limit(lookup("ICON_LIMIT").as_deref())?,
            overwrite: parse_bool("ICON_OVERWRITE", lookup("ICON_OVERWRITE").as_deref())?,
            dry_run: parse_bool("ICON_DRY_RUN", lookup("ICON_DRY_RUN").as_deref())?,
            size: parse_number("ICON_SIZE", &get("ICON_SIZE", "512"))?,
            steps: parse_number("ICON_STEPS", &get("ICON_STEPS", "20"))?,
            cfg_scale: parse_number("ICON_CFG_SCALE", &get("ICON_CFG_SCALE", "7.0"))?,
            sampler: get("ICON_SAMPLER", "Euler a"),
            proof_delay_ms: parse_number("ICON_PROOF_DELAY_MS", &get("ICON_PROOF_DELAY_MS", "1500"))?,
        })
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.module_root.join(&self.manifest)
    }

    pub fn packs_dir(&self) -> PathBuf {
        self.module_root.join(&self.packs)
    }

    pub fn image_size(&self) -> ImageSize {
        ImageSize::square(self.size)
    }

    pub fn log_settings(&self) {
        tracing::info!(
            root = %self.module_root.display(),
            packs = %self.packs_dir().display(),
            api_url = %self.api_url,
            limit = ?self.limit,
            overwrite = self.overwrite,
            dry_run = self.dry_run,
            "icon settings"
        );
    }
}

impl HostedConfig {
    pub fn new() -> AppResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("OPENAI_API_KEY")
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or_else(|| AppError::Config("OPENAI_API_KEY is not set".to_string()))?;
        Ok(HostedConfig {
            api_key,
            images_url: lookup("OPENAI_IMAGES_URL").unwrap_or_else(|| DEFAULT_HOSTED_URL.to_string()),
            model: lookup("OPENAI_IMAGE_MODEL").unwrap_or_else(|| DEFAULT_HOSTED_MODEL.to_string()),
            size: parse_size("OPENAI_IMAGE_SIZE", &lookup("OPENAI_IMAGE_SIZE").unwrap_or_else(|| "1024x1024".to_string()))?,
        })
    }
}

fn parse_bool(key: &str, raw: Option<&str>) -> AppResult<bool> {
    let Some(raw) = raw else { return Ok(false) };
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        other => Err(AppError::Config(format!("{} must be a boolean, got '{}'", key, other))),
    }
}

fn parse_limit(raw: Option<&str>) -> AppResult<Option<usize>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s
            .parse::<usize>()
            .map(Some)
            .map_err(|_| AppError::Config(format!("ICON_LIMIT must be a non-negative integer, got '{}'", s))),
    }
}

/// `WIDTHxHEIGHT`, e.g. `1024x1536`.
fn parse_size(key: &str, raw: &str) -> AppResult<ImageSize> {
    let (w, h) = raw
        .trim()
        .split_once(['x', 'X'])
        .ok_or_else(|| AppError::Config(format!("{} must look like 1024x1024, got '{}'", key, raw)))?;
    Ok(ImageSize { width: parse_number(key, w)?, height: parse_number(key, h)? })
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> AppResult<T> {
    raw.trim()
        .parse::<T>()
        .map_err(|_| AppError::Config(format!("{} must be numeric, got '{}'", key, raw)))
}
