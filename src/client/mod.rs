//! Image generation backends.
//!
//! - `local`: self-hosted diffusion server (`/sdapi/v1/txt2img`).
//! - `hosted`: hosted images API with bearer-key auth.
//!
//! Both return raw image bytes; a failed call is fatal for the run.
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::AppResult;

pub mod hosted;
pub mod local;

pub use hosted::HostedImageClient;
pub use local::LocalDiffusionClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    pub fn square(edge: u32) -> Self {
        ImageSize { width: edge, height: edge }
    }
}

#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Backend name for logs.
    fn name(&self) -> &str;

    async fn generate(&self, prompt: &str, size: ImageSize) -> AppResult<Vec<u8>>;
}

/// Decode a base64 image, dropping a `data:<mime>;base64,` prefix if present.
pub fn decode_image(payload: &str) -> AppResult<Vec<u8>> {
    let body = match payload.split_once(";base64,") {
        Some((head, rest)) if head.starts_with("data:") => rest,
        _ => payload,
    };
    Ok(STANDARD.decode(body.trim())?)
}
