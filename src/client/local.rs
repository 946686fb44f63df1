//! Client for a self-hosted diffusion server.
//!
//! `generate` posts to `/sdapi/v1/txt2img` and decodes the first entry of
//! the `images` array.
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use crate::client::{decode_image, ImageGenerator, ImageSize};
use crate::error::{AppError, AppResult};
use crate::prompt::NEGATIVE_PROMPT;

#[derive(Debug, Clone)]
pub struct SamplerSettings {
    pub steps: u32,
    pub cfg_scale: f64,
    pub sampler_name: String,
}

impl Default for SamplerSettings {
    fn default() -> Self {
        SamplerSettings { steps: 20, cfg_scale: 7.0, sampler_name: "Euler a".to_string() }
    }
}

#[derive(Serialize)]
struct Txt2ImgRequest<'a> {
    prompt: &'a str,
    negative_prompt: &'a str,
    width: u32,
    height: u32,
    steps: u32,
    cfg_scale: f64,
    sampler_name: &'a str,
}

#[derive(Clone)]
pub struct LocalDiffusionClient {
    client: Client,
    base_url: String,
    settings: SamplerSettings,
}

impl LocalDiffusionClient {
    pub fn new(base_url: String, settings: SamplerSettings) -> Self {
        let base = base_url.trim_end_matches('/').to_string();
        LocalDiffusionClient { client: Client::new(), base_url: base, settings }
    }
}

#[async_trait]
impl ImageGenerator for LocalDiffusionClient {
    fn name(&self) -> &str {
        "local"
    }

    async fn generate(&self, prompt: &str, size: ImageSize) -> AppResult<Vec<u8>> {
        let url = format!("{}/sdapi/v1/txt2img", self.base_url);
        tracing::debug!("Sending txt2img request to {}", url);

        let body = Txt2ImgRequest {
            prompt,
            negative_prompt: NEGATIVE_PROMPT,
            width: size.width,
            height: size.height,
            steps: self.settings.steps,
            cfg_scale: self.settings.cfg_scale,
            sampler_name: &self.settings.sampler_name,
        };
        let response = self.client.post(&url)
            .json(&body)
            .send()
            .await
            .map_err(AppError::HttpClient)?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_else(|_| "Unable to read error body".to_string());
            tracing::error!("txt2img failed. Status: {}, Body: {}", status, error_body);
            return Err(AppError::Upstream { status: status.as_u16(), body: error_body });
        }

        let json: Value = response.json().await.map_err(AppError::HttpClient)?;
        let encoded = json
            .get("images")
            .and_then(|imgs| imgs.as_array())
            .and_then(|arr| arr.first())
            .and_then(|img| img.as_str())
            .ok_or_else(|| AppError::ResponseShape("txt2img response has no images[0] string".to_string()))?;
        decode_image(encoded)
    }
}
