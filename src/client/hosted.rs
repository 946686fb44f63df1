//! Client for a hosted images API (`{model, prompt, size}` in,
//! `data[0].b64_json` out).
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use crate::client::{decode_image, ImageGenerator, ImageSize};
use crate::config::HostedConfig;
use crate::error::{AppError, AppResult};

#[derive(Clone)]
pub struct HostedImageClient {
    client: Client,
    url: String,
    api_key: String,
    model: String,
}

impl HostedImageClient {
    pub fn new(config: &HostedConfig) -> Self {
        HostedImageClient {
            client: Client::new(),
            url: config.images_url.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        }
    }
}

#[async_trait]
impl ImageGenerator for HostedImageClient {
    fn name(&self) -> &str {
        "hosted"
    }

    async fn generate(&self, prompt: &str, size: ImageSize) -> AppResult<Vec<u8>> {
        tracing::debug!(model = %self.model, "Sending image request to {}", self.url);
        let payload = json!({
            "model": self.model,
            "prompt": prompt,
            "size": format!("{}x{}", size.width, size.height),
        });
        let response = self.client.post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(AppError::HttpClient)?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_else(|_| "Unable to read error body".to_string());
            tracing::error!("Image request failed. Status: {}, Body: {}", status, error_body);
            return Err(AppError::Upstream { status: status.as_u16(), body: error_body });
        }

        let json: Value = response.json().await.map_err(AppError::HttpClient)?;
        let encoded = json
            .get("data")
            .and_then(|d| d.as_array())
            .and_then(|arr| arr.first())
            .and_then(|item| item.get("b64_json"))
            .and_then(|b| b.as_str())
            .ok_or_else(|| AppError::ResponseShape("image response has no data[0].b64_json".to_string()))?;
        decode_image(encoded)
    }
}
