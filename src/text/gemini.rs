use crate::config::TextConfig;
use crate::error::{AssetError, Result};
use crate::google::{first_part, GoogleClient};
use serde_json::json;

use super::TextBackend;

pub struct GeminiTextBackend {
    client: GoogleClient,
    config: TextConfig,
}

impl GeminiTextBackend {
    pub fn new(client: GoogleClient, config: TextConfig) -> Self {
        Self { client, config }
    }
}

impl TextBackend for GeminiTextBackend {
    fn name(&self) -> &str {
        "gemini-text"
    }

    fn generate(&self, prompt: &str) -> Result<String> {
        let body = json!({
            "contents": [{"role": "user", "parts": [{"text": prompt}]}],
        });

        let response =
            self.client
                .call(&self.config.base_url, &self.config.model, "generateContent", &body)?;

        first_part(&response)
            .and_then(|part| part.get("text"))
            .and_then(|text| text.as_str())
            .map(|text| text.to_string())
            .ok_or_else(|| {
                let reason = response
                    .pointer("/candidates/0/finishReason")
                    .and_then(|r| r.as_str())
                    .unwrap_or("no candidates");
                AssetError::Generation(format!("{} returned no text ({reason})", self.config.model))
            })
    }
}
