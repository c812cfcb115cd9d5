use crate::config::ImageConfig;
use crate::error::Result;
use crate::google::{decode_base64, GoogleClient};
use serde_json::json;

use super::ImageBackend;

pub struct ImagenBackend {
    client: GoogleClient,
    config: ImageConfig,
}

impl ImagenBackend {
    pub fn new(client: GoogleClient, config: ImageConfig) -> Self {
        Self { client, config }
    }
}

impl ImageBackend for ImagenBackend {
    fn name(&self) -> &str {
        "imagen"
    }

    fn generate(&self, prompt: &str) -> Result<Option<Vec<u8>>> {
        let body = json!({
            "instances": [{"prompt": prompt}],
            "parameters": {
                "sampleCount": 1,
                "aspectRatio": self.config.aspect_ratio,
                "personGeneration": "dont_allow",
                "outputOptions": {"mimeType": "image/png"}
            }
        });

        let response =
            self.client
                .call(&self.config.base_url, &self.config.model, "predict", &body)?;

        // Filtered prompts come back as an empty (or missing) predictions list.
        let encoded = response
            .get("predictions")
            .and_then(|p| p.as_array())
            .and_then(|p| p.iter().find_map(|pred| pred.get("bytesBase64Encoded")))
            .and_then(|data| data.as_str());

        match encoded {
            Some(data) => Ok(Some(decode_base64(data)?)),
            None => Ok(None),
        }
    }
}
