use crate::error::{AssetError, Result};
use base64::{engine::general_purpose, Engine as _};
use reqwest::blocking::Client;
use serde_json::Value;
use std::time::Duration;

/// Blocking client for the Generative Language REST API.
#[derive(Clone)]
pub struct GoogleClient {
    http: Client,
    api_key: String,
}

impl GoogleClient {
    pub fn new(api_key: String, timeout: Duration) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, api_key })
    }

    /// POSTs `body` to `{base_url}/models/{model}:{method}`.
    pub fn call(&self, base_url: &str, model: &str, method: &str, body: &Value) -> Result<Value> {
        let url = format!(
            "{}/models/{}:{}",
            base_url.trim_end_matches('/'),
            model,
            method
        );

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().unwrap_or_default();
            return Err(AssetError::Generation(format!(
                "{model}:{method} returned HTTP {status}: {}",
                truncate(&text, 300)
            )));
        }

        Ok(response.json()?)
    }
}

pub fn decode_base64(data: &str) -> Result<Vec<u8>> {
    general_purpose::STANDARD
        .decode(data)
        .map_err(|err| AssetError::Generation(format!("invalid base64 payload: {err}")))
}

/// First `parts[]` entry of the first candidate in a `generateContent` reply.
pub fn first_part(response: &Value) -> Option<&Value> {
    response
        .pointer("/candidates/0/content/parts")
        .and_then(|parts| parts.as_array())
        .and_then(|parts| parts.first())
}

fn truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
