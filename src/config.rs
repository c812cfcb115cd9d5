use crate::error::AssetError;
use anyhow::{bail, Context};
use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const API_KEY_ENV: &str = "GOOGLE_API_KEY";
const GOOGLE_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_public_dir")]
    pub public_dir: PathBuf,
    #[serde(default = "default_image_rate_limit")]
    pub image_rate_limit_seconds: u64,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default)]
    pub text: TextConfig,
    #[serde(default)]
    pub tts: TtsConfig,
    #[serde(default)]
    pub image: ImageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextConfig {
    #[serde(default = "default_text_model")]
    pub model: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TtsConfig {
    #[serde(default = "default_tts_model")]
    pub model: String,
    #[serde(default = "default_voice")]
    pub voice: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageConfig {
    #[serde(default = "default_image_model")]
    pub model: String,
    #[serde(default = "default_aspect_ratio")]
    pub aspect_ratio: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        if let Some(path) = Self::project_path() {
            if path.exists() {
                return Self::load_from_path(&path);
            }
        }

        if let Ok(path) = Self::default_path() {
            if path.exists() {
                return Self::load_from_path(&path);
            }
        }

        Ok(Self::default())
    }

    pub fn load_from_path(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config at {}", path.display()))?;
        let config: Config = serde_json::from_str(&raw)
            .with_context(|| format!("parse config at {}", path.display()))?;
        Ok(config)
    }

    pub fn init_default() -> anyhow::Result<PathBuf> {
        let path = Self::default_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let config = Self::default();
        fs::write(&path, serde_json::to_string_pretty(&config)?)?;
        Ok(path)
    }

    pub fn default_path() -> anyhow::Result<PathBuf> {
        let base = BaseDirs::new().context("unable to resolve home directory")?;
        Ok(base.config_dir().join("dictee-assets").join("config.json"))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.public_dir.as_os_str().is_empty() {
            bail!("public_dir must not be empty");
        }

        if self.timeout_seconds == 0 {
            bail!("timeout_seconds must be greater than 0");
        }

        for (name, model) in [
            ("text.model", &self.text.model),
            ("tts.model", &self.tts.model),
            ("tts.voice", &self.tts.voice),
            ("image.model", &self.image.model),
        ] {
            if model.trim().is_empty() {
                bail!("{name} must not be empty");
            }
        }

        for (name, url) in [
            ("text.base_url", &self.text.base_url),
            ("tts.base_url", &self.tts.base_url),
            ("image.base_url", &self.image.base_url),
        ] {
            if !url.starts_with("https://") {
                bail!("{name} must be an https:// URL: {url}");
            }
        }

        Ok(())
    }

    fn project_path() -> Option<PathBuf> {
        Some(PathBuf::from("dictee-assets.json"))
    }
}

/// Reads the service credential from the environment.
pub fn api_key_from_env() -> Result<String, AssetError> {
    match std::env::var(API_KEY_ENV) {
        Ok(key) if !key.trim().is_empty() => Ok(key.trim().to_string()),
        _ => Err(AssetError::Config(format!(
            "{API_KEY_ENV} environment variable is required"
        ))),
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            public_dir: default_public_dir(),
            image_rate_limit_seconds: default_image_rate_limit(),
            timeout_seconds: default_timeout_seconds(),
            text: TextConfig::default(),
            tts: TtsConfig::default(),
            image: ImageConfig::default(),
        }
    }
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            model: default_text_model(),
            base_url: default_base_url(),
        }
    }
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            model: default_tts_model(),
            voice: default_voice(),
            language: default_language(),
            base_url: default_base_url(),
        }
    }
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            model: default_image_model(),
            aspect_ratio: default_aspect_ratio(),
            base_url: default_base_url(),
        }
    }
}

fn default_public_dir() -> PathBuf {
    PathBuf::from("public")
}

fn default_image_rate_limit() -> u64 {
    60
}

fn default_timeout_seconds() -> u64 {
    60
}

fn default_base_url() -> String {
    GOOGLE_BASE_URL.to_string()
}

fn default_text_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_tts_model() -> String {
    "gemini-2.5-flash-preview-tts".to_string()
}

fn default_voice() -> String {
    "Kore".to_string()
}

fn default_language() -> String {
    "French".to_string()
}

fn default_image_model() -> String {
    "imagen-3.0-generate-002".to_string()
}

fn default_aspect_ratio() -> String {
    "1:1".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_fills_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"image_rate_limit_seconds": 0, "tts": {"voice": "Aoede"}}"#)
                .unwrap();
        assert_eq!(config.image_rate_limit_seconds, 0);
        assert_eq!(config.tts.voice, "Aoede");
        assert_eq!(config.tts.model, default_tts_model());
        assert_eq!(config.public_dir, PathBuf::from("public"));
        config.validate().unwrap();
    }

    #[test]
    fn rejects_plain_http() {
        let mut config = Config::default();
        config.image.base_url = "http://localhost:8080".to_string();
        assert!(config.validate().is_err());
    }
}
