use std::path::PathBuf;
use thiserror::Error;

/// Failures raised while generating and persisting assets.
///
/// `NotFound` and `Config` abort a run before anything is written.
/// `Generation` and `ManifestParse` are recovered from where they occur.
#[derive(Error, Debug)]
pub enum AssetError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("generation failed: {0}")]
    Generation(String),

    #[error("malformed manifest at {}: {message}", .path.display())]
    ManifestParse { path: PathBuf, message: String },

    #[error("malformed metadata ledger: {0}")]
    Ledger(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl From<reqwest::Error> for AssetError {
    fn from(err: reqwest::Error) -> Self {
        AssetError::Generation(format!("HTTP request failed: {err}"))
    }
}

impl From<hound::Error> for AssetError {
    fn from(err: hound::Error) -> Self {
        AssetError::Generation(format!("WAV encoding failed: {err}"))
    }
}

pub type Result<T> = std::result::Result<T, AssetError>;
