use crate::error::{AssetError, Result};
use crate::persist::write_atomic;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const MANIFEST_FILE_NAME: &str = "manifest.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordRecord {
    pub id: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentence: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_word: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_sentence: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl WordRecord {
    pub fn new(word: &str) -> Self {
        Self {
            id: word.to_string(),
            text: word.to_string(),
            sentence: None,
            audio_word: None,
            audio_sentence: None,
            image: None,
        }
    }

    pub fn has_sentence(&self) -> bool {
        self.sentence
            .as_deref()
            .map(|s| !s.trim().is_empty())
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub generated_at: DateTime<Local>,
    pub words: Vec<WordRecord>,
}

impl Manifest {
    pub fn new(words: Vec<WordRecord>) -> Self {
        Self {
            generated_at: Local::now(),
            words,
        }
    }

    pub fn path_in(dir: &Path) -> PathBuf {
        dir.join(MANIFEST_FILE_NAME)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        write_atomic(path, json.as_bytes())
    }
}

/// Previously generated records keyed by exact word text.
pub type PriorRecords = HashMap<String, WordRecord>;

/// Loads prior state, treating an unreadable manifest as empty.
pub fn load_prior(path: &Path) -> PriorRecords {
    match try_load_prior(path) {
        Ok(records) => records,
        Err(err) => {
            tracing::warn!(error = %err, "ignoring prior manifest");
            PriorRecords::new()
        }
    }
}

pub fn try_load_prior(path: &Path) -> Result<PriorRecords> {
    if !path.exists() {
        return Ok(PriorRecords::new());
    }

    let raw = fs::read_to_string(path)?;
    let parse_error = |message: String| AssetError::ManifestParse {
        path: path.to_path_buf(),
        message,
    };

    let value: serde_json::Value =
        serde_json::from_str(&raw).map_err(|err| parse_error(err.to_string()))?;
    let words = value
        .get("words")
        .and_then(|w| w.as_array())
        .ok_or_else(|| parse_error("missing \"words\" array".to_string()))?;

    let mut records = PriorRecords::new();
    for entry in words {
        match serde_json::from_value::<WordRecord>(entry.clone()) {
            Ok(record) => {
                records.insert(record.text.clone(), record);
            }
            Err(err) => tracing::debug!(error = %err, "skipping malformed word record"),
        }
    }

    Ok(records)
}
