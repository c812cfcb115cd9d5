//! The `metadata.yaml` ledger listing every generated week.
//!
//! One entry per `(sounds, week_start)`. Re-running a week replaces its entry
//! where it stands; anything new goes to the end. Entries written by hand keep
//! every key they carry, whatever its type.

use crate::error::{AssetError, Result};
use crate::persist::write_atomic;
use chrono::NaiveDate;
use serde::Serialize;
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

pub const METADATA_FILE_NAME: &str = "metadata.yaml";
pub const SOURCE_LABEL: &str = "generate_assets";
const LEDGER_KEY: &str = "dictee";

/// The fields this tool writes for a generated week.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataEntry {
    pub sounds: String,
    pub path: String,
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub date_of_generation: NaiveDate,
}

impl MetadataEntry {
    pub fn new(
        sounds: &str,
        path: &str,
        week_start: NaiveDate,
        week_end: NaiveDate,
        generated_on: NaiveDate,
    ) -> Self {
        Self {
            sounds: sounds.to_string(),
            path: path.to_string(),
            week_start,
            week_end,
            date_of_generation: generated_on,
        }
    }
}

/// One ledger entry as stored on disk.
///
/// Only `sounds` and `week_start` are interpreted; every other key rides along
/// untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct LedgerEntry(Mapping);

impl LedgerEntry {
    /// Scalar at `key` rendered as text. Missing, null and nested values give
    /// `None`.
    pub fn get(&self, key: &str) -> Option<String> {
        match self.0.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    pub fn fields(&self) -> &Mapping {
        &self.0
    }

    fn same_week(&self, other: &LedgerEntry) -> bool {
        match (self.get("sounds"), other.get("sounds")) {
            (Some(a), Some(b)) => a == b && self.get("week_start") == other.get("week_start"),
            _ => false,
        }
    }
}

impl From<MetadataEntry> for LedgerEntry {
    fn from(entry: MetadataEntry) -> Self {
        let date = |d: NaiveDate| Value::from(d.format("%Y-%m-%d").to_string());
        let mut map = Mapping::new();
        map.insert("sounds".into(), entry.sounds.into());
        map.insert("path".into(), entry.path.into());
        map.insert("week_start".into(), date(entry.week_start));
        map.insert("week_end".into(), date(entry.week_end));
        map.insert("date_of_generation".into(), date(entry.date_of_generation));
        map.insert("source".into(), SOURCE_LABEL.into());
        LedgerEntry(map)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Replaced(usize),
    Appended(usize),
}

/// Shapes the ledger file has had on disk.
#[derive(Debug)]
enum LedgerDocument {
    Current(Vec<LedgerEntry>),
    /// `dictee:` held a single map before weeks were tracked.
    Legacy(LedgerEntry),
    Empty,
}

impl LedgerDocument {
    /// A list item that is not a map cannot be carried over, so it fails the
    /// load instead of being dropped on the next save.
    fn from_value(value: Value) -> Result<Self> {
        let body = match value {
            Value::Mapping(mut map) => match map.remove(LEDGER_KEY) {
                Some(body) => body,
                None => return Ok(LedgerDocument::Empty),
            },
            Value::Sequence(items) => Value::Sequence(items),
            _ => return Ok(LedgerDocument::Empty),
        };

        match body {
            Value::Sequence(items) => {
                let entries = items
                    .into_iter()
                    .enumerate()
                    .map(|(index, item)| match item {
                        Value::Mapping(map) => Ok(LedgerEntry(map)),
                        other => Err(AssetError::Ledger(format!(
                            "entry {index} is not a map: {other:?}"
                        ))),
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(LedgerDocument::Current(entries))
            }
            Value::Mapping(map) => Ok(LedgerDocument::Legacy(LedgerEntry(map))),
            _ => Ok(LedgerDocument::Empty),
        }
    }

    fn into_entries(self) -> Vec<LedgerEntry> {
        match self {
            LedgerDocument::Current(entries) => entries,
            LedgerDocument::Legacy(entry) => vec![entry],
            LedgerDocument::Empty => Vec::new(),
        }
    }
}

#[derive(Serialize)]
struct LedgerFile<'a> {
    dictee: &'a [LedgerEntry],
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataLedger {
    pub entries: Vec<LedgerEntry>,
}

impl MetadataLedger {
    /// A missing or empty file yields an empty ledger. YAML that does not
    /// parse, or a list holding something other than maps, is an error so
    /// that the file is not silently clobbered.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)?;
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }

        let value: Value = serde_yaml::from_str(&raw)?;
        Ok(Self {
            entries: LedgerDocument::from_value(value)?.into_entries(),
        })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let yaml = serde_yaml::to_string(&LedgerFile {
            dictee: &self.entries,
        })?;
        write_atomic(path, yaml.as_bytes())
    }

    pub fn upsert(&mut self, entry: impl Into<LedgerEntry>) -> Upsert {
        let entry = entry.into();
        match self.entries.iter().position(|e| e.same_week(&entry)) {
            Some(index) => {
                self.entries[index] = entry;
                Upsert::Replaced(index)
            }
            None => {
                self.entries.push(entry);
                Upsert::Appended(self.entries.len() - 1)
            }
        }
    }
}

/// Records one generated week in the ledger at `path`.
pub fn update_metadata(
    path: &Path,
    sounds: &str,
    week_path: &str,
    week_start: NaiveDate,
    week_end: NaiveDate,
    today: NaiveDate,
) -> Result<Upsert> {
    let mut ledger = MetadataLedger::load(path)?;
    let outcome = ledger.upsert(MetadataEntry::new(
        sounds, week_path, week_start, week_end, today,
    ));
    ledger.save(path)?;

    tracing::info!(
        sounds,
        week_start = %week_start,
        outcome = ?outcome,
        path = %path.display(),
        "metadata updated"
    );
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(yaml: &str) -> Result<Vec<LedgerEntry>> {
        let value: Value = serde_yaml::from_str(yaml).unwrap();
        Ok(LedgerDocument::from_value(value)?.into_entries())
    }

    #[test]
    fn legacy_single_entry_is_wrapped() {
        let entries = document(
            "dictee:\n  name: Semaine 1\n  sounds: ou\n  date_of_generation: '2025-09-01'\n",
        )
        .unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].get("sounds").as_deref(), Some("ou"));
        assert_eq!(entries[0].get("name").as_deref(), Some("Semaine 1"));
    }

    #[test]
    fn scalar_body_is_empty() {
        assert!(document("dictee: 3\n").unwrap().is_empty());
    }

    #[test]
    fn non_map_list_item_is_an_error() {
        let err = document("dictee:\n  - sounds: ou\n  - just text\n").unwrap_err();
        assert!(matches!(err, AssetError::Ledger(_)));
    }

    #[test]
    fn scalars_of_any_type_read_as_text() {
        let entries =
            document("dictee:\n  - sounds: 2\n    week_start:\n    done: true\n").unwrap();
        assert_eq!(entries[0].get("sounds").as_deref(), Some("2"));
        assert_eq!(entries[0].get("week_start"), None);
        assert_eq!(entries[0].get("done").as_deref(), Some("true"));
    }

    #[test]
    fn upsert_replaces_in_place() {
        let day = |d| NaiveDate::from_ymd_opt(2026, 9, d).unwrap();
        let mut ledger = MetadataLedger::default();
        ledger.upsert(MetadataEntry::new("ou", "ou", day(7), day(11), day(1)));
        ledger.upsert(MetadataEntry::new("an", "an", day(14), day(18), day(1)));

        let outcome = ledger.upsert(MetadataEntry::new("ou", "ou", day(7), day(12), day(2)));
        assert_eq!(outcome, Upsert::Replaced(0));
        assert_eq!(ledger.entries.len(), 2);
        assert_eq!(ledger.entries[0].get("week_end").as_deref(), Some("2026-09-12"));
        assert_eq!(ledger.entries[1].get("sounds").as_deref(), Some("an"));
    }
}
