//! Splits a `Group,Word` CSV into one `words_of_week.txt` per group.

use crate::words::WORDS_FILE_NAME;
use anyhow::{bail, Context};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordGroup {
    pub name: String,
    pub words: Vec<String>,
}

impl WordGroup {
    /// Directory name for the group: spaces become underscores.
    pub fn dir_name(&self) -> String {
        self.name.replace(' ', "_")
    }
}

/// Groups keep the order in which they first appear, words keep row order.
pub fn parse_groups(csv: &str) -> anyhow::Result<Vec<WordGroup>> {
    let mut records = split_records(csv).into_iter();
    let header = match records.next() {
        Some(header) => header,
        None => bail!("CSV is empty"),
    };

    let column = |name: &str| {
        header
            .iter()
            .position(|h| h.trim().trim_start_matches('\u{feff}') == name)
            .with_context(|| format!("CSV has no {name} column"))
    };
    let group_col = column("Group")?;
    let word_col = column("Word")?;

    let mut groups: Vec<WordGroup> = Vec::new();
    for row in records {
        let (Some(group), Some(word)) = (row.get(group_col), row.get(word_col)) else {
            tracing::warn!(row = ?row, "skipping short CSV row");
            continue;
        };
        // The word list is one entry per line, so line breaks inside a
        // quoted field collapse to spaces.
        let (group, word) = (collapse_whitespace(group), collapse_whitespace(word));
        if group.is_empty() || word.is_empty() {
            continue;
        }

        match groups.iter_mut().find(|g| g.name == group) {
            Some(existing) => existing.words.push(word),
            None => groups.push(WordGroup {
                name: group,
                words: vec![word],
            }),
        }
    }

    Ok(groups)
}

/// Writes every group's list under `public_dir` and returns the files written.
pub fn write_groups(groups: &[WordGroup], public_dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(groups.len());
    for group in groups {
        let dir = public_dir.join(group.dir_name());
        fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;

        let path = dir.join(WORDS_FILE_NAME);
        let mut contents = group.words.join("\n");
        contents.push('\n');
        fs::write(&path, contents).with_context(|| format!("write {}", path.display()))?;

        tracing::info!(
            group = %group.name,
            words = group.words.len(),
            path = %path.display(),
            "word list written"
        );
        written.push(path);
    }
    Ok(written)
}

fn collapse_whitespace(field: &str) -> String {
    field.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Comma-separated records with `"` quoting and `""` escapes. A quoted field
/// may span lines. Blank lines are skipped.
fn split_records(csv: &str) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = csv.chars().peekable();

    let mut end_record = |fields: &mut Vec<String>, field: &mut String| {
        fields.push(std::mem::take(field));
        let record = std::mem::take(fields);
        if !(record.len() == 1 && record[0].trim().is_empty()) {
            records.push(record);
        }
    };

    while let Some(c) = chars.next() {
        match (c, in_quotes) {
            ('"', true) if chars.peek() == Some(&'"') => {
                field.push('"');
                chars.next();
            }
            ('"', _) => in_quotes = !in_quotes,
            (',', false) => fields.push(std::mem::take(&mut field)),
            ('\r', false) if chars.peek() == Some(&'\n') => {}
            ('\n', false) => end_record(&mut fields, &mut field),
            _ => field.push(c),
        }
    }
    if !fields.is_empty() || !field.is_empty() {
        end_record(&mut fields, &mut field);
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_quoted_fields() {
        assert_eq!(
            split_records(r#"Son ou,"loup, le","""dit""""#),
            vec![vec!["Son ou", "loup, le", "\"dit\""]]
        );
    }

    #[test]
    fn quoted_newline_stays_in_its_field() {
        let csv = "Group,Word\nSon ou,\"loup\ngarou\"\nSon ou,roue\n";
        let records = split_records(csv);
        assert_eq!(records.len(), 3);
        assert_eq!(records[1], vec!["Son ou", "loup\ngarou"]);

        let groups = parse_groups(csv).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].words, vec!["loup garou", "roue"]);
    }

    #[test]
    fn groups_in_first_seen_order() {
        let csv = "Word,Group\r\nloup,Son ou\r\nchat,Son a\r\nroue,Son ou\r\n\r\n";
        let groups = parse_groups(csv).unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].name, "Son ou");
        assert_eq!(groups[0].words, vec!["loup", "roue"]);
        assert_eq!(groups[0].dir_name(), "Son_ou");
        assert_eq!(groups[1].words, vec!["chat"]);
    }

    #[test]
    fn missing_column_is_an_error() {
        assert!(parse_groups("Sound,Word\nou,loup\n").is_err());
    }
}
