use crate::error::{AssetError, Result};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

pub const WORDS_FILE_NAME: &str = "words_of_week.txt";

/// Reads one word per line, skipping blank lines.
///
/// Duplicates are dropped case-insensitively; the first spelling seen wins and
/// keeps its position. Words that could escape the week directory once used
/// as a file name are skipped with a warning.
pub fn read_words(path: &Path) -> Result<Vec<String>> {
    if !path.is_file() {
        return Err(AssetError::NotFound(path.to_path_buf()));
    }

    let raw = fs::read_to_string(path)?;
    Ok(dedup_words(raw.lines()))
}

pub fn dedup_words<'a>(lines: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut words = Vec::new();

    for line in lines {
        let word = line.trim();
        if word.is_empty() {
            continue;
        }
        if !is_safe_file_stem(word) {
            tracing::warn!(word, "skipping word that is not a plain file name");
            continue;
        }
        if seen.insert(word.to_lowercase()) {
            words.push(word.to_string());
        }
    }

    words
}

/// Asset names are built as `<word>_word.wav` and friends, so a word must not
/// carry a path separator or be a relative directory reference.
fn is_safe_file_stem(word: &str) -> bool {
    !word.contains(['/', '\\', '\0']) && word != "." && word != ".."
}
