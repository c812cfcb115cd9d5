use crate::manifest::Manifest;
use crate::words::WORDS_FILE_NAME;
use std::fs;
use std::path::{Path, PathBuf};

pub const WAV_HEADER_LEN: u64 = 44;
pub const PNG_SIGNATURE_LEN: u64 = 8;

/// Where one week's files live on disk, and the public URLs the app loads
/// them from.
#[derive(Debug, Clone)]
pub struct WeekLayout {
    pub public_dir: PathBuf,
    pub week_path: String,
}

impl WeekLayout {
    pub fn new(public_dir: impl Into<PathBuf>, week_path: impl Into<String>) -> Self {
        Self {
            public_dir: public_dir.into(),
            week_path: week_path.into(),
        }
    }

    pub fn week_dir(&self) -> PathBuf {
        self.public_dir.join(&self.week_path)
    }

    pub fn audio_dir(&self) -> PathBuf {
        self.week_dir().join("audio")
    }

    pub fn images_dir(&self) -> PathBuf {
        self.week_dir().join("images")
    }

    pub fn words_file(&self) -> PathBuf {
        self.week_dir().join(WORDS_FILE_NAME)
    }

    pub fn manifest_file(&self) -> PathBuf {
        Manifest::path_in(&self.week_dir())
    }

    pub fn word_audio_file(&self, word: &str) -> PathBuf {
        self.audio_dir().join(word_audio_name(word))
    }

    pub fn sentence_audio_file(&self, word: &str) -> PathBuf {
        self.audio_dir().join(sentence_audio_name(word))
    }

    pub fn image_file(&self, word: &str) -> PathBuf {
        self.images_dir().join(image_name(word))
    }

    pub fn word_audio_url(&self, word: &str) -> String {
        self.url("audio", &word_audio_name(word))
    }

    pub fn sentence_audio_url(&self, word: &str) -> String {
        self.url("audio", &sentence_audio_name(word))
    }

    pub fn image_url(&self, word: &str) -> String {
        self.url("images", &image_name(word))
    }

    fn url(&self, kind: &str, file: &str) -> String {
        let week = self.week_path.trim_matches('/');
        if week.is_empty() {
            format!("/{kind}/{file}")
        } else {
            format!("/{week}/{kind}/{file}")
        }
    }
}

pub fn word_audio_name(word: &str) -> String {
    format!("{word}_word.wav")
}

pub fn sentence_audio_name(word: &str) -> String {
    format!("{word}_sentence.wav")
}

pub fn image_name(word: &str) -> String {
    format!("{word}.png")
}

/// True when `path` is a regular file longer than `min_len` bytes.
///
/// Zero-byte and header-only files are reported missing so they get
/// regenerated. Content is not otherwise inspected.
pub fn asset_present(path: &Path, min_len: u64) -> bool {
    fs::metadata(path)
        .map(|meta| meta.is_file() && meta.len() > min_len)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_are_rooted_at_week_path() {
        let layout = WeekLayout::new("public", "son_ou");
        assert_eq!(layout.word_audio_url("loup"), "/son_ou/audio/loup_word.wav");
        assert_eq!(
            layout.sentence_audio_url("loup"),
            "/son_ou/audio/loup_sentence.wav"
        );
        assert_eq!(layout.image_url("loup"), "/son_ou/images/loup.png");
        assert_eq!(
            layout.word_audio_file("loup"),
            PathBuf::from("public/son_ou/audio/loup_word.wav")
        );
    }

    #[test]
    fn truncated_files_are_not_present() {
        let dir = tempfile::tempdir().unwrap();
        let empty = dir.path().join("empty.wav");
        let header_only = dir.path().join("header.wav");
        let full = dir.path().join("full.wav");
        fs::write(&empty, b"").unwrap();
        fs::write(&header_only, vec![0u8; WAV_HEADER_LEN as usize]).unwrap();
        fs::write(&full, vec![0u8; WAV_HEADER_LEN as usize + 2]).unwrap();

        assert!(!asset_present(&empty, WAV_HEADER_LEN));
        assert!(!asset_present(&header_only, WAV_HEADER_LEN));
        assert!(asset_present(&full, WAV_HEADER_LEN));
        assert!(!asset_present(dir.path(), 0));
        assert!(!asset_present(&dir.path().join("missing.png"), PNG_SIGNATURE_LEN));
    }
}
