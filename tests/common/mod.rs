#![allow(dead_code)]

use dictee_assets::error::{AssetError, Result};
use dictee_assets::image::ImageBackend;
use dictee_assets::layout::WeekLayout;
use dictee_assets::reconcile::Backends;
use dictee_assets::text::TextBackend;
use dictee_assets::tts::{PcmAudio, SpeechBackend, SpeechPace};
use std::cell::RefCell;
use std::fs;
use std::path::Path;

pub const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\n\x00\x00\x00\x0dIHDR fake image body";

/// Replies with a sentence built from the quoted word in the prompt, or fails.
pub struct FakeText {
    pub fail: bool,
    pub prompts: RefCell<Vec<String>>,
}

impl FakeText {
    pub fn working() -> Self {
        Self {
            fail: false,
            prompts: RefCell::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            prompts: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.prompts.borrow().len()
    }
}

impl TextBackend for FakeText {
    fn name(&self) -> &str {
        "fake-text"
    }

    fn generate(&self, prompt: &str) -> Result<String> {
        self.prompts.borrow_mut().push(prompt.to_string());
        if self.fail {
            return Err(AssetError::Generation("quota exceeded".to_string()));
        }
        let word = prompt.split('"').nth(1).unwrap_or("mot");
        Ok(format!("\"Voici le {word} du jour.\""))
    }
}

pub struct FakeSpeech {
    pub fail: bool,
    pub requests: RefCell<Vec<(String, SpeechPace)>>,
}

impl FakeSpeech {
    pub fn working() -> Self {
        Self {
            fail: false,
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.borrow().len()
    }
}

impl SpeechBackend for FakeSpeech {
    fn name(&self) -> &str {
        "fake-speech"
    }

    fn synthesize(&self, text: &str, pace: SpeechPace) -> Result<PcmAudio> {
        self.requests.borrow_mut().push((text.to_string(), pace));
        if self.fail {
            return Err(AssetError::Generation("connection reset".to_string()));
        }
        Ok(PcmAudio {
            samples: vec![0, 120, -120, 400, -400, 0],
            sample_rate: 24_000,
        })
    }
}

/// Returns `PNG_BYTES`, or no image at all when `empty` is set.
pub struct FakeImage {
    pub empty: bool,
    pub prompts: RefCell<Vec<String>>,
}

impl FakeImage {
    pub fn working() -> Self {
        Self {
            empty: false,
            prompts: RefCell::new(Vec::new()),
        }
    }

    pub fn filtered() -> Self {
        Self {
            empty: true,
            prompts: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.prompts.borrow().len()
    }
}

impl ImageBackend for FakeImage {
    fn name(&self) -> &str {
        "fake-image"
    }

    fn generate(&self, prompt: &str) -> Result<Option<Vec<u8>>> {
        self.prompts.borrow_mut().push(prompt.to_string());
        if self.empty {
            return Ok(None);
        }
        Ok(Some(PNG_BYTES.to_vec()))
    }
}

pub fn backends<'a>(
    text: &'a FakeText,
    speech: &'a FakeSpeech,
    image: &'a FakeImage,
) -> Backends<'a> {
    Backends { text, speech, image }
}

/// A week directory containing `words` as its word list.
pub fn week_with_words(public_dir: &Path, week: &str, words: &[&str]) -> WeekLayout {
    let layout = WeekLayout::new(public_dir, week);
    fs::create_dir_all(layout.week_dir()).unwrap();
    fs::write(layout.words_file(), words.join("\n")).unwrap();
    layout
}
