//! Per-word incremental generation.
//!
//! For each word we decide which assets are missing, generate only those, and
//! merge the results into the record carried over from the previous manifest.
//! A failed asset is logged and left out; it never stops the run.

use crate::image::{self, ImageBackend};
use crate::layout::{
    asset_present, image_name, sentence_audio_name, word_audio_name, WeekLayout,
    PNG_SIGNATURE_LEN, WAV_HEADER_LEN,
};
use crate::manifest::WordRecord;
use crate::text::{self, TextBackend};
use crate::throttle::Throttle;
use crate::tts::{self, SpeechBackend, SpeechPace};
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Sentence,
    AudioWord,
    AudioSentence,
    Image,
}

impl AssetKind {
    pub const ALL: [AssetKind; 4] = [
        AssetKind::Sentence,
        AssetKind::AudioWord,
        AssetKind::AudioSentence,
        AssetKind::Image,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AssetKind::Sentence => "sentence",
            AssetKind::AudioWord => "audioWord",
            AssetKind::AudioSentence => "audioSentence",
            AssetKind::Image => "image",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetNeeds {
    pub sentence: bool,
    pub audio_word: bool,
    pub audio_sentence: bool,
    pub image: bool,
}

impl AssetNeeds {
    pub fn all() -> Self {
        Self {
            sentence: true,
            audio_word: true,
            audio_sentence: true,
            image: true,
        }
    }

    /// Audio and images are probed on disk. Sentence text can only be known
    /// from the prior manifest.
    pub fn evaluate(
        word: &str,
        prior: Option<&WordRecord>,
        audio_dir: &Path,
        images_dir: &Path,
    ) -> Self {
        let mut needs = Self::all();
        if asset_present(&audio_dir.join(word_audio_name(word)), WAV_HEADER_LEN) {
            needs.audio_word = false;
        }
        if asset_present(&audio_dir.join(sentence_audio_name(word)), WAV_HEADER_LEN) {
            needs.audio_sentence = false;
        }
        if asset_present(&images_dir.join(image_name(word)), PNG_SIGNATURE_LEN) {
            needs.image = false;
        }
        if prior.map(WordRecord::has_sentence).unwrap_or(false) {
            needs.sentence = false;
        }
        needs
    }

    pub fn get(&self, kind: AssetKind) -> bool {
        match kind {
            AssetKind::Sentence => self.sentence,
            AssetKind::AudioWord => self.audio_word,
            AssetKind::AudioSentence => self.audio_sentence,
            AssetKind::Image => self.image,
        }
    }

    pub fn any(&self) -> bool {
        AssetKind::ALL.iter().any(|kind| self.get(*kind))
    }

    pub fn missing(&self) -> Vec<AssetKind> {
        AssetKind::ALL
            .into_iter()
            .filter(|kind| self.get(*kind))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Generated,
    Skipped,
    Failed,
}

#[derive(Debug, Clone)]
pub struct WordReport {
    pub record: WordRecord,
    pub is_new: bool,
    pub outcomes: Vec<(AssetKind, Outcome)>,
}

impl WordReport {
    pub fn outcome(&self, kind: AssetKind) -> Option<Outcome> {
        self.outcomes
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, outcome)| *outcome)
    }

    fn kinds_with(&self, wanted: Outcome) -> Vec<&'static str> {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| *outcome == wanted)
            .map(|(kind, _)| kind.as_str())
            .collect()
    }
}

/// Counts reported at the end of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub new_words: usize,
    pub updated_words: usize,
    pub unchanged_words: usize,
    pub generated_assets: usize,
    pub failed_assets: usize,
}

impl RunSummary {
    pub fn record(&mut self, report: &WordReport) {
        let generated = report.kinds_with(Outcome::Generated).len();
        let failed = report.kinds_with(Outcome::Failed).len();
        self.generated_assets += generated;
        self.failed_assets += failed;

        if report.is_new {
            self.new_words += 1;
        } else if generated > 0 || failed > 0 {
            self.updated_words += 1;
        } else {
            self.unchanged_words += 1;
        }
    }

    pub fn total_words(&self) -> usize {
        self.new_words + self.updated_words + self.unchanged_words
    }
}

pub struct Backends<'a> {
    pub text: &'a dyn TextBackend,
    pub speech: &'a dyn SpeechBackend,
    pub image: &'a dyn ImageBackend,
}

pub struct Reconciler<'a> {
    backends: Backends<'a>,
    layout: &'a WeekLayout,
    throttle: Throttle,
    force: bool,
}

impl<'a> Reconciler<'a> {
    pub fn new(backends: Backends<'a>, layout: &'a WeekLayout, throttle: Throttle) -> Self {
        Self {
            backends,
            layout,
            throttle,
            force: false,
        }
    }

    /// Regenerate every asset regardless of what already exists.
    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn needs(&self, word: &str, prior: Option<&WordRecord>) -> AssetNeeds {
        if self.force {
            return AssetNeeds::all();
        }
        AssetNeeds::evaluate(
            word,
            prior,
            &self.layout.audio_dir(),
            &self.layout.images_dir(),
        )
    }

    pub fn reconcile(&mut self, word: &str, prior: Option<WordRecord>) -> WordReport {
        let needs = self.needs(word, prior.as_ref());
        let is_new = prior.is_none();
        let mut record = prior.unwrap_or_else(|| WordRecord::new(word));
        let mut outcomes = Vec::with_capacity(AssetKind::ALL.len());

        tracing::info!(word, missing = ?needs.missing(), "processing");

        for kind in AssetKind::ALL {
            let outcome = if needs.get(kind) {
                self.generate(kind, word, &mut record)
            } else {
                self.keep(kind, word, &mut record);
                Outcome::Skipped
            };
            outcomes.push((kind, outcome));
        }

        let report = WordReport {
            record,
            is_new,
            outcomes,
        };
        tracing::info!(
            word,
            generated = ?report.kinds_with(Outcome::Generated),
            skipped = ?report.kinds_with(Outcome::Skipped),
            failed = ?report.kinds_with(Outcome::Failed),
            "done"
        );
        report
    }

    fn keep(&self, kind: AssetKind, word: &str, record: &mut WordRecord) {
        match kind {
            AssetKind::Sentence => {}
            AssetKind::AudioWord => record.audio_word = Some(self.layout.word_audio_url(word)),
            AssetKind::AudioSentence => {
                record.audio_sentence = Some(self.layout.sentence_audio_url(word))
            }
            AssetKind::Image => record.image = Some(self.layout.image_url(word)),
        }
    }

    fn generate(&mut self, kind: AssetKind, word: &str, record: &mut WordRecord) -> Outcome {
        match kind {
            AssetKind::Sentence => {
                match text::generate_sentence(self.backends.text, word) {
                    Ok(sentence) => {
                        tracing::info!(word, %sentence, "sentence generated");
                        record.sentence = Some(sentence);
                        Outcome::Generated
                    }
                    Err(err) => {
                        tracing::warn!(word, error = %err, "sentence failed; using fallback");
                        record.sentence = Some(text::fallback_sentence(word));
                        Outcome::Failed
                    }
                }
            }
            AssetKind::AudioWord => {
                let path = self.layout.word_audio_file(word);
                let result =
                    tts::synthesize_to_file(self.backends.speech, word, SpeechPace::Slow, &path);
                let url = self.layout.word_audio_url(word);
                settle(kind, word, result, url, &mut record.audio_word)
            }
            AssetKind::AudioSentence => {
                let path = self.layout.sentence_audio_file(word);
                let text = record.sentence.clone().unwrap_or_else(|| word.to_string());
                let result =
                    tts::synthesize_to_file(self.backends.speech, &text, SpeechPace::Normal, &path);
                let url = self.layout.sentence_audio_url(word);
                settle(kind, word, result, url, &mut record.audio_sentence)
            }
            AssetKind::Image => {
                let path = self.layout.image_file(word);
                let sentence = record.sentence.clone().unwrap_or_else(|| word.to_string());
                let result = image::generate_with_fallback(
                    self.backends.image,
                    &mut self.throttle,
                    &sentence,
                    word,
                    &path,
                );
                let url = self.layout.image_url(word);
                settle(kind, word, result, url, &mut record.image)
            }
        }
    }
}

/// Stores `url` on success. On failure the field is cleared: the file it
/// would point at is missing or unusable.
fn settle(
    kind: AssetKind,
    word: &str,
    result: crate::error::Result<()>,
    url: String,
    field: &mut Option<String>,
) -> Outcome {
    match result {
        Ok(()) => {
            *field = Some(url);
            Outcome::Generated
        }
        Err(err) => {
            tracing::warn!(word, asset = %kind, error = %err, "asset failed");
            *field = None;
            Outcome::Failed
        }
    }
}
