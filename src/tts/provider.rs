use crate::error::Result;

/// How fast the narrator should read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeechPace {
    /// Isolated words, read slowly for spelling practice.
    Slow,
    Normal,
}

/// Mono signed 16-bit samples at `sample_rate` Hz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PcmAudio {
    pub samples: Vec<i16>,
    pub sample_rate: u32,
}

pub trait SpeechBackend {
    fn name(&self) -> &str;
    fn synthesize(&self, text: &str, pace: SpeechPace) -> Result<PcmAudio>;
}
