use crate::config::TtsConfig;
use crate::error::{AssetError, Result};
use crate::google::{decode_base64, first_part, GoogleClient};
use serde_json::json;

use super::provider::{PcmAudio, SpeechBackend, SpeechPace};

/// Gemini speech models answer with raw little-endian PCM at 24 kHz.
pub const GEMINI_SAMPLE_RATE: u32 = 24_000;

pub struct GeminiTtsBackend {
    client: GoogleClient,
    config: TtsConfig,
}

impl GeminiTtsBackend {
    pub fn new(client: GoogleClient, config: TtsConfig) -> Self {
        Self { client, config }
    }

    fn style_prompt(&self, text: &str, pace: SpeechPace) -> String {
        let language = &self.config.language;
        match pace {
            SpeechPace::Slow => format!(
                "Say slowly and clearly in {language}, for a child learning to spell: {text}"
            ),
            SpeechPace::Normal => {
                format!("Say warmly in {language}, at a gentle pace for a child: {text}")
            }
        }
    }
}

impl SpeechBackend for GeminiTtsBackend {
    fn name(&self) -> &str {
        "gemini-tts"
    }

    fn synthesize(&self, text: &str, pace: SpeechPace) -> Result<PcmAudio> {
        let body = json!({
            "contents": [{"parts": [{"text": self.style_prompt(text, pace)}]}],
            "generationConfig": {
                "responseModalities": ["AUDIO"],
                "speechConfig": {
                    "voiceConfig": {
                        "prebuiltVoiceConfig": {"voiceName": self.config.voice}
                    }
                }
            }
        });

        let response =
            self.client
                .call(&self.config.base_url, &self.config.model, "generateContent", &body)?;

        let data = first_part(&response)
            .and_then(|part| part.pointer("/inlineData/data"))
            .and_then(|data| data.as_str())
            .ok_or_else(|| {
                AssetError::Generation(format!("{} returned no audio", self.config.model))
            })?;

        let bytes = decode_base64(data)?;
        Ok(PcmAudio {
            samples: pcm_from_le_bytes(&bytes),
            sample_rate: GEMINI_SAMPLE_RATE,
        })
    }
}

fn pcm_from_le_bytes(bytes: &[u8]) -> Vec<i16> {
    bytes
        .chunks_exact(2)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_little_endian_and_drops_odd_byte() {
        let samples = pcm_from_le_bytes(&[0x01, 0x00, 0xff, 0x7f, 0x00, 0x80, 0x42]);
        assert_eq!(samples, vec![1, i16::MAX, i16::MIN]);
    }
}
