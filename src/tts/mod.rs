pub mod gemini;
pub mod provider;

use crate::audio::wav;
use crate::error::{AssetError, Result};
use std::path::Path;

pub use provider::{PcmAudio, SpeechBackend, SpeechPace};

/// Synthesizes `text` and stores it as a mono 16-bit WAV at `path`.
pub fn synthesize_to_file(
    backend: &dyn SpeechBackend,
    text: &str,
    pace: SpeechPace,
    path: &Path,
) -> Result<()> {
    let audio = backend.synthesize(text, pace)?;
    if audio.samples.is_empty() {
        return Err(AssetError::Generation(format!(
            "{} returned empty audio",
            backend.name()
        )));
    }

    wav::write_file(path, &audio)?;
    tracing::debug!(
        path = %path.display(),
        samples = audio.samples.len(),
        backend = backend.name(),
        "audio written"
    );
    Ok(())
}
