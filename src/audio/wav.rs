use crate::error::Result;
use crate::persist::write_atomic;
use crate::tts::PcmAudio;
use std::io::Cursor;
use std::path::Path;

pub fn to_wav_bytes(audio: &PcmAudio) -> Result<Vec<u8>> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: audio.sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::new());
    let mut writer = hound::WavWriter::new(&mut cursor, spec)?;
    for sample in &audio.samples {
        writer.write_sample(*sample)?;
    }
    writer.finalize()?;
    Ok(cursor.into_inner())
}

/// Encodes in memory first so an interrupted run never leaves a truncated
/// WAV behind.
pub fn write_file(path: &Path, audio: &PcmAudio) -> Result<()> {
    let bytes = to_wav_bytes(audio)?;
    write_atomic(path, &bytes)
}
