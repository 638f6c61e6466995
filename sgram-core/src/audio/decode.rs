use super::mixdown::downmix;
use crate::dsp::resample::resample;
use crate::error::AudioError;
use crate::params::DEFAULT_SAMPLE_RATE;
use crate::types::AudioData;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::errors::Error as SymError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

/// How a file is turned into a waveform.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadOptions {
    /// Resample to this rate after mixdown. `None` keeps the file's native rate.
    pub target_sample_rate: Option<u32>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            target_sample_rate: Some(DEFAULT_SAMPLE_RATE),
        }
    }
}

/// Interleaved samples as decoded, before mixdown.
struct Decoded {
    samples: Vec<f32>,
    sample_rate: u32,
    channels: u32,
}

/// Decode an audio file into a mono waveform.
///
/// WAV, FLAC and Ogg Vorbis use their dedicated decoders; everything else
/// (MP3, AAC/M4A, ALAC) goes through Symphonia. Channels are averaged, then
/// the result is resampled if `opts.target_sample_rate` asks for it.
pub fn load_audio(path: &Path, opts: &LoadOptions) -> Result<AudioData, AudioError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    let decoded = match ext.as_str() {
        "wav" | "wave" => decode_wav(path)?,
        "flac" => decode_flac(path)?,
        "ogg" | "oga" => decode_ogg(path)?,
        _ => decode_symphonia(path, &ext)?,
    };

    if decoded.channels == 0 || decoded.sample_rate == 0 {
        return Err(AudioError::Decode(format!(
            "bad stream parameters: {} channel(s) at {} Hz",
            decoded.channels, decoded.sample_rate
        )));
    }

    let mono = downmix(&decoded.samples, decoded.channels as usize);
    if mono.is_empty() {
        return Err(AudioError::Empty);
    }

    let (samples, sample_rate) = match opts.target_sample_rate {
        Some(target) if target != decoded.sample_rate => {
            (resample(&mono, decoded.sample_rate, target)?, target)
        }
        _ => (mono, decoded.sample_rate),
    };

    log::info!(
        "loaded {}: {} ch @ {} Hz -> {} mono samples @ {} Hz",
        path.display(),
        decoded.channels,
        decoded.sample_rate,
        samples.len(),
        sample_rate
    );

    Ok(AudioData::new(samples, sample_rate, decoded.channels))
}

fn int_scale(bits_per_sample: u32) -> f32 {
    1.0 / (1u64 << bits_per_sample.saturating_sub(1).min(62)) as f32
}

fn decode_wav(path: &Path) -> Result<Decoded, AudioError> {
    let mut reader = hound::WavReader::open(path)?;
    let spec = reader.spec();

    let samples: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader.samples::<f32>().collect::<Result<_, _>>()?,
        hound::SampleFormat::Int => {
            let scale = int_scale(spec.bits_per_sample as u32);
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 * scale))
                .collect::<Result<_, _>>()?
        }
    };

    Ok(Decoded {
        samples,
        sample_rate: spec.sample_rate,
        channels: spec.channels as u32,
    })
}

fn decode_flac(path: &Path) -> Result<Decoded, AudioError> {
    let mut reader = claxon::FlacReader::open(path)?;
    let info = reader.streaminfo();
    let scale = int_scale(info.bits_per_sample);

    let samples = reader
        .samples()
        .map(|s| s.map(|v| v as f32 * scale))
        .collect::<Result<Vec<f32>, _>>()?;

    Ok(Decoded {
        samples,
        sample_rate: info.sample_rate,
        channels: info.channels,
    })
}

fn decode_ogg(path: &Path) -> Result<Decoded, AudioError> {
    let file = File::open(path)?;
    let mut reader = lewton::inside_ogg::OggStreamReader::new(BufReader::new(file))?;
    let sample_rate = reader.ident_hdr.audio_sample_rate;
    let channels = reader.ident_hdr.audio_channels as u32;

    let mut samples = Vec::new();
    while let Some(packet) = reader.read_dec_packet_itl()? {
        samples.extend(packet.into_iter().map(|s| s as f32 / 32768.0));
    }

    Ok(Decoded {
        samples,
        sample_rate,
        channels,
    })
}

fn decode_symphonia(path: &Path, ext: &str) -> Result<Decoded, AudioError> {
    let file = File::open(path)?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if !ext.is_empty() {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe().format(
        &hint,
        mss,
        &FormatOptions::default(),
        &MetadataOptions::default(),
    )?;
    let mut format = probed.format;

    let track = format
        .default_track()
        .ok_or_else(|| AudioError::Unsupported(format!("no audio track in {}", path.display())))?
        .clone();

    let mut sample_rate = track.codec_params.sample_rate.unwrap_or(0);
    // Some codecs (AAC in MP4) only report the layout once a packet is decoded
    let mut channels = track
        .codec_params
        .channels
        .map(|c| c.count() as u32)
        .unwrap_or(0);

    let mut decoder =
        symphonia::default::get_codecs().make(&track.codec_params, &DecoderOptions::default())?;

    let mut samples = Vec::new();
    loop {
        let packet = match format.next_packet() {
            Ok(p) => p,
            Err(SymError::IoError(ref e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                break;
            }
            Err(e) => return Err(e.into()),
        };

        if packet.track_id() != track.id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(d) => d,
            Err(SymError::DecodeError(msg)) => {
                log::warn!("skipping corrupt packet in {}: {msg}", path.display());
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        let spec = *decoded.spec();
        channels = spec.channels.count() as u32;
        sample_rate = spec.rate;

        let mut buf = SampleBuffer::<f32>::new(decoded.capacity() as u64, spec);
        buf.copy_interleaved_ref(decoded);
        samples.extend_from_slice(buf.samples());
    }

    Ok(Decoded {
        samples,
        sample_rate,
        channels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_scale() {
        assert_eq!(int_scale(16), 1.0 / 32768.0);
        assert_eq!(int_scale(8), 1.0 / 128.0);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_audio(Path::new("/nonexistent/clip.wav"), &LoadOptions::default())
            .unwrap_err();
        assert!(matches!(err, AudioError::Io(_)), "{err}");
    }

    #[test]
    fn test_default_target_rate() {
        assert_eq!(LoadOptions::default().target_sample_rate, Some(22050));
    }
}
