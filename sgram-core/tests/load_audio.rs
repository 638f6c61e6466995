//! Loading WAV fixtures written with hound into the system temp directory.

use std::path::PathBuf;

use hound::{SampleFormat, WavSpec, WavWriter};
use sgram_core::{load_audio, AudioError, LoadOptions};

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("sgram-core-{}-{}", std::process::id(), name))
}

fn write_stereo_i16(path: &PathBuf, sample_rate: u32, frames: &[(i16, i16)]) {
    let spec = WavSpec {
        channels: 2,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut writer = WavWriter::create(path, spec).unwrap();
    for &(l, r) in frames {
        writer.write_sample(l).unwrap();
        writer.write_sample(r).unwrap();
    }
    writer.finalize().unwrap();
}

#[test]
fn stereo_int_wav_is_mixed_to_mono() {
    let path = temp_path("stereo.wav");
    write_stereo_i16(&path, 22050, &[(16384, 0), (-16384, -16384), (0, 8192)]);

    let audio = load_audio(&path, &LoadOptions::default()).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(audio.sample_rate, 22050);
    assert_eq!(audio.channels, 2);
    assert_eq!(audio.samples, vec![0.25, -0.5, 0.125]);
}

#[test]
fn float_wav_is_resampled_to_target() {
    let path = temp_path("mono44k.wav");
    let spec = WavSpec {
        channels: 1,
        sample_rate: 44100,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };
    let mut writer = WavWriter::create(&path, spec).unwrap();
    for i in 0..44100 {
        let t = i as f32 / 44100.0;
        writer
            .write_sample((2.0 * std::f32::consts::PI * 440.0 * t).sin() * 0.5)
            .unwrap();
    }
    writer.finalize().unwrap();

    let resampled = load_audio(&path, &LoadOptions::default()).unwrap();
    let native = load_audio(
        &path,
        &LoadOptions {
            target_sample_rate: None,
        },
    )
    .unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(resampled.sample_rate, 22050);
    assert_eq!(resampled.samples.len(), 22050);
    assert!((resampled.duration_secs - 1.0).abs() < 1e-9);
    assert_eq!(native.sample_rate, 44100);
    assert_eq!(native.samples.len(), 44100);
}

#[test]
fn empty_wav_is_rejected() {
    let path = temp_path("empty.wav");
    write_stereo_i16(&path, 22050, &[]);

    let err = load_audio(&path, &LoadOptions::default()).unwrap_err();
    std::fs::remove_file(&path).ok();

    assert!(matches!(err, AudioError::Empty), "{err}");
}

#[test]
fn garbage_file_is_a_decode_error() {
    let path = temp_path("garbage.wav");
    std::fs::write(&path, b"definitely not a riff header").unwrap();

    let err = load_audio(&path, &LoadOptions::default()).unwrap_err();
    std::fs::remove_file(&path).ok();

    assert!(matches!(err, AudioError::Decode(_)), "{err}");
}
