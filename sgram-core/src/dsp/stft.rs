use crate::error::{Result, SpectrogramError};
use crate::params::{PadMode, StftParams};
use crate::types::{AudioData, SpectrogramColumn, SpectrogramData};
use realfft::RealFftPlanner;
use std::cell::RefCell;

/// Magnitudes are floored here before `log10`, so the output never holds `-inf`.
pub const MAGNITUDE_FLOOR: f32 = 1e-5;

thread_local! {
    static FFT_PLANNER: RefCell<RealFftPlanner<f32>> = RefCell::new(RealFftPlanner::new());
}

/// Compute a log-magnitude STFT spectrogram with a centred, zero-padded
/// periodic Hann window.
///
/// Result is indexed `[frame][bin]` with `fft_size / 2 + 1` bins per frame.
/// Each cell is `log10(max(1e-5, |X|))`.
pub fn compute_spectrogram(
    waveform: &[f32],
    sample_rate: u32,
    fft_size: usize,
    hop_ms: f64,
    window_ms: f64,
) -> Result<SpectrogramData> {
    let params = StftParams {
        fft_size,
        hop_ms,
        window_ms,
        ..StftParams::default()
    };
    compute_spectrogram_with(waveform, sample_rate, &params)
}

/// Same as [`compute_spectrogram`] for a decoded [`AudioData`].
pub fn compute_spectrogram_for(audio: &AudioData, params: &StftParams) -> Result<SpectrogramData> {
    compute_spectrogram_with(&audio.samples, audio.sample_rate, params)
}

/// Compute a log-magnitude STFT spectrogram with explicit parameters.
///
/// All inputs are validated before any work is done; invalid input yields
/// [`SpectrogramError::InvalidInput`] and no partial result.
pub fn compute_spectrogram_with(
    waveform: &[f32],
    sample_rate: u32,
    params: &StftParams,
) -> Result<SpectrogramData> {
    let (hop_size, win_length) = validate(waveform, sample_rate, params)?;
    let fft_size = params.fft_size;
    let n_bins = params.n_bins();

    let signal = if params.center {
        pad_signal(waveform, fft_size / 2, params.pad_mode)
    } else {
        waveform.to_vec()
    };
    let n_frames = 1 + (signal.len() - fft_size) / hop_size;

    let fft = FFT_PLANNER.with(|p| p.borrow_mut().plan_fft_forward(fft_size));
    let window = params.window.padded(win_length, fft_size);

    // Reused across frames
    let mut input = fft.make_input_vec();
    let mut spectrum = fft.make_output_vec();

    let mut columns = Vec::with_capacity(n_frames);
    for frame_i in 0..n_frames {
        let pos = frame_i * hop_size;
        for (inp, (&s, &w)) in input
            .iter_mut()
            .zip(signal[pos..pos + fft_size].iter().zip(window.iter()))
        {
            *inp = s * w;
        }

        fft.process(&mut input, &mut spectrum)?;

        let magnitudes: Vec<f32> = spectrum
            .iter()
            .take(n_bins)
            .map(|c| c.norm().max(MAGNITUDE_FLOOR).log10())
            .collect();

        columns.push(SpectrogramColumn {
            magnitudes,
            time_offset: pos as f64 / sample_rate as f64,
        });
    }

    log::debug!(
        "stft: {} samples @ {} Hz -> {} frames x {} bins (fft={}, hop={}, win={})",
        waveform.len(),
        sample_rate,
        n_frames,
        n_bins,
        fft_size,
        hop_size,
        win_length
    );

    Ok(SpectrogramData {
        columns,
        n_bins,
        fft_size,
        hop_size,
        win_length,
        freq_resolution: sample_rate as f64 / fft_size as f64,
        time_resolution: hop_size as f64 / sample_rate as f64,
        max_freq: sample_rate as f64 / 2.0,
        sample_rate,
    })
}

/// Number of frames the transform will produce for `len` samples, or `None`
/// when the parameters would be rejected for that length.
pub fn frame_count(len: usize, sample_rate: u32, params: &StftParams) -> Option<usize> {
    let hop = params.hop_size(sample_rate);
    if hop == 0 || params.fft_size == 0 || len == 0 {
        return None;
    }
    let padded = if params.center {
        len + 2 * (params.fft_size / 2)
    } else {
        len
    };
    padded
        .checked_sub(params.fft_size)
        .map(|span| 1 + span / hop)
}

/// Returns `(hop_size, win_length)` in samples.
fn validate(waveform: &[f32], sample_rate: u32, params: &StftParams) -> Result<(usize, usize)> {
    if waveform.is_empty() {
        return Err(SpectrogramError::invalid("waveform is empty"));
    }
    if let Some(i) = waveform.iter().position(|s| !s.is_finite()) {
        return Err(SpectrogramError::invalid(format!(
            "waveform has a non-finite sample at index {i}"
        )));
    }
    if sample_rate == 0 {
        return Err(SpectrogramError::invalid("sample rate must be positive"));
    }
    if params.fft_size == 0 {
        return Err(SpectrogramError::invalid("fft_size must be positive"));
    }
    if !params.hop_ms.is_finite() || params.hop_ms <= 0.0 {
        return Err(SpectrogramError::invalid(format!(
            "hop_ms must be positive, got {}",
            params.hop_ms
        )));
    }
    if !params.window_ms.is_finite() || params.window_ms <= 0.0 {
        return Err(SpectrogramError::invalid(format!(
            "window_ms must be positive, got {}",
            params.window_ms
        )));
    }

    let hop_size = params.hop_size(sample_rate);
    if hop_size == 0 {
        return Err(SpectrogramError::invalid(format!(
            "hop of {} ms is shorter than one sample at {} Hz",
            params.hop_ms, sample_rate
        )));
    }
    let win_length = params.win_length(sample_rate);
    if win_length == 0 {
        return Err(SpectrogramError::invalid(format!(
            "window of {} ms is shorter than one sample at {} Hz",
            params.window_ms, sample_rate
        )));
    }
    if win_length > params.fft_size {
        return Err(SpectrogramError::invalid(format!(
            "window length {} exceeds fft_size {}",
            win_length, params.fft_size
        )));
    }
    if !params.center && waveform.len() < params.fft_size {
        return Err(SpectrogramError::invalid(format!(
            "waveform of {} samples is shorter than fft_size {}",
            waveform.len(),
            params.fft_size
        )));
    }

    Ok((hop_size, win_length))
}

/// Extend `samples` by `pad` on both sides.
fn pad_signal(samples: &[f32], pad: usize, mode: PadMode) -> Vec<f32> {
    let len = samples.len();
    let mut out = Vec::with_capacity(len + 2 * pad);
    match mode {
        PadMode::Constant => {
            out.resize(pad, 0.0);
            out.extend_from_slice(samples);
            out.resize(len + 2 * pad, 0.0);
        }
        PadMode::Reflect => {
            let pad = pad as isize;
            let n = len as isize;
            out.extend((-pad..0).map(|i| samples[reflect_index(i, len)]));
            out.extend_from_slice(samples);
            out.extend((n..n + pad).map(|i| samples[reflect_index(i, len)]));
        }
    }
    out
}

/// Map an out-of-range index onto `0..len` by mirroring about the end samples.
/// Pads longer than the signal keep bouncing.
fn reflect_index(i: isize, len: usize) -> usize {
    if len == 1 {
        return 0;
    }
    let period = 2 * (len as isize - 1);
    let m = i.rem_euclid(period);
    if m >= len as isize {
        (period - m) as usize
    } else {
        m as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::window::WindowFunction;

    fn sine(freq: f64, sample_rate: u32, len: usize) -> Vec<f32> {
        (0..len)
            .map(|i| {
                let t = i as f64 / sample_rate as f64;
                (2.0 * std::f64::consts::PI * freq * t).sin() as f32
            })
            .collect()
    }

    #[test]
    fn test_silence_hits_floor() {
        let result = compute_spectrogram(&vec![0.0; 22050], 22050, 2048, 5.0, 25.0).unwrap();
        assert_eq!(result.shape(), (201, 1025));
        let floor = MAGNITUDE_FLOOR.log10();
        assert!(result
            .columns
            .iter()
            .all(|c| c.magnitudes.iter().all(|&v| v == floor)));
    }

    #[test]
    fn test_sine_peak() {
        let sample_rate = 44100u32;
        let freq = 1000.0f64;
        let samples = sine(freq, sample_rate, 8192);

        let result = compute_spectrogram(&samples, sample_rate, 1024, 10.0, 20.0).unwrap();
        let expected_bin = (freq * 1024.0 / sample_rate as f64).round() as usize;

        for (i, col) in result.columns.iter().enumerate() {
            let peak_bin = col
                .magnitudes
                .iter()
                .enumerate()
                .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
                .unwrap()
                .0;
            assert!(
                peak_bin.abs_diff(expected_bin) <= 1,
                "frame {i}: peak bin {peak_bin}, expected ~{expected_bin}"
            );
        }
    }

    #[test]
    fn test_uncentred_frame_count() {
        let params = StftParams {
            fft_size: 512,
            hop_ms: 10.0,
            window_ms: 10.0,
            center: false,
            ..StftParams::default()
        };
        // hop = 100 samples at 10 kHz
        let result = compute_spectrogram_with(&sine(440.0, 10_000, 2000), 10_000, &params).unwrap();
        assert_eq!(result.n_frames(), 1 + (2000 - 512) / 100);
        assert_eq!(frame_count(2000, 10_000, &params), Some(result.n_frames()));
        assert_eq!(result.columns[1].time_offset, 0.01);
    }

    #[test]
    fn test_uncentred_too_short() {
        let params = StftParams {
            center: false,
            ..StftParams::default()
        };
        let err = compute_spectrogram_with(&[0.1; 100], 22050, &params).unwrap_err();
        assert!(matches!(err, SpectrogramError::InvalidInput(_)));
        assert_eq!(frame_count(100, 22050, &params), None);
    }

    #[test]
    fn test_rejects_bad_input() {
        let ok = vec![0.0f32; 1000];
        let cases: Vec<(Vec<f32>, u32, usize, f64, f64)> = vec![
            (vec![], 22050, 2048, 5.0, 25.0),
            (ok.clone(), 0, 2048, 5.0, 25.0),
            (ok.clone(), 22050, 0, 5.0, 25.0),
            (ok.clone(), 22050, 2048, 0.0, 25.0),
            (ok.clone(), 22050, 2048, 5.0, -1.0),
            (ok.clone(), 22050, 2048, f64::NAN, 25.0),
            // 100 ms = 2205 samples > 2048
            (ok.clone(), 22050, 2048, 5.0, 100.0),
            // hop rounds to zero samples
            (ok.clone(), 22050, 2048, 0.01, 25.0),
            (vec![0.0, f32::NAN, 0.0], 22050, 2048, 5.0, 25.0),
        ];
        for (wave, sr, fft, hop, win) in cases {
            let err = compute_spectrogram(&wave, sr, fft, hop, win).unwrap_err();
            assert!(
                matches!(err, SpectrogramError::InvalidInput(_)),
                "sr={sr} fft={fft} hop={hop} win={win}: {err}"
            );
        }
    }

    #[test]
    fn test_single_sample() {
        let result = compute_spectrogram(&[0.5], 22050, 2048, 5.0, 25.0).unwrap();
        assert_eq!(result.shape(), (1, 1025));
    }

    #[test]
    fn test_odd_fft_size() {
        let result = compute_spectrogram(&sine(300.0, 8000, 800), 8000, 255, 4.0, 20.0).unwrap();
        assert_eq!(result.n_bins, 128);
        assert!(result.columns.iter().all(|c| c.magnitudes.len() == 128));
    }

    #[test]
    fn test_reflect_padding() {
        assert_eq!(
            pad_signal(&[1.0, 2.0, 3.0], 2, PadMode::Reflect),
            vec![3.0, 2.0, 1.0, 2.0, 3.0, 2.0, 1.0]
        );
        assert_eq!(
            pad_signal(&[1.0, 2.0, 3.0], 5, PadMode::Reflect),
            vec![2.0, 1.0, 2.0, 3.0, 2.0, 1.0, 2.0, 3.0, 2.0, 1.0, 2.0, 3.0, 2.0]
        );
        assert_eq!(pad_signal(&[7.0], 2, PadMode::Reflect), vec![7.0; 5]);
        assert_eq!(
            pad_signal(&[1.0, 2.0], 1, PadMode::Constant),
            vec![0.0, 1.0, 2.0, 0.0]
        );
    }

    #[test]
    fn test_rectangular_dc() {
        // Constant signal through a rectangular window: bin 0 = sum of window.
        let params = StftParams {
            fft_size: 64,
            hop_ms: 1.0,
            window_ms: 4.0,
            window: WindowFunction::Rectangular,
            center: false,
            pad_mode: PadMode::Constant,
        };
        // 16 kHz: hop 16, win 64
        let result = compute_spectrogram_with(&vec![1.0; 256], 16_000, &params).unwrap();
        let dc = result.columns[0].magnitudes[0];
        assert!((dc - 64f32.log10()).abs() < 1e-4, "dc = {dc}");
    }
}
