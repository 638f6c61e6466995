use crate::error::AudioError;
use rubato::{
    Resampler, SincFixedIn, SincInterpolationParameters, SincInterpolationType, WindowFunction,
};

const CHUNK_SIZE: usize = 1024;

/// Resample a mono signal from `from_rate` to `to_rate`.
///
/// Returns the input unchanged if rates already match. Output is trimmed to
/// `ceil(len * to_rate / from_rate)` samples.
pub fn resample(samples: &[f32], from_rate: u32, to_rate: u32) -> Result<Vec<f32>, AudioError> {
    if from_rate == 0 || to_rate == 0 {
        return Err(AudioError::Resample(format!(
            "cannot resample from {from_rate} Hz to {to_rate} Hz"
        )));
    }
    if from_rate == to_rate || samples.is_empty() {
        return Ok(samples.to_vec());
    }

    let ratio = to_rate as f64 / from_rate as f64;
    let params = SincInterpolationParameters {
        sinc_len: 256,
        f_cutoff: 0.95,
        interpolation: SincInterpolationType::Linear,
        oversampling_factor: 256,
        window: WindowFunction::BlackmanHarris2,
    };

    let mut resampler = SincFixedIn::<f32>::new(ratio, 2.0, params, CHUNK_SIZE, 1)
        .map_err(|e| AudioError::Resample(format!("failed to create resampler: {e}")))?;

    let target_len = (samples.len() as f64 * ratio).ceil() as usize;
    let mut output = Vec::with_capacity(target_len + CHUNK_SIZE);

    let mut chunks = samples.chunks_exact(CHUNK_SIZE);
    for chunk in chunks.by_ref() {
        let result = resampler
            .process(&[chunk], None)
            .map_err(|e| AudioError::Resample(e.to_string()))?;
        output.extend_from_slice(&result[0]);
    }

    let remainder = chunks.remainder();
    if !remainder.is_empty() {
        let result = resampler
            .process_partial(Some(&[remainder]), None)
            .map_err(|e| AudioError::Resample(e.to_string()))?;
        output.extend_from_slice(&result[0]);
    }

    // Flush the filter tail until the expected length is reached
    while output.len() < target_len {
        let result = resampler
            .process_partial(None::<&[&[f32]]>, None)
            .map_err(|e| AudioError::Resample(e.to_string()))?;
        if result[0].is_empty() {
            break;
        }
        output.extend_from_slice(&result[0]);
    }

    output.truncate(target_len);
    log::debug!(
        "resampled {} samples @ {} Hz -> {} samples @ {} Hz",
        samples.len(),
        from_rate,
        output.len(),
        to_rate
    );
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_rate_passthrough() {
        let input = vec![0.1, 0.2, 0.3];
        assert_eq!(resample(&input, 22050, 22050).unwrap(), input);
    }

    #[test]
    fn test_downsample_length() {
        let input: Vec<f32> = (0..44100).map(|i| (i as f32 * 0.01).sin()).collect();
        let out = resample(&input, 44100, 22050).unwrap();
        assert_eq!(out.len(), 22050);
        assert!(out.iter().all(|s| s.is_finite()));
    }

    #[test]
    fn test_upsample_length() {
        let input = vec![0.0f32; 3000];
        let out = resample(&input, 16000, 22050).unwrap();
        assert_eq!(out.len(), (3000.0f64 * 22050.0 / 16000.0).ceil() as usize);
    }

    #[test]
    fn test_zero_rate_rejected() {
        assert!(matches!(
            resample(&[0.0], 0, 22050),
            Err(AudioError::Resample(_))
        ));
    }
}
