use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Analysis window shapes. All are generated in periodic form (DFT-even),
/// i.e. the symmetric window of length `n + 1` with the last point dropped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowFunction {
    #[default]
    Hann,
    Hamming,
    Blackman,
    Rectangular,
}

impl WindowFunction {
    /// Coefficients of length `size`.
    pub fn coefficients(self, size: usize) -> Vec<f32> {
        if size == 0 {
            return Vec::new();
        }
        let n = size as f64;
        (0..size)
            .map(|i| {
                let x = 2.0 * PI * i as f64 / n;
                let w = match self {
                    WindowFunction::Hann => 0.5 - 0.5 * x.cos(),
                    WindowFunction::Hamming => 0.54 - 0.46 * x.cos(),
                    WindowFunction::Blackman => 0.42 - 0.5 * x.cos() + 0.08 * (2.0 * x).cos(),
                    WindowFunction::Rectangular => 1.0,
                };
                w as f32
            })
            .collect()
    }

    /// Window of length `win_length`, zero-padded equally on both sides to
    /// `fft_size`. Left pad is `(fft_size - win_length) / 2`.
    ///
    /// `win_length` must not exceed `fft_size`.
    pub fn padded(self, win_length: usize, fft_size: usize) -> Vec<f32> {
        debug_assert!(win_length <= fft_size);
        let mut out = vec![0.0f32; fft_size];
        let left = (fft_size - win_length) / 2;
        out[left..left + win_length].copy_from_slice(&self.coefficients(win_length));
        out
    }
}

impl std::str::FromStr for WindowFunction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hann" | "hanning" => Ok(WindowFunction::Hann),
            "hamming" => Ok(WindowFunction::Hamming),
            "blackman" => Ok(WindowFunction::Blackman),
            "rect" | "rectangular" | "boxcar" => Ok(WindowFunction::Rectangular),
            other => Err(format!("unknown window function: {other}")),
        }
    }
}
