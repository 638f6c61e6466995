use crate::dsp::window::WindowFunction;
use serde::{Deserialize, Serialize};

pub const DEFAULT_SAMPLE_RATE: u32 = 22050;
pub const DEFAULT_FFT_SIZE: usize = 2048;
pub const DEFAULT_HOP_MS: f64 = 5.0;
pub const DEFAULT_WINDOW_MS: f64 = 25.0;

/// How the signal is extended at both ends when frames are centred.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PadMode {
    /// Zeros.
    #[default]
    Constant,
    /// Mirror about the edge sample (edge not repeated).
    Reflect,
}

/// STFT parameters. Timing is given in milliseconds and converted to sample
/// counts against the waveform's sample rate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StftParams {
    pub fft_size: usize,
    pub hop_ms: f64,
    pub window_ms: f64,
    pub window: WindowFunction,
    /// Pad by `fft_size / 2` on both sides so frame `t` is centred on sample `t * hop`.
    pub center: bool,
    pub pad_mode: PadMode,
}

impl Default for StftParams {
    fn default() -> Self {
        Self {
            fft_size: DEFAULT_FFT_SIZE,
            hop_ms: DEFAULT_HOP_MS,
            window_ms: DEFAULT_WINDOW_MS,
            window: WindowFunction::Hann,
            center: true,
            pad_mode: PadMode::Constant,
        }
    }
}

impl StftParams {
    /// Hop length in samples: `round(sample_rate * hop_ms / 1000)`.
    pub fn hop_size(&self, sample_rate: u32) -> usize {
        ms_to_samples(self.hop_ms, sample_rate)
    }

    /// Analysis window length in samples: `round(sample_rate * window_ms / 1000)`.
    pub fn win_length(&self, sample_rate: u32) -> usize {
        ms_to_samples(self.window_ms, sample_rate)
    }

    pub fn n_bins(&self) -> usize {
        self.fft_size / 2 + 1
    }
}

fn ms_to_samples(ms: f64, sample_rate: u32) -> usize {
    if !ms.is_finite() || ms <= 0.0 {
        return 0;
    }
    (sample_rate as f64 * ms / 1000.0).round() as usize
}
