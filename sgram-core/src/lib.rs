//! STFT spectrogram transform and audio decoding.
//!
//! The transform is a pure function of its inputs: [`compute_spectrogram`]
//! takes a mono waveform and returns a `[frame][bin]` grid of `log10`
//! magnitudes, floored at [`MAGNITUDE_FLOOR`] so every value is finite.

pub mod audio;
pub mod dsp;
pub mod error;
pub mod params;
pub mod types;

pub use audio::{load_audio, LoadOptions};
pub use dsp::stft::{
    compute_spectrogram, compute_spectrogram_for, compute_spectrogram_with, frame_count,
    MAGNITUDE_FLOOR,
};
pub use dsp::window::WindowFunction;
pub use error::{AudioError, SpectrogramError};
pub use params::{PadMode, StftParams, DEFAULT_SAMPLE_RATE};
pub use types::{AudioData, SpectrogramColumn, SpectrogramData};

/// A computed spectrogram.
pub type Spectrogram = SpectrogramData;
