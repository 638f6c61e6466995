/// A decoded mono waveform.
#[derive(Clone, Debug)]
pub struct AudioData {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
    /// Channel count of the source before mixdown.
    pub channels: u32,
    pub duration_secs: f64,
}

impl AudioData {
    pub fn new(samples: Vec<f32>, sample_rate: u32, channels: u32) -> Self {
        let duration_secs = if sample_rate > 0 {
            samples.len() as f64 / sample_rate as f64
        } else {
            0.0
        };
        Self {
            samples,
            sample_rate,
            channels,
            duration_secs,
        }
    }
}

/// One analysed frame: `log10` magnitudes for bins `0..=fft_size/2`.
#[derive(Clone, Debug, PartialEq)]
pub struct SpectrogramColumn {
    pub magnitudes: Vec<f32>,
    /// Time of the frame centre (or frame start when not centred), in seconds.
    pub time_offset: f64,
}

/// Log-magnitude STFT, indexed `[frame][bin]`.
#[derive(Clone, Debug, PartialEq)]
pub struct SpectrogramData {
    pub columns: Vec<SpectrogramColumn>,
    pub n_bins: usize,
    pub fft_size: usize,
    pub hop_size: usize,
    pub win_length: usize,
    pub freq_resolution: f64,
    pub time_resolution: f64,
    pub max_freq: f64,
    pub sample_rate: u32,
}

impl SpectrogramData {
    pub fn n_frames(&self) -> usize {
        self.columns.len()
    }

    /// `(frames, bins)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.columns.len(), self.n_bins)
    }

    pub fn frame(&self, index: usize) -> Option<&[f32]> {
        self.columns.get(index).map(|c| c.magnitudes.as_slice())
    }

    /// Centre frequency of `bin` in Hz.
    pub fn bin_frequency(&self, bin: usize) -> f64 {
        bin as f64 * self.freq_resolution
    }

    /// Time span covered by the frames, in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.columns.len() as f64 * self.time_resolution
    }

    /// Smallest and largest value over the whole grid, `None` when empty.
    pub fn min_max(&self) -> Option<(f32, f32)> {
        let mut values = self.columns.iter().flat_map(|c| c.magnitudes.iter().copied());
        let first = values.next()?;
        Some(values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }

    /// Copy out as a plain `[frame][bin]` grid.
    pub fn to_rows(&self) -> Vec<Vec<f32>> {
        self.columns.iter().map(|c| c.magnitudes.clone()).collect()
    }
}
