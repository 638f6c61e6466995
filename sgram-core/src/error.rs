use thiserror::Error;

/// Errors raised by the spectrogram transform.
#[derive(Error, Debug)]
pub enum SpectrogramError {
    /// Bad parameters or an unusable waveform. Raised before any computation.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// FFT buffer mismatch inside the transform.
    #[error("FFT failed: {0}")]
    Fft(#[from] realfft::FftError),
}

impl SpectrogramError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        SpectrogramError::InvalidInput(msg.into())
    }
}

/// Errors raised while loading an audio file into a waveform.
#[derive(Error, Debug)]
pub enum AudioError {
    #[error("failed to read audio file: {0}")]
    Io(#[from] std::io::Error),

    #[error("unsupported audio format: {0}")]
    Unsupported(String),

    #[error("failed to decode audio: {0}")]
    Decode(String),

    /// The file decoded cleanly but produced no samples.
    #[error("no audio samples decoded")]
    Empty,

    #[error("resampling failed: {0}")]
    Resample(String),
}

impl From<hound::Error> for AudioError {
    fn from(e: hound::Error) -> Self {
        match e {
            hound::Error::IoError(io) => AudioError::Io(io),
            other => AudioError::Decode(other.to_string()),
        }
    }
}

impl From<claxon::Error> for AudioError {
    fn from(e: claxon::Error) -> Self {
        match e {
            claxon::Error::IoError(io) => AudioError::Io(io),
            other => AudioError::Decode(other.to_string()),
        }
    }
}

impl From<lewton::VorbisError> for AudioError {
    fn from(e: lewton::VorbisError) -> Self {
        AudioError::Decode(e.to_string())
    }
}

impl From<symphonia::core::errors::Error> for AudioError {
    fn from(e: symphonia::core::errors::Error) -> Self {
        use symphonia::core::errors::Error as SymError;
        match e {
            SymError::IoError(io) => AudioError::Io(io),
            SymError::Unsupported(what) => AudioError::Unsupported(what.to_string()),
            other => AudioError::Decode(other.to_string()),
        }
    }
}

pub type Result<T, E = SpectrogramError> = std::result::Result<T, E>;
