use sgram_core::{AudioError, SpectrogramError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ViewError {
    #[error(transparent)]
    Audio(#[from] AudioError),

    #[error(transparent)]
    Spectrogram(#[from] SpectrogramError),

    /// Selection index outside the file list.
    #[error("no file at index {index} (list has {len})")]
    NoSuchEntry { index: usize, len: usize },

    #[error("invalid settings file: {0}")]
    Settings(#[from] serde_json::Error),

    #[error("PNG encoding failed: {0}")]
    Png(#[from] png::EncodingError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ViewError>;
