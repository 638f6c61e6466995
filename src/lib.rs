//! Spectrogram viewer.
//!
//! Holds a list of audio files, computes the STFT spectrogram of whichever
//! one is selected and renders it as a false-colour image with low
//! frequencies at the bottom.

pub mod colormap;
pub mod error;
pub mod export;
pub mod render;
pub mod settings;
pub mod time_markers;
pub mod viewer;

pub use colormap::Colormap;
pub use error::ViewError;
pub use export::{encode_png, write_png};
pub use render::{render_image, Image, RenderOptions};
pub use settings::Settings;
pub use viewer::{Analyzer, FileAnalyzer, View, Viewer};

pub use sgram_core;
