//! File list plus the spectrogram view of the selected file.
//!
//! The viewer owns all display state. Opening or selecting a file calls the
//! [`Analyzer`] and swaps in a freshly rendered [`View`]; a spectrogram is
//! never modified once produced.

use crate::error::{Result, ViewError};
use crate::render::{render_image, Image, RenderOptions};
use crate::settings::Settings;
use crate::time_markers::{time_ticks, TimeTick};
use sgram_core::{compute_spectrogram_for, load_audio, LoadOptions, SpectrogramData, StftParams};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Turns a file into a spectrogram.
pub trait Analyzer {
    fn analyze(&self, path: &Path) -> Result<SpectrogramData>;
}

/// Decode the file from disk, then run the STFT.
#[derive(Clone, Debug, Default)]
pub struct FileAnalyzer {
    pub load: LoadOptions,
    pub stft: StftParams,
}

impl FileAnalyzer {
    pub fn new(load: LoadOptions, stft: StftParams) -> Self {
        Self { load, stft }
    }
}

impl Analyzer for FileAnalyzer {
    fn analyze(&self, path: &Path) -> Result<SpectrogramData> {
        let audio = load_audio(path, &self.load)?;
        Ok(compute_spectrogram_for(&audio, &self.stft)?)
    }
}

/// What the display shows for one file.
#[derive(Clone, Debug)]
pub struct View {
    pub path: PathBuf,
    pub spectrogram: Arc<SpectrogramData>,
    pub image: Image,
    pub ticks: Vec<TimeTick>,
    pub label_font_size: f32,
    pub show_freq_axis: bool,
}

pub struct Viewer<A: Analyzer> {
    analyzer: A,
    render: RenderOptions,
    files: Vec<PathBuf>,
    selected: Option<usize>,
    current: Option<View>,
}

impl Viewer<FileAnalyzer> {
    pub fn from_settings(settings: Settings) -> Self {
        Viewer::new(
            FileAnalyzer::new(settings.load, settings.stft),
            settings.render,
        )
    }
}

impl<A: Analyzer> Viewer<A> {
    pub fn new(analyzer: A, render: RenderOptions) -> Self {
        Self {
            analyzer,
            render,
            files: Vec::new(),
            selected: None,
            current: None,
        }
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn current(&self) -> Option<&View> {
        self.current.as_ref()
    }

    /// Add a file to the list, select it and show its spectrogram.
    ///
    /// The file stays in the list even if analysis fails.
    pub fn open(&mut self, path: impl Into<PathBuf>) -> Result<&View> {
        let path = path.into();
        log::info!("opening {}", path.display());
        self.files.push(path);
        self.select(self.files.len() - 1)
    }

    /// Show the spectrogram of the file at `index`.
    ///
    /// On failure the previous view is left in place.
    pub fn select(&mut self, index: usize) -> Result<&View> {
        let path = self
            .files
            .get(index)
            .ok_or(ViewError::NoSuchEntry {
                index,
                len: self.files.len(),
            })?
            .clone();
        self.selected = Some(index);

        let view = match self.draw(&path) {
            Ok(view) => view,
            Err(e) => {
                log::warn!("failed to analyse {}: {e}", path.display());
                return Err(e);
            }
        };
        Ok(self.current.insert(view))
    }

    /// Drop the file at `index` from the list. The view is cleared when it
    /// showed that entry; the selection shifts to stay on the same file.
    pub fn remove(&mut self, index: usize) -> Result<PathBuf> {
        if index >= self.files.len() {
            return Err(ViewError::NoSuchEntry {
                index,
                len: self.files.len(),
            });
        }
        let removed = self.files.remove(index);
        self.selected = match self.selected {
            Some(s) if s == index => {
                self.current = None;
                None
            }
            Some(s) if s > index => Some(s - 1),
            other => other,
        };
        Ok(removed)
    }

    pub fn clear(&mut self) {
        self.files.clear();
        self.selected = None;
        self.current = None;
    }

    fn draw(&self, path: &Path) -> Result<View> {
        let spectrogram = self.analyzer.analyze(path)?;
        let image = render_image(&spectrogram, &self.render);
        let ticks = time_ticks(
            spectrogram.duration_secs(),
            image.width as f64,
            self.render.tick_spacing,
        );
        log::debug!(
            "{}: {} frames x {} bins",
            path.display(),
            spectrogram.n_frames(),
            spectrogram.n_bins
        );
        Ok(View {
            path: path.to_path_buf(),
            spectrogram: Arc::new(spectrogram),
            image,
            ticks,
            label_font_size: self.render.label_font_size,
            show_freq_axis: self.render.show_freq_axis,
        })
    }
}
