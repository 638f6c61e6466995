use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Parser;
use sgram_view::sgram_core::WindowFunction;
use sgram_view::{write_png, Colormap, Settings, Viewer};

#[derive(Parser, Debug)]
#[command(name = "sgram", about = "Render STFT spectrograms of audio files to PNG")]
struct Cli {
    /// Audio files (WAV, FLAC, Ogg Vorbis, MP3, AAC/M4A, ALAC)
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// JSON settings file; command-line flags override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output directory for PNG images
    #[arg(short, long, default_value = ".")]
    out: PathBuf,

    /// FFT size (frequency resolution)
    #[arg(long)]
    fft_size: Option<usize>,

    /// Frame advance in milliseconds
    #[arg(long)]
    hop_ms: Option<f64>,

    /// Analysis window length in milliseconds
    #[arg(long)]
    window_ms: Option<f64>,

    /// Window function: hann, hamming, blackman, rectangular
    #[arg(long)]
    window: Option<WindowFunction>,

    /// Do not centre frames on the hop grid
    #[arg(long)]
    no_center: bool,

    /// Resample audio to this rate before analysis
    #[arg(long, conflicts_with = "native_rate")]
    sample_rate: Option<u32>,

    /// Analyse at the file's own sample rate
    #[arg(long)]
    native_rate: bool,

    /// Colour map: viridis, greyscale
    #[arg(long)]
    colormap: Option<Colormap>,

    /// Draw a strip of time ticks under the image
    #[arg(long)]
    axis: bool,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn settings(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => Settings::load(path)
                .with_context(|| format!("Failed to load settings: {}", path.display()))?,
            None => Settings::default(),
        };

        let stft = &mut settings.stft;
        if let Some(n) = self.fft_size {
            stft.fft_size = n;
        }
        if let Some(ms) = self.hop_ms {
            stft.hop_ms = ms;
        }
        if let Some(ms) = self.window_ms {
            stft.window_ms = ms;
        }
        if let Some(w) = self.window {
            stft.window = w;
        }
        if self.no_center {
            stft.center = false;
        }

        if self.native_rate {
            settings.load.target_sample_rate = None;
        } else if let Some(sr) = self.sample_rate {
            settings.load.target_sample_rate = Some(sr);
        }

        if let Some(c) = self.colormap {
            settings.render.colormap = c;
        }
        if self.axis {
            settings.render.axis = true;
        }

        Ok(settings)
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

/// Hands out PNG paths inside the output directory. Inputs sharing a file
/// stem get `-1`, `-2`, ... suffixes so no result is overwritten within a run.
struct OutputNames {
    dir: PathBuf,
    used: HashSet<PathBuf>,
}

impl OutputNames {
    fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
            used: HashSet::new(),
        }
    }

    fn next(&mut self, input: &Path) -> PathBuf {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "spectrogram".to_string());

        let mut candidate = self.dir.join(format!("{stem}.png"));
        let mut n = 1;
        while self.used.contains(&candidate) {
            candidate = self.dir.join(format!("{stem}-{n}.png"));
            n += 1;
        }
        if n > 1 {
            log::warn!(
                "{} shares its name with an earlier input, writing {}",
                input.display(),
                candidate.display()
            );
        }
        self.used.insert(candidate.clone());
        candidate
    }
}

/// Render every input to a PNG. Returns the written paths; fails if any
/// input could not be rendered.
fn run(cli: &Cli) -> Result<Vec<PathBuf>> {
    let settings = cli.settings()?;
    log::debug!("settings: {settings:?}");

    std::fs::create_dir_all(&cli.out)
        .with_context(|| format!("Failed to create output directory: {}", cli.out.display()))?;

    let mut viewer = Viewer::from_settings(settings);
    let mut names = OutputNames::new(&cli.out);
    let mut written = Vec::new();
    let mut failed = 0usize;

    for input in &cli.files {
        let start = Instant::now();
        let view = match viewer.open(input.clone()) {
            Ok(view) => view,
            Err(e) => {
                log::error!("{}: {e}", input.display());
                failed += 1;
                continue;
            }
        };

        let dest = names.next(input);
        if let Err(e) = write_png(&view.image, &dest) {
            log::error!("{}: {e}", dest.display());
            failed += 1;
            continue;
        }

        let (frames, bins) = view.spectrogram.shape();
        log::info!(
            "{} -> {} ({} frames x {} bins, {:.0} ms)",
            input.display(),
            dest.display(),
            frames,
            bins,
            start.elapsed().as_secs_f64() * 1000.0
        );
        written.push(dest);
    }

    if failed > 0 {
        bail!("{} of {} file(s) failed", failed, cli.files.len());
    }
    Ok(written)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    for path in run(&cli)? {
        println!("{}", path.display());
    }
    Ok(())
}
