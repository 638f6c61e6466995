use crate::colormap::Colormap;
use crate::time_markers::{time_ticks, TimeTick};
use serde::{Deserialize, Serialize};
use sgram_core::SpectrogramData;

const AXIS_BACKGROUND: [u8; 3] = [0, 0, 0];
const MAJOR_TICK: [u8; 3] = [255, 255, 255];
const MINOR_TICK: [u8; 3] = [110, 110, 110];

/// How a spectrogram is turned into an image.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    pub colormap: Colormap,
    /// The frequency axis is hidden by default; only time is labelled.
    pub show_freq_axis: bool,
    /// Font size for time-axis labels, kept small so labels stay out of the way.
    pub label_font_size: f32,
    /// Draw a strip of time tick marks below the image.
    pub axis: bool,
    pub axis_height: u32,
    /// Minimum distance between labelled ticks, in pixels.
    pub tick_spacing: f64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            colormap: Colormap::Viridis,
            show_freq_axis: false,
            label_font_size: 4.0,
            axis: false,
            axis_height: 8,
            tick_spacing: 100.0,
        }
    }
}

/// RGBA8 image, row-major, row 0 at the top.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl Image {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 4],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// RGBA at `(x, y)`, `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let p = self.pixels.get(i..i + 4)?;
        Some([p[0], p[1], p[2], p[3]])
    }

    fn put(&mut self, x: u32, y: u32, rgb: [u8; 3]) {
        let i = (y as usize * self.width as usize + x as usize) * 4;
        self.pixels[i..i + 4].copy_from_slice(&[rgb[0], rgb[1], rgb[2], 255]);
    }
}

/// Render the spectrogram to an RGBA image.
///
/// Width = number of frames, height = number of bins (plus the axis strip if
/// enabled). Row 0 is the highest frequency so 0 Hz ends up on the bottom row.
/// Colours scale linearly between the grid's minimum and maximum value.
pub fn render_image(data: &SpectrogramData, opts: &RenderOptions) -> Image {
    let Some((lo, hi)) = data.min_max() else {
        return Image::new(0, 0);
    };
    if data.n_bins == 0 {
        return Image::new(0, 0);
    }

    let width = data.n_frames() as u32;
    let plot_height = data.n_bins as u32;
    let axis_height = if opts.axis { opts.axis_height } else { 0 };
    let mut image = Image::new(width, plot_height + axis_height);

    let lut = opts.colormap.lut();
    let range = hi - lo;
    let scale = if range > 0.0 { 255.0 / range } else { 0.0 };

    for (x, col) in data.columns.iter().enumerate() {
        for (bin, &v) in col.magnitudes.iter().enumerate() {
            let idx = ((v - lo) * scale).round().clamp(0.0, 255.0) as usize;
            // Flip vertically: bin 0 = lowest freq → bottom row
            let y = plot_height - 1 - bin as u32;
            image.put(x as u32, y, lut[idx]);
        }
    }

    if axis_height > 0 {
        let ticks = time_ticks(data.duration_secs(), width as f64, opts.tick_spacing);
        draw_axis_strip(&mut image, plot_height, axis_height, &ticks);
    }

    image
}

fn draw_axis_strip(image: &mut Image, top: u32, height: u32, ticks: &[TimeTick]) {
    for y in top..top + height {
        for x in 0..image.width {
            image.put(x, y, AXIS_BACKGROUND);
        }
    }
    for tick in ticks {
        let x = (tick.x.round() as u32).min(image.width.saturating_sub(1));
        let (len, color) = if tick.label.is_some() {
            (height, MAJOR_TICK)
        } else {
            (height / 2, MINOR_TICK)
        };
        for y in top..top + len {
            image.put(x, y, color);
        }
    }
}
