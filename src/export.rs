use crate::error::Result;
use crate::render::Image;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Encode an RGBA8 image as PNG into `writer`.
pub fn encode_png<W: Write>(image: &Image, writer: W) -> Result<()> {
    let mut encoder = png::Encoder::new(writer, image.width, image.height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(&image.pixels)?;
    writer.finish()?;
    Ok(())
}

/// Write an RGBA8 image to `path` as PNG.
pub fn write_png(image: &Image, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    encode_png(image, BufWriter::new(file))?;
    log::debug!("wrote {}x{} PNG to {}", image.width, image.height, path.display());
    Ok(())
}
