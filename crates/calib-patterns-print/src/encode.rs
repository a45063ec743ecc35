//! PNG encoding for rendered canvases.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use calib_patterns_core::GrayCanvas;

#[derive(thiserror::Error, Debug)]
pub enum EncodeError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Png(#[from] png::EncodingError),
}

/// Write a canvas to disk as an 8-bit grayscale PNG.
pub fn write_png(canvas: &GrayCanvas, path: impl AsRef<Path>) -> Result<(), EncodeError> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);

    let mut encoder = png::Encoder::new(writer, canvas.width as u32, canvas.height as u32);
    encoder.set_color(png::ColorType::Grayscale);
    encoder.set_depth(png::BitDepth::Eight);

    let mut png_writer = encoder.write_header()?;
    png_writer.write_image_data(&canvas.data)?;
    png_writer.finish()?;
    Ok(())
}
