use std::io::Write;

use tracing::debug;

use crate::image_filter::common::error::{FilterError, Result};
use crate::image_filter::raster::types::{Channels, RasterImage};
use crate::image_filter::raster::writer::ImageWriter;

/// Writes `P6` for RGB images and `P5` for grayscale, max value 255.
pub struct PpmWriter;

impl ImageWriter for PpmWriter {
    fn write_image(&self, image: &RasterImage, output: &mut dyn Write) -> Result<()> {
        let tag = match image.channels() {
            Channels::Rgb => "P6",
            Channels::Gray => "P5",
        };
        debug!("Encoding {} image: {}x{}", tag, image.width(), image.height());

        let mut buffer = Vec::with_capacity(image.data().len() + 32);
        write!(buffer, "{}\n{} {}\n255\n", tag, image.width(), image.height())?;
        buffer.extend_from_slice(image.data());

        output
            .write_all(&buffer)
            .map_err(|e| FilterError::OutputWriteError(e.to_string()))?;
        Ok(())
    }
}
