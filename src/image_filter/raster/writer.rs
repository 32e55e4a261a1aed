use std::io::Write;

use crate::image_filter::common::error::Result;
use crate::image_filter::raster::types::RasterImage;

pub trait ImageWriter {
    fn write_image(&self, image: &RasterImage, output: &mut dyn Write) -> Result<()>;
}
