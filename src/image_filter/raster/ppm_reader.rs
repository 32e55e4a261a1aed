//! Reader for binary Netpbm images (`P6` color, `P5` grayscale).
//!
//! The header is a two-character tag followed by ASCII width, height and
//! maximum value fields separated by whitespace. `#` starts a comment that
//! runs to the end of the line. Exactly one whitespace byte separates the
//! maximum value from the binary body.

use tracing::debug;

use crate::image_filter::common::error::{FilterError, Result};
use crate::image_filter::raster::reader::ImageReader;
use crate::image_filter::raster::types::{Channels, RasterImage};

/// Largest sample value representable in a one-byte body.
const MAX_SAMPLE_VALUE: usize = 255;

pub struct PpmReader;

struct HeaderCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> HeaderCursor<'a> {
    fn skip_whitespace_and_comments(&mut self) {
        while let Some(&byte) = self.data.get(self.pos) {
            if byte == b'#' {
                while let Some(&c) = self.data.get(self.pos) {
                    self.pos += 1;
                    if c == b'\n' {
                        break;
                    }
                }
            } else if byte.is_ascii_whitespace() {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn token(&mut self) -> &'a [u8] {
        self.skip_whitespace_and_comments();
        let start = self.pos;
        while self
            .data
            .get(self.pos)
            .is_some_and(|b| !b.is_ascii_whitespace() && *b != b'#')
        {
            self.pos += 1;
        }
        let data = self.data;
        &data[start..self.pos]
    }

    fn number(&mut self, field: &str) -> Result<usize> {
        let token = self.token();
        std::str::from_utf8(token)
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .ok_or_else(|| {
                FilterError::FormatError(format!(
                    "invalid {} field {:?}",
                    field,
                    String::from_utf8_lossy(token)
                ))
            })
    }
}

impl ImageReader for PpmReader {
    fn read_image(&self, data: &[u8]) -> Result<RasterImage> {
        let mut cursor = HeaderCursor { data, pos: 0 };

        let channels = match cursor.token() {
            b"P6" => Channels::Rgb,
            b"P5" => Channels::Gray,
            other => {
                return Err(FilterError::FormatError(format!(
                    "unsupported tag {:?}",
                    String::from_utf8_lossy(other)
                )));
            }
        };

        let width = cursor.number("width")?;
        let height = cursor.number("height")?;
        let max_value = cursor.number("max value")?;
        if max_value == 0 || max_value > MAX_SAMPLE_VALUE {
            return Err(FilterError::FormatError(format!(
                "max value {} outside 1..={}",
                max_value, MAX_SAMPLE_VALUE
            )));
        }

        match data.get(cursor.pos) {
            Some(b) if b.is_ascii_whitespace() => cursor.pos += 1,
            _ => {
                return Err(FilterError::FormatError(
                    "missing separator before pixel data".to_string(),
                ));
            }
        }

        let body_len = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(channels.count()))
            .ok_or_else(|| FilterError::FormatError(format!("dimensions {}x{} overflow", width, height)))?;
        let body = cursor
            .pos
            .checked_add(body_len)
            .and_then(|end| data.get(cursor.pos..end))
            .ok_or_else(|| {
                FilterError::FormatError(format!(
                    "truncated pixel data: expected {} bytes, found {}",
                    body_len,
                    data.len() - cursor.pos
                ))
            })?;

        debug!("Decoded {:?} image {}x{}", channels, width, height);

        RasterImage::new(width, height, channels, body.to_vec())
    }
}
