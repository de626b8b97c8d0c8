use crate::bmp::{InfoHeader, buffer_size};
use crate::error::BitmapError;

/// Caps on what a BMP header may declare before the loader commits to
/// reading its pixel block.
///
/// All fields default to `None` (no limit).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * |height|).
    pub max_pixels: Option<u64>,
    /// Maximum size of the padded pixel block in bytes.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// No caps. Used by the loader when no limits are supplied.
    pub const NONE: Self = Self {
        max_width: None,
        max_height: None,
        max_pixels: None,
        max_memory_bytes: None,
    };

    /// Check a parsed info header and return the size of the pixel block it
    /// declares. `width` must already be known positive.
    pub(crate) fn check_header(&self, info: &InfoHeader) -> Result<usize, BitmapError> {
        let width = info.width.unsigned_abs();
        let rows = info.row_count();

        if let Some(max) = self.max_width.filter(|&max| u64::from(width) > max) {
            return Err(BitmapError::LimitExceeded(format!(
                "BMP header declares width {width}, limit is {max}"
            )));
        }
        if let Some(max) = self.max_height.filter(|&max| u64::from(rows) > max) {
            return Err(BitmapError::LimitExceeded(format!(
                "BMP header declares {rows} rows, limit is {max}"
            )));
        }
        let pixels = u64::from(width) * u64::from(rows);
        if let Some(max) = self.max_pixels.filter(|&max| pixels > max) {
            return Err(BitmapError::LimitExceeded(format!(
                "BMP header declares {width}x{rows} = {pixels} pixels, limit is {max}"
            )));
        }

        let bytes = buffer_size(width, rows, info.bits_per_pixel)?;
        if let Some(max) = self.max_memory_bytes.filter(|&max| bytes as u64 > max) {
            return Err(BitmapError::LimitExceeded(format!(
                "{width}x{rows} at {} bpp needs a {bytes} byte pixel block, limit is {max}",
                info.bits_per_pixel
            )));
        }
        Ok(bytes)
    }
}
