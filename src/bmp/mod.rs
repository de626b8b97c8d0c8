//! BMP binary format: fixed headers, palette, padded pixel rows.
//!
//! Each submodule reads and writes one section of the file through
//! [`std::io::Read`] / [`std::io::Write`]; [`crate::BitmapImage`] chains them.

mod header;
mod palette;
mod rows;
pub(crate) mod stream;

pub use header::{
    FileHeader, InfoHeader, read_file_header, read_info_header, write_file_header,
    write_info_header,
};
pub use palette::{Palette, PaletteEntry, palette_entry_count, read_palette, write_palette};
pub use rows::{buffer_size, read_pixel_buffer, row_stride, write_pixel_buffer};

use crate::error::BitmapError;
use crate::pixel::BitDepth;

/// `BI_RGB`: the only compression value whose pixels this crate understands.
pub const COMPRESSION_NONE: u32 = 0;

// ── Validation ──────────────────────────────────────────────────────

/// Controls how strictly headers are checked while loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Validation {
    /// Everything in [`Validation::Standard`], plus: the declared file size,
    /// pixel offset and image size fields must match the actual layout.
    Strict,

    /// Default behavior. Reject bit depths other than 1/4/8/24, compressed
    /// files, info headers that are not 40 bytes, planes != 1 and zero
    /// height. Declared sizes and offsets are trusted as stored.
    #[default]
    Standard,

    /// Accept any bit depth, compression or header size and read the pixel
    /// block as `row_stride * height` raw bytes. Only a non-positive width
    /// is still rejected, since no block size can be derived from it.
    Permissive,
}

impl Validation {
    /// Header checks that run before the palette and pixels are read.
    pub(crate) fn check_info(self, info: &InfoHeader) -> Result<(), BitmapError> {
        if info.width <= 0 {
            return Err(BitmapError::InvalidHeader(format!(
                "BMP width must be positive, got {}",
                info.width
            )));
        }
        if self == Validation::Permissive {
            if BitDepth::from_bits(info.bits_per_pixel).is_none()
                || info.compression != COMPRESSION_NONE
                || info.header_size as usize != InfoHeader::SIZE
            {
                log::warn!(
                    "accepting nonstandard BMP as raw data: {} bpp, compression {}, info header {} bytes",
                    info.bits_per_pixel,
                    info.compression,
                    info.header_size
                );
            }
            return Ok(());
        }

        if info.header_size as usize != InfoHeader::SIZE {
            return Err(BitmapError::UnsupportedVariant(format!(
                "info header of {} bytes (only the 40-byte BITMAPINFOHEADER is supported)",
                info.header_size
            )));
        }
        if BitDepth::from_bits(info.bits_per_pixel).is_none() {
            return Err(BitmapError::UnsupportedVariant(format!(
                "BMP bit depth {} unsupported",
                info.bits_per_pixel
            )));
        }
        if info.compression != COMPRESSION_NONE {
            return Err(BitmapError::UnsupportedVariant(format!(
                "BMP compression {} unsupported",
                info.compression
            )));
        }
        if info.planes != 1 {
            return Err(BitmapError::InvalidHeader(format!(
                "BMP planes field is {}, expected 1",
                info.planes
            )));
        }
        if info.height == 0 {
            return Err(BitmapError::InvalidHeader("BMP height is zero".into()));
        }
        Ok(())
    }

    /// Cross-checks of the declared sizes, run once the layout is known.
    pub(crate) fn check_layout(
        self,
        file: &FileHeader,
        info: &InfoHeader,
        palette_len: usize,
        pixel_bytes: usize,
    ) -> Result<(), BitmapError> {
        if self != Validation::Strict {
            return Ok(());
        }
        let expected = FileHeader::for_layout(palette_len, pixel_bytes)?;
        if file.pixel_offset != expected.pixel_offset {
            return Err(BitmapError::InvalidHeader(format!(
                "BMP pixel offset ({}) doesn't match header and palette size ({})",
                file.pixel_offset, expected.pixel_offset
            )));
        }
        if file.file_size != expected.file_size {
            return Err(BitmapError::InvalidHeader(format!(
                "BMP file size field ({}) doesn't match actual size ({})",
                file.file_size, expected.file_size
            )));
        }
        // 0 is allowed for uncompressed images.
        if info.image_size != 0 && info.image_size as usize != pixel_bytes {
            return Err(BitmapError::InvalidHeader(format!(
                "BMP image data size field ({}) doesn't match expected ({pixel_bytes})",
                info.image_size
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(bits_per_pixel: u16) -> InfoHeader {
        InfoHeader {
            header_size: 40,
            width: 4,
            height: 4,
            planes: 1,
            bits_per_pixel,
            compression: 0,
            image_size: 0,
            x_pixels_per_meter: 0,
            y_pixels_per_meter: 0,
            colors_used: 0,
            colors_important: 0,
        }
    }

    #[test]
    fn standard_accepts_supported_depths() {
        for bits in [1, 4, 8, 24] {
            assert!(Validation::Standard.check_info(&info(bits)).is_ok());
        }
    }

    #[test]
    fn standard_rejects_other_depths() {
        for bits in [0, 2, 16, 32] {
            assert!(matches!(
                Validation::Standard.check_info(&info(bits)),
                Err(BitmapError::UnsupportedVariant(_))
            ));
            assert!(Validation::Permissive.check_info(&info(bits)).is_ok());
        }
    }

    #[test]
    fn standard_rejects_compression() {
        let mut rle = info(8);
        rle.compression = 1;
        assert!(matches!(
            Validation::Standard.check_info(&rle),
            Err(BitmapError::UnsupportedVariant(_))
        ));
        assert!(Validation::Permissive.check_info(&rle).is_ok());
    }

    #[test]
    fn width_must_be_positive_everywhere() {
        let mut bad = info(24);
        bad.width = 0;
        for v in [Validation::Strict, Validation::Standard, Validation::Permissive] {
            assert!(matches!(
                v.check_info(&bad),
                Err(BitmapError::InvalidHeader(_))
            ));
        }
    }

    #[test]
    fn top_down_is_fine() {
        let mut top_down = info(24);
        top_down.height = -4;
        assert!(Validation::Strict.check_info(&top_down).is_ok());
    }

    #[test]
    fn strict_layout_checks() {
        let info = info(8);
        let good = FileHeader::for_layout(256, 16).unwrap();
        assert!(Validation::Strict.check_layout(&good, &info, 256, 16).is_ok());

        let mut wrong_size = good;
        wrong_size.file_size += 1;
        assert!(Validation::Strict.check_layout(&wrong_size, &info, 256, 16).is_err());
        assert!(Validation::Standard.check_layout(&wrong_size, &info, 256, 16).is_ok());

        let mut wrong_offset = good;
        wrong_offset.pixel_offset = 54;
        assert!(Validation::Strict.check_layout(&wrong_offset, &info, 256, 16).is_err());
    }
}
