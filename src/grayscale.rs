//! 24-bit BGR to 8-bit indexed grayscale conversion.
//!
//! The output palette is the identity ramp, so each output byte is both a
//! palette index and the luma of the source pixel.

use rgb::AsPixels as _;
use rgb::alt::BGR8;

use crate::bmp::{
    self, FileHeader, InfoHeader, Palette, buffer_size, palette_entry_count, row_stride,
};
use crate::error::BitmapError;
use crate::image::BitmapImage;
use crate::pixel::BitDepth;

/// Luma with weights 0.299 / 0.587 / 0.114, truncated toward zero.
///
/// Integer weights in thousandths give the exact floor of the real-valued
/// sum; `luma(255, 255, 255)` is 255.
#[inline]
pub fn luma(red: u8, green: u8, blue: u8) -> u8 {
    let r = u32::from(red);
    let g = u32::from(green);
    let b = u32::from(blue);
    // At most 255_000 / 1000, so the cast cannot truncate.
    ((r * 299 + g * 587 + b * 114) / 1000) as u8
}

/// Convert a 24-bit image into a new 8-bit image with the identity
/// grayscale palette.
///
/// Headers are copied from `image` except for the bit depth, the image
/// size, the file size and the pixel offset. Stored row order is kept and
/// row padding is zeroed.
pub fn to_grayscale(image: &BitmapImage) -> Result<BitmapImage, BitmapError> {
    let src_info = image.info_header();
    if image.bit_depth() != Some(BitDepth::TwentyFour) {
        return Err(BitmapError::UnsupportedVariant(format!(
            "grayscale conversion needs 24-bit input, got {} bpp",
            src_info.bits_per_pixel
        )));
    }
    if src_info.compression != bmp::COMPRESSION_NONE {
        return Err(BitmapError::UnsupportedVariant(format!(
            "grayscale conversion needs uncompressed input, got compression {}",
            src_info.compression
        )));
    }

    let width = image.width();
    let height = image.height();
    let w = width as usize;
    let src_stride = row_stride(width, 24);
    let dst_stride = row_stride(width, 8);
    let dst_size = buffer_size(width, height, 8)?;
    let image_size = u32::try_from(dst_size)
        .map_err(|_| BitmapError::DimensionsTooLarge { width, height })?;

    let mut pixels = Vec::new();
    pixels
        .try_reserve_exact(dst_size)
        .map_err(|_| BitmapError::Allocation { bytes: dst_size })?;
    pixels.resize(dst_size, 0u8);

    for (src_row, dst_row) in image
        .pixels()
        .chunks_exact(src_stride)
        .zip(pixels.chunks_exact_mut(dst_stride))
    {
        let src: &[BGR8] = src_row[..w * 3].as_pixels();
        for (out, px) in dst_row[..w].iter_mut().zip(src) {
            *out = luma(px.r, px.g, px.b);
        }
    }

    let info_header = InfoHeader {
        header_size: InfoHeader::SIZE as u32,
        bits_per_pixel: 8,
        image_size,
        ..*src_info
    };

    let layout = FileHeader::for_layout(palette_entry_count(8), dst_size)?;
    let file_header = FileHeader {
        file_size: layout.file_size,
        pixel_offset: layout.pixel_offset,
        ..*image.file_header()
    };

    log::debug!(
        "converted {width}x{height} 24-bit image to 8-bit grayscale ({dst_size} bytes of pixels)"
    );
    BitmapImage::from_parts(file_header, info_header, Some(Palette::grayscale()), pixels)
}

impl BitmapImage {
    /// See [`to_grayscale`].
    pub fn to_grayscale(&self) -> Result<BitmapImage, BitmapError> {
        to_grayscale(self)
    }
}
