//! Padded pixel rows and the raw pixel block.

use std::io::{Read, Write};

use super::stream::read_block;
use crate::error::BitmapError;

fn stride_bytes(width: u32, bits_per_pixel: u16) -> u64 {
    let bits = u64::from(width) * u64::from(bits_per_pixel);
    bits.div_ceil(32) * 4
}

/// Bytes per stored row: `width * bits_per_pixel` bits rounded up to a
/// multiple of 32 bits.
///
/// Saturates at `usize::MAX` where the stride does not fit the address
/// space; [`buffer_size`] reports that case as
/// [`BitmapError::DimensionsTooLarge`].
pub fn row_stride(width: u32, bits_per_pixel: u16) -> usize {
    usize::try_from(stride_bytes(width, bits_per_pixel)).unwrap_or(usize::MAX)
}

/// Size of the whole pixel block, `row_stride * height`.
pub fn buffer_size(width: u32, height: u32, bits_per_pixel: u16) -> Result<usize, BitmapError> {
    stride_bytes(width, bits_per_pixel)
        .checked_mul(u64::from(height))
        .and_then(|n| usize::try_from(n).ok())
        .ok_or(BitmapError::DimensionsTooLarge { width, height })
}

/// Read the pixel block as one unit of exactly `size` bytes.
pub fn read_pixel_buffer<R: Read + ?Sized>(
    reader: &mut R,
    size: usize,
) -> Result<Vec<u8>, BitmapError> {
    read_block(reader, size, "pixel data")
}

pub fn write_pixel_buffer<W: Write + ?Sized>(
    writer: &mut W,
    buffer: &[u8],
) -> Result<(), BitmapError> {
    writer.write_all(buffer)?;
    Ok(())
}
