//! Fixed-layout BMP records: the 14-byte file header and the 40-byte
//! `BITMAPINFOHEADER`.
//!
//! Both are serialized field by field at explicit byte offsets, little-endian,
//! with no padding between fields.

use std::io::{Read, Write};

use super::stream::{i32_at, read_fixed_bytes, u16_at, u32_at};
use crate::error::BitmapError;

/// `BITMAPFILEHEADER`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FileHeader {
    /// Always `b"BM"` once parsed.
    pub magic: [u8; 2],
    /// Declared total file size in bytes.
    pub file_size: u32,
    pub reserved1: u16,
    pub reserved2: u16,
    /// Offset from the start of the file to the pixel data.
    pub pixel_offset: u32,
}

impl FileHeader {
    pub const SIZE: usize = 14;
    pub const MAGIC: [u8; 2] = *b"BM";

    /// Header for a file laid out as headers, `palette_len` entries, then
    /// `image_size` bytes of pixels.
    pub fn for_layout(palette_len: usize, image_size: usize) -> Result<Self, BitmapError> {
        let pixel_offset = Self::SIZE + InfoHeader::SIZE + palette_len * 4;
        let file_size = pixel_offset
            .checked_add(image_size)
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| {
                BitmapError::InconsistentImage(format!(
                    "file of {pixel_offset} + {image_size} bytes does not fit a BMP size field"
                ))
            })?;
        Ok(Self {
            magic: Self::MAGIC,
            file_size,
            reserved1: 0,
            reserved2: 0,
            pixel_offset: pixel_offset as u32,
        })
    }

    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut out = [0u8; Self::SIZE];
        out[0..2].copy_from_slice(&self.magic);
        out[2..6].copy_from_slice(&self.file_size.to_le_bytes());
        out[6..8].copy_from_slice(&self.reserved1.to_le_bytes());
        out[8..10].copy_from_slice(&self.reserved2.to_le_bytes());
        out[10..14].copy_from_slice(&self.pixel_offset.to_le_bytes());
        out
    }

    /// Decode the record verbatim. The magic is not checked here.
    pub fn from_bytes(bytes: &[u8; Self::SIZE]) -> Self {
        Self {
            magic: [bytes[0], bytes[1]],
            file_size: u32_at(bytes, 2),
            reserved1: u16_at(bytes, 6),
            reserved2: u16_at(bytes, 8),
            pixel_offset: u32_at(bytes, 10),
        }
    }
}

/// `BITMAPINFOHEADER`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct InfoHeader {
    pub header_size: u32,
    pub width: i32,
    /// Positive means rows are stored bottom-up.
    pub height: i32,
    pub planes: u16,
    pub bits_per_pixel: u16,
    /// 0 = `BI_RGB` (uncompressed); nothing else is interpreted.
    pub compression: u32,
    pub image_size: u32,
    pub x_pixels_per_meter: i32,
    pub y_pixels_per_meter: i32,
    pub colors_used: u32,
    pub colors_important: u32,
}

impl InfoHeader {
    pub const SIZE: usize = 40;

    /// 72 DPI expressed in pixels per meter.
    pub const DEFAULT_RESOLUTION: i32 = 2835;

    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut out = [0u8; Self::SIZE];
        out[0..4].copy_from_slice(&self.header_size.to_le_bytes());
        out[4..8].copy_from_slice(&self.width.to_le_bytes());
        out[8..12].copy_from_slice(&self.height.to_le_bytes());
        out[12..14].copy_from_slice(&self.planes.to_le_bytes());
        out[14..16].copy_from_slice(&self.bits_per_pixel.to_le_bytes());
        out[16..20].copy_from_slice(&self.compression.to_le_bytes());
        out[20..24].copy_from_slice(&self.image_size.to_le_bytes());
        out[24..28].copy_from_slice(&self.x_pixels_per_meter.to_le_bytes());
        out[28..32].copy_from_slice(&self.y_pixels_per_meter.to_le_bytes());
        out[32..36].copy_from_slice(&self.colors_used.to_le_bytes());
        out[36..40].copy_from_slice(&self.colors_important.to_le_bytes());
        out
    }

    pub fn from_bytes(bytes: &[u8; Self::SIZE]) -> Self {
        Self {
            header_size: u32_at(bytes, 0),
            width: i32_at(bytes, 4),
            height: i32_at(bytes, 8),
            planes: u16_at(bytes, 12),
            bits_per_pixel: u16_at(bytes, 14),
            compression: u32_at(bytes, 16),
            image_size: u32_at(bytes, 20),
            x_pixels_per_meter: i32_at(bytes, 24),
            y_pixels_per_meter: i32_at(bytes, 28),
            colors_used: u32_at(bytes, 32),
            colors_important: u32_at(bytes, 36),
        }
    }

    /// Whether row 0 of the pixel buffer is the bottom row of the picture.
    pub fn is_bottom_up(&self) -> bool {
        self.height > 0
    }

    /// Number of stored rows regardless of row order.
    pub fn row_count(&self) -> u32 {
        self.height.unsigned_abs()
    }
}

/// Read a [`FileHeader`], rejecting anything whose magic is not `BM`.
///
/// The magic is checked after reading only its two bytes, so a non-BMP
/// stream is left positioned at offset 2.
pub fn read_file_header<R: Read + ?Sized>(reader: &mut R) -> Result<FileHeader, BitmapError> {
    let magic: [u8; 2] = read_fixed_bytes(reader, "file header")?;
    if magic != FileHeader::MAGIC {
        return Err(BitmapError::UnrecognizedFormat { magic });
    }
    let rest: [u8; FileHeader::SIZE - 2] = read_fixed_bytes(reader, "file header")?;

    let mut bytes = [0u8; FileHeader::SIZE];
    bytes[..2].copy_from_slice(&magic);
    bytes[2..].copy_from_slice(&rest);
    Ok(FileHeader::from_bytes(&bytes))
}

/// Read an [`InfoHeader`]. Only the byte count is validated.
pub fn read_info_header<R: Read + ?Sized>(reader: &mut R) -> Result<InfoHeader, BitmapError> {
    let bytes: [u8; InfoHeader::SIZE] = read_fixed_bytes(reader, "info header")?;
    Ok(InfoHeader::from_bytes(&bytes))
}

pub fn write_file_header<W: Write + ?Sized>(
    writer: &mut W,
    header: &FileHeader,
) -> Result<(), BitmapError> {
    writer.write_all(&header.to_bytes())?;
    Ok(())
}

pub fn write_info_header<W: Write + ?Sized>(
    writer: &mut W,
    header: &InfoHeader,
) -> Result<(), BitmapError> {
    writer.write_all(&header.to_bytes())?;
    Ok(())
}
