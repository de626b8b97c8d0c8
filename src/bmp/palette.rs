//! Color table stored between the info header and the pixel data.

use std::io::{Read, Write};

use super::stream::read_block;
use crate::error::BitmapError;

/// One `RGBQUAD`: blue, green, red, reserved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PaletteEntry {
    pub blue: u8,
    pub green: u8,
    pub red: u8,
    pub reserved: u8,
}

impl PaletteEntry {
    pub const SIZE: usize = 4;

    pub const fn gray(level: u8) -> Self {
        Self {
            blue: level,
            green: level,
            red: level,
            reserved: 0,
        }
    }

    pub fn to_bytes(self) -> [u8; Self::SIZE] {
        [self.blue, self.green, self.red, self.reserved]
    }

    pub fn from_bytes([blue, green, red, reserved]: [u8; Self::SIZE]) -> Self {
        Self {
            blue,
            green,
            red,
            reserved,
        }
    }
}

/// Ordered color table of an indexed image.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Palette {
    entries: Vec<PaletteEntry>,
}

impl Palette {
    pub fn new(entries: Vec<PaletteEntry>) -> Self {
        Self { entries }
    }

    /// The 256-entry identity ramp: entry `i` is `(i, i, i)`.
    pub fn grayscale() -> Self {
        Self::new((0..=255u8).map(PaletteEntry::gray).collect())
    }

    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Size of the serialized table in bytes.
    pub fn byte_len(&self) -> usize {
        self.entries.len() * PaletteEntry::SIZE
    }

    pub fn into_entries(self) -> Vec<PaletteEntry> {
        self.entries
    }
}

/// Palette length implied by a bit depth: 2, 16 or 256 for 1, 4 and 8 bits,
/// zero for everything else.
pub fn palette_entry_count(bits_per_pixel: u16) -> usize {
    match bits_per_pixel {
        1 => 2,
        4 => 16,
        8 => 256,
        _ => 0,
    }
}

/// Read the palette for `bits_per_pixel`. Consumes nothing and returns
/// `None` when the depth has no palette.
pub fn read_palette<R: Read + ?Sized>(
    reader: &mut R,
    bits_per_pixel: u16,
) -> Result<Option<Palette>, BitmapError> {
    let count = palette_entry_count(bits_per_pixel);
    if count == 0 {
        return Ok(None);
    }
    let raw = read_block(reader, count * PaletteEntry::SIZE, "palette")?;
    let entries = raw
        .chunks_exact(PaletteEntry::SIZE)
        .map(|quad| PaletteEntry::from_bytes([quad[0], quad[1], quad[2], quad[3]]))
        .collect();
    Ok(Some(Palette::new(entries)))
}

/// Write `palette` verbatim, or nothing when absent.
pub fn write_palette<W: Write + ?Sized>(
    writer: &mut W,
    palette: Option<&Palette>,
) -> Result<(), BitmapError> {
    let Some(palette) = palette else {
        return Ok(());
    };
    let mut raw = Vec::with_capacity(palette.byte_len());
    for entry in palette.entries() {
        raw.extend_from_slice(&entry.to_bytes());
    }
    writer.write_all(&raw)?;
    Ok(())
}
