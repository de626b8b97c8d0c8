//! [`BitmapImage`]: the owning aggregate of one BMP file.

use core::fmt;
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use crate::bmp::{
    self, FileHeader, InfoHeader, Palette, buffer_size, palette_entry_count, row_stride,
};
use crate::error::BitmapError;
use crate::load::LoadRequest;
use crate::pixel::BitDepth;

/// A BMP file held in memory: both headers, the palette of indexed images,
/// and the raw padded pixel block in stored row order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitmapImage {
    file_header: FileHeader,
    info_header: InfoHeader,
    palette: Option<Palette>,
    pixels: Vec<u8>,
}

impl BitmapImage {
    /// Build an uncompressed image with freshly computed headers.
    ///
    /// `pixels` is the padded block, `row_stride(width, depth) * |height|`
    /// bytes; a positive `height` means bottom-up rows.
    pub fn new(
        width: u32,
        height: i32,
        depth: BitDepth,
        palette: Option<Palette>,
        pixels: Vec<u8>,
    ) -> Result<Self, BitmapError> {
        let signed_width = i32::try_from(width).map_err(|_| BitmapError::DimensionsTooLarge {
            width,
            height: height.unsigned_abs(),
        })?;
        let image_size = buffer_size(width, height.unsigned_abs(), depth.bits())?;
        let image_size_field =
            u32::try_from(image_size).map_err(|_| BitmapError::DimensionsTooLarge {
                width,
                height: height.unsigned_abs(),
            })?;
        let info_header = InfoHeader {
            header_size: InfoHeader::SIZE as u32,
            width: signed_width,
            height,
            planes: 1,
            bits_per_pixel: depth.bits(),
            compression: bmp::COMPRESSION_NONE,
            image_size: image_size_field,
            x_pixels_per_meter: InfoHeader::DEFAULT_RESOLUTION,
            y_pixels_per_meter: InfoHeader::DEFAULT_RESOLUTION,
            colors_used: 0,
            colors_important: 0,
        };
        let file_header = FileHeader::for_layout(palette_entry_count(depth.bits()), image_size)?;
        Self::from_parts(file_header, info_header, palette, pixels)
    }

    /// Assemble an image from already-built parts.
    ///
    /// The palette must have exactly [`palette_entry_count`] entries (and be
    /// absent when that is zero) and `pixels` must be exactly
    /// [`buffer_size`] bytes. Header size fields are taken as given.
    pub fn from_parts(
        file_header: FileHeader,
        info_header: InfoHeader,
        palette: Option<Palette>,
        pixels: Vec<u8>,
    ) -> Result<Self, BitmapError> {
        if file_header.magic != FileHeader::MAGIC {
            return Err(BitmapError::UnrecognizedFormat {
                magic: file_header.magic,
            });
        }
        if info_header.width <= 0 {
            return Err(BitmapError::InvalidHeader(format!(
                "BMP width must be positive, got {}",
                info_header.width
            )));
        }

        let expected_entries = palette_entry_count(info_header.bits_per_pixel);
        let actual_entries = palette.as_ref().map(Palette::len);
        let palette_ok = match actual_entries {
            None => expected_entries == 0,
            Some(n) => n == expected_entries && n > 0,
        };
        if !palette_ok {
            return Err(BitmapError::InconsistentImage(format!(
                "{} bpp needs {expected_entries} palette entries, got {}",
                info_header.bits_per_pixel,
                actual_entries.unwrap_or(0)
            )));
        }

        let expected_bytes = buffer_size(
            info_header.width as u32,
            info_header.row_count(),
            info_header.bits_per_pixel,
        )?;
        if pixels.len() != expected_bytes {
            return Err(BitmapError::InconsistentImage(format!(
                "pixel buffer is {} bytes, {}x{} at {} bpp needs {expected_bytes}",
                pixels.len(),
                info_header.width,
                info_header.height,
                info_header.bits_per_pixel
            )));
        }

        Ok(Self {
            file_header,
            info_header,
            palette,
            pixels,
        })
    }

    /// Load a BMP file with [`Validation::Standard`](crate::Validation) and no limits.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, BitmapError> {
        LoadRequest::new().load(path)
    }

    /// Parse a BMP stream with [`Validation::Standard`](crate::Validation) and no limits.
    pub fn read_from<R: Read + ?Sized>(reader: &mut R) -> Result<Self, BitmapError> {
        LoadRequest::new().read(reader)
    }

    /// Write the image to `path`, replacing any existing file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), BitmapError> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| BitmapError::Create {
            path: path.to_path_buf(),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer)?;
        writer.flush()?;
        log::debug!(
            "saved {} ({} bytes of pixels)",
            path.display(),
            self.pixels.len()
        );
        Ok(())
    }

    /// Serialize: file header, info header, palette, pixel block.
    pub fn write_to<W: Write + ?Sized>(&self, writer: &mut W) -> Result<(), BitmapError> {
        bmp::write_file_header(writer, &self.file_header)?;
        bmp::write_info_header(writer, &self.info_header)?;
        bmp::write_palette(writer, self.palette.as_ref())?;
        bmp::write_pixel_buffer(writer, &self.pixels)?;
        Ok(())
    }

    /// Serialize into a fresh byte vector.
    pub fn to_bytes(&self) -> Vec<u8> {
        let palette_bytes = self.palette.as_ref().map_or(0, Palette::byte_len);
        let mut out = Vec::with_capacity(
            FileHeader::SIZE + InfoHeader::SIZE + palette_bytes + self.pixels.len(),
        );
        out.extend_from_slice(&self.file_header.to_bytes());
        out.extend_from_slice(&self.info_header.to_bytes());
        if let Some(palette) = &self.palette {
            for entry in palette.entries() {
                out.extend_from_slice(&entry.to_bytes());
            }
        }
        out.extend_from_slice(&self.pixels);
        out
    }

    pub fn file_header(&self) -> &FileHeader {
        &self.file_header
    }

    pub fn info_header(&self) -> &InfoHeader {
        &self.info_header
    }

    pub fn palette(&self) -> Option<&Palette> {
        self.palette.as_ref()
    }

    /// Raw pixel block, padded rows in stored order.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn width(&self) -> u32 {
        // Positive by construction.
        self.info_header.width as u32
    }

    /// Number of rows; see [`BitmapImage::is_bottom_up`] for their order.
    pub fn height(&self) -> u32 {
        self.info_header.row_count()
    }

    pub fn is_bottom_up(&self) -> bool {
        self.info_header.is_bottom_up()
    }

    pub fn bits_per_pixel(&self) -> u16 {
        self.info_header.bits_per_pixel
    }

    /// Supported depth, or `None` for files accepted in permissive mode.
    pub fn bit_depth(&self) -> Option<BitDepth> {
        BitDepth::from_bits(self.info_header.bits_per_pixel)
    }

    pub fn row_stride(&self) -> usize {
        row_stride(self.width(), self.bits_per_pixel())
    }

    /// Stored row `index` without its padding bytes.
    pub fn row(&self, index: u32) -> Option<&[u8]> {
        if index >= self.height() {
            return None;
        }
        let stride = self.row_stride();
        let used = (self.width() as usize * self.bits_per_pixel() as usize).div_ceil(8);
        let start = index as usize * stride;
        self.pixels.get(start..start + used)
    }

    pub fn into_parts(self) -> (FileHeader, InfoHeader, Option<Palette>, Vec<u8>) {
        (
            self.file_header,
            self.info_header,
            self.palette,
            self.pixels,
        )
    }

    /// Human-readable listing of every header field.
    pub fn header_dump(&self) -> HeaderDump<'_> {
        HeaderDump { image: self }
    }
}

/// [`fmt::Display`] view returned by [`BitmapImage::header_dump`].
pub struct HeaderDump<'a> {
    image: &'a BitmapImage,
}

impl fmt::Display for HeaderDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fh = &self.image.file_header;
        let ih = &self.image.info_header;
        writeln!(
            f,
            "magic             : {}{}",
            char::from(fh.magic[0]),
            char::from(fh.magic[1])
        )?;
        writeln!(f, "file size         : {}", fh.file_size)?;
        writeln!(f, "reserved 1        : {}", fh.reserved1)?;
        writeln!(f, "reserved 2        : {}", fh.reserved2)?;
        writeln!(f, "pixel offset      : {}", fh.pixel_offset)?;
        writeln!(f, "info header size  : {}", ih.header_size)?;
        writeln!(f, "width             : {}", ih.width)?;
        writeln!(f, "height            : {}", ih.height)?;
        writeln!(f, "planes            : {}", ih.planes)?;
        writeln!(f, "bits per pixel    : {}", ih.bits_per_pixel)?;
        writeln!(f, "compression       : {}", ih.compression)?;
        writeln!(f, "image size        : {}", ih.image_size)?;
        writeln!(f, "x pixels/meter    : {}", ih.x_pixels_per_meter)?;
        writeln!(f, "y pixels/meter    : {}", ih.y_pixels_per_meter)?;
        writeln!(f, "colors used       : {}", ih.colors_used)?;
        write!(f, "colors important  : {}", ih.colors_important)
    }
}
