use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::bmp::{self, Validation, palette_entry_count};
use crate::error::BitmapError;
use crate::image::BitmapImage;
use crate::limits::Limits;

/// Loader configuration: validation level and optional resource limits.
///
/// ```no_run
/// use graybmp::{Limits, LoadRequest, Validation};
///
/// let limits = Limits {
///     max_pixels: Some(64 * 1024 * 1024),
///     ..Default::default()
/// };
/// let image = LoadRequest::new()
///     .with_validation(Validation::Strict)
///     .with_limits(&limits)
///     .load("parrots.bmp")?;
/// # Ok::<(), graybmp::BitmapError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct LoadRequest<'a> {
    validation: Validation,
    limits: Option<&'a Limits>,
}

impl<'a> LoadRequest<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_validation(mut self, validation: Validation) -> Self {
        self.validation = validation;
        self
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Open `path` and parse it. The file is closed before returning,
    /// on success and on every error.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<BitmapImage, BitmapError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| BitmapError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let image = self.read(&mut BufReader::new(file))?;
        log::debug!(
            "loaded {}: {}x{} at {} bpp",
            path.display(),
            image.width(),
            image.height(),
            image.bits_per_pixel()
        );
        Ok(image)
    }

    /// Parse a BMP from `reader`, consuming exactly the bytes the headers
    /// describe: file header, info header, palette, pixel block.
    pub fn read<R: Read + ?Sized>(&self, reader: &mut R) -> Result<BitmapImage, BitmapError> {
        let file_header = bmp::read_file_header(reader)?;
        let info_header = bmp::read_info_header(reader)?;
        log::trace!("file header {file_header:?}");
        log::trace!("info header {info_header:?}");

        self.validation.check_info(&info_header)?;

        let pixel_bytes = self
            .limits
            .unwrap_or(&Limits::NONE)
            .check_header(&info_header)?;

        let palette_len = palette_entry_count(info_header.bits_per_pixel);
        self.validation
            .check_layout(&file_header, &info_header, palette_len, pixel_bytes)?;

        let palette = bmp::read_palette(reader, info_header.bits_per_pixel)?;
        let pixels = bmp::read_pixel_buffer(reader, pixel_bytes)?;
        log::trace!(
            "read {palette_len} palette entries and {pixel_bytes} bytes of pixels"
        );

        BitmapImage::from_parts(file_header, info_header, palette, pixels)
    }
}
