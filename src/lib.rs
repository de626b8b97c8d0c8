//! # graybmp
//!
//! Uncompressed Windows bitmap (BMP) codec and 24-bit to 8-bit grayscale
//! conversion.
//!
//! ## Supported Files
//!
//! - `BITMAPFILEHEADER` + 40-byte `BITMAPINFOHEADER`
//! - 1, 4 and 8-bit indexed images (2, 16, 256-entry palettes)
//! - 24-bit BGR images (no palette)
//! - Bottom-up (positive height) and top-down (negative height) row order
//!
//! Images are kept as stored: headers, palette and the padded pixel block
//! are read and written byte for byte, so `load` followed by `save` yields
//! an identical file.
//!
//! ## Non-Goals
//!
//! - Compressed variants (RLE, bitfields, embedded JPEG/PNG)
//! - 16 and 32-bit images
//! - Gamma-correct luminance
//! - Formats other than BMP
//!
//! ## Usage
//!
//! ```no_run
//! use graybmp::BitmapImage;
//!
//! let image = BitmapImage::load("parrots.bmp")?;
//! println!("{}", image.header_dump());
//!
//! let gray = image.to_grayscale()?;
//! gray.save("parrots8bit.bmp")?;
//! # Ok::<(), graybmp::BitmapError>(())
//! ```

#![forbid(unsafe_code)]

mod error;
mod grayscale;
mod image;
mod limits;
mod load;
mod pixel;

pub mod bmp;

// Re-exports
pub use bmp::{FileHeader, InfoHeader, Palette, PaletteEntry, Validation};
pub use error::{BitmapError, Result};
pub use grayscale::{luma, to_grayscale};
pub use image::{BitmapImage, HeaderDump};
pub use limits::Limits;
pub use load::LoadRequest;
pub use pixel::BitDepth;
