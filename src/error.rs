use std::io;
use std::path::PathBuf;

/// Errors from BMP loading, saving and conversion.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BitmapError {
    #[error("cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot create {}: {source}", path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("not a BMP file: magic bytes {magic:02X?}, expected \"BM\"")]
    UnrecognizedFormat { magic: [u8; 2] },

    #[error("truncated {what}: need {needed} bytes, got {actual}")]
    Truncated {
        what: &'static str,
        needed: usize,
        actual: usize,
    },

    #[error("failed to allocate {bytes} bytes")]
    Allocation { bytes: usize },

    #[error("unsupported format variant: {0}")]
    UnsupportedVariant(String),

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("inconsistent image parts: {0}")]
    InconsistentImage(String),

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),
}

/// Result alias used throughout the crate.
pub type Result<T, E = BitmapError> = core::result::Result<T, E>;
