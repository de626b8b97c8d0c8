//! Blocking read helpers that turn short reads into [`BitmapError::Truncated`].

use std::io::{self, Read};

use crate::error::BitmapError;

/// Read until `buf` is full or the stream ends. Returns the bytes read.
pub(crate) fn fill<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Read exactly `buf.len()` bytes; `what` names the structure in the error.
pub(crate) fn read_exact_bytes<R: Read + ?Sized>(
    reader: &mut R,
    buf: &mut [u8],
    what: &'static str,
) -> Result<(), BitmapError> {
    let actual = fill(reader, buf)?;
    if actual < buf.len() {
        return Err(BitmapError::Truncated {
            what,
            needed: buf.len(),
            actual,
        });
    }
    Ok(())
}

pub(crate) fn read_fixed_bytes<const N: usize, R: Read + ?Sized>(
    reader: &mut R,
    what: &'static str,
) -> Result<[u8; N], BitmapError> {
    let mut buf = [0u8; N];
    read_exact_bytes(reader, &mut buf, what)?;
    Ok(buf)
}

/// Largest single reservation made while reading a block.
const RESERVE_STEP: usize = 1 << 20;

/// Read exactly `size` bytes into a new buffer.
///
/// Capacity grows in steps of at most [`RESERVE_STEP`] as bytes arrive, so
/// a short stream is reported as [`BitmapError::Truncated`] however large
/// `size` is. A failed reservation maps to [`BitmapError::Allocation`].
pub(crate) fn read_block<R: Read + ?Sized>(
    reader: &mut R,
    size: usize,
    what: &'static str,
) -> Result<Vec<u8>, BitmapError> {
    let mut buf = Vec::new();
    while buf.len() < size {
        let step = (size - buf.len()).min(RESERVE_STEP);
        buf.try_reserve_exact(step)
            .map_err(|_| BitmapError::Allocation { bytes: size })?;
        let got = Read::take(&mut *reader, step as u64).read_to_end(&mut buf)?;
        if got < step {
            return Err(BitmapError::Truncated {
                what,
                needed: size,
                actual: buf.len(),
            });
        }
    }
    Ok(buf)
}

/// Little-endian field access into a fixed record, by byte offset.
pub(crate) fn u16_at(bytes: &[u8], off: usize) -> u16 {
    u16::from_le_bytes([bytes[off], bytes[off + 1]])
}

pub(crate) fn u32_at(bytes: &[u8], off: usize) -> u32 {
    u32::from_le_bytes([bytes[off], bytes[off + 1], bytes[off + 2], bytes[off + 3]])
}

pub(crate) fn i32_at(bytes: &[u8], off: usize) -> i32 {
    i32::from_le_bytes([bytes[off], bytes[off + 1], bytes[off + 2], bytes[off + 3]])
}
