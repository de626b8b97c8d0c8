use std::io::Cursor;

use graybmp::*;

fn noise(len: usize, mut state: u32) -> Vec<u8> {
    let mut out = vec![0u8; len];
    for p in out.iter_mut() {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        *p = state as u8;
    }
    out
}

fn palette_for(depth: BitDepth) -> Option<Palette> {
    let count = bmp::palette_entry_count(depth.bits());
    (count > 0).then(|| {
        Palette::new(
            (0..count)
                .map(|i| PaletteEntry {
                    blue: i as u8,
                    green: (i * 7) as u8,
                    red: 255 - i as u8,
                    reserved: 0,
                })
                .collect(),
        )
    })
}

fn sample(width: u32, height: i32, depth: BitDepth) -> BitmapImage {
    let size = bmp::buffer_size(width, height.unsigned_abs(), depth.bits()).unwrap();
    BitmapImage::new(width, height, depth, palette_for(depth), noise(size, 0xDEAD_BEEF)).unwrap()
}

fn header_bytes(width: i32, height: i32, bits_per_pixel: u16) -> Vec<u8> {
    let info = InfoHeader {
        header_size: 40,
        width,
        height,
        planes: 1,
        bits_per_pixel,
        compression: 0,
        image_size: 0,
        x_pixels_per_meter: 0,
        y_pixels_per_meter: 0,
        colors_used: 0,
        colors_important: 0,
    };
    let palette_len = bmp::palette_entry_count(bits_per_pixel);
    let pixel_bytes =
        bmp::buffer_size(width as u32, height.unsigned_abs(), bits_per_pixel).unwrap();
    let file = FileHeader::for_layout(palette_len, pixel_bytes).unwrap();
    let mut out = file.to_bytes().to_vec();
    out.extend_from_slice(&info.to_bytes());
    out
}

#[test]
fn stream_roundtrip_all_depths() {
    for depth in [BitDepth::One, BitDepth::Four, BitDepth::Eight, BitDepth::TwentyFour] {
        for (w, h) in [(1, 1), (3, 2), (7, -5), (33, 4)] {
            let image = sample(w, h, depth);
            let bytes = image.to_bytes();
            let back = BitmapImage::read_from(&mut Cursor::new(&bytes)).unwrap();
            assert_eq!(back, image, "{depth} {w}x{h}");
            assert_eq!(back.to_bytes(), bytes);
        }
    }
}

#[test]
fn file_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("indexed.bmp");
    let image = sample(13, 9, BitDepth::Four);
    image.save(&path).unwrap();

    let on_disk = std::fs::read(&path).unwrap();
    assert_eq!(on_disk.len() as u32, image.file_header().file_size);
    assert_eq!(&on_disk[..2], b"BM");

    let back = BitmapImage::load(&path).unwrap();
    assert_eq!(back, image);
}

#[test]
fn load_save_is_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("src.bmp");
    let dst = dir.path().join("dst.bmp");

    // Odd header values must survive untouched.
    let mut bytes = sample(5, 3, BitDepth::TwentyFour).to_bytes();
    bytes[6] = 0x12; // reserved1
    bytes[38..42].copy_from_slice(&(-7i32).to_le_bytes()); // x resolution
    std::fs::write(&src, &bytes).unwrap();

    BitmapImage::load(&src).unwrap().save(&dst).unwrap();
    assert_eq!(std::fs::read(&dst).unwrap(), bytes);
}

#[test]
fn missing_file_is_open_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.bmp");
    match BitmapImage::load(&path) {
        Err(BitmapError::Open { path: p, .. }) => assert_eq!(p, path),
        other => panic!("expected Open error, got {other:?}"),
    }
}

#[test]
fn unwritable_path_is_create_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no-such-dir").join("out.bmp");
    let err = sample(1, 1, BitDepth::Eight).save(&path).unwrap_err();
    assert!(matches!(err, BitmapError::Create { .. }), "{err:?}");
}

#[test]
fn bad_magic() {
    let mut bytes = sample(2, 2, BitDepth::TwentyFour).to_bytes();
    bytes[0] = b'X';
    bytes[1] = b'X';
    let mut cursor = Cursor::new(&bytes);
    let err = BitmapImage::read_from(&mut cursor).unwrap_err();
    assert!(
        matches!(err, BitmapError::UnrecognizedFormat { magic } if &magic == b"XX"),
        "{err:?}"
    );
    assert_eq!(cursor.position(), 2);
}

#[test]
fn truncated_pixels() {
    let bytes = sample(4, 4, BitDepth::TwentyFour).to_bytes();
    let short = &bytes[..bytes.len() - 5];
    match BitmapImage::read_from(&mut Cursor::new(short)) {
        Err(BitmapError::Truncated {
            what,
            needed,
            actual,
        }) => {
            assert_eq!(what, "pixel data");
            assert_eq!(needed, 48);
            assert_eq!(actual, 43);
        }
        other => panic!("expected Truncated, got {other:?}"),
    }
}

#[test]
fn truncated_palette_and_headers() {
    let bytes = sample(4, 4, BitDepth::Eight).to_bytes();
    for cut in [0, 1, 10, 20, 54, 500] {
        let err = BitmapImage::read_from(&mut Cursor::new(&bytes[..cut])).unwrap_err();
        assert!(matches!(err, BitmapError::Truncated { .. }), "cut {cut}: {err:?}");
    }
}

#[test]
fn trailing_bytes_are_not_consumed() {
    let mut bytes = sample(3, 3, BitDepth::One).to_bytes();
    let len = bytes.len() as u64;
    bytes.extend_from_slice(b"trailer");
    let mut cursor = Cursor::new(&bytes);
    BitmapImage::read_from(&mut cursor).unwrap();
    assert_eq!(cursor.position(), len);
}

#[test]
fn standard_rejects_32_bit() {
    let mut bytes = header_bytes(2, 2, 32);
    bytes.extend_from_slice(&[0u8; 16]);
    let err = BitmapImage::read_from(&mut Cursor::new(&bytes)).unwrap_err();
    assert!(matches!(err, BitmapError::UnsupportedVariant(_)), "{err:?}");
}

#[test]
fn permissive_reads_32_bit_as_raw_block() {
    let mut bytes = header_bytes(2, 2, 32);
    let pixels = noise(16, 7);
    bytes.extend_from_slice(&pixels);
    let image = LoadRequest::new()
        .with_validation(Validation::Permissive)
        .read(&mut Cursor::new(&bytes))
        .unwrap();
    assert_eq!(image.bit_depth(), None);
    assert!(image.palette().is_none());
    assert_eq!(image.pixels(), &pixels[..]);
    assert_eq!(image.to_bytes(), bytes);

    let err = image.to_grayscale().unwrap_err();
    assert!(matches!(err, BitmapError::UnsupportedVariant(_)), "{err:?}");
}

#[test]
fn compressed_24_bit_loads_permissively_but_does_not_convert() {
    let mut bytes = header_bytes(2, 2, 24);
    bytes[30..34].copy_from_slice(&3u32.to_le_bytes()); // BI_BITFIELDS
    bytes.extend_from_slice(&noise(16, 11));

    let err = BitmapImage::read_from(&mut Cursor::new(&bytes)).unwrap_err();
    assert!(matches!(err, BitmapError::UnsupportedVariant(_)), "{err:?}");

    let image = LoadRequest::new()
        .with_validation(Validation::Permissive)
        .read(&mut Cursor::new(&bytes))
        .unwrap();
    assert_eq!(image.bit_depth(), Some(BitDepth::TwentyFour));
    assert_eq!(image.info_header().compression, 3);
    match image.to_grayscale() {
        Err(BitmapError::UnsupportedVariant(msg)) => assert!(msg.contains("compression"), "{msg}"),
        other => panic!("expected UnsupportedVariant, got {other:?}"),
    }
}

#[cfg(target_pointer_width = "64")]
#[test]
fn huge_declared_image_with_few_bytes_is_truncated() {
    // 54-byte header declaring 1_000_000 x 1_000_000 at 24 bpp.
    let mut bytes = header_bytes(1, 1, 24);
    bytes.truncate(54);
    bytes[18..22].copy_from_slice(&1_000_000i32.to_le_bytes());
    bytes[22..26].copy_from_slice(&1_000_000i32.to_le_bytes());
    bytes.extend_from_slice(&[0u8; 16]);

    match BitmapImage::read_from(&mut Cursor::new(&bytes)) {
        Err(BitmapError::Truncated {
            what,
            needed,
            actual,
        }) => {
            assert_eq!(what, "pixel data");
            assert_eq!(needed, 3_000_000_000_000);
            assert_eq!(actual, 16);
        }
        other => panic!("expected Truncated, got {other:?}"),
    }
}

#[test]
fn strict_checks_declared_sizes() {
    let mut bytes = sample(4, 2, BitDepth::TwentyFour).to_bytes();
    let strict = LoadRequest::new().with_validation(Validation::Strict);
    assert!(strict.read(&mut Cursor::new(&bytes)).is_ok());

    // Standard trusts the size field as stored.
    bytes[2..6].copy_from_slice(&9999u32.to_le_bytes());
    assert!(BitmapImage::read_from(&mut Cursor::new(&bytes)).is_ok());
    let err = strict.read(&mut Cursor::new(&bytes)).unwrap_err();
    assert!(matches!(err, BitmapError::InvalidHeader(_)), "{err:?}");
}

#[test]
fn limits_reject_before_reading_pixels() {
    // Header claims 10000x10000 but no pixel data follows.
    let bytes = header_bytes(10_000, 10_000, 24);
    let limits = Limits {
        max_pixels: Some(1_000_000),
        ..Default::default()
    };
    let err = LoadRequest::new()
        .with_limits(&limits)
        .read(&mut Cursor::new(&bytes))
        .unwrap_err();
    assert!(matches!(err, BitmapError::LimitExceeded(_)), "{err:?}");

    let memory = Limits {
        max_memory_bytes: Some(1024),
        ..Default::default()
    };
    let err = LoadRequest::new()
        .with_limits(&memory)
        .read(&mut Cursor::new(&bytes))
        .unwrap_err();
    assert!(matches!(err, BitmapError::LimitExceeded(_)), "{err:?}");
}

#[test]
fn zero_width_is_rejected() {
    let bytes = header_bytes(1, 1, 24);
    let mut patched = bytes.clone();
    patched[18..22].copy_from_slice(&0i32.to_le_bytes());
    let err = BitmapImage::read_from(&mut Cursor::new(&patched)).unwrap_err();
    assert!(matches!(err, BitmapError::InvalidHeader(_)), "{err:?}");
}
