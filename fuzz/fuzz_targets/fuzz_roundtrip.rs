#![no_main]
use std::io::Cursor;

use graybmp::{Limits, LoadRequest, Validation};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Anything that loads must serialize back to exactly the bytes consumed.
    let limits = Limits {
        max_memory_bytes: Some(64 << 20),
        ..Default::default()
    };
    let mut cursor = Cursor::new(data);
    let Ok(image) = LoadRequest::new()
        .with_validation(Validation::Permissive)
        .with_limits(&limits)
        .read(&mut cursor)
    else {
        return;
    };

    let consumed = cursor.position() as usize;
    let written = image.to_bytes();
    assert_eq!(&written[..], &data[..consumed], "roundtrip byte mismatch");

    let again = LoadRequest::new()
        .with_validation(Validation::Permissive)
        .read(&mut Cursor::new(&written))
        .expect("re-serialized image failed to load");
    assert_eq!(again, image);
});
