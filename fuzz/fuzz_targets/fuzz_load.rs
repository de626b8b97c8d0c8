#![no_main]
use std::io::Cursor;

use graybmp::{Limits, LoadRequest, Validation};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let limits = Limits {
        max_memory_bytes: Some(64 << 20),
        ..Default::default()
    };
    // Every validation level must reject bad input without panicking.
    for validation in [Validation::Strict, Validation::Standard, Validation::Permissive] {
        let loaded = LoadRequest::new()
            .with_validation(validation)
            .with_limits(&limits)
            .read(&mut Cursor::new(data));
        if let Ok(image) = loaded {
            let _ = image.to_grayscale();
        }
    }
});
