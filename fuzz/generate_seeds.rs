#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn header(width: i32, height: i32, bpp: u16, palette_len: u32, pixel_bytes: u32) -> Vec<u8> {
    let offset = 54 + palette_len * 4;
    let mut bmp = vec![0u8; 54];
    bmp[0] = b'B'; bmp[1] = b'M';
    bmp[2..6].copy_from_slice(&(offset + pixel_bytes).to_le_bytes()); // file size
    bmp[10..14].copy_from_slice(&offset.to_le_bytes()); // data offset
    bmp[14..18].copy_from_slice(&40u32.to_le_bytes()); // info header size
    bmp[18..22].copy_from_slice(&width.to_le_bytes());
    bmp[22..26].copy_from_slice(&height.to_le_bytes());
    bmp[26..28].copy_from_slice(&1u16.to_le_bytes()); // planes
    bmp[28..30].copy_from_slice(&bpp.to_le_bytes());
    bmp[34..38].copy_from_slice(&pixel_bytes.to_le_bytes());
    bmp
}

fn main() {
    use std::fs;
    for dir in ["fuzz/corpus/fuzz_load", "fuzz/corpus/fuzz_roundtrip"] {
        fs::create_dir_all(dir).unwrap();

        // 1x1 24-bit: 3 bytes BGR + 1 padding
        let mut rgb = header(1, 1, 24, 0, 4);
        rgb.extend_from_slice(&[0xff, 0x00, 0x00, 0x00]);
        fs::write(format!("{dir}/bmp24_1x1.bmp"), rgb).unwrap();

        // 2x2 top-down 24-bit
        let mut top_down = header(2, -2, 24, 0, 16);
        top_down.extend_from_slice(&[0, 0, 255, 255, 0, 0, 0, 0, 0, 255, 0, 0, 0, 0, 0, 0]);
        fs::write(format!("{dir}/bmp24_2x2_topdown.bmp"), top_down).unwrap();

        // 8x1 1-bit with black/white palette
        let mut mono = header(8, 1, 1, 2, 4);
        mono.extend_from_slice(&[0, 0, 0, 0, 255, 255, 255, 0]);
        mono.extend_from_slice(&[0b1010_1010, 0, 0, 0]);
        fs::write(format!("{dir}/bmp1_8x1.bmp"), mono).unwrap();

        // 3x1 8-bit grayscale
        let mut gray = header(3, 1, 8, 256, 4);
        for i in 0..=255u8 {
            gray.extend_from_slice(&[i, i, i, 0]);
        }
        gray.extend_from_slice(&[0, 128, 255, 0]);
        fs::write(format!("{dir}/bmp8_3x1.bmp"), gray).unwrap();

        // Truncated/malformed seeds for edge coverage
        fs::write(format!("{dir}/empty.bin"), b"").unwrap();
        fs::write(format!("{dir}/bad_magic.bin"), b"XX\x00\x00").unwrap();
        fs::write(format!("{dir}/bm_short.bin"), b"BM\x00\x00").unwrap();
        fs::write(format!("{dir}/header_only.bin"), header(4, 4, 24, 0, 48)).unwrap();
    }

    println!("Generated seed corpus in fuzz/corpus/");
}
