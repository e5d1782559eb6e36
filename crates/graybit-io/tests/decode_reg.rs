//! Pixel decoding regression test
//!
//! Decodes PNG and JPEG files produced by real encoders through the codec
//! adapters and the format-dispatching loader.
//!
//! Run with:
//! ```
//! cargo test -p graybit-io --test decode_reg
//! ```

use graybit_io::{ImageFormat, detect_format, read_image, read_image_mem};
use graybit_test::RegParams;
use graybit_test::fixtures::{self, BitDepth, JpegColorType, PngColorType};
use std::fs;

#[test]
fn decode_reg() {
    let mut rp = RegParams::new("decode");

    // --- Test 1: RGBA PNG decodes losslessly ---
    let src = fixtures::gradient_buffer(37, 23).expect("gradient");
    let png = fixtures::encode_png_rgba(&src).expect("encode rgba png");
    let loaded = read_image_mem(&png, ImageFormat::Png).expect("load rgba png");
    rp.compare_buffers(&src, &loaded.buffer);
    rp.compare_strings(b"32-bit RGBA", loaded.header.depth_description.as_bytes());

    // --- Test 2: Other PNG layouts are widened to RGBA ---
    let gray = [0u8, 100, 200, 255];
    let png = fixtures::encode_png(2, 2, PngColorType::Grayscale, BitDepth::Eight, &gray)
        .expect("encode gray png");
    let loaded = read_image_mem(&png, ImageFormat::Png).expect("load gray png");
    rp.compare_strings(b"8-bit grayscale", loaded.header.depth_description.as_bytes());
    let px = loaded.buffer.get_rgba(1, 1).unwrap_or([0; 4]);
    rp.compare_strings(&[255, 255, 255, 255], &px);
    let px = loaded.buffer.get_rgba(1, 0).unwrap_or([0; 4]);
    rp.compare_strings(&[100, 100, 100, 255], &px);

    let gray_alpha = [10u8, 0, 20, 128];
    let png = fixtures::encode_png(2, 1, PngColorType::GrayscaleAlpha, BitDepth::Eight, &gray_alpha)
        .expect("encode gray+alpha png");
    let loaded = read_image_mem(&png, ImageFormat::Png).expect("load gray+alpha png");
    let px = loaded.buffer.get_rgba(1, 0).unwrap_or([0; 4]);
    rp.compare_strings(&[20, 20, 20, 128], &px);

    let rgb = [1u8, 2, 3, 4, 5, 6];
    let png = fixtures::encode_png(1, 2, PngColorType::Rgb, BitDepth::Eight, &rgb)
        .expect("encode rgb png");
    let loaded = read_image_mem(&png, ImageFormat::Png).expect("load rgb png");
    let px = loaded.buffer.get_rgba(0, 1).unwrap_or([0; 4]);
    rp.compare_strings(&[4, 5, 6, 255], &px);

    // 16-bit samples keep their high byte
    let gray16 = [0x12u8, 0x34, 0xAB, 0xCD];
    let png = fixtures::encode_png(2, 1, PngColorType::Grayscale, BitDepth::Sixteen, &gray16)
        .expect("encode gray16 png");
    let loaded = read_image_mem(&png, ImageFormat::Png).expect("load gray16 png");
    rp.compare_values(16.0, loaded.header.bits_per_pixel.unwrap_or(0) as f64, 0.0);
    let px = loaded.buffer.get_rgba(1, 0).unwrap_or([0; 4]);
    rp.compare_strings(&[0xAB, 0xAB, 0xAB, 255], &px);

    // Palette entries are expanded to RGB
    let palette = [255u8, 0, 0, 0, 255, 0, 0, 0, 255, 9, 8, 7];
    // 2-bit indices 0, 1, 2, 3 packed into one byte
    let png = fixtures::encode_png_indexed(4, 1, BitDepth::Two, &palette, &[0b0001_1011])
        .expect("encode indexed png");
    let loaded = read_image_mem(&png, ImageFormat::Png).expect("load indexed png");
    rp.compare_strings(b"2-bit indexed", loaded.header.depth_description.as_bytes());
    rp.compare_values(2.0, loaded.header.bits_per_pixel.unwrap_or(0) as f64, 0.0);
    for (x, rgb) in palette.chunks_exact(3).enumerate() {
        let px = loaded.buffer.get_rgba(x as u32, 0).unwrap_or([0; 4]);
        rp.compare_strings(&[rgb[0], rgb[1], rgb[2], 255], &px);
    }

    // --- Test 3: RGB JPEG at high quality stays close to the source ---
    let src = fixtures::gradient_buffer(48, 32).expect("gradient");
    let jpeg = fixtures::encode_jpeg_rgb(&src, 100).expect("encode jpeg");
    let loaded = read_image_mem(&jpeg, ImageFormat::Jpeg).expect("load jpeg");
    rp.compare_values(48.0, loaded.buffer.width() as f64, 0.0);
    rp.compare_values(32.0, loaded.buffer.height() as f64, 0.0);
    rp.compare_strings(b"24-bit RGB", loaded.header.depth_description.as_bytes());
    for (x, y) in [(0, 0), (47, 0), (24, 16), (47, 31)] {
        let expected = src.get_rgba(x, y).unwrap_or([0; 4]);
        let actual = loaded.buffer.get_rgba(x, y).unwrap_or([0; 4]);
        for c in 0..3 {
            rp.compare_values(expected[c] as f64, actual[c] as f64, 16.0);
        }
        rp.compare_values(255.0, actual[3] as f64, 0.0);
    }

    // --- Test 4: Grayscale JPEG ---
    let luma = vec![128u8; 16 * 16];
    let jpeg = fixtures::encode_jpeg(16, 16, JpegColorType::Luma, &luma, 90).expect("encode luma");
    let loaded = read_image_mem(&jpeg, ImageFormat::Jpeg).expect("load luma");
    rp.compare_strings(b"8-bit grayscale", loaded.header.depth_description.as_bytes());
    let px = loaded.buffer.get_rgba(8, 8).unwrap_or([0; 4]);
    rp.compare_values(128.0, px[0] as f64, 2.0);
    rp.compare_values(px[0] as f64, px[2] as f64, 0.0);

    // --- Test 5: Loading from disk, by extension and by magic ---
    let dir = std::env::temp_dir().join(format!("graybit-decode-{}", std::process::id()));
    fs::create_dir_all(&dir).expect("create temp dir");
    let gb7 = fixtures::gb7_bytes(2, 1, false, &[0x00, 0x7F]);
    let with_ext = dir.join("sample.gb7");
    let without_ext = dir.join("sample");
    fs::write(&with_ext, &gb7).expect("write gb7");
    fs::write(&without_ext, &gb7).expect("write gb7 without extension");

    let detected = detect_format(&without_ext).expect("detect by magic");
    rp.compare_strings(b"GrayBit-7", detected.name().as_bytes());
    let a = read_image(&with_ext).expect("read by extension");
    let b = read_image(&without_ext).expect("read by magic");
    rp.compare_buffers(&a.buffer, &b.buffer);
    rp.compare_values(
        1.0,
        if a.header.format == ImageFormat::Gb7 { 1.0 } else { 0.0 },
        0.0,
    );
    let _ = fs::remove_dir_all(&dir);

    assert!(rp.cleanup(), "decode regression test failed");
}
