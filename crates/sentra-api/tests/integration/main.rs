//! Integration tests.
//!
//! Run with:
//!   cargo test -p sentra-api --test integration

mod api_tests;
mod stream_tests;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, GrayImage, ImageEncoder};

/// Encode a grayscale frame as a data-URL text message.
pub fn data_url(frame: &GrayImage) -> String {
    let mut png = Vec::new();
    PngEncoder::new(&mut png)
        .write_image(
            frame.as_raw(),
            frame.width(),
            frame.height(),
            ExtendedColorType::L8,
        )
        .unwrap();
    format!("data:image/png;base64,{}", BASE64.encode(&png))
}

/// A flat synthetic scene.
pub fn flat_frame(value: u8) -> GrayImage {
    GrayImage::from_pixel(160, 120, image::Luma([value]))
}

/// The flat scene with an injected bright square well above the alert
/// threshold (50x50 boundary area = 2401 px^2).
pub fn bright_frame(value: u8) -> GrayImage {
    let mut frame = flat_frame(value);
    for y in 30..80 {
        for x in 30..80 {
            frame.put_pixel(x, y, image::Luma([255]));
        }
    }
    frame
}
