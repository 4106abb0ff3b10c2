//! Frame decoding.
//!
//! The image codec is an opaque dependency: any container the `image` crate
//! understands (JPEG, PNG, ...) is accepted and converted to 8-bit grayscale
//! for the background model.

use image::GrayImage;

use crate::error::{VisionError, VisionResult};

/// Decode raw image bytes into a grayscale frame.
pub fn decode_frame(bytes: &[u8]) -> VisionResult<GrayImage> {
    let img = image::load_from_memory(bytes)?;
    let gray = img.to_luma8();
    if gray.width() == 0 || gray.height() == 0 {
        return Err(VisionError::EmptyFrame {
            width: gray.width(),
            height: gray.height(),
        });
    }
    Ok(gray)
}
