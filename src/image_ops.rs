// Image decode/encode helpers and the brightness/contrast pipeline.
// Everything here is a pure function over in-memory images so the numeric
// behavior can be tested without going through HTTP.

use base64::prelude::{BASE64_STANDARD, Engine as _};
use image::{ImageError, RgbImage};
use std::io::Cursor;

use crate::models::{AdjustmentParams, ChannelHistograms};

pub const HISTOGRAM_BINS: usize = 256;

/// Decodes uploaded bytes into a 3-channel 8-bit image. The container
/// format (PNG/JPEG/BMP/...) is auto-detected from the bytes; alpha
/// channels are dropped by the RGB conversion.
pub fn decode_image(file_data: &[u8]) -> Result<RgbImage, ImageError> {
    let dyn_img = image::load_from_memory(file_data)?;
    Ok(dyn_img.to_rgb8())
}

/// Applies `clip(round(alpha * value + beta), 0, 255)` to every channel of
/// every pixel, producing a new image. The transform is uniform across
/// channels; rounding is to the nearest integer, halves away from zero.
pub fn adjust_brightness_contrast(image: &RgbImage, params: AdjustmentParams) -> RgbImage {
    let mut adjusted = image.clone();

    for value in adjusted.iter_mut() {
        let scaled = (params.alpha * f64::from(*value) + f64::from(params.beta)).round();
        *value = scaled.clamp(0.0, 255.0) as u8;
    }

    adjusted
}

/// Computes the 256-bin histogram of each color channel. Bin i counts
/// pixels whose channel value is exactly i, value 255 included, so every
/// channel sums to width * height.
pub fn channel_histograms(image: &RgbImage) -> ChannelHistograms {
    let mut red = vec![0u64; HISTOGRAM_BINS];
    let mut green = vec![0u64; HISTOGRAM_BINS];
    let mut blue = vec![0u64; HISTOGRAM_BINS];

    for pixel in image.pixels() {
        red[pixel[0] as usize] += 1;
        green[pixel[1] as usize] += 1;
        blue[pixel[2] as usize] += 1;
    }

    ChannelHistograms { blue, green, red }
}

/// Re-encodes the image as PNG and base64-encodes the PNG bytes.
pub fn encode_png_base64(image: &RgbImage) -> Result<String, ImageError> {
    let mut buffer = Cursor::new(Vec::new());
    image.write_to(&mut buffer, image::ImageFormat::Png)?;

    Ok(BASE64_STANDARD.encode(buffer.into_inner()))
}
