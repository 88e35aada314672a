use image::codecs::jpeg::JpegEncoder;
use image::DynamicImage;
use std::path::Path;

use crate::errors::{TaggerError, TaggerResult};

/// Compression quality used for uploads, on the encoder's 1..=100 scale.
pub const DEFAULT_JPEG_QUALITY: u8 = 50;

/// Decode image bytes in any supported format and re-encode them as JPEG.
pub fn encode_jpeg(image_bytes: &[u8], quality: u8) -> TaggerResult<Vec<u8>> {
    let image = image::load_from_memory(image_bytes)?;
    encode_image(&image, quality)
}

/// Encode an already decoded image as JPEG.
pub fn encode_image(image: &DynamicImage, quality: u8) -> TaggerResult<Vec<u8>> {
    if !(1..=100).contains(&quality) {
        return Err(TaggerError::Encode(format!(
            "quality must be between 1 and 100, got {}",
            quality
        )));
    }
    if image.width() == 0 || image.height() == 0 {
        return Err(TaggerError::Encode("image has no pixels".to_string()));
    }

    // JPEG has no alpha channel
    let rgb = image.to_rgb8();
    let mut output = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut output, quality);
    rgb.write_with_encoder(encoder)?;

    Ok(output)
}

pub fn load_image_file(path: &Path) -> TaggerResult<Vec<u8>> {
    std::fs::read(path)
        .map_err(|e| TaggerError::Encode(format!("could not read {}: {}", path.display(), e)))
}
