//! Screenshot data URLs and PNG encoding

use std::io;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::RgbaImage;

use crate::error::CaptureFailure;

const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Wrap PNG bytes in a base64 data URL
pub fn encode_data_url(png: &[u8]) -> String {
    format!("{PNG_DATA_URL_PREFIX}{}", STANDARD.encode(png))
}

/// Extract the bytes of a base64 `data:image/...` URL
pub fn decode_data_url(url: &str) -> Result<Vec<u8>, CaptureFailure> {
    let (header, payload) = url
        .strip_prefix("data:")
        .and_then(|rest| rest.split_once(','))
        .ok_or(CaptureFailure::MalformedDataUrl)?;
    if !header.starts_with("image/") || !header.ends_with(";base64") {
        return Err(CaptureFailure::MalformedDataUrl);
    }
    Ok(STANDARD.decode(payload.trim())?)
}

/// Decode a screenshot data URL into RGBA pixels
pub fn decode_screenshot(url: &str) -> Result<RgbaImage, CaptureFailure> {
    let bytes = decode_data_url(url)?;
    let rgba = image::load_from_memory(&bytes)?.to_rgba8();
    log::debug!(
        "Screenshot decoded: {}x{} pixels",
        rgba.width(),
        rgba.height()
    );
    Ok(rgba)
}

pub fn write_png<W: io::Write>(w: W, image: &RgbaImage) -> Result<(), png::EncodingError> {
    let mut encoder = png::Encoder::new(w, image.width(), image.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(image.as_raw())
}

pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, CaptureFailure> {
    let mut buffer = Vec::new();
    write_png(&mut buffer, image)?;
    Ok(buffer)
}
