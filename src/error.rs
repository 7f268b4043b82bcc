//! Failure kinds surfaced by the overlay

use std::path::PathBuf;

use thiserror::Error;

/// The screenshot could not be obtained or turned into an artifact
///
/// Shown to the user as a blocking notice, never retried, always followed by
/// teardown.
#[derive(Debug, Error)]
pub enum CaptureFailure {
    #[error("capture relay reported an error: {0}")]
    Relay(String),
    #[error("capture relay sent no response")]
    NoResponse,
    #[error("screenshot is not a base64 PNG data URL")]
    MalformedDataUrl,
    #[error("screenshot payload is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("could not decode screenshot: {0}")]
    Decode(#[from] image::ImageError),
    #[error("could not encode capture: {0}")]
    Encode(#[from] png::EncodingError),
}

/// Text could not be rasterized onto the surface
///
/// Logged only. It never reaches the user and never blocks cleanup.
#[derive(Debug, Error)]
pub enum AnnotationRenderFailure {
    #[error("no font available for {0}")]
    NoFont(&'static str),
    #[error("invalid font data for {0}")]
    InvalidFont(&'static str),
    #[error("could not read font file {path}: {source}")]
    FontFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
