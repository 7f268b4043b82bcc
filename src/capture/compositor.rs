//! Final screenshot plus annotation merge

use image::RgbaImage;
use image::imageops::{self, FilterType};

use crate::capture::image::{decode_screenshot, encode_png};
use crate::capture::relay::{CaptureRelay, RelayRequest, RelayResponse};
use crate::domain::Viewport;
use crate::error::CaptureFailure;
use crate::page::Page;
use crate::session::{Outcome, OverlaySession};

pub const CAPTURE_FAILED_NOTICE: &str =
    "Could not capture the page. Try reloading the page and attempting again.";

/// An encoded capture ready to be downloaded
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Artifact {
    pub filename: String,
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

pub fn capture_filename(epoch_ms: i64) -> String {
    format!("capture-{epoch_ms}.png")
}

/// Draw the screenshot into a viewport sized buffer, then the annotations on top
pub fn composite(screenshot: RgbaImage, annotations: &RgbaImage, viewport: Viewport) -> RgbaImage {
    let mut base = if screenshot.dimensions() == (viewport.width, viewport.height) {
        screenshot
    } else {
        log::debug!(
            "Scaling {}x{} screenshot to {}x{} viewport",
            screenshot.width(),
            screenshot.height(),
            viewport.width,
            viewport.height
        );
        imageops::resize(
            &screenshot,
            viewport.width,
            viewport.height,
            FilterType::Lanczos3,
        )
    };
    imageops::overlay(&mut base, annotations, 0, 0);
    base
}

/// Turn a relay response into an encoded artifact
pub fn build_artifact(
    response: Option<RelayResponse>,
    annotations: &RgbaImage,
    viewport: Viewport,
    epoch_ms: i64,
) -> Result<Artifact, CaptureFailure> {
    let url = match response {
        Some(RelayResponse::Image { image_data_url }) => image_data_url,
        Some(RelayResponse::Error { error }) => return Err(CaptureFailure::Relay(error)),
        None => return Err(CaptureFailure::NoResponse),
    };
    let screenshot = decode_screenshot(&url)?;
    let merged = composite(screenshot, annotations, viewport);
    Ok(Artifact {
        filename: capture_filename(epoch_ms),
        png: encode_png(&merged)?,
        width: merged.width(),
        height: merged.height(),
    })
}

impl<P: Page> OverlaySession<P> {
    /// Request the screenshot, merge it and download the result
    ///
    /// Only runs after a save moved the session into its capturing phase. The
    /// session is torn down afterwards whatever the relay answered.
    pub async fn capture<R: CaptureRelay>(&mut self, relay: &R) -> Option<Artifact> {
        if !self.phase.is_capturing() {
            log::debug!("No save pending, not capturing");
            return None;
        }

        // Give the page a moment to repaint without the toolbar
        tokio::time::sleep(self.config.capture_delay()).await;
        let response = relay.send(RelayRequest::capture_visible_tab()).await;

        let viewport = self.page.viewport();
        let annotations = self.surface.to_rgba_image();
        let epoch_ms = chrono::Utc::now().timestamp_millis();
        match build_artifact(response, &annotations, viewport, epoch_ms) {
            Ok(artifact) => {
                log::info!(
                    "Captured {}x{} as {}",
                    artifact.width,
                    artifact.height,
                    artifact.filename
                );
                self.page.download(&artifact.filename, artifact.png.clone());
                self.finish(Outcome::Saved {
                    filename: artifact.filename.clone(),
                });
                Some(artifact)
            }
            Err(err) => {
                log::error!("Capture failed: {err}");
                self.page.alert(CAPTURE_FAILED_NOTICE);
                self.finish(Outcome::CaptureFailed);
                None
            }
        }
    }
}
