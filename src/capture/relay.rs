//! Capture relay protocol
//!
//! The relay is the privileged side that can read back the visible viewport.
//! A request goes out, at most one response comes back; no response at all is
//! reported as `None` and treated as a failure by the caller.

use std::path::PathBuf;

use futures::channel::oneshot;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::capture::image::encode_data_url;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelayAction {
    #[serde(rename = "captureVisibleTab")]
    CaptureVisibleTab,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayRequest {
    pub action: RelayAction,
}

impl RelayRequest {
    pub fn capture_visible_tab() -> Self {
        Self {
            action: RelayAction::CaptureVisibleTab,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RelayResponse {
    Image {
        #[serde(rename = "imageDataUrl")]
        image_data_url: String,
    },
    Error {
        error: String,
    },
}

/// Something that can return a full-viewport screenshot
#[allow(async_fn_in_trait)]
pub trait CaptureRelay {
    /// Send a request; `None` if the relay never answered
    async fn send(&self, request: RelayRequest) -> Option<RelayResponse>;
}

/// A request waiting for the privileged side to answer
#[derive(Debug)]
pub struct RelayEnvelope {
    pub request: RelayRequest,
    pub reply: oneshot::Sender<RelayResponse>,
}

/// Relay that forwards requests over a channel
///
/// Dropping an envelope without replying counts as a missing response.
#[derive(Clone, Debug)]
pub struct ChannelRelay {
    tx: mpsc::UnboundedSender<RelayEnvelope>,
}

impl ChannelRelay {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<RelayEnvelope>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl CaptureRelay for ChannelRelay {
    async fn send(&self, request: RelayRequest) -> Option<RelayResponse> {
        let (reply, response) = oneshot::channel();
        if self.tx.send(RelayEnvelope { request, reply }).is_err() {
            log::warn!("Capture relay is gone");
            return None;
        }
        response.await.ok()
    }
}

/// Relay answering every request with a PNG read from disk
#[derive(Clone, Debug)]
pub struct FileRelay {
    path: PathBuf,
}

impl FileRelay {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CaptureRelay for FileRelay {
    async fn send(&self, request: RelayRequest) -> Option<RelayResponse> {
        log::debug!("{request:?} served from {}", self.path.display());
        let path = self.path.clone();
        let read = tokio::task::spawn_blocking(move || std::fs::read(path)).await;
        Some(match read {
            Ok(Ok(bytes)) => RelayResponse::Image {
                image_data_url: encode_data_url(&bytes),
            },
            Ok(Err(err)) => RelayResponse::Error {
                error: err.to_string(),
            },
            Err(err) => RelayResponse::Error {
                error: err.to_string(),
            },
        })
    }
}

/// Relay that always reports the same error
#[derive(Clone, Debug)]
pub struct FailingRelay {
    message: String,
}

impl FailingRelay {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl CaptureRelay for FailingRelay {
    async fn send(&self, _request: RelayRequest) -> Option<RelayResponse> {
        Some(RelayResponse::Error {
            error: self.message.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format() {
        let request = serde_json::to_string(&RelayRequest::capture_visible_tab()).unwrap();
        assert_eq!(request, r#"{"action":"captureVisibleTab"}"#);

        let ok: RelayResponse =
            serde_json::from_str(r#"{"imageDataUrl":"data:image/png;base64,AA=="}"#).unwrap();
        assert_eq!(
            ok,
            RelayResponse::Image {
                image_data_url: "data:image/png;base64,AA==".into()
            }
        );
        let err: RelayResponse = serde_json::from_str(r#"{"error":"denied"}"#).unwrap();
        assert_eq!(
            err,
            RelayResponse::Error {
                error: "denied".into()
            }
        );
    }

    #[tokio::test]
    async fn test_channel_relay_reply() {
        let (relay, mut rx) = ChannelRelay::new();
        tokio::spawn(async move {
            while let Some(envelope) = rx.recv().await {
                assert_eq!(envelope.request.action, RelayAction::CaptureVisibleTab);
                let _ = envelope.reply.send(RelayResponse::Error {
                    error: "no tab".into(),
                });
            }
        });
        let response = relay.send(RelayRequest::capture_visible_tab()).await;
        assert_eq!(
            response,
            Some(RelayResponse::Error {
                error: "no tab".into()
            })
        );
    }

    #[tokio::test]
    async fn test_channel_relay_missing_response() {
        let (relay, mut rx) = ChannelRelay::new();
        tokio::spawn(async move {
            // Receive and drop without answering
            while let Some(envelope) = rx.recv().await {
                drop(envelope);
            }
        });
        assert_eq!(relay.send(RelayRequest::capture_visible_tab()).await, None);

        let (relay, rx) = ChannelRelay::new();
        drop(rx);
        assert_eq!(relay.send(RelayRequest::capture_visible_tab()).await, None);
    }

    #[tokio::test]
    async fn test_file_relay() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shot.png");
        std::fs::write(&path, b"png bytes").unwrap();
        match FileRelay::new(&path)
            .send(RelayRequest::capture_visible_tab())
            .await
        {
            Some(RelayResponse::Image { image_data_url }) => {
                assert!(image_data_url.starts_with("data:image/png;base64,"))
            }
            other => panic!("unexpected {other:?}"),
        }

        let missing = FileRelay::new(dir.path().join("missing.png"))
            .send(RelayRequest::capture_visible_tab())
            .await;
        assert!(matches!(missing, Some(RelayResponse::Error { .. })));
    }
}
