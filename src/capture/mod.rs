//! Screenshot capture and export module
//!
//! This module contains:
//! - Capture relay protocol and relay implementations (relay.rs)
//! - Screenshot data URL and PNG helpers (image.rs)
//! - Screenshot plus annotation compositing (compositor.rs)
//! - Writing downloads to disk (download.rs)

pub mod compositor;
pub mod download;
pub mod image;
pub mod relay;

pub use compositor::{Artifact, CAPTURE_FAILED_NOTICE};
pub use relay::{CaptureRelay, ChannelRelay, FailingRelay, FileRelay, RelayRequest, RelayResponse};
