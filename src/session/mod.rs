//! Overlay session management module
//!
//! This module contains:
//! - Session phase state machine
//! - Message types for pointer, keyboard, toolbar and editor input
//! - Message handlers and keyboard shortcuts
//! - Scoped page resources released on teardown
//! - The async dispatch loop glue

pub mod driver;
pub mod handlers;
pub mod messages;
pub mod overlay;
pub mod resources;
pub mod shortcuts;
pub mod state;

pub use messages::{Effect, EditorMsg, Msg, PointerMsg, ToolbarMsg};
pub use overlay::{Injection, OverlaySession};
pub use state::{Outcome, Phase, Stroke, Tool};
