//! Page-facing UI pieces owned by a session
//!
//! - Toolbar model (tool buttons, synced option controls)
//! - Cursor presenter (custom crosshair vs native cursors)
//! - Transient text editor

pub mod cursor;
pub mod text_editor;
pub mod toolbar;
