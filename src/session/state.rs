//! Session phase state machine
//!
//! Interaction flags are encoded in [`Phase`] so that only legal combinations
//! exist: a stroke can only be in progress with the draw tool, an editor can
//! only be open with the text tool, and neither while selecting.

use crate::domain::{Color, Point, SelectionRect, ToolMode};
use crate::widget::text_editor::TextEditor;

/// A freehand stroke being drawn
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    /// End of the last stroked segment
    pub last: Point,
    pub color: Color,
    pub width: f32,
}

/// Active tool together with its in-progress work
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Tool {
    #[default]
    None,
    /// `Some` while the pointer is held
    Draw(Option<Stroke>),
    /// `Some` while an editor is open
    Text(Option<TextEditor>),
}

impl Tool {
    pub fn mode(&self) -> ToolMode {
        match self {
            Tool::None => ToolMode::None,
            Tool::Draw(_) => ToolMode::Draw,
            Tool::Text(_) => ToolMode::Text,
        }
    }

    /// Idle tool for `mode`
    pub fn for_mode(mode: ToolMode) -> Self {
        match mode {
            ToolMode::None => Tool::None,
            ToolMode::Draw => Tool::Draw(None),
            ToolMode::Text => Tool::Text(None),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum Phase {
    /// No selection yet, pointer up
    #[default]
    Idle,
    /// Pointer held; `rect` follows the pointer once it moves
    Selecting {
        anchor: Point,
        rect: Option<SelectionRect>,
    },
    /// Selection committed, toolbar shown
    Selected { rect: SelectionRect, tool: Tool },
    /// Toolbar removed, screenshot requested
    Capturing { rect: SelectionRect },
    Destroyed,
}

impl Phase {
    pub fn is_selecting(&self) -> bool {
        matches!(self, Phase::Selecting { .. })
    }

    pub fn is_drawing(&self) -> bool {
        matches!(
            self,
            Phase::Selected {
                tool: Tool::Draw(Some(_)),
                ..
            }
        )
    }

    pub fn is_typing(&self) -> bool {
        matches!(
            self,
            Phase::Selected {
                tool: Tool::Text(Some(_)),
                ..
            }
        )
    }

    pub fn is_capturing(&self) -> bool {
        matches!(self, Phase::Capturing { .. })
    }

    /// The committed selection, if any
    pub fn selection(&self) -> Option<SelectionRect> {
        match self {
            Phase::Selected { rect, .. } | Phase::Capturing { rect } => Some(*rect),
            _ => None,
        }
    }

    pub fn tool_mode(&self) -> ToolMode {
        match self {
            Phase::Selected { tool, .. } => tool.mode(),
            _ => ToolMode::None,
        }
    }
}

/// How a session ended
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Cancelled,
    SelectionTooSmall,
    Saved { filename: String },
    CaptureFailed,
}
