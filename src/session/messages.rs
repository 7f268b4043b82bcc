//! Message types for an overlay session
//!
//! Messages are plain data so they can be replayed from a script; the demo
//! binary deserializes them from JSON.

use serde::{Deserialize, Serialize};

use crate::domain::{Color, FontFamily, FontSize, LineWidth, Point};
use crate::widget::text_editor::KeyInput;
use crate::widget::toolbar::Picker;

/// Pointer input over the raster surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerMsg {
    Down(Point),
    Move(Point),
    Up(Point),
}

/// Toolbar button presses and option controls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolbarMsg {
    /// Toggle the draw tool
    Draw,
    /// Toggle the text tool
    Text,
    Save,
    Cancel,
    Help,
    Color(Picker, Color),
    LineWidth(LineWidth),
    FontSize(FontSize),
    FontFamily(FontFamily),
}

/// Events from the transient text editor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditorMsg {
    /// Deferred focus acquisition fired
    Focus,
    /// The editor lost focus
    Blur,
    /// Text typed or pasted
    Input(String),
}

/// All session messages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Msg {
    Pointer(PointerMsg),
    Key(KeyInput),
    Toolbar(ToolbarMsg),
    Editor(EditorMsg),
    /// Abort the session from any phase
    Cancel,
}

impl Msg {
    pub fn down(x: f32, y: f32) -> Self {
        Msg::Pointer(PointerMsg::Down(Point::new(x, y)))
    }

    pub fn moved(x: f32, y: f32) -> Self {
        Msg::Pointer(PointerMsg::Move(Point::new(x, y)))
    }

    pub fn up(x: f32, y: f32) -> Self {
        Msg::Pointer(PointerMsg::Up(Point::new(x, y)))
    }

    pub fn toolbar(msg: ToolbarMsg) -> Self {
        Msg::Toolbar(msg)
    }

    pub fn editor(msg: EditorMsg) -> Self {
        Msg::Editor(msg)
    }
}

/// Follow-up work the caller must schedule after a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Deliver [`EditorMsg::Focus`] on the next tick
    FocusEditor,
    /// Run [`crate::session::OverlaySession::capture`]
    Capture,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_format() {
        let script = r##"[
            {"pointer": {"down": {"x": 100, "y": 100}}},
            {"toolbar": "draw"},
            {"toolbar": {"color": ["text", "#00ff00"]}},
            {"toolbar": {"line_width": 10}},
            {"editor": {"input": "hi"}},
            {"key": {"key": "escape"}},
            "cancel"
        ]"##;
        let msgs: Vec<Msg> = serde_json::from_str(script).unwrap();
        assert_eq!(msgs[0], Msg::down(100.0, 100.0));
        assert_eq!(msgs[1], Msg::toolbar(ToolbarMsg::Draw));
        assert_eq!(
            msgs[2],
            Msg::toolbar(ToolbarMsg::Color(Picker::Text, Color::rgb(0, 255, 0)))
        );
        assert_eq!(msgs[3], Msg::toolbar(ToolbarMsg::LineWidth(LineWidth::Thick)));
        assert_eq!(msgs[4], Msg::editor(EditorMsg::Input("hi".into())));
        assert_eq!(msgs[6], Msg::Cancel);
    }
}
