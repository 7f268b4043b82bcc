//! Transient text input that is baked into the surface when finished

use serde::{Deserialize, Serialize};

use crate::domain::{Color, FontFamily, FontSize, Point, ToolOptions};
use crate::page::Node;

/// Border drawn around the otherwise transparent input
pub const EDITOR_BORDER: &str = "2px dashed #ccc";

/// Keys the editor and the shortcut handler understand
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Key {
    Enter,
    Escape,
    Backspace,
    Char(char),
}

/// Modifier state of a key press
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub fn any(&self) -> bool {
        self.shift || self.ctrl || self.alt || self.meta
    }
}

/// A key press
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyInput {
    pub key: Key,
    #[serde(default)]
    pub modifiers: Modifiers,
}

impl KeyInput {
    pub fn plain(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::default(),
        }
    }

    pub fn with(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }
}

/// What a key press did to the editor
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditorKey {
    /// Content changed or the key was absorbed
    Edited,
    /// Plain Enter: finish editing
    Finish,
}

/// Rendered state of the input element
#[derive(Clone, Debug, PartialEq)]
pub struct EditorView {
    pub position: Point,
    pub text: String,
    pub color: Color,
    pub font_size: FontSize,
    pub font_family: FontFamily,
    pub border: &'static str,
    pub focused: bool,
}

/// Focus is acquired one tick after creation so the pointer-down that spawned
/// the editor cannot immediately blur it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Focus {
    Pending,
    Focused,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextEditor {
    anchor: Point,
    text: String,
    style: ToolOptions,
    focus: Focus,
}

impl TextEditor {
    pub fn new(anchor: Point, options: &ToolOptions) -> Self {
        Self {
            anchor,
            text: String::new(),
            style: *options,
            focus: Focus::Pending,
        }
    }

    pub fn anchor(&self) -> Point {
        self.anchor
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn focus(&mut self) {
        self.focus = Focus::Focused;
    }

    pub fn is_focused(&self) -> bool {
        self.focus == Focus::Focused
    }

    /// Append typed or pasted text
    pub fn insert(&mut self, s: &str) {
        self.text.push_str(s);
    }

    pub fn key(&mut self, input: &KeyInput) -> EditorKey {
        match &input.key {
            Key::Enter if input.modifiers.any() => {
                self.text.push('\n');
                EditorKey::Edited
            }
            Key::Enter => EditorKey::Finish,
            Key::Backspace => {
                self.text.pop();
                EditorKey::Edited
            }
            Key::Char(c) => {
                self.text.push(*c);
                EditorKey::Edited
            }
            Key::Escape => EditorKey::Edited,
        }
    }

    /// Whether there is anything besides whitespace to rasterize
    pub fn has_content(&self) -> bool {
        !self.text.trim().is_empty()
    }

    pub fn node(&self) -> Node {
        Node::TextEditor(EditorView {
            position: self.anchor,
            text: self.text.clone(),
            color: self.style.color,
            font_size: self.style.font_size,
            font_family: self.style.font_family,
            border: EDITOR_BORDER,
            focused: self.is_focused(),
        })
    }
}
