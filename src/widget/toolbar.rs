//! Toolbar model shown once a selection is committed
//!
//! Holds the state of the tool buttons and option controls. Option changes
//! are written into the session's shared [`ToolOptions`] and only affect ink
//! drawn afterwards.

use serde::{Deserialize, Serialize};

use crate::domain::{Color, FontFamily, FontSize, LineWidth, ToolMode, ToolOptions};
use crate::page::Node;

/// Usage notice shown by the help button
pub const HELP_TEXT: &str = "Draw: drag inside the page to sketch. \
Text: click to place a text box, Enter to finish, Shift+Enter for a new line. \
Save downloads a screenshot of the visible page with the dimming and your annotations, \
Cancel discards everything.";

/// Buttons on the toolbar, in display order
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToolbarButton {
    Draw,
    Text,
    Save,
    Cancel,
    Help,
}

impl ToolbarButton {
    pub const ALL: [ToolbarButton; 5] = [
        ToolbarButton::Draw,
        ToolbarButton::Text,
        ToolbarButton::Save,
        ToolbarButton::Cancel,
        ToolbarButton::Help,
    ];
}

/// Which of the two mirrored color pickers was used
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Picker {
    Draw,
    Text,
}

/// Rendered state of the toolbar
#[derive(Clone, Debug, PartialEq)]
pub struct ToolbarView {
    pub active: ToolMode,
    pub draw_options_visible: bool,
    pub text_options_visible: bool,
    pub draw_color: Color,
    pub text_color: Color,
    pub line_width: LineWidth,
    pub font_size: FontSize,
    pub font_family: FontFamily,
}

impl ToolbarView {
    /// Whether a button carries the `active` class
    pub fn is_active(&self, button: ToolbarButton) -> bool {
        match button {
            ToolbarButton::Draw => self.active == ToolMode::Draw,
            ToolbarButton::Text => self.active == ToolMode::Text,
            _ => false,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Toolbar {
    view: ToolbarView,
}

impl Toolbar {
    pub fn new(options: &ToolOptions) -> Self {
        Self {
            view: ToolbarView {
                active: ToolMode::None,
                draw_options_visible: false,
                text_options_visible: false,
                draw_color: options.color,
                text_color: options.color,
                line_width: options.line_width,
                font_size: options.font_size,
                font_family: options.font_family,
            },
        }
    }

    pub fn view(&self) -> &ToolbarView {
        &self.view
    }

    pub fn node(&self) -> Node {
        Node::Toolbar(self.view.clone())
    }

    /// Highlight the active tool and show its option group
    pub fn set_active(&mut self, tool: ToolMode) {
        self.view.active = tool;
        self.view.draw_options_visible = tool == ToolMode::Draw;
        self.view.text_options_visible = tool == ToolMode::Text;
    }

    /// Apply a color from either picker. Both pickers always show the same color.
    pub fn set_color(&mut self, options: &mut ToolOptions, picker: Picker, color: Color) {
        log::debug!("Color {color} picked from {picker:?} picker");
        options.color = color;
        self.view.draw_color = color;
        self.view.text_color = color;
    }

    pub fn set_line_width(&mut self, options: &mut ToolOptions, width: LineWidth) {
        options.line_width = width;
        self.view.line_width = width;
    }

    pub fn set_font_size(&mut self, options: &mut ToolOptions, size: FontSize) {
        options.font_size = size;
        self.view.font_size = size;
    }

    pub fn set_font_family(&mut self, options: &mut ToolOptions, family: FontFamily) {
        options.font_family = family;
        self.view.font_family = family;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_pickers_are_mirrored() {
        let mut options = ToolOptions::default();
        let mut toolbar = Toolbar::new(&options);
        let green = Color::rgb(0, 255, 0);

        toolbar.set_color(&mut options, Picker::Text, green);
        assert_eq!(options.color, green);
        assert_eq!(toolbar.view().draw_color, green);
        assert_eq!(toolbar.view().text_color, green);

        let blue = Color::rgb(0, 0, 255);
        toolbar.set_color(&mut options, Picker::Draw, blue);
        assert_eq!(toolbar.view().text_color, blue);
    }

    #[test]
    fn test_active_tool_classes() {
        let mut toolbar = Toolbar::new(&ToolOptions::default());
        toolbar.set_active(ToolMode::Draw);
        let view = toolbar.view();
        assert!(view.is_active(ToolbarButton::Draw));
        assert!(!view.is_active(ToolbarButton::Text));
        assert!(view.draw_options_visible && !view.text_options_visible);

        toolbar.set_active(ToolMode::None);
        assert!(!toolbar.view().draw_options_visible);
        assert!(
            ToolbarButton::ALL
                .iter()
                .all(|b| !toolbar.view().is_active(*b))
        );
    }

    #[test]
    fn test_help_describes_what_save_exports() {
        assert!(HELP_TEXT.contains("screenshot of the visible page"));
        assert!(!HELP_TEXT.contains("selected region"));
    }
}
