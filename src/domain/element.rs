//! Page element identifiers, cursors and listeners owned by a session

use std::fmt;

use serde::{Deserialize, Serialize};

/// Well-known identifiers of the nodes a session inserts into the page
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ElementId {
    Overlay,
    Canvas,
    Crosshair,
    Toolbar,
    Stylesheet,
    TextEditor,
}

impl ElementId {
    /// DOM id attribute of the node
    pub fn as_str(self) -> &'static str {
        match self {
            ElementId::Overlay => "snipping-overlay",
            ElementId::Canvas => "annotation-canvas",
            ElementId::Crosshair => "custom-crosshair",
            ElementId::Toolbar => "annotation-toolbar",
            ElementId::Stylesheet => "annotation-stylesheet",
            ElementId::TextEditor => "annotation-textbox",
        }
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.as_str())
    }
}

/// Page elements whose computed background drives theme detection
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageElement {
    /// The root content element (`<body>`)
    Body,
    /// The document root element (`<html>`)
    Root,
}

/// Native pointer affordance over the raster surface
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Cursor {
    #[default]
    Default,
    /// Native cursor hidden, the custom crosshair stands in for it
    None,
    Text,
}

/// Event listeners a session installs on the page
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ListenerKind {
    /// Document-level pointer tracking for the crosshair
    CrosshairTracking,
    /// Pointer down/move/up on the raster surface
    CanvasPointer,
    /// Keyboard shortcuts
    Keyboard,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dom_ids_are_stable() {
        let ids = [
            (ElementId::Overlay, "snipping-overlay"),
            (ElementId::Canvas, "annotation-canvas"),
            (ElementId::Crosshair, "custom-crosshair"),
            (ElementId::Toolbar, "annotation-toolbar"),
            (ElementId::Stylesheet, "annotation-stylesheet"),
            (ElementId::TextEditor, "annotation-textbox"),
        ];
        for (id, dom) in ids {
            assert_eq!(id.as_str(), dom);
        }
        assert_eq!(ElementId::Canvas.to_string(), "#annotation-canvas");
    }
}
