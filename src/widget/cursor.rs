//! Pointer affordance for the active tool

use crate::domain::{Cursor, ElementId, Point, ToolMode};
use crate::page::Page;

/// Keeps the custom crosshair and the native cursor in step with the tool
#[derive(Clone, Copy, Debug, Default)]
pub struct CursorPresenter {
    crosshair_visible: bool,
}

impl CursorPresenter {
    /// Selection phase: crosshair shown, native cursor hidden
    pub fn start(page: &mut impl Page) -> Self {
        page.set_visible(ElementId::Crosshair, true);
        page.set_cursor(Cursor::None);
        Self {
            crosshair_visible: true,
        }
    }

    /// Follow the pointer. Runs for every pointer move until teardown.
    pub fn track(&self, page: &mut impl Page, at: Point) {
        page.move_to(ElementId::Crosshair, at);
    }

    pub fn present(&mut self, page: &mut impl Page, tool: ToolMode) {
        let (crosshair, cursor) = match tool {
            ToolMode::Draw => (true, Cursor::None),
            ToolMode::Text => (false, Cursor::Text),
            ToolMode::None => (false, Cursor::Default),
        };
        self.crosshair_visible = crosshair;
        page.set_visible(ElementId::Crosshair, crosshair);
        page.set_cursor(cursor);
    }

    pub fn crosshair_visible(&self) -> bool {
        self.crosshair_visible
    }
}
