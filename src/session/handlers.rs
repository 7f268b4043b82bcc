//! Message handlers for an overlay session
//!
//! Pointer, keyboard, toolbar and editor messages all land here. Each handler
//! runs to completion before the next message is delivered, so the phase and
//! the shared options need no locking.

use crate::domain::{ElementId, Point, SelectionRect, ToolMode, ToolOptions};
use crate::error::AnnotationRenderFailure;
use crate::page::Page;
use crate::render::text::{self, TextBlock};
use crate::session::messages::{Effect, EditorMsg, Msg, PointerMsg, ToolbarMsg};
use crate::session::overlay::OverlaySession;
use crate::session::resources::Resource;
use crate::session::shortcuts;
use crate::session::state::{Outcome, Phase, Stroke, Tool};
use crate::widget::text_editor::{EditorKey, KeyInput, TextEditor};
use crate::widget::toolbar::{HELP_TEXT, Toolbar};

impl<P: Page> OverlaySession<P> {
    /// Handle one message and report the follow-up work it needs
    pub fn update(&mut self, msg: Msg) -> Effect {
        match self.phase {
            Phase::Destroyed => {
                log::debug!("Ignoring {msg:?} after teardown");
                return Effect::None;
            }
            // No mid-flight cancellation once the screenshot is requested
            Phase::Capturing { .. } => {
                log::debug!("Ignoring {msg:?} while capturing");
                return Effect::None;
            }
            _ => {}
        }

        match msg {
            Msg::Pointer(pointer) => self.handle_pointer(pointer),
            Msg::Key(input) => self.handle_key(input),
            Msg::Toolbar(toolbar) => self.handle_toolbar(toolbar),
            Msg::Editor(editor) => {
                self.handle_editor(editor);
                Effect::None
            }
            Msg::Cancel => {
                self.cancel();
                Effect::None
            }
        }
    }

    // ========================================================================
    // Pointer handlers
    // ========================================================================

    fn handle_pointer(&mut self, msg: PointerMsg) -> Effect {
        match msg {
            PointerMsg::Down(at) => return self.pointer_down(at),
            PointerMsg::Move(at) => self.pointer_move(at),
            PointerMsg::Up(_) => self.pointer_up(),
        }
        Effect::None
    }

    fn pointer_down(&mut self, at: Point) -> Effect {
        match &mut self.phase {
            Phase::Idle => {
                log::debug!("Selection started at {at:?}");
                self.phase = Phase::Selecting {
                    anchor: at,
                    rect: None,
                };
            }
            Phase::Selected {
                tool: Tool::Draw(stroke @ None),
                ..
            } => {
                *stroke = Some(Stroke {
                    last: at,
                    color: self.options.color,
                    width: self.options.line_width.px() as f32,
                });
            }
            Phase::Selected {
                tool: Tool::Text(editor @ None),
                ..
            } => {
                let spawned = TextEditor::new(at, &self.options);
                self.resources
                    .mount(&mut self.page, ElementId::TextEditor, spawned.node());
                *editor = Some(spawned);
                return Effect::FocusEditor;
            }
            // An open editor swallows pointer-downs
            _ => {}
        }
        Effect::None
    }

    fn pointer_move(&mut self, at: Point) {
        self.cursor.track(&mut self.page, at);
        match &mut self.phase {
            Phase::Selecting { anchor, rect } => {
                let next = SelectionRect::from_corners(*anchor, at);
                *rect = Some(next);
                self.surface.redraw(Some(&next));
            }
            Phase::Selected {
                tool: Tool::Draw(Some(stroke)),
                ..
            } => {
                self.surface
                    .stroke_segment(stroke.last, at, stroke.color, stroke.width);
                stroke.last = at;
            }
            _ => {}
        }
    }

    fn pointer_up(&mut self) {
        match &mut self.phase {
            Phase::Selecting { rect, .. } => {
                let min = self.config.min_selection;
                match rect.filter(|r| r.exceeds(min)) {
                    Some(rect) => self.commit_selection(rect),
                    None => {
                        log::debug!("Selection {rect:?} too small, cancelling");
                        self.finish(Outcome::SelectionTooSmall);
                    }
                }
            }
            Phase::Selected {
                tool: Tool::Draw(stroke),
                ..
            } => {
                stroke.take();
            }
            _ => {}
        }
    }

    fn commit_selection(&mut self, rect: SelectionRect) {
        log::debug!("Selection committed: {rect:?}");
        self.surface.commit(&rect);
        self.phase = Phase::Selected {
            rect,
            tool: Tool::None,
        };
        // The surface draws the dim layer from here on
        self.page.set_visible(ElementId::Overlay, false);

        let toolbar = Toolbar::new(&self.options);
        self.resources
            .mount(&mut self.page, ElementId::Toolbar, toolbar.node());
        self.toolbar = Some(toolbar);
        self.present_tool(ToolMode::None);
    }

    // ========================================================================
    // Tool handlers
    // ========================================================================

    fn handle_toolbar(&mut self, msg: ToolbarMsg) -> Effect {
        if self.toolbar.is_none() {
            log::debug!("Ignoring {msg:?} without a toolbar");
            return Effect::None;
        }
        // Pressing anything on the toolbar takes focus from an open editor
        self.finish_editor();

        match msg {
            ToolbarMsg::Draw => self.toggle_tool(ToolMode::Draw),
            ToolbarMsg::Text => self.toggle_tool(ToolMode::Text),
            ToolbarMsg::Save => return self.begin_save(),
            ToolbarMsg::Cancel => self.cancel(),
            ToolbarMsg::Help => self.page.alert(HELP_TEXT),
            ToolbarMsg::Color(picker, color) => {
                self.edit_options(|toolbar, options| toolbar.set_color(options, picker, color))
            }
            ToolbarMsg::LineWidth(width) => {
                self.edit_options(|toolbar, options| toolbar.set_line_width(options, width))
            }
            ToolbarMsg::FontSize(size) => {
                self.edit_options(|toolbar, options| toolbar.set_font_size(options, size))
            }
            ToolbarMsg::FontFamily(family) => {
                self.edit_options(|toolbar, options| toolbar.set_font_family(options, family))
            }
        }
        Effect::None
    }

    fn toggle_tool(&mut self, requested: ToolMode) {
        self.finish_editor();
        let Phase::Selected { tool, .. } = &mut self.phase else {
            return;
        };
        let next = tool.mode().toggled(requested);
        *tool = Tool::for_mode(next);
        log::debug!("Active tool: {next:?}");
        self.present_tool(next);
    }

    fn present_tool(&mut self, mode: ToolMode) {
        self.cursor.present(&mut self.page, mode);
        if let Some(toolbar) = &mut self.toolbar {
            toolbar.set_active(mode);
            self.page.update(ElementId::Toolbar, toolbar.node());
        }
    }

    fn edit_options(&mut self, edit: impl FnOnce(&mut Toolbar, &mut ToolOptions)) {
        if let Some(toolbar) = &mut self.toolbar {
            edit(toolbar, &mut self.options);
            self.page.update(ElementId::Toolbar, toolbar.node());
        }
    }

    fn begin_save(&mut self) -> Effect {
        let Some(rect) = self.phase.selection() else {
            return Effect::None;
        };
        // Keep the toolbar out of the captured pixels
        if self.toolbar.take().is_some() {
            self.resources
                .release(&mut self.page, Resource::Element(ElementId::Toolbar));
        }
        self.cursor.present(&mut self.page, ToolMode::None);
        self.phase = Phase::Capturing { rect };
        log::debug!("Save requested for {rect:?}");
        Effect::Capture
    }

    // ========================================================================
    // Keyboard and editor handlers
    // ========================================================================

    fn handle_key(&mut self, input: KeyInput) -> Effect {
        if let Some(editor) = self.open_editor_mut() {
            match editor.key(&input) {
                EditorKey::Finish => self.finish_editor(),
                EditorKey::Edited => self.sync_editor(),
            }
            return Effect::None;
        }
        match shortcuts::handle_key_event(&self.phase, &input) {
            Some(msg) => self.update(msg),
            None => Effect::None,
        }
    }

    fn handle_editor(&mut self, msg: EditorMsg) {
        let Some(editor) = self.open_editor_mut() else {
            log::debug!("Ignoring {msg:?} without an open editor");
            return;
        };
        match msg {
            EditorMsg::Focus => {
                editor.focus();
                self.sync_editor();
            }
            EditorMsg::Blur if editor.is_focused() => self.finish_editor(),
            EditorMsg::Blur => log::debug!("Ignoring blur before focus was acquired"),
            EditorMsg::Input(text) => {
                editor.insert(&text);
                self.sync_editor();
            }
        }
    }

    fn open_editor_mut(&mut self) -> Option<&mut TextEditor> {
        match &mut self.phase {
            Phase::Selected {
                tool: Tool::Text(Some(editor)),
                ..
            } => Some(editor),
            _ => None,
        }
    }

    fn sync_editor(&mut self) {
        if let Phase::Selected {
            tool: Tool::Text(Some(editor)),
            ..
        } = &self.phase
        {
            self.page.update(ElementId::TextEditor, editor.node());
        }
    }

    /// Close the open editor, baking its text into the surface.
    ///
    /// The editor node is removed and the typing guard cleared whether or not
    /// rasterization succeeds.
    pub(crate) fn finish_editor(&mut self) {
        let Phase::Selected {
            tool: Tool::Text(slot),
            ..
        } = &mut self.phase
        else {
            return;
        };
        let Some(editor) = slot.take() else {
            return;
        };

        if editor.has_content()
            && let Err(err) = self.rasterize_text(&editor)
        {
            log::error!("Error drawing text: {err}");
        }
        self.resources
            .release(&mut self.page, Resource::Element(ElementId::TextEditor));
    }

    fn rasterize_text(&mut self, editor: &TextEditor) -> Result<(), AnnotationRenderFailure> {
        let font = self.fonts.face(self.options.font_family)?;
        let size = self.options.font_size.px() as f32;
        let anchor = editor.anchor();
        let block = TextBlock {
            text: editor.text(),
            origin: Point::new(
                anchor.x + self.config.text_offset,
                anchor.y + self.config.text_offset,
            ),
            font_size: size,
            line_pitch: size * self.config.line_pitch,
            color: self.options.color,
            family: self.options.font_family,
        };
        text::draw_text(self.surface.pixmap_mut(), font, &block)
    }
}
