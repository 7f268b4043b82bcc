use crate::session::messages::{Msg, ToolbarMsg};
use crate::session::state::Phase;
use crate::widget::text_editor::{Key, KeyInput};

/// Map a key press outside the text editor to a session message
pub fn handle_key_event(phase: &Phase, input: &KeyInput) -> Option<Msg> {
    // Tool and save shortcuts need a committed selection
    let has_selection = matches!(phase, Phase::Selected { .. });
    let command = input.modifiers.ctrl || input.modifiers.meta;

    match &input.key {
        Key::Escape => Some(Msg::Cancel),
        Key::Char(c) if command && c.eq_ignore_ascii_case(&'s') && has_selection => {
            Some(Msg::Toolbar(ToolbarMsg::Save))
        }
        Key::Char(c) if !command && c.eq_ignore_ascii_case(&'d') && has_selection => {
            Some(Msg::Toolbar(ToolbarMsg::Draw))
        }
        Key::Char(c) if !command && c.eq_ignore_ascii_case(&'t') && has_selection => {
            Some(Msg::Toolbar(ToolbarMsg::Text))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Point, SelectionRect};
    use crate::session::state::Tool;
    use crate::widget::text_editor::Modifiers;

    fn selected() -> Phase {
        Phase::Selected {
            rect: SelectionRect {
                x: 0.0,
                y: 0.0,
                w: 50.0,
                h: 50.0,
            },
            tool: Tool::None,
        }
    }

    #[test]
    fn test_escape_cancels_from_any_phase() {
        let escape = KeyInput::plain(Key::Escape);
        assert_eq!(handle_key_event(&Phase::Idle, &escape), Some(Msg::Cancel));
        let selecting = Phase::Selecting {
            anchor: Point::default(),
            rect: None,
        };
        assert_eq!(handle_key_event(&selecting, &escape), Some(Msg::Cancel));
        assert_eq!(handle_key_event(&selected(), &escape), Some(Msg::Cancel));
    }

    #[test]
    fn test_tool_shortcuts_need_selection() {
        let d = KeyInput::plain(Key::Char('d'));
        assert_eq!(handle_key_event(&Phase::Idle, &d), None);
        assert_eq!(
            handle_key_event(&selected(), &d),
            Some(Msg::Toolbar(ToolbarMsg::Draw))
        );
        assert_eq!(
            handle_key_event(&selected(), &KeyInput::plain(Key::Char('T'))),
            Some(Msg::Toolbar(ToolbarMsg::Text))
        );
    }

    #[test]
    fn test_ctrl_s_saves() {
        let ctrl = Modifiers {
            ctrl: true,
            ..Default::default()
        };
        let save = KeyInput::with(Key::Char('s'), ctrl);
        assert_eq!(
            handle_key_event(&selected(), &save),
            Some(Msg::Toolbar(ToolbarMsg::Save))
        );
        assert_eq!(handle_key_event(&Phase::Idle, &save), None);
        assert_eq!(
            handle_key_event(&selected(), &KeyInput::plain(Key::Char('s'))),
            None
        );
    }
}
