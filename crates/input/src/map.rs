//! Key and mouse mapping from terminal events to game actions.

use crate::types::GameAction;
use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

/// Map keyboard input to game actions. Key releases map to nothing.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    let KeyCode::Char(ch) = key.code else {
        return match key.code {
            KeyCode::Left => Some(GameAction::MoveLeft),
            KeyCode::Right => Some(GameAction::MoveRight),
            KeyCode::Up => Some(GameAction::Rotate),
            KeyCode::Down => Some(GameAction::Step),
            _ => None,
        };
    };
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }
    match ch.to_ascii_lowercase() {
        'h' | 'a' => Some(GameAction::MoveLeft),
        'l' | 'd' => Some(GameAction::MoveRight),
        'k' | 'w' => Some(GameAction::Rotate),
        'j' | 's' => Some(GameAction::Step),
        ' ' => Some(GameAction::Drop),
        _ => None,
    }
}

/// Map a mouse event to a column change.
///
/// A left press or drag moves the piece to the board column under the
/// pointer; `column_for` converts a terminal column into a board column.
pub fn handle_mouse_event(mouse: MouseEvent, column_for: impl Fn(u16) -> i32) -> Option<GameAction> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) | MouseEventKind::Drag(MouseButton::Left) => {
            Some(GameAction::SetColumn(column_for(mouse.column)))
        }
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    if key.kind == KeyEventKind::Release {
        return false;
    }
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::from(code)
    }

    fn mouse(kind: MouseEventKind, column: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row: 3,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_movement_keys() {
        for code in [KeyCode::Left, KeyCode::Char('h'), KeyCode::Char('A')] {
            assert_eq!(handle_key_event(key(code)), Some(GameAction::MoveLeft));
        }
        for code in [KeyCode::Right, KeyCode::Char('L'), KeyCode::Char('d')] {
            assert_eq!(handle_key_event(key(code)), Some(GameAction::MoveRight));
        }
        for code in [KeyCode::Down, KeyCode::Char('j'), KeyCode::Char('S')] {
            assert_eq!(handle_key_event(key(code)), Some(GameAction::Step));
        }
    }

    #[test]
    fn test_rotate_and_drop_keys() {
        for code in [KeyCode::Up, KeyCode::Char('K'), KeyCode::Char('w')] {
            assert_eq!(handle_key_event(key(code)), Some(GameAction::Rotate));
        }
        assert_eq!(
            handle_key_event(key(KeyCode::Char(' '))),
            Some(GameAction::Drop)
        );
        assert_eq!(handle_key_event(key(KeyCode::Char('x'))), None);
        assert_eq!(handle_key_event(key(KeyCode::Enter)), None);
    }

    #[test]
    fn test_release_and_control_are_ignored() {
        let release = KeyEvent {
            code: KeyCode::Left,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(handle_key_event(release), None);
        assert_eq!(
            handle_key_event(KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL)),
            None
        );
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(key(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(key(KeyCode::Char('c'))));
        assert!(!should_quit(key(KeyCode::Char('x'))));
    }

    #[test]
    fn test_mouse_drag_sets_column() {
        let to_column = |x: u16| (x as i32 - 10) / 2;
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), 14), to_column),
            Some(GameAction::SetColumn(2))
        );
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::Drag(MouseButton::Left), 20), to_column),
            Some(GameAction::SetColumn(5))
        );
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Right), 20), to_column),
            None
        );
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::Moved, 20), to_column),
            None
        );
    }
}
