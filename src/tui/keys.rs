//! Terminal key decoding
//!
//! Raw crossterm events become the wizard's abstract [`KeyAction`]s here.
//! Plain characters are passed through undecoded; whether `q` quits or lands
//! in a search query is the wizard's call, not the terminal layer's.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::wizard::KeyAction;

/// Decode one key event; `None` for releases, repeats and unbound keys
pub fn decode(event: &KeyEvent) -> Option<KeyAction> {
    if event.kind != KeyEventKind::Press {
        return None;
    }

    Some(match event.code {
        KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => {
            KeyAction::Interrupt
        }
        KeyCode::Enter | KeyCode::Right => KeyAction::Confirm,
        KeyCode::Left => KeyAction::Back,
        KeyCode::Up => KeyAction::Up,
        KeyCode::Down => KeyAction::Down,
        KeyCode::Esc => KeyAction::Cancel,
        KeyCode::Backspace => KeyAction::Backspace,
        KeyCode::Char(c) => KeyAction::Char(c),
        _ => return None,
    })
}
