//! crossterm events → forwarded output events.
//!
//! - `convert_mouse_event` - button edges, drags and wheel clicks
//! - `convert_key_event` - key presses and releases; repeats are dropped
//!
//! Pointer motion is only reported while a button is held (drag) and just
//! before every button edge. The wheel has no named button, so one notch
//! becomes a `MOUSE_UNDEFINED` press immediately followed by its release.

use crossterm::event::{
    KeyCode, KeyEvent as CrosstermKeyEvent, KeyEventKind, KeyModifiers,
    MouseButton as CrosstermMouseButton, MouseEvent as CrosstermMouseEvent, MouseEventKind,
};

use super::{Key, MouseButton, OutputEvent, SpecialKey};

// =============================================================================
// MOUSE EVENT CONVERSION
// =============================================================================

/// Convert a crossterm mouse event into zero or more output events.
pub fn convert_mouse_event(event: CrosstermMouseEvent) -> Vec<OutputEvent> {
    let motion = OutputEvent::Motion { x: i32::from(event.column), y: i32::from(event.row) };

    match event.kind {
        MouseEventKind::Down(btn) => vec![
            motion,
            OutputEvent::Button { button: convert_mouse_button(btn), pressed: true },
        ],
        MouseEventKind::Up(btn) => vec![
            motion,
            OutputEvent::Button { button: convert_mouse_button(btn), pressed: false },
        ],
        MouseEventKind::Drag(_) => vec![motion],
        MouseEventKind::Moved => Vec::new(),
        MouseEventKind::ScrollUp
        | MouseEventKind::ScrollDown
        | MouseEventKind::ScrollLeft
        | MouseEventKind::ScrollRight => vec![
            motion,
            OutputEvent::Button { button: MouseButton::Undefined, pressed: true },
            OutputEvent::Button { button: MouseButton::Undefined, pressed: false },
        ],
    }
}

fn convert_mouse_button(btn: CrosstermMouseButton) -> MouseButton {
    match btn {
        CrosstermMouseButton::Left => MouseButton::Left,
        CrosstermMouseButton::Right => MouseButton::Right,
        CrosstermMouseButton::Middle => MouseButton::Middle,
    }
}

// =============================================================================
// KEY EVENT CONVERSION
// =============================================================================

/// Convert a crossterm key event. Returns `None` for auto-repeat.
pub fn convert_key_event(event: CrosstermKeyEvent) -> Option<OutputEvent> {
    let pressed = match event.kind {
        KeyEventKind::Press => true,
        KeyEventKind::Release => false,
        KeyEventKind::Repeat => return None,
    };

    let key = match event.code {
        KeyCode::Char(c) => Key::Char(control_char(c, event.modifiers)),
        KeyCode::Enter => Key::Char('\r'),
        KeyCode::Tab => Key::Char('\t'),
        KeyCode::Backspace => Key::Char('\x08'),
        KeyCode::Esc => Key::Char('\x1b'),
        KeyCode::Delete => Key::Char('\x7f'),
        KeyCode::F(n) => Key::Special(SpecialKey::F(n)),
        KeyCode::Left => Key::Special(SpecialKey::Left),
        KeyCode::Right => Key::Special(SpecialKey::Right),
        KeyCode::Up => Key::Special(SpecialKey::Up),
        KeyCode::Down => Key::Special(SpecialKey::Down),
        KeyCode::PageUp => Key::Special(SpecialKey::PageUp),
        KeyCode::PageDown => Key::Special(SpecialKey::PageDown),
        KeyCode::Home => Key::Special(SpecialKey::Home),
        KeyCode::End => Key::Special(SpecialKey::End),
        KeyCode::Insert => Key::Special(SpecialKey::Insert),
        _ => Key::Special(SpecialKey::Unknown),
    };

    Some(OutputEvent::Key { key, pressed })
}

/// Ctrl+letter is reported as the ASCII control character.
fn control_char(c: char, mods: KeyModifiers) -> char {
    if mods.contains(KeyModifiers::CONTROL) && c.is_ascii_alphabetic() {
        char::from(c.to_ascii_lowercase() as u8 & 0x1f)
    } else {
        c
    }
}

// =============================================================================
// TESTS
// =============================================================================
