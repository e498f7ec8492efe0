//! Event forwarding: window input → one text line on stdout.
//!
//! | event                    | line             |
//! |--------------------------|------------------|
//! | pointer motion           | `@<x>,<y>`       |
//! | button press / release   | `+MOUSE_LEFT` / `-MOUSE_LEFT` |
//! | printable key down / up  | `+a` / `-a`      |
//! | special key down / up    | `+F1` / `-F1`    |
//!
//! Every line is flushed as soon as it is written so the reading process
//! sees events in real time. This path never goes through the command
//! dispatcher.

pub mod convert;

use std::fmt;
use std::io::{self, Write};

pub use convert::{convert_key_event, convert_mouse_event};

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Undefined,
}

impl MouseButton {
    pub fn name(self) -> &'static str {
        match self {
            Self::Left => "MOUSE_LEFT",
            Self::Right => "MOUSE_RIGHT",
            Self::Middle => "MOUSE_MIDDLE",
            Self::Undefined => "MOUSE_UNDEFINED",
        }
    }
}

/// Keys without a printable character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialKey {
    /// F1..F12; other numbers are reported as `KEY_UNKNOWN`.
    F(u8),
    Left,
    Right,
    Up,
    Down,
    PageUp,
    PageDown,
    Home,
    End,
    Insert,
    Unknown,
}

impl SpecialKey {
    pub fn name(self) -> &'static str {
        const F_NAMES: [&str; 12] =
            ["F1", "F2", "F3", "F4", "F5", "F6", "F7", "F8", "F9", "F10", "F11", "F12"];
        match self {
            Self::F(n @ 1..=12) => F_NAMES[usize::from(n) - 1],
            Self::F(_) | Self::Unknown => "KEY_UNKNOWN",
            Self::Left => "LEFT",
            Self::Right => "RIGHT",
            Self::Up => "UP",
            Self::Down => "DOWN",
            Self::PageUp => "PAGEUP",
            Self::PageDown => "PAGEDOWN",
            Self::Home => "HOME",
            Self::End => "END",
            Self::Insert => "INSERT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Special(SpecialKey),
}

/// One forwarded input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputEvent {
    Motion { x: i32, y: i32 },
    Button { button: MouseButton, pressed: bool },
    Key { key: Key, pressed: bool },
}

fn edge(pressed: bool) -> char {
    if pressed { '+' } else { '-' }
}

impl fmt::Display for OutputEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Motion { x, y } => write!(f, "@{x},{y}"),
            Self::Button { button, pressed } => write!(f, "{}{}", edge(pressed), button.name()),
            Self::Key { key: Key::Char(c), pressed } => write!(f, "{}{c}", edge(pressed)),
            Self::Key { key: Key::Special(k), pressed } => write!(f, "{}{}", edge(pressed), k.name()),
        }
    }
}

// =============================================================================
// WRITER
// =============================================================================

/// Writes forwarded events, one flushed line each.
pub struct EventWriter<W> {
    out: W,
}

impl<W: Write> EventWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn emit(&mut self, event: OutputEvent) -> io::Result<()> {
        writeln!(self.out, "{event}")?;
        self.out.flush()
    }

    pub fn emit_all(&mut self, events: &[OutputEvent]) -> io::Result<()> {
        for event in events {
            self.emit(*event)?;
        }
        Ok(())
    }

    /// The underlying sink, shared with command output.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn render(events: &[OutputEvent]) -> String {
        let mut writer = EventWriter::new(Vec::new());
        writer.emit_all(events).unwrap();
        String::from_utf8(writer.into_inner()).unwrap()
    }

    #[test]
    fn test_motion_line() {
        assert_eq!(render(&[OutputEvent::Motion { x: 12, y: -3 }]), "@12,-3\n");
    }

    #[test]
    fn test_button_lines() {
        assert_eq!(
            render(&[
                OutputEvent::Button { button: MouseButton::Left, pressed: true },
                OutputEvent::Button { button: MouseButton::Undefined, pressed: false },
            ]),
            "+MOUSE_LEFT\n-MOUSE_UNDEFINED\n"
        );
    }

    #[test]
    fn test_printable_keys() {
        assert_eq!(render(&[OutputEvent::Key { key: Key::Char('a'), pressed: true }]), "+a\n");
        assert_eq!(render(&[OutputEvent::Key { key: Key::Char(' '), pressed: false }]), "- \n");
    }

    #[test]
    fn test_special_key_names() {
        let cases = [
            (SpecialKey::F(1), "F1"),
            (SpecialKey::F(12), "F12"),
            (SpecialKey::F(13), "KEY_UNKNOWN"),
            (SpecialKey::F(0), "KEY_UNKNOWN"),
            (SpecialKey::PageUp, "PAGEUP"),
            (SpecialKey::PageDown, "PAGEDOWN"),
            (SpecialKey::Insert, "INSERT"),
            (SpecialKey::Unknown, "KEY_UNKNOWN"),
        ];
        for (key, name) in cases {
            assert_eq!(key.name(), name);
        }
        assert_eq!(
            render(&[OutputEvent::Key { key: Key::Special(SpecialKey::Up), pressed: false }]),
            "-UP\n"
        );
    }
}
