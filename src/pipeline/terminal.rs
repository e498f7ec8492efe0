//! Terminal setup and teardown for the host window.
//!
//! stdout carries the event protocol, so every control sequence goes to the
//! controlling terminal (`/dev/tty`) instead. Entering enables raw mode,
//! mouse capture and, where the terminal supports it, key-release
//! reporting. Dropping the handle undoes whatever was enabled.

use std::fs::{File, OpenOptions};
use std::io;

use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use crossterm::terminal;

/// Terminal setup/teardown handle.
pub struct TerminalSetup {
    tty: File,
    is_raw: bool,
    mouse_enabled: bool,
    keyboard_enhanced: bool,
}

impl TerminalSetup {
    /// Open the controlling terminal without changing it.
    pub fn open() -> io::Result<Self> {
        let tty = OpenOptions::new().read(true).write(true).open("/dev/tty")?;
        Ok(Self { tty, is_raw: false, mouse_enabled: false, keyboard_enhanced: false })
    }

    /// Enable raw mode, mouse capture and key-release reporting.
    pub fn enter(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        self.is_raw = true;

        execute!(self.tty, EnableMouseCapture)?;
        self.mouse_enabled = true;

        // Without this, terminals only report key presses.
        if terminal::supports_keyboard_enhancement().unwrap_or(false) {
            execute!(
                self.tty,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
            self.keyboard_enhanced = true;
        } else {
            tracing::info!("terminal does not report key releases; only '+' key events will be sent");
        }
        Ok(())
    }

    /// Restore the terminal.
    pub fn exit(&mut self) -> io::Result<()> {
        if self.keyboard_enhanced {
            execute!(self.tty, PopKeyboardEnhancementFlags)?;
            self.keyboard_enhanced = false;
        }
        if self.mouse_enabled {
            execute!(self.tty, DisableMouseCapture)?;
            self.mouse_enabled = false;
        }
        if self.is_raw {
            terminal::disable_raw_mode()?;
            self.is_raw = false;
        }
        Ok(())
    }

    /// Current size in cells.
    pub fn size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }

    pub fn is_active(&self) -> bool {
        self.is_raw || self.mouse_enabled || self.keyboard_enhanced
    }
}

impl Drop for TerminalSetup {
    fn drop(&mut self) {
        if self.is_active() {
            if let Err(e) = self.exit() {
                tracing::warn!("failed to restore terminal: {e}");
            }
        }
    }
}
