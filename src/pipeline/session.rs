//! Session state shared by the pump and the command handlers.
//!
//! One `Session` per process, owned by the [`InputPump`](super::InputPump)
//! and lent to each handler for the duration of one dispatch. Everything
//! runs on the host's single thread, so plain `&mut` access is enough.

use std::time::{Duration, Instant};

bitflags::bitflags! {
    /// Session switches.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct SessionFlags: u8 {
        /// `-t`: end the session when the input stream closes.
        const TERMINATE_ON_EOF = 1 << 0;
        /// Set by `exit` (or EOF with `TERMINATE_ON_EOF`); observed at the end of a tick.
        const SHUTDOWN         = 1 << 1;
        /// Between `glBegin` and `glEnd`; the batch cap is suspended.
        const IN_GRAPHICS_BLOCK = 1 << 2;
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    flags: SessionFlags,
    started: Instant,
}

impl Session {
    pub fn new(terminate_on_eof: bool) -> Self {
        let mut flags = SessionFlags::empty();
        flags.set(SessionFlags::TERMINATE_ON_EOF, terminate_on_eof);
        Self { flags, started: Instant::now() }
    }

    pub fn flags(&self) -> SessionFlags {
        self.flags
    }

    /// Time since the session started. Monotonic.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn terminate_on_eof(&self) -> bool {
        self.flags.contains(SessionFlags::TERMINATE_ON_EOF)
    }

    pub fn request_shutdown(&mut self) {
        self.flags.insert(SessionFlags::SHUTDOWN);
    }

    pub fn shutdown_requested(&self) -> bool {
        self.flags.contains(SessionFlags::SHUTDOWN)
    }

    pub fn in_graphics_block(&self) -> bool {
        self.flags.contains(SessionFlags::IN_GRAPHICS_BLOCK)
    }

    pub fn set_graphics_block(&mut self, open: bool) {
        self.flags.set(SessionFlags::IN_GRAPHICS_BLOCK, open);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_flags() {
        let session = Session::new(false);
        assert_eq!(session.flags(), SessionFlags::empty());
        assert!(Session::new(true).terminate_on_eof());
    }

    #[test]
    fn test_shutdown_is_sticky() {
        let mut session = Session::new(false);
        session.request_shutdown();
        session.set_graphics_block(true);
        session.set_graphics_block(false);
        assert!(session.shutdown_requested());
        assert!(!session.in_graphics_block());
    }
}
