//! Host event loop: the single thread that drives everything.
//!
//! ```text
//! loop {
//!     terminal event ready within `tick`?  ──► forward to stdout / reshape
//!     pump.tick()                          ──► drain ≤ batch_cap lines
//!     Shutdown?                            ──► leave, restore terminal
//! }
//! ```
//!
//! Without a terminal to capture events from, the loop sleeps for `tick`
//! between pump ticks instead. The pump never blocks on input, so the
//! only stalls are `sync`/`sleep` commands.

use std::io::{self, Read, Write};
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event};

use crate::events::{convert_key_event, convert_mouse_event, EventWriter};
use crate::render::{projection_for, Graphics};

use super::pump::{InputPump, StopReason};
use super::terminal::TerminalSetup;

/// Window size assumed when no terminal is attached.
pub const DEFAULT_WINDOW_SIZE: (u32, u32) = (500, 501);

/// Where host events come from.
pub enum EventSource {
    /// Raw-mode terminal: mouse, keys and resizes are forwarded.
    Terminal(TerminalSetup),
    /// No event capture; the loop only ticks the pump.
    Headless,
}

impl EventSource {
    /// Open and configure the controlling terminal.
    ///
    /// Falls back to [`EventSource::Headless`] if there is no controlling
    /// terminal. Errors only if the terminal exists but cannot be set up.
    pub fn terminal() -> io::Result<Self> {
        let mut setup = match TerminalSetup::open() {
            Ok(setup) => setup,
            Err(e) => {
                tracing::warn!("no controlling terminal ({e}); running headless");
                return Ok(Self::Headless);
            }
        };
        setup.enter()?;
        Ok(Self::Terminal(setup))
    }

    fn window_size(&self) -> (u32, u32) {
        match self {
            Self::Terminal(setup) => match setup.size() {
                Ok((w, h)) => (u32::from(w), u32::from(h)),
                Err(_) => DEFAULT_WINDOW_SIZE,
            },
            Self::Headless => DEFAULT_WINDOW_SIZE,
        }
    }
}

/// Drives the pump and forwards window events until the session ends.
pub struct Host<W, G> {
    source: EventSource,
    events: EventWriter<W>,
    gfx: G,
    tick: Duration,
}

impl<W: Write, G: Graphics> Host<W, G> {
    pub fn new(source: EventSource, out: W, gfx: G, tick: Duration) -> Self {
        Self { source, events: EventWriter::new(out), gfx, tick }
    }

    /// Run until the pump reports shutdown.
    pub fn run<R: Read>(&mut self, pump: &mut InputPump<R>) -> io::Result<()> {
        let (w, h) = self.source.window_size();
        self.reshape(w, h);

        let mut backlog = false;
        loop {
            // A capped tick left lines behind; come straight back for them.
            let wait = if backlog { Duration::ZERO } else { self.tick };
            self.wait_for_events(wait)?;

            let report = pump.tick(self.events.get_mut(), &mut self.gfx);
            if report.is_shutdown() {
                tracing::debug!(processed = report.processed, "session ended");
                return Ok(());
            }
            backlog = report.stop == StopReason::BatchCap;
        }
    }

    pub fn graphics(&self) -> &G {
        &self.gfx
    }

    /// Forward every event that arrives within `wait`.
    fn wait_for_events(&mut self, wait: Duration) -> io::Result<()> {
        if matches!(self.source, EventSource::Headless) {
            if !wait.is_zero() {
                thread::sleep(wait);
            }
            return Ok(());
        }

        let mut timeout = wait;
        while event::poll(timeout)? {
            let ev = event::read()?;
            self.handle(ev)?;
            timeout = Duration::ZERO;
        }
        Ok(())
    }

    fn handle(&mut self, ev: Event) -> io::Result<()> {
        match ev {
            Event::Mouse(mouse) => self.events.emit_all(&convert_mouse_event(mouse)),
            Event::Key(key) => match convert_key_event(key) {
                Some(out) => self.events.emit(out),
                None => Ok(()),
            },
            Event::Resize(w, h) => {
                self.reshape(u32::from(w), u32::from(h));
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn reshape(&mut self, width: u32, height: u32) {
        let (viewport, frustum) = projection_for(width, height);
        self.gfx.reshape(viewport, frustum);
    }
}
