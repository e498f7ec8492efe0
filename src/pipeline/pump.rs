//! Input Pump: drains the command pipe once per host tick.
//!
//! ```text
//!            tick()
//!   Idle ───────────► Draining ──┬─ would block / batch cap ──► Idle
//!                                │
//!                                └─ shutdown flag set ──► ShuttingDown
//!                                        (close input, unlink FIFO)
//!                                                 │
//!                                                 ▼
//!                                            Terminated
//! ```
//!
//! Per tick at most `batch_cap` lines are dispatched, except while a
//! `glBegin`/`glEnd` block is open: then draining continues until the pipe
//! runs dry so the block is applied within one tick. Lines beyond the cap
//! stay buffered and run on the next tick, in order.

use std::io::{Read, Write};

use crate::command::{CommandRegistry, Context};
use crate::input::{split, LineReader, ReadLine};
use crate::render::Graphics;

use super::session::Session;

/// Default number of lines dispatched per tick.
pub const DEFAULT_BATCH_CAP: usize = 20;

// =============================================================================
// Types
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PumpState {
    Idle,
    Draining,
    ShuttingDown,
    Terminated,
}

/// Why a tick stopped pulling lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// No complete line available right now.
    WouldBlock,
    /// `batch_cap` lines dispatched with no graphics block open.
    BatchCap,
    /// The input stream reported end of file.
    EndOfStream,
    /// A read failed with something other than would-block.
    ReadError,
    /// The pump had already terminated; nothing was read.
    Terminated,
}

/// What the host should do after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Keep running; call `tick` again later.
    Idle,
    /// The session is over and the input is closed.
    Shutdown,
}

/// Summary of one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    /// Lines consumed, empty ones included.
    pub processed: usize,
    pub stop: StopReason,
    pub outcome: TickOutcome,
}

impl TickReport {
    pub fn is_shutdown(&self) -> bool {
        self.outcome == TickOutcome::Shutdown
    }
}

// =============================================================================
// Pump
// =============================================================================

pub struct InputPump<R> {
    reader: Option<LineReader<R>>,
    registry: CommandRegistry,
    session: Session,
    batch_cap: usize,
    state: PumpState,
}

impl<R: Read> InputPump<R> {
    /// Pump reading from `source`. A `batch_cap` of zero is treated as one.
    pub fn new(source: R, registry: CommandRegistry, session: Session, batch_cap: usize) -> Self {
        Self {
            reader: Some(LineReader::new(source)),
            registry,
            session,
            batch_cap: batch_cap.max(1),
            state: PumpState::Idle,
        }
    }

    pub fn state(&self) -> PumpState {
        self.state
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Drain available lines, dispatching each one.
    ///
    /// `out` receives command output; `gfx` receives rendering calls.
    /// Never blocks on input. Only `sync`/`sleep` handlers sleep.
    pub fn tick(&mut self, out: &mut dyn Write, gfx: &mut dyn Graphics) -> TickReport {
        let Some(reader) = self.reader.as_mut() else {
            return TickReport { processed: 0, stop: StopReason::Terminated, outcome: TickOutcome::Shutdown };
        };

        self.state = PumpState::Draining;
        let mut processed = 0;

        let stop = loop {
            if processed >= self.batch_cap && !self.session.in_graphics_block() {
                break StopReason::BatchCap;
            }

            let line = match reader.next_line() {
                Ok(ReadLine::Line(line)) => line,
                Ok(ReadLine::Pending) => break StopReason::WouldBlock,
                Ok(ReadLine::Closed) => break StopReason::EndOfStream,
                Err(e) => {
                    tracing::error!("input read failed: {e}");
                    break StopReason::ReadError;
                }
            };

            tracing::debug!("{line}");
            let tokens = split(&line);
            if tokens.is_empty() {
                tracing::debug!("empty line ignored");
            } else {
                if tokens.truncated() {
                    tracing::warn!(kept = tokens.len(), "too many arguments, extra tokens dropped");
                }
                let mut ctx = Context { session: &mut self.session, out: &mut *out, gfx: &mut *gfx };
                if let Err(e) = self.registry.dispatch(&mut ctx, &tokens) {
                    tracing::warn!("{e}");
                }
            }
            processed += 1;
        };

        if matches!(stop, StopReason::EndOfStream | StopReason::ReadError) {
            tracing::debug!("received EOF");
            if self.session.terminate_on_eof() {
                self.session.request_shutdown();
            }
        }

        if self.session.shutdown_requested() {
            self.state = PumpState::ShuttingDown;
            tracing::debug!("shutting down");
            // Dropping the reader closes the descriptor (and unlinks the FIFO).
            self.reader = None;
            self.state = PumpState::Terminated;
            return TickReport { processed, stop, outcome: TickOutcome::Shutdown };
        }

        self.state = PumpState::Idle;
        TickReport { processed, stop, outcome: TickOutcome::Idle }
    }
}

// =============================================================================
// Tests
// =============================================================================
