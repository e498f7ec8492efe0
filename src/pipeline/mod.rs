//! Runtime pipeline: one thread, cooperative.
//!
//! ```text
//! Host loop ──► terminal events ──► EventWriter ──► stdout
//!     │
//!     └──► InputPump::tick ──► LineReader ──► split ──► dispatch ──► handler
//!                                                                     │
//!                                                  stdout / Graphics / Session
//! ```
//!
//! The host decides the cadence; the pump tolerates ticks that find no
//! input and never blocks waiting for any.

pub mod host;
pub mod pump;
pub mod session;
pub mod terminal;

pub use host::{EventSource, Host};
pub use pump::{InputPump, PumpState, StopReason, TickOutcome, TickReport, DEFAULT_BATCH_CAP};
pub use session::{Session, SessionFlags};
pub use terminal::TerminalSetup;
