//! # cmdline-gl
//!
//! Remote-control a graphics window through a pipe.
//!
//! Commands arrive one per line on stdin (or a named FIFO), are split on
//! spaces, looked up in a command table and executed. Window input comes
//! back out on stdout as one line per event.
//!
//! ## Architecture
//!
//! ```text
//! stdin / FIFO ──► LineReader ──► split ──► CommandRegistry::dispatch
//!                        ▲                         │
//!                        │ tick()                  ├─► Graphics backend
//!                   Host event loop                ├─► Session (exit, blocks)
//!                        │                         └─► stdout (echo, gettime)
//!                        └─► mouse / keys ──► EventWriter ──► stdout
//! ```
//!
//! Everything runs on one thread. The host calls [`InputPump::tick`] at its
//! own cadence; each tick drains at most a batch of lines so a burst of input
//! cannot starve event forwarding.
//!
//! ## Modules
//!
//! - [`input`] - non-blocking line reader, tokenizer, stdin/FIFO source
//! - [`command`] - command table, dispatcher, built-in commands
//! - [`pipeline`] - session state, input pump, host loop, terminal setup
//! - [`events`] - mouse/keyboard → text line encoding
//! - [`render`] - rendering backend interface and projection math

#[cfg(not(unix))]
compile_error!("cmdline-gl needs a unix platform (FIFOs and O_NONBLOCK descriptors)");

pub mod command;
pub mod config;
pub mod error;
pub mod events;
pub mod input;
pub mod pipeline;
pub mod render;

pub use command::{CommandRegistry, Context};
pub use config::{Mode, Options, ServerConfig};
pub use error::{CommandError, DispatchError, ServerError};
pub use events::{EventWriter, OutputEvent};
pub use input::{InputSource, LineReader, ReadLine};
pub use pipeline::{EventSource, Host, InputPump, Session, TickOutcome, TickReport};
pub use render::{Graphics, TraceGraphics};
