//! Error taxonomy.
//!
//! - [`ServerError`] - fatal for the process, each site with its own exit code
//! - [`CommandError`] - the closed status set a command handler can return
//! - [`DispatchError`] - what the dispatcher reports back to the pump
//!
//! Argument errors and unknown commands never end a session; the pump logs
//! them and moves on to the next line.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

// =============================================================================
// FATAL
// =============================================================================

/// Failures while preparing the input source or the host window, or while
/// the host loop waits for window events.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("mkfifo {}: {source}", path.display())]
    CreateFifo { path: PathBuf, source: io::Error },

    #[error("open(fifo, read|nonblock) {}: {source}", path.display())]
    OpenFifo { path: PathBuf, source: io::Error },

    #[error("fcntl(stdin, F_SETFL, O_NONBLOCK): {0}")]
    NonBlocking(io::Error),

    #[error("terminal setup: {0}")]
    Terminal(io::Error),

    #[error("event loop: {0}")]
    EventLoop(io::Error),
}

impl ServerError {
    /// Process exit code for this failure site.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::CreateFifo { .. } => 2,
            Self::OpenFifo { .. } => 3,
            Self::NonBlocking(_) => 4,
            Self::Terminal(_) => 5,
            Self::EventLoop(_) => 6,
        }
    }
}

// =============================================================================
// COMMANDS
// =============================================================================

/// Status returned by a command handler that did not succeed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("expected {expected} argument(s), got {got}")]
    ParamCount { expected: &'static str, got: usize },

    #[error("cannot parse argument {index}: {value:?}")]
    ParamParse { index: usize, value: String },

    #[error("{0}")]
    Failed(String),
}

impl CommandError {
    pub fn parse(index: usize, value: &str) -> Self {
        Self::ParamParse { index, value: value.to_string() }
    }
}

/// Outcome of dispatching one token list that did not run cleanly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("unknown command: {0}")]
    Unknown(String),

    #[error("{name}: {source}")]
    Command {
        name: &'static str,
        #[source]
        source: CommandError,
    },
}

// =============================================================================
// TESTS
// =============================================================================
