//! Command input: pipe → lines → tokens.
//!
//! ```text
//! stdin / FIFO (O_NONBLOCK)
//!     │ raw bytes
//!     ▼
//! LineReader ── Pending (would block) / Closed (EOF)
//!     │ one line
//!     ▼
//! tokenizer::split ── Tokens (≤ MAX_PARAMS + 1 slices)
//! ```

pub mod reader;
pub mod source;
pub mod tokenizer;

pub use reader::{LineReader, ReadLine};
pub use source::{FifoGuard, InputSource};
pub use tokenizer::{split, Tokens, MAX_PARAMS, MAX_TOKENS};
