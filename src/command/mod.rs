//! Commands: registry, dispatch and the built-in catalog.
//!
//! ```text
//! Tokens ──► CommandRegistry::dispatch ──► handler(ctx, args)
//!                   │                          │
//!             Unknown(name)            Ok / CommandError
//! ```
//!
//! - [`builtins`] - `exit`, `gettime`, `sync`, `sleep`, `echo`
//! - [`graphics`] - `glBegin`/`glEnd` and friends, plus the `GL_*` constants

pub mod args;
pub mod builtins;
pub mod dispatch;
pub mod graphics;
pub mod registry;

pub use graphics::{dump_constants, lookup_const, CONSTANTS};
pub use registry::{Command, CommandKind, CommandRegistry, Context, Handler};
