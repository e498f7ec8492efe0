//! Command Registry - name → handler table.
//!
//! Built once at startup from static entries and never modified afterwards.
//! Every handler has the same shape: it borrows a [`Context`] (session,
//! output sink, rendering backend) and the argument tokens, and returns
//! `Ok(())` or a [`CommandError`].

use std::collections::BTreeMap;
use std::io::Write;

use crate::error::CommandError;
use crate::pipeline::Session;
use crate::render::Graphics;

use super::{builtins, graphics};

// =============================================================================
// TYPES
// =============================================================================

/// What a handler may touch while it runs.
pub struct Context<'a> {
    pub session: &'a mut Session,
    pub out: &'a mut dyn Write,
    pub gfx: &'a mut dyn Graphics,
}

/// Command handler. Receives the tokens after the command name.
pub type Handler = fn(&mut Context<'_>, &[&str]) -> Result<(), CommandError>;

/// Which part of the catalog a command belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    /// Session control and timing.
    Session,
    /// Forwarded to the rendering backend.
    Graphics,
}

/// One registered command.
#[derive(Clone, Copy)]
pub struct Command {
    pub name: &'static str,
    pub synopsis: &'static str,
    pub kind: CommandKind,
    pub handler: Handler,
}

impl Command {
    pub const fn new(
        name: &'static str,
        synopsis: &'static str,
        kind: CommandKind,
        handler: Handler,
    ) -> Self {
        Self { name, synopsis, kind, handler }
    }
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// REGISTRY
// =============================================================================

/// Immutable-after-startup command table, ordered by name.
#[derive(Debug, Default)]
pub struct CommandRegistry {
    commands: BTreeMap<&'static str, Command>,
}

impl CommandRegistry {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The full built-in catalog: session/timing commands and graphics commands.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for command in builtins::COMMANDS.iter().chain(graphics::COMMANDS) {
            registry.register(*command);
        }
        registry
    }

    /// Add a command.
    ///
    /// # Panics
    /// If a command with the same name is already registered. Names are
    /// fixed at build time, so a clash is a programming error.
    pub fn register(&mut self, command: Command) {
        let previous = self.commands.insert(command.name, command);
        assert!(previous.is_none(), "duplicate command registration: {}", command.name);
    }

    pub fn get(&self, name: &str) -> Option<&Command> {
        self.commands.get(name)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Commands in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Command> {
        self.commands.values()
    }

    /// Write the catalog, one `name synopsis` line per command.
    pub fn dump(&self, out: &mut dyn Write) -> std::io::Result<()> {
        for command in self.iter() {
            if command.synopsis.is_empty() {
                writeln!(out, "{}", command.name)?;
            } else {
                writeln!(out, "{} {}", command.name, command.synopsis)?;
            }
        }
        out.flush()
    }
}

// =============================================================================
// TESTS
// =============================================================================
