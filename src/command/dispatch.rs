//! Dispatcher - resolves a token list against the registry and runs it.

use crate::error::DispatchError;
use crate::input::Tokens;

use super::registry::{CommandRegistry, Context};

impl CommandRegistry {
    /// Run the command named by `tokens[0]` with `tokens[1..]` as arguments.
    ///
    /// An empty token list is a no-op. The handler's status is passed back
    /// untouched; the caller decides how to report it.
    pub fn dispatch(&self, ctx: &mut Context<'_>, tokens: &Tokens<'_>) -> Result<(), DispatchError> {
        let Some(name) = tokens.name() else {
            return Ok(());
        };

        let command = self
            .get(name)
            .ok_or_else(|| DispatchError::Unknown(name.to_string()))?;

        (command.handler)(ctx, tokens.args())
            .map_err(|source| DispatchError::Command { name: command.name, source })
    }
}
