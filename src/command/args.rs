//! Argument checks shared by the handlers.

use std::io;

use crate::error::CommandError;

/// Require exactly `n` arguments.
pub fn exact(args: &[&str], n: usize, expected: &'static str) -> Result<(), CommandError> {
    if args.len() != n {
        return Err(CommandError::ParamCount { expected, got: args.len() });
    }
    Ok(())
}

/// Require between `min` and `max` arguments, inclusive.
pub fn between(args: &[&str], min: usize, max: usize, expected: &'static str) -> Result<(), CommandError> {
    if args.len() < min || args.len() > max {
        return Err(CommandError::ParamCount { expected, got: args.len() });
    }
    Ok(())
}

/// Parse a base-10 integer; the whole token must be consumed.
pub fn int(args: &[&str], index: usize) -> Result<i64, CommandError> {
    let raw = args[index];
    raw.parse().map_err(|_| CommandError::parse(index, raw))
}

pub fn float(args: &[&str], index: usize) -> Result<f32, CommandError> {
    let raw = args[index];
    raw.parse().map_err(|_| CommandError::parse(index, raw))
}

/// Map a failed write to the output sink.
pub fn output(e: io::Error) -> CommandError {
    CommandError::Failed(format!("write: {e}"))
}
