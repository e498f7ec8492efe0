//! Command-line surface and runtime settings.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use clap::{ArgAction, Parser};

use crate::pipeline::DEFAULT_BATCH_CAP;

const INPUT_NOTE: &str = "\
Note: Each line of input is broken on space characters and treated as a
      command. There is no quoting or escaping mechanism.";

/// Reads commands from stdin, and writes user input to stdout.
#[derive(Parser, Debug)]
#[command(
    name = "cmdline-gl",
    version,
    disable_help_flag = true,
    override_usage = "<command-source> | cmdline-gl [options] | <user-input-reader>",
    after_help = INPUT_NOTE
)]
pub struct Options {
    /// Create the named fifo (file path+name) and read from it
    #[arg(short = 'f', value_name = "fifo")]
    pub fifo: Option<PathBuf>,

    /// Terminate after receiving EOF
    #[arg(short = 't')]
    pub terminate_on_eof: bool,

    /// Display this help message
    #[arg(short = 'h', short_alias = '?', long = "help", action = ArgAction::Help)]
    #[allow(dead_code)]
    help: Option<bool>,

    /// List all the available commands
    #[arg(long = "showcmds")]
    pub show_cmds: bool,

    /// List all the constants (GL_xxxx) that are available
    #[arg(long = "showconsts")]
    pub show_consts: bool,

    /// Maximum commands processed per tick
    #[arg(long = "batch", value_name = "N", default_value_t = DEFAULT_BATCH_CAP, value_parser = parse_positive::<usize>)]
    pub batch: usize,

    /// Idle interval between input checks, in milliseconds
    #[arg(long = "tick", value_name = "MS", default_value_t = 10, value_parser = parse_positive::<u64>)]
    pub tick_ms: u64,

    /// Do not capture mouse/keyboard events from the terminal
    #[arg(long)]
    pub headless: bool,
}

fn parse_positive<T>(raw: &str) -> Result<T, String>
where
    T: FromStr + PartialEq + From<u8>,
    T::Err: fmt::Display,
{
    match raw.parse::<T>() {
        Ok(n) if n == T::from(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

/// What the process was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Run(ServerConfig),
    ShowCommands,
    ShowConstants,
}

/// Settings for a command session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Read from a FIFO created at this path instead of stdin.
    pub fifo: Option<PathBuf>,
    pub terminate_on_eof: bool,
    pub batch_cap: usize,
    pub tick: Duration,
    /// Capture terminal mouse/keyboard events. Off with `--headless`, and
    /// when stdin is itself the terminal (the keystrokes are commands then).
    pub capture_events: bool,
}

impl Options {
    /// Resolve into a [`Mode`]. `stdin_is_terminal` decides whether the
    /// terminal is free for event capture in stdin mode.
    pub fn into_mode(self, stdin_is_terminal: bool) -> Mode {
        if self.show_cmds {
            return Mode::ShowCommands;
        }
        if self.show_consts {
            return Mode::ShowConstants;
        }

        let capture_events = !self.headless && (self.fifo.is_some() || !stdin_is_terminal);
        Mode::Run(ServerConfig {
            fifo: self.fifo,
            terminate_on_eof: self.terminate_on_eof,
            batch_cap: self.batch,
            tick: Duration::from_millis(self.tick_ms),
            capture_events,
        })
    }
}
