//! cmdline-gl binary: parse options, set up logging, run the session.

use std::io::{self, IsTerminal};
use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind;
use tracing_subscriber::EnvFilter;

use cmdline_gl::command::dump_constants;
use cmdline_gl::{
    CommandRegistry, EventSource, Host, InputPump, InputSource, Mode, Options, ServerConfig,
    ServerError, Session, TraceGraphics,
};

fn main() -> ExitCode {
    // stdout carries the event protocol; diagnostics go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let options = match Options::try_parse() {
        Ok(options) => options,
        Err(e) => {
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::from(1),
            };
            eprint!("{e}");
            return code;
        }
    };

    let mut stdout = io::stdout();
    let listed = match options.into_mode(io::stdin().is_terminal()) {
        Mode::ShowCommands => CommandRegistry::with_builtins().dump(&mut stdout),
        Mode::ShowConstants => dump_constants(&mut stdout),
        Mode::Run(config) => {
            return match run(config) {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    eprintln!("cmdline-gl: {e}");
                    ExitCode::from(e.exit_code() as u8)
                }
            };
        }
    };

    match listed {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("cmdline-gl: {e}");
            ExitCode::from(1)
        }
    }
}

fn run(config: ServerConfig) -> Result<(), ServerError> {
    let source = match &config.fifo {
        Some(path) => InputSource::fifo(path)?,
        None => InputSource::stdin()?,
    };

    let events = if config.capture_events {
        EventSource::terminal().map_err(ServerError::Terminal)?
    } else {
        EventSource::Headless
    };

    tracing::info!(
        fifo = ?config.fifo,
        terminate_on_eof = config.terminate_on_eof,
        batch = config.batch_cap,
        "session started"
    );

    let session = Session::new(config.terminate_on_eof);
    let mut pump = InputPump::new(source, CommandRegistry::with_builtins(), session, config.batch_cap);
    let mut host = Host::new(events, io::stdout(), TraceGraphics::new(), config.tick);

    host.run(&mut pump).map_err(ServerError::EventLoop)
}
