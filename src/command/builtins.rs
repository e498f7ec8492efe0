//! Session and timing commands.
//!
//! | command          | effect                                               |
//! |------------------|------------------------------------------------------|
//! | `exit`           | request shutdown at the end of the current tick      |
//! | `gettime`        | print `t=<ms since session start>`                   |
//! | `sync <ms>`      | sleep until `<ms>` since session start, if not past  |
//! | `sleep <ms>`     | sleep `<ms>` (must be > 0)                           |
//! | `echo [args..]`  | print the arguments joined by single spaces          |
//!
//! `sync` and `sleep` block the whole process, rendering and event
//! forwarding included, for the requested time. Nothing else in a tick
//! blocks.

use std::thread;
use std::time::Duration;

use crate::error::CommandError;

use super::args;
use super::registry::{Command, CommandKind, Context};

pub const COMMANDS: &[Command] = &[
    Command::new("exit", "", CommandKind::Session, exit),
    Command::new("gettime", "", CommandKind::Session, gettime),
    Command::new("sync", "<target_ms>", CommandKind::Session, sync),
    Command::new("sleep", "<ms>", CommandKind::Session, sleep),
    Command::new("echo", "[text ...]", CommandKind::Session, echo),
];

fn exit(ctx: &mut Context<'_>, _args: &[&str]) -> Result<(), CommandError> {
    ctx.session.request_shutdown();
    Ok(())
}

fn gettime(ctx: &mut Context<'_>, args: &[&str]) -> Result<(), CommandError> {
    args::exact(args, 0, "0")?;
    let ms = ctx.session.elapsed().as_millis();
    writeln!(ctx.out, "t={ms}").map_err(args::output)?;
    ctx.out.flush().map_err(args::output)
}

fn sync(ctx: &mut Context<'_>, args: &[&str]) -> Result<(), CommandError> {
    args::exact(args, 1, "1")?;
    let target = args::int(args, 0)?;

    // Negative targets are always in the past.
    let Ok(target) = u64::try_from(target) else {
        return Ok(());
    };

    let remaining = Duration::from_millis(target).saturating_sub(ctx.session.elapsed());
    if !remaining.is_zero() {
        thread::sleep(remaining);
    }
    Ok(())
}

fn sleep(_ctx: &mut Context<'_>, args: &[&str]) -> Result<(), CommandError> {
    args::exact(args, 1, "1")?;
    let ms = args::int(args, 0)?;
    if ms <= 0 {
        return Err(CommandError::parse(0, args[0]));
    }
    thread::sleep(Duration::from_millis(ms as u64));
    Ok(())
}

fn echo(ctx: &mut Context<'_>, args: &[&str]) -> Result<(), CommandError> {
    writeln!(ctx.out, "{}", args.join(" ")).map_err(args::output)?;
    ctx.out.flush().map_err(args::output)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    use crate::command::CommandRegistry;
    use crate::error::DispatchError;
    use crate::input::split;
    use crate::pipeline::Session;
    use crate::render::Recorder;

    struct Harness {
        registry: CommandRegistry,
        session: Session,
        out: Vec<u8>,
        gfx: Recorder,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                registry: CommandRegistry::with_builtins(),
                session: Session::new(false),
                out: Vec::new(),
                gfx: Recorder::new(),
            }
        }

        fn run(&mut self, line: &str) -> Result<(), DispatchError> {
            let mut ctx = Context {
                session: &mut self.session,
                out: &mut self.out,
                gfx: &mut self.gfx,
            };
            self.registry.dispatch(&mut ctx, &split(line))
        }

        fn take_output(&mut self) -> String {
            String::from_utf8(std::mem::take(&mut self.out)).unwrap()
        }
    }

    fn status(result: Result<(), DispatchError>) -> Option<CommandError> {
        match result {
            Ok(()) => None,
            Err(DispatchError::Command { source, .. }) => Some(source),
            Err(other) => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_exit_sets_shutdown() {
        let mut h = Harness::new();
        assert!(!h.session.shutdown_requested());
        h.run("exit").unwrap();
        assert!(h.session.shutdown_requested());
    }

    #[test]
    fn test_echo_joins_arguments() {
        let mut h = Harness::new();
        h.run("echo a b c").unwrap();
        assert_eq!(h.take_output(), "a b c\n");

        h.run("echo    spaced    out").unwrap();
        assert_eq!(h.take_output(), "spaced out\n");
    }

    #[test]
    fn test_echo_without_arguments_prints_newline() {
        let mut h = Harness::new();
        h.run("echo").unwrap();
        assert_eq!(h.take_output(), "\n");
    }

    #[test]
    fn test_gettime_format() {
        let mut h = Harness::new();
        h.run("gettime").unwrap();
        let out = h.take_output();
        let value = out.strip_prefix("t=").and_then(|s| s.strip_suffix('\n')).unwrap();
        value.parse::<u64>().unwrap();
    }

    #[test]
    fn test_gettime_non_decreasing() {
        let mut h = Harness::new();
        let mut last = 0u64;
        for _ in 0..50 {
            h.run("gettime").unwrap();
            let out = h.take_output();
            let t: u64 = out.trim_end().trim_start_matches("t=").parse().unwrap();
            assert!(t >= last);
            last = t;
        }
    }

    #[test]
    fn test_gettime_rejects_arguments() {
        let mut h = Harness::new();
        assert_eq!(
            status(h.run("gettime now")),
            Some(CommandError::ParamCount { expected: "0", got: 1 })
        );
        assert!(h.take_output().is_empty());
    }

    #[test]
    fn test_sleep_lower_bound() {
        let mut h = Harness::new();
        let start = Instant::now();
        h.run("sleep 20").unwrap();
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn test_sleep_rejects_non_positive_and_garbage() {
        let mut h = Harness::new();
        for line in ["sleep 0", "sleep -5", "sleep abc", "sleep 5x"] {
            assert!(
                matches!(status(h.run(line)), Some(CommandError::ParamParse { index: 0, .. })),
                "{line}"
            );
        }
        assert_eq!(
            status(h.run("sleep")),
            Some(CommandError::ParamCount { expected: "1", got: 0 })
        );
    }

    #[test]
    fn test_sync_waits_for_target() {
        let mut h = Harness::new();
        h.run("sync 30").unwrap();
        assert!(h.session.elapsed() >= Duration::from_millis(30));
    }

    #[test]
    fn test_sync_never_sleeps_past_reached_target() {
        let mut h = Harness::new();
        h.run("sync 40").unwrap();

        let start = Instant::now();
        h.run("sync 10").unwrap();
        h.run("sync -100").unwrap();
        assert!(start.elapsed() < Duration::from_millis(10));
    }

    #[test]
    fn test_sync_rejects_garbage() {
        let mut h = Harness::new();
        assert!(matches!(
            status(h.run("sync soon")),
            Some(CommandError::ParamParse { index: 0, .. })
        ));
        assert!(matches!(status(h.run("sync 1 2")), Some(CommandError::ParamCount { .. })));
    }
}
