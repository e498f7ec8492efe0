//! End-to-end sessions over a real FIFO.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::time::Duration;

use cmdline_gl::pipeline::{PumpState, StopReason};
use cmdline_gl::render::{GraphicsCall, Recorder};
use cmdline_gl::{CommandRegistry, EventSource, Host, InputPump, InputSource, Session, TickOutcome};

fn writer(path: &Path) -> File {
    OpenOptions::new().write(true).open(path).unwrap()
}

fn pump(source: InputSource, terminate_on_eof: bool) -> InputPump<InputSource> {
    InputPump::new(source, CommandRegistry::with_builtins(), Session::new(terminate_on_eof), 20)
}

#[test]
fn test_eof_with_terminate_removes_fifo() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cmds");
    let source = InputSource::fifo(&path).unwrap();
    let mut pump = pump(source, true);

    let mut w = writer(&path);
    w.write_all(b"echo hello world\nglBegin GL_LINES\nglVertex 0 0\nglVertex 1 1\nglEnd\n").unwrap();
    drop(w);

    let mut out = Vec::new();
    let mut gfx = Recorder::new();
    let report = pump.tick(&mut out, &mut gfx);

    assert_eq!(report.processed, 5);
    assert_eq!(report.stop, StopReason::EndOfStream);
    assert_eq!(report.outcome, TickOutcome::Shutdown);
    assert_eq!(pump.state(), PumpState::Terminated);
    assert_eq!(out, b"hello world\n");
    assert_eq!(gfx.calls.first(), Some(&GraphicsCall::Begin(1)));
    assert_eq!(gfx.calls.last(), Some(&GraphicsCall::End));
    assert!(!path.exists());
}

#[test]
fn test_writers_can_reconnect_without_terminate() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cmds");
    let source = InputSource::fifo(&path).unwrap();
    let mut pump = pump(source, false);

    let mut out = Vec::new();
    let mut gfx = Recorder::new();

    let mut first = writer(&path);
    first.write_all(b"echo one\n").unwrap();
    drop(first);
    let report = pump.tick(&mut out, &mut gfx);
    assert_eq!(report.outcome, TickOutcome::Idle);

    let mut second = writer(&path);
    second.write_all(b"echo two\n").unwrap();
    let report = pump.tick(&mut out, &mut gfx);
    assert_eq!(report.processed, 1);
    assert_eq!(report.stop, StopReason::WouldBlock);

    second.write_all(b"exit\n").unwrap();
    let report = pump.tick(&mut out, &mut gfx);
    assert!(report.is_shutdown());

    assert_eq!(out, b"one\ntwo\n");
    assert!(!path.exists());
}

#[test]
fn test_headless_host_runs_fifo_session() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cmds");
    let source = InputSource::fifo(&path).unwrap();
    let mut pump = pump(source, true);

    let mut w = writer(&path);
    w.write_all(b"glClear GL_COLOR_BUFFER_BIT GL_DEPTH_BUFFER_BIT\ncglSwapBuffers\nbogus 1 2\n").unwrap();
    drop(w);

    let mut host = Host::new(EventSource::Headless, Vec::new(), Recorder::new(), Duration::from_millis(1));
    host.run(&mut pump).unwrap();

    let calls = &host.graphics().calls;
    assert!(matches!(calls[0], GraphicsCall::Reshape(..)));
    assert_eq!(calls[1..], [GraphicsCall::Clear(0x4100), GraphicsCall::SwapBuffers]);
    assert!(!path.exists());
}
