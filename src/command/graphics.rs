//! Graphics commands and the constant table.
//!
//! `glBegin` opens a multi-step block: until the matching `glEnd` the pump
//! ignores its batch cap so a primitive is never split across ticks.

use std::io::{self, Write};

use crate::error::CommandError;

use super::args;
use super::registry::{Command, CommandKind, Context};

// =============================================================================
// CONSTANTS
// =============================================================================

/// Named constants accepted wherever a command takes an enum or bitmask.
pub const CONSTANTS: &[(&str, u32)] = &[
    ("GL_POINTS", 0x0000),
    ("GL_LINES", 0x0001),
    ("GL_LINE_LOOP", 0x0002),
    ("GL_LINE_STRIP", 0x0003),
    ("GL_TRIANGLES", 0x0004),
    ("GL_TRIANGLE_STRIP", 0x0005),
    ("GL_TRIANGLE_FAN", 0x0006),
    ("GL_QUADS", 0x0007),
    ("GL_QUAD_STRIP", 0x0008),
    ("GL_POLYGON", 0x0009),
    ("GL_DEPTH_BUFFER_BIT", 0x0100),
    ("GL_STENCIL_BUFFER_BIT", 0x0400),
    ("GL_COLOR_BUFFER_BIT", 0x4000),
];

/// Highest valid primitive mode (`GL_POLYGON`).
const MAX_PRIMITIVE: u32 = 0x0009;

pub fn lookup_const(name: &str) -> Option<u32> {
    CONSTANTS.iter().find(|(n, _)| *n == name).map(|(_, v)| *v)
}

/// Write the constant table, one `NAME VALUE` line each.
pub fn dump_constants(out: &mut dyn Write) -> io::Result<()> {
    for (name, value) in CONSTANTS {
        writeln!(out, "{name} {value}")?;
    }
    out.flush()
}

/// A constant name, a decimal integer, or a `0x` hex integer.
fn constant(args: &[&str], index: usize) -> Result<u32, CommandError> {
    let raw = args[index];
    let parsed = match raw.strip_prefix("0x") {
        Some(hex) => u32::from_str_radix(hex, 16).ok(),
        None => lookup_const(raw).or_else(|| raw.parse().ok()),
    };
    parsed.ok_or_else(|| CommandError::parse(index, raw))
}

// =============================================================================
// COMMANDS
// =============================================================================

pub const COMMANDS: &[Command] = &[
    Command::new("glBegin", "<mode>", CommandKind::Graphics, begin),
    Command::new("glEnd", "", CommandKind::Graphics, end),
    Command::new("glVertex", "<x> <y> [z] [w]", CommandKind::Graphics, vertex),
    Command::new("glColor", "<r> <g> <b> [a]", CommandKind::Graphics, color),
    Command::new("glClear", "<mask> [mask ...]", CommandKind::Graphics, clear),
    Command::new("glFlush", "", CommandKind::Graphics, flush),
    Command::new("cglSwapBuffers", "", CommandKind::Graphics, swap_buffers),
];

fn begin(ctx: &mut Context<'_>, args: &[&str]) -> Result<(), CommandError> {
    args::exact(args, 1, "1")?;
    let mode = constant(args, 0)?;
    if mode > MAX_PRIMITIVE {
        return Err(CommandError::parse(0, args[0]));
    }
    if ctx.session.in_graphics_block() {
        return Err(CommandError::Failed("glBegin inside glBegin/glEnd".into()));
    }
    ctx.gfx.begin(mode);
    ctx.session.set_graphics_block(true);
    Ok(())
}

fn end(ctx: &mut Context<'_>, args: &[&str]) -> Result<(), CommandError> {
    args::exact(args, 0, "0")?;
    if !ctx.session.in_graphics_block() {
        return Err(CommandError::Failed("glEnd without glBegin".into()));
    }
    ctx.gfx.end();
    ctx.session.set_graphics_block(false);
    Ok(())
}

fn vertex(ctx: &mut Context<'_>, args: &[&str]) -> Result<(), CommandError> {
    args::between(args, 2, 4, "2-4")?;
    let mut v = [0.0, 0.0, 0.0, 1.0];
    for (i, slot) in v.iter_mut().enumerate().take(args.len()) {
        *slot = args::float(args, i)?;
    }
    ctx.gfx.vertex(v);
    Ok(())
}

fn color(ctx: &mut Context<'_>, args: &[&str]) -> Result<(), CommandError> {
    args::between(args, 3, 4, "3-4")?;
    let mut rgba = [0.0, 0.0, 0.0, 1.0];
    for (i, slot) in rgba.iter_mut().enumerate().take(args.len()) {
        *slot = args::float(args, i)?;
    }
    ctx.gfx.color(rgba);
    Ok(())
}

fn clear(ctx: &mut Context<'_>, args: &[&str]) -> Result<(), CommandError> {
    if args.is_empty() {
        return Err(CommandError::ParamCount { expected: "1+", got: 0 });
    }
    let mut mask = 0;
    for i in 0..args.len() {
        mask |= constant(args, i)?;
    }
    ctx.gfx.clear(mask);
    Ok(())
}

fn flush(ctx: &mut Context<'_>, args: &[&str]) -> Result<(), CommandError> {
    args::exact(args, 0, "0")?;
    ctx.gfx.flush();
    Ok(())
}

fn swap_buffers(ctx: &mut Context<'_>, args: &[&str]) -> Result<(), CommandError> {
    args::exact(args, 0, "0")?;
    ctx.gfx.swap_buffers();
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
