//! Line reader for the command pipe.
//!
//! Pulls raw bytes from a non-blocking source and hands back one complete,
//! newline-terminated line per call. Bytes that do not yet form a line stay
//! in the pending buffer until the next call.
//!
//! "No bytes right now" is [`ReadLine::Pending`], not an error: the host
//! gets control back and the pump tries again on the next tick.

use std::io::{self, Read};

/// Bytes requested from the source per read.
const CHUNK_SIZE: usize = 1024;

/// Result of one [`LineReader::next_line`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadLine {
    /// A complete line, newline stripped.
    Line(String),
    /// The source would block; nothing buffered forms a line yet.
    Pending,
    /// The source reported end of stream.
    Closed,
}

/// Reassembles lines from a non-blocking byte source.
pub struct LineReader<R> {
    source: R,
    pending: Vec<u8>,
}

impl<R: Read> LineReader<R> {
    pub fn new(source: R) -> Self {
        Self { source, pending: Vec::with_capacity(CHUNK_SIZE) }
    }

    /// Return the next complete line, reading more bytes only when the
    /// pending buffer holds no newline.
    ///
    /// At end of stream a trailing partial line is returned once as a
    /// [`ReadLine::Line`]; the following call reports [`ReadLine::Closed`].
    /// A later call reads again, so a source that gains bytes after
    /// reporting EOF (a FIFO with a new writer) keeps producing lines.
    pub fn next_line(&mut self) -> io::Result<ReadLine> {
        let mut chunk = [0u8; CHUNK_SIZE];

        loop {
            if let Some(line) = self.take_line() {
                return Ok(ReadLine::Line(line));
            }

            match self.source.read(&mut chunk) {
                Ok(0) => {
                    if self.pending.is_empty() {
                        return Ok(ReadLine::Closed);
                    }
                    let rest = std::mem::take(&mut self.pending);
                    return Ok(ReadLine::Line(decode(rest)));
                }
                Ok(n) => self.pending.extend_from_slice(&chunk[..n]),
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => return Ok(ReadLine::Pending),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    /// Bytes buffered but not yet returned as a line.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    fn take_line(&mut self) -> Option<String> {
        let pos = self.pending.iter().position(|&b| b == b'\n')?;
        let mut line: Vec<u8> = self.pending.drain(..=pos).collect();
        line.pop();
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        Some(decode(line))
    }
}

fn decode(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    }
}

// =============================================================================
// TESTS
// =============================================================================
