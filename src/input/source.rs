//! Input source: standard input or a named FIFO, opened non-blocking.
//!
//! The FIFO path is owned by a [`FifoGuard`] that unlinks it when dropped,
//! so every exit path (clean shutdown, EOF with `-t`, startup failure after
//! creation) removes the special file. A descriptor that was switched to
//! non-blocking mode gets its original flags back on drop, so a shared stdin
//! is handed back to the parent shell as it was found.

use std::ffi::CString;
use std::fs::{File, OpenOptions};
use std::io::{self, Read};
use std::os::fd::{AsFd, AsRawFd, BorrowedFd, OwnedFd};
use std::os::unix::ffi::OsStrExt;
use std::os::unix::fs::OpenOptionsExt;
use std::path::{Path, PathBuf};

use crate::error::ServerError;

// =============================================================================
// FIFO GUARD
// =============================================================================

/// Removes the FIFO special file on drop.
#[derive(Debug)]
pub struct FifoGuard {
    path: PathBuf,
}

impl FifoGuard {
    /// Create a FIFO at `path` (mode 0777, subject to umask).
    pub fn create(path: &Path) -> Result<Self, ServerError> {
        let c_path = CString::new(path.as_os_str().as_bytes()).map_err(|e| {
            ServerError::CreateFifo {
                path: path.to_path_buf(),
                source: io::Error::new(io::ErrorKind::InvalidInput, e),
            }
        })?;

        if unsafe { libc::mkfifo(c_path.as_ptr(), 0o777) } < 0 {
            return Err(ServerError::CreateFifo {
                path: path.to_path_buf(),
                source: io::Error::last_os_error(),
            });
        }

        tracing::debug!(path = %path.display(), "created fifo");
        Ok(Self { path: path.to_path_buf() })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for FifoGuard {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => tracing::debug!(path = %self.path.display(), "removed fifo"),
            Err(e) => tracing::warn!(path = %self.path.display(), "failed to remove fifo: {e}"),
        }
    }
}

// =============================================================================
// INPUT SOURCE
// =============================================================================

/// The command pipe. Reads never block; an empty pipe reports
/// [`io::ErrorKind::WouldBlock`].
#[derive(Debug)]
pub struct InputSource {
    // Declared before `fifo` so the descriptor closes before the unlink.
    file: File,
    fifo: Option<FifoGuard>,
    /// Status flags to put back on drop, if this source added `O_NONBLOCK`.
    restore_flags: Option<libc::c_int>,
}

impl InputSource {
    /// Read from standard input.
    ///
    /// Works on a duplicate of fd 0 with `O_NONBLOCK` set on the shared file
    /// description.
    pub fn stdin() -> Result<Self, ServerError> {
        let fd = io::stdin().as_fd().try_clone_to_owned().map_err(ServerError::NonBlocking)?;
        Self::from_fd(fd)
    }

    /// Create a FIFO at `path` and read from it.
    pub fn fifo(path: &Path) -> Result<Self, ServerError> {
        let guard = FifoGuard::create(path)?;
        let file = OpenOptions::new()
            .read(true)
            .custom_flags(libc::O_NONBLOCK)
            .open(path)
            .map_err(|source| ServerError::OpenFifo { path: path.to_path_buf(), source })?;

        Ok(Self { file, fifo: Some(guard), restore_flags: None })
    }

    /// Wrap an already-open descriptor, switching it to non-blocking mode.
    pub fn from_fd(fd: OwnedFd) -> Result<Self, ServerError> {
        let previous = set_nonblocking(fd.as_fd()).map_err(ServerError::NonBlocking)?;
        let restore_flags = (previous & libc::O_NONBLOCK == 0).then_some(previous);
        Ok(Self { file: File::from(fd), fifo: None, restore_flags })
    }

    /// Path of the FIFO backing this source, if one was created.
    pub fn fifo_path(&self) -> Option<&Path> {
        self.fifo.as_ref().map(FifoGuard::path)
    }

    /// Close the descriptor and remove the FIFO, if any.
    pub fn close(self) {
        tracing::debug!(fd = self.file.as_raw_fd(), "closing input");
        drop(self);
    }
}

impl Drop for InputSource {
    fn drop(&mut self) {
        let Some(flags) = self.restore_flags else {
            return;
        };
        if unsafe { libc::fcntl(self.file.as_raw_fd(), libc::F_SETFL, flags) } < 0 {
            tracing::warn!("failed to restore input flags: {}", io::Error::last_os_error());
        }
    }
}

impl Read for InputSource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.file.read(buf)
    }
}

/// Set `O_NONBLOCK` on a descriptor. Returns the status flags it had before.
pub fn set_nonblocking(fd: BorrowedFd<'_>) -> io::Result<libc::c_int> {
    let raw = fd.as_raw_fd();
    let flags = unsafe { libc::fcntl(raw, libc::F_GETFL) };
    if flags < 0 {
        return Err(io::Error::last_os_error());
    }
    if unsafe { libc::fcntl(raw, libc::F_SETFL, flags | libc::O_NONBLOCK) } < 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(flags)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::os::fd::FromRawFd;

    fn pipe() -> (OwnedFd, File) {
        let mut fds = [0; 2];
        assert_eq!(unsafe { libc::pipe(fds.as_mut_ptr()) }, 0);
        let read = unsafe { OwnedFd::from_raw_fd(fds[0]) };
        let write = unsafe { File::from_raw_fd(fds[1]) };
        (read, write)
    }

    #[test]
    fn test_empty_pipe_would_block() {
        let (read, _write) = pipe();
        let mut source = InputSource::from_fd(read).unwrap();
        let mut buf = [0u8; 16];
        let err = source.read(&mut buf).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::WouldBlock);
    }

    #[test]
    fn test_closed_pipe_reads_zero() {
        let (read, mut write) = pipe();
        let mut source = InputSource::from_fd(read).unwrap();
        write.write_all(b"hi\n").unwrap();
        drop(write);
        let mut buf = [0u8; 16];
        assert_eq!(source.read(&mut buf).unwrap(), 3);
        assert_eq!(source.read(&mut buf).unwrap(), 0);
    }

    fn status_flags(fd: BorrowedFd<'_>) -> libc::c_int {
        unsafe { libc::fcntl(fd.as_raw_fd(), libc::F_GETFL) }
    }

    #[test]
    fn test_drop_restores_blocking_mode() {
        let (read, _write) = pipe();
        // Shares the file description, like a dup of the parent's stdin.
        let shared = read.try_clone().unwrap();
        assert_eq!(status_flags(shared.as_fd()) & libc::O_NONBLOCK, 0);

        let source = InputSource::from_fd(read).unwrap();
        assert_ne!(status_flags(shared.as_fd()) & libc::O_NONBLOCK, 0);

        drop(source);
        assert_eq!(status_flags(shared.as_fd()) & libc::O_NONBLOCK, 0);
    }

    #[test]
    fn test_already_nonblocking_fd_is_left_alone() {
        let (read, _write) = pipe();
        let shared = read.try_clone().unwrap();
        set_nonblocking(read.as_fd()).unwrap();

        drop(InputSource::from_fd(read).unwrap());
        assert_ne!(status_flags(shared.as_fd()) & libc::O_NONBLOCK, 0);
    }

    #[test]
    fn test_fifo_created_and_removed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cmds");

        let source = InputSource::fifo(&path).unwrap();
        assert_eq!(source.fifo_path(), Some(path.as_path()));
        assert!(path.exists());

        source.close();
        assert!(!path.exists());
    }

    #[test]
    fn test_fifo_create_fails_when_path_exists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("taken");
        std::fs::write(&path, b"").unwrap();

        let err = InputSource::fifo(&path).unwrap_err();
        assert!(matches!(err, ServerError::CreateFifo { .. }));
        assert_eq!(err.exit_code(), 2);
        // A pre-existing file is not ours to remove.
        assert!(path.exists());
    }
}
