use std::io;
use std::os::fd::{AsRawFd, FromRawFd, OwnedFd, RawFd};
use tracing::{debug, warn};

/// Poll timeout used when the decoder's exit can't be waited on directly.
const FALLBACK_TICK_MS: libc::c_int = 200;

/// Source of keystrokes during playback.
pub trait KeyEvents {
    /// Blocks until a key is pressed or the decoder may have exited.
    /// `Ok(None)` means there is nothing to dispatch and the caller should
    /// re-check the decoder.
    fn next_key(&mut self) -> io::Result<Option<u8>>;
}

/// Reads single bytes from stdin while watching the decoder's pidfd, so a
/// track ending wakes the loop just like a keypress does.
pub struct StdinKeys {
    fd: RawFd,
    exit_fd: Option<OwnedFd>,
    open: bool,
}

impl StdinKeys {
    pub fn watching(pid: u32) -> Self {
        let exit_fd = match open_pidfd(pid) {
            Ok(fd) => Some(fd),
            Err(e) => {
                debug!("pidfd unavailable for {} ({}), polling every {}ms", pid, e, FALLBACK_TICK_MS);
                None
            }
        };

        Self { fd: libc::STDIN_FILENO, exit_fd, open: true }
    }

    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let mut byte = 0u8;
        // SAFETY: reading at most one byte into a live stack variable.
        let n = unsafe { libc::read(self.fd, (&mut byte as *mut u8).cast(), 1) };
        match n {
            1 => Ok(Some(byte)),
            0 => {
                debug!("stdin closed, waiting for decoder only");
                self.open = false;
                Ok(None)
            }
            _ => {
                let err = io::Error::last_os_error();
                if err.kind() == io::ErrorKind::Interrupted {
                    return Ok(None);
                }
                warn!("Reading stdin failed: {}", err);
                self.open = false;
                Ok(None)
            }
        }
    }
}

impl KeyEvents for StdinKeys {
    fn next_key(&mut self) -> io::Result<Option<u8>> {
        let mut fds = Vec::with_capacity(2);
        if self.open {
            fds.push(libc::pollfd { fd: self.fd, events: libc::POLLIN, revents: 0 });
        }
        if let Some(exit_fd) = &self.exit_fd {
            fds.push(libc::pollfd { fd: exit_fd.as_raw_fd(), events: libc::POLLIN, revents: 0 });
        }

        let timeout = if self.exit_fd.is_some() { -1 } else { FALLBACK_TICK_MS };

        // SAFETY: fds is a live, correctly sized array of pollfd.
        let ready = unsafe { libc::poll(fds.as_mut_ptr(), fds.len() as libc::nfds_t, timeout) };
        if ready < 0 {
            let err = io::Error::last_os_error();
            if err.kind() == io::ErrorKind::Interrupted {
                return Ok(None);
            }
            return Err(err);
        }

        let stdin_ready = self.open
            && fds[0].revents & (libc::POLLIN | libc::POLLHUP | libc::POLLERR) != 0;
        if stdin_ready {
            return self.read_byte();
        }

        Ok(None)
    }
}

#[cfg(target_os = "linux")]
fn open_pidfd(pid: u32) -> io::Result<OwnedFd> {
    // SAFETY: pidfd_open takes a pid and flags and returns a new fd or -1.
    let fd = unsafe { libc::syscall(libc::SYS_pidfd_open, pid as libc::pid_t, 0) };
    if fd < 0 {
        return Err(io::Error::last_os_error());
    }
    // SAFETY: the syscall just handed us ownership of this descriptor.
    Ok(unsafe { OwnedFd::from_raw_fd(fd as RawFd) })
}

#[cfg(not(target_os = "linux"))]
fn open_pidfd(_pid: u32) -> io::Result<OwnedFd> {
    Err(io::Error::from(io::ErrorKind::Unsupported))
}
