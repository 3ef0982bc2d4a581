// Terminal mode handling - single keystrokes while a track plays,
// normal line input everywhere else

pub mod input;

pub use input::{KeyEvents, StdinKeys};

use std::io;
use std::mem::MaybeUninit;
use std::os::fd::RawFd;
use tracing::{debug, warn};

/// Puts a terminal into unbuffered, no-echo mode until dropped.
///
/// Only `ICANON` and `ECHO` are cleared: output post-processing and the
/// interrupt keys keep working, so status lines print normally and Ctrl-C
/// still reaches the process group.
pub struct RawMode {
    fd: RawFd,
    original: Option<libc::termios>,
}

impl RawMode {
    /// Never fails: when the attributes can't be read or applied (stdin is a
    /// pipe, say) the problem is logged and the returned guard does nothing.
    pub fn enter(fd: RawFd) -> Self {
        let original = match get_attrs(fd) {
            Ok(attrs) => attrs,
            Err(e) => {
                warn!("Not switching fd {} to raw mode: {}", fd, e);
                return Self { fd, original: None };
            }
        };

        let mut raw = original;
        raw.c_lflag &= !(libc::ICANON | libc::ECHO);
        raw.c_cc[libc::VMIN] = 1;
        raw.c_cc[libc::VTIME] = 0;

        if let Err(e) = set_attrs(fd, &raw) {
            warn!("Failed to enable raw mode on fd {}: {}", fd, e);
            return Self { fd, original: None };
        }

        debug!("Raw mode on for fd {}", fd);
        Self { fd, original: Some(original) }
    }

    pub fn stdin() -> Self {
        Self::enter(libc::STDIN_FILENO)
    }

    pub fn is_active(&self) -> bool {
        self.original.is_some()
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        if let Some(original) = self.original.take() {
            match set_attrs(self.fd, &original) {
                Ok(()) => debug!("Terminal mode restored for fd {}", self.fd),
                Err(e) => warn!("Failed to restore terminal mode on fd {}: {}", self.fd, e),
            }
        }
    }
}

fn get_attrs(fd: RawFd) -> io::Result<libc::termios> {
    let mut attrs = MaybeUninit::<libc::termios>::uninit();
    // SAFETY: tcgetattr fully initialises the struct when it returns 0.
    unsafe {
        if libc::tcgetattr(fd, attrs.as_mut_ptr()) != 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(attrs.assume_init())
    }
}

fn set_attrs(fd: RawFd, attrs: &libc::termios) -> io::Result<()> {
    // SAFETY: attrs points to a valid termios for the duration of the call.
    if unsafe { libc::tcsetattr(fd, libc::TCSANOW, attrs) } != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}
