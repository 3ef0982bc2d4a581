use super::PlaybackError;
use crate::config::settings::DecoderSettings;
use std::io;
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlSignal {
    Pause,
    Resume,
    Terminate,
}

impl ControlSignal {
    fn raw(self) -> libc::c_int {
        match self {
            ControlSignal::Pause => libc::SIGSTOP,
            ControlSignal::Resume => libc::SIGCONT,
            ControlSignal::Terminate => libc::SIGTERM,
        }
    }
}

/// The running decoder as the session sees it.
pub trait DecoderProcess {
    fn id(&self) -> u32;

    /// Non-blocking exit check; reaps the process once it has exited.
    fn try_wait(&mut self) -> io::Result<Option<ExitStatus>>;

    /// Returns whether the signal was delivered.
    fn signal(&mut self, signal: ControlSignal) -> bool;
}

/// How to launch the decoder: `<program> <args..> <file>`.
#[derive(Debug, Clone)]
pub struct DecoderCommand {
    program: String,
    args: Vec<String>,
}

impl DecoderCommand {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self { program: program.into(), args }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn command(&self, file: &Path) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args).arg(file);
        command
    }

    pub fn spawn(&self, file: &Path) -> Result<DecoderChild, PlaybackError> {
        // The decoder must not compete with us for keystrokes.
        let child = self
            .command(file)
            .stdin(Stdio::null())
            .spawn()
            .map_err(|source| PlaybackError::Launch {
                program: self.program.clone(),
                file: file.to_path_buf(),
                source,
            })?;

        info!("Started {} (pid {}) for {}", self.program, child.id(), file.display());
        Ok(DecoderChild { child })
    }
}

impl From<&DecoderSettings> for DecoderCommand {
    fn from(settings: &DecoderSettings) -> Self {
        Self::new(settings.program.clone(), settings.args.clone())
    }
}

/// A decoder we spawned. Signals go to this pid only, so other copies of
/// the same program on the machine are left alone.
pub struct DecoderChild {
    child: Child,
}

impl DecoderChild {
    /// Cleans up after the session loop gave up on the decoder: a stopped
    /// process can't act on SIGTERM until continued, and one that ignores it
    /// gets killed once `grace` runs out.
    pub fn wind_down(&mut self, paused: bool, grace: Duration) -> io::Result<ExitStatus> {
        if paused {
            self.signal(ControlSignal::Resume);
        }

        let deadline = Instant::now() + grace;
        loop {
            if let Some(status) = self.child.try_wait()? {
                debug!("Decoder {} exited with {}", self.child.id(), status);
                return Ok(status);
            }
            if Instant::now() >= deadline {
                break;
            }
            thread::sleep(Duration::from_millis(20));
        }

        warn!("Decoder {} still running after {:?}, killing it", self.child.id(), grace);
        if let Err(e) = self.child.kill() {
            warn!("Failed to kill decoder {}: {}", self.child.id(), e);
        }
        self.child.wait()
    }
}

impl DecoderProcess for DecoderChild {
    fn id(&self) -> u32 {
        self.child.id()
    }

    fn try_wait(&mut self) -> io::Result<Option<ExitStatus>> {
        self.child.try_wait()
    }

    fn signal(&mut self, signal: ControlSignal) -> bool {
        let pid = self.child.id() as libc::pid_t;
        // SAFETY: kill(2) has no memory-safety preconditions.
        let delivered = unsafe { libc::kill(pid, signal.raw()) } == 0;
        if delivered {
            debug!("Sent {:?} to decoder {}", signal, pid);
        } else {
            warn!("Sending {:?} to decoder {} failed: {}", signal, pid, io::Error::last_os_error());
        }
        delivered
    }
}
