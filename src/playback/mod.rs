// Playback - everything between "play this file" and the decoder exiting
// The decoder and the mixer are external programs; this layer starts them,
// forwards keystrokes as signals and cleans up.

pub mod dispatch;
pub mod mixer;
pub mod process;
pub mod session;

pub use dispatch::Action;
pub use mixer::{Mixer, VolumeControl, VolumeDirection};
pub use process::{ControlSignal, DecoderChild, DecoderCommand, DecoderProcess};
pub use session::{PlaybackSession, SessionEnd};

use crate::config::Settings;
use crate::library::AudioFile;
use crate::locale::{Language, Message};
use crate::terminal::{RawMode, StdinKeys};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("failed to start {program} for {}: {source}", .file.display())]
    Launch {
        program: String,
        file: PathBuf,
        source: io::Error,
    },
    #[error("playback control failed: {0}")]
    Io(#[from] io::Error),
}

/// Plays one file to completion (or until the user quits).
pub trait Player {
    fn play(&mut self, file: &AudioFile) -> Result<SessionEnd, PlaybackError>;
}

/// The real player: decoder child, raw terminal, stdin keystrokes.
pub struct TerminalPlayer {
    decoder: DecoderCommand,
    mixer: Mixer,
    stop_grace: Duration,
    lang: Language,
}

impl TerminalPlayer {
    pub fn new(settings: &Settings, lang: Language) -> Self {
        Self {
            decoder: DecoderCommand::from(&settings.decoder),
            mixer: Mixer::new(&settings.mixer),
            stop_grace: Duration::from_millis(settings.decoder.stop_grace_ms),
            lang,
        }
    }
}

impl Player for TerminalPlayer {
    fn play(&mut self, file: &AudioFile) -> Result<SessionEnd, PlaybackError> {
        let mut out = io::stdout();
        writeln!(out, "{}", Message::Playing(&file.display_name()).localize(self.lang))?;
        writeln!(out, "{}", Message::PlaybackHelp.localize(self.lang))?;
        out.flush()?;

        // Restored on every return path below, including a failed launch.
        let _raw = RawMode::stdin();

        let child = self.decoder.spawn(&file.path)?;
        let mut keys = StdinKeys::watching(child.id());
        let mut session = PlaybackSession::new(child, self.lang);

        let result = session.run(&mut keys, &mut self.mixer, &mut out);
        let paused = session.is_paused();
        let mut child = session.into_process();

        match &result {
            Ok(SessionEnd::Finished(status)) => {
                info!("Finished {} ({})", file.path.display(), status);
            }
            Ok(SessionEnd::Quit) => {
                child.wind_down(paused, self.stop_grace)?;
            }
            Err(e) => {
                error!("Session for {} failed: {}", file.path.display(), e);
                child.signal(ControlSignal::Terminate);
                child.wind_down(paused, self.stop_grace)?;
            }
        }

        result.map_err(PlaybackError::from)
    }
}
