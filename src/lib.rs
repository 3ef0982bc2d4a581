// mpplay library - terminal front-end for an external mp3 decoder
// The decoder and mixer are separate programs; this crate drives them.

pub mod config;    // mp.conf and optional settings.toml
pub mod library;   // finds the files to play
pub mod locale;    // English/Polish user text
pub mod playback;  // decoder process, key dispatch, session loop
pub mod terminal;  // raw mode and keystroke input
pub mod ui;        // prompts, menu, startup flow

// Export the stuff the binary actually uses
pub use config::{ConfigFile, Settings};
pub use library::{AudioFile, MusicScanner};
pub use locale::Language;
pub use playback::{Player, TerminalPlayer};
pub use ui::{App, Console, Outcome};
