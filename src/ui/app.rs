// Startup flow: language, config, banner, directory, scan, then the menu

use super::{Console, Menu};
use crate::config::{ConfigFile, Settings};
use crate::library::{LibraryError, MusicScanner};
use crate::locale::{is_affirmative, Language, Message, LANGUAGE_PROMPT};
use crate::playback::Player;
use anyhow::Result;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;
use tracing::{error, info, warn};

const BANNER: [&str; 3] = [
    r"
    ___  _________ _____  ______ _       _____   _____________
    |  \/  || ___ \____ | | ___ \ |     / _ \ \ / /  ___| ___ \
    | .  . || |_/ /   / / | |_/ / |    / /_\ \ V /| |__ | |_/ /
    | |\/| ||  __/    \ \ |  __/| |    |  _  |\ / |  __||    /
    | |  | || |   .___/ / | |   | |____| | | || | | |___| |\ \
    \_|  |_/\_|   \____/  \_|   \_____/\_| |_/\_/ \____/\_| \_|
",
    r"
    _     _____ _   _ _   ___   __
   | |   |_   _| \ | | | | \ \ / /
   | |     | | |  \| | | | |\ V /
   | |     | | | . ` | | | |/   \
   | |_____| |_| |\  | |_| / /^\ \
   \_____/\___/\_| \_/\___/\/   \/
",
    r"
    ______ _____ _____ ___
    | ___ \  ___|_   _/ _ \
    | |_/ / |__   | |/ /_\ \
    | ___ \  __|  | ||  _  |
    | |_/ / |___  | || | | |
    \____/\____/  \_/\_| |_/
",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The user left through the menu (or input ended there).
    Finished,
    /// Nothing to play: the directory is missing or has no audio files.
    Aborted,
}

impl Outcome {
    pub fn exit_code(self) -> u8 {
        match self {
            Outcome::Finished => 0,
            Outcome::Aborted => 1,
        }
    }
}

pub struct App<R, W, E> {
    console: Console<R, W, E>,
    config_path: PathBuf,
    settings: Settings,
    show_banner: bool,
}

impl<R: BufRead, W: Write, E: Write> App<R, W, E> {
    pub fn new(console: Console<R, W, E>, config_path: PathBuf, settings: Settings, show_banner: bool) -> Self {
        Self { console, config_path, settings, show_banner }
    }

    /// Runs the whole program. `make_player` is called once the language is
    /// known.
    pub fn run<P, F>(&mut self, make_player: F) -> Result<Outcome>
    where
        P: Player,
        F: FnOnce(Language, &Settings) -> P,
    {
        let lang = self.choose_language()?;
        self.console.set_language(lang);
        info!("Language: {}", lang.code());

        let config = ConfigFile::load(&self.config_path)?;
        if let Some(saved) = config.language.filter(|saved| *saved != lang) {
            info!("Ignoring saved language {} in favour of {}", saved.code(), lang.code());
        }

        self.print_banner()?;

        let directory = match config.directory {
            Some(dir) => dir,
            None => self.ask_directory()?,
        };

        let scanner = MusicScanner::new(self.settings.library.extension.clone());
        let files = match scanner.scan_directory(&directory) {
            Ok(files) => files,
            Err(e) => {
                error!("{}", e);
                let message = match &e {
                    LibraryError::NotADirectory(_) => Message::DirectoryMissing,
                    LibraryError::NoAudioFiles { .. } => Message::NoAudioFiles(scanner.extension()),
                };
                self.console.warn(message)?;
                self.console.say(Message::ExitingProgram)?;
                return Ok(Outcome::Aborted);
            }
        };

        let player = make_player(lang, &self.settings);
        Menu::new(&files, player).run(&mut self.console)?;

        self.console.say(Message::Goodbye)?;
        info!("Exiting normally");
        Ok(Outcome::Finished)
    }

    pub fn into_console(self) -> Console<R, W, E> {
        self.console
    }

    fn choose_language(&mut self) -> Result<Language> {
        self.console.write_plain(LANGUAGE_PROMPT)?;
        let answer = self.console.read_line()?.unwrap_or_default();
        Ok(Language::from_selection(&answer))
    }

    fn print_banner(&mut self) -> Result<()> {
        if self.show_banner {
            let delay = Duration::from_millis(self.settings.ui.banner_delay_ms);
            for art in BANNER {
                self.console.write_plain(art)?;
                self.console.write_plain("\n")?;
                if !delay.is_zero() {
                    thread::sleep(delay);
                }
            }
        }

        self.console.say(Message::VersionLine)?;
        self.console.write_plain("\n")?;
        Ok(())
    }

    /// Asks for the directory and offers to remember it in the config file.
    fn ask_directory(&mut self) -> Result<PathBuf> {
        let directory = PathBuf::from(self.console.ask(Message::EnterDirectory)?.unwrap_or_default());

        let answer = self.console.ask(Message::SaveDirectoryPrompt)?.unwrap_or_default();
        if is_affirmative(&answer) {
            let config = ConfigFile {
                directory: Some(directory.clone()),
                language: Some(self.console.lang()),
            };
            match config.save(&self.config_path) {
                Ok(()) => {
                    self.console.say(Message::DirectorySaved)?;
                    self.console.write_plain("\n")?;
                }
                Err(e) => {
                    warn!("{}", e);
                    self.console.warn(Message::ConfigSaveFailed)?;
                    self.console.write_plain("\n")?;
                }
            }
        }

        Ok(directory)
    }
}
