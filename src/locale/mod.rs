// User-facing text in both supported languages
// Everything printed to the terminal goes through Message so the language is
// picked once at startup and passed around, never looked up globally.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    En,
    Pl,
}

impl Language {
    /// Interprets the answer to the startup language prompt.
    /// Only the exact strings `pl` and `PL` pick Polish.
    pub fn from_selection(input: &str) -> Self {
        match input.trim_end_matches(['\r', '\n']) {
            "pl" | "PL" => Language::Pl,
            _ => Language::En,
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "en" => Some(Language::En),
            "pl" => Some(Language::Pl),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Pl => "pl",
        }
    }

    fn pick<'a>(self, en: &'a str, pl: &'a str) -> &'a str {
        match self {
            Language::En => en,
            Language::Pl => pl,
        }
    }
}

/// The yes/no answer accepts both the English and the Polish affirmative
/// whatever language is active.
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().chars().next(), Some('y' | 'Y' | 't' | 'T'))
}

pub const LANGUAGE_PROMPT: &str = "Select language / Wybierz Język / (EN/pl): ";

#[derive(Debug, Clone, PartialEq)]
pub enum Message<'a> {
    // startup
    VersionLine,
    EnterDirectory,
    SaveDirectoryPrompt,
    DirectorySaved,
    ConfigSaveFailed,
    DirectoryMissing,
    NoAudioFiles(&'a str),
    ExitingProgram,
    Goodbye,

    // menu
    MainMenu,
    SelectOption { min: u32, max: u32 },
    OutOfRange { min: u32, max: u32 },
    NotANumber,
    ControlsHeader,
    AvailableFiles,
    EnterFileNumber,

    // playback
    Playing(&'a str),
    PlaybackHelp,
    Paused,
    PauseFailed,
    Resumed,
    ResumeFailed,
    VolumeUp,
    VolumeUpFailed,
    VolumeDown,
    VolumeDownFailed,
    LaunchFailed,
}

impl Message<'_> {
    pub fn localize(&self, lang: Language) -> Localized<'_> {
        Localized { message: self, lang }
    }

    pub fn text(&self, lang: Language) -> String {
        self.localize(lang).to_string()
    }
}

/// A message bound to a language, ready for `write!`.
pub struct Localized<'a> {
    message: &'a Message<'a>,
    lang: Language,
}

impl fmt::Display for Localized<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lang = self.lang;
        match self.message {
            Message::VersionLine => write!(
                f,
                "{} {}{}",
                lang.pick("MP3 Player, version", "Odtwarzacz MP3, wersja"),
                env!("CARGO_PKG_VERSION"),
                lang.pick(" for Linux", " dla Linuksa"),
            ),
            Message::EnterDirectory => f.write_str(lang.pick(
                "Enter directory path containing .mp3 files: ",
                "Podaj ścieżkę katalogu z plikami .mp3: ",
            )),
            Message::SaveDirectoryPrompt => f.write_str(lang.pick(
                "Save directory to mp.conf? (y/n): ",
                "Zapisz katalog do mp.conf? (t/n): ",
            )),
            Message::DirectorySaved => f.write_str(lang.pick("Directory saved.", "Katalog zapisany.")),
            Message::ConfigSaveFailed => f.write_str(lang.pick(
                "Failed to save config.",
                "Nie udało się zapisać konfiguracji.",
            )),
            Message::DirectoryMissing => f.write_str(lang.pick(
                "Directory does not exist. Exiting.",
                "Katalog nie istnieje. Kończenie programu.",
            )),
            Message::NoAudioFiles(ext) => match lang {
                Language::En => write!(f, "No .{ext} files found."),
                Language::Pl => write!(f, "Nie znaleziono plików .{ext}."),
            },
            Message::ExitingProgram => f.write_str(lang.pick("Exiting program.", "Zamykanie programu.")),
            Message::Goodbye => f.write_str(lang.pick("Goodbye!", "Do widzenia!")),

            Message::MainMenu => f.write_str(lang.pick(
                "\nMain menu options:\n  1 : Play single file\n  2 : Play sequentially front-to-back\n  3 : Play sequentially back-to-front\n  4 : Exit\n",
                "\n\nMenu główne:\n  1 : Odtwórz pojedynczy plik\n  2 : Odtwórz sekwencyjnie od początku\n  3 : Odtwórz sekwencyjnie od końca\n  4 : Wyjdź\n",
            )),
            Message::SelectOption { min, max } => match lang {
                Language::En => write!(f, "Select playback option ({min}-{max}): "),
                Language::Pl => write!(f, "Wybierz opcję odtwarzania ({min}-{max}): "),
            },
            Message::OutOfRange { min, max } => match lang {
                Language::En => write!(f, "Input out of range ({min}-{max}). Try again."),
                Language::Pl => write!(f, "Wartość poza zakresem ({min}-{max}). Spróbuj ponownie."),
            },
            Message::NotANumber => f.write_str(lang.pick(
                "Invalid input. Please enter a number.",
                "Niepoprawne dane. Wprowadź liczbę.",
            )),
            Message::ControlsHeader => f.write_str(lang.pick(
                "During playback controls:\n",
                "\nSterowanie podczas odtwarzania:\n",
            )),
            Message::AvailableFiles => f.write_str(lang.pick("Available files:", "Dostępne pliki:")),
            Message::EnterFileNumber => f.write_str(lang.pick(
                "Enter file number to play: ",
                "Wprowadź numer pliku do odtworzenia: ",
            )),

            Message::Playing(name) => match lang {
                Language::En => write!(f, "Playing: {name}"),
                Language::Pl => write!(f, "Odtwarzanie: {name}"),
            },
            Message::PlaybackHelp => f.write_str(lang.pick(
                "\nPlayback Controls:\n  s or space    : Pause/Resume playback\n  B             : Volume up\n  -             : Volume down\n  q             : Quit current playback\n  h             : Show this help\n",
                "\nSterowanie podczas odtwarzania:\n  s lub spacja   : Pauza/Wznowienie odtwarzania\n  B             : Głośniej\n  -             : Ciszej\n  q             : Zakończ odtwarzanie\n  h             : Pokaż tę pomoc\n",
            )),
            Message::Paused => f.write_str(lang.pick("[Paused]", "Pauza")),
            Message::PauseFailed => f.write_str(lang.pick("[Pause failed]", "Nie udało się wstrzymać")),
            Message::Resumed => f.write_str(lang.pick("[Resumed]", "Wznowiono")),
            Message::ResumeFailed => f.write_str(lang.pick("[Resume failed]", "Nie udało się wznowić")),
            Message::VolumeUp => f.write_str(lang.pick("[Volume increased]", "Głośność zwiększona")),
            Message::VolumeUpFailed => f.write_str(lang.pick(
                "[Failed to increase volume]",
                "Nie udało się zwiększyć głośności",
            )),
            Message::VolumeDown => f.write_str(lang.pick("[Volume decreased]", "Głośność zmniejszona")),
            Message::VolumeDownFailed => f.write_str(lang.pick(
                "[Failed to decrease volume]",
                "Nie udało się zmniejszyć głośności",
            )),
            Message::LaunchFailed => f.write_str(lang.pick(
                "Error: failed to start playback process.",
                "Błąd: nie udało się uruchomić procesu odtwarzania.",
            )),
        }
    }
}
