use super::Console;
use crate::library::AudioFile;
use crate::locale::Message;
use crate::playback::{PlaybackError, Player, SessionEnd};
use std::io::{self, BufRead, Write};
use tracing::{error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    PlaySingle,
    PlayForward,
    PlayReverse,
    Exit,
}

impl MenuChoice {
    pub const FIRST: u32 = 1;
    pub const LAST: u32 = 4;

    pub fn from_number(number: u32) -> Option<Self> {
        match number {
            1 => Some(MenuChoice::PlaySingle),
            2 => Some(MenuChoice::PlayForward),
            3 => Some(MenuChoice::PlayReverse),
            4 => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOrder {
    Forward,
    Reverse,
}

impl PlayOrder {
    pub fn arrange<'a>(self, files: &'a [AudioFile]) -> Vec<&'a AudioFile> {
        match self {
            PlayOrder::Forward => files.iter().collect(),
            PlayOrder::Reverse => files.iter().rev().collect(),
        }
    }
}

/// The main menu loop over a fixed list of files.
pub struct Menu<'a, P> {
    files: &'a [AudioFile],
    player: P,
}

impl<'a, P: Player> Menu<'a, P> {
    pub fn new(files: &'a [AudioFile], player: P) -> Self {
        Self { files, player }
    }

    pub fn player(&self) -> &P {
        &self.player
    }

    /// Returns when the user picks Exit or input runs out.
    pub fn run<R: BufRead, W: Write, E: Write>(&mut self, console: &mut Console<R, W, E>) -> io::Result<()> {
        loop {
            let Some(choice) = self.select(console)? else {
                info!("Input closed at main menu");
                return Ok(());
            };

            let order = match choice {
                MenuChoice::Exit => return Ok(()),
                MenuChoice::PlaySingle => None,
                MenuChoice::PlayForward => Some(PlayOrder::Forward),
                MenuChoice::PlayReverse => Some(PlayOrder::Reverse),
            };

            console.say(Message::ControlsHeader)?;
            console.say(Message::PlaybackHelp)?;

            match order {
                Some(order) => self.play_all(order, console)?,
                None => self.play_single(console)?,
            }

            console.write_plain("\n")?;
        }
    }

    pub fn select<R: BufRead, W: Write, E: Write>(
        &mut self,
        console: &mut Console<R, W, E>,
    ) -> io::Result<Option<MenuChoice>> {
        console.say(Message::MainMenu)?;
        let prompt = Message::SelectOption { min: MenuChoice::FIRST, max: MenuChoice::LAST };
        let number = console.read_number(MenuChoice::FIRST, MenuChoice::LAST, prompt)?;
        Ok(number.and_then(MenuChoice::from_number))
    }

    fn play_single<R: BufRead, W: Write, E: Write>(&mut self, console: &mut Console<R, W, E>) -> io::Result<()> {
        console.say(Message::AvailableFiles)?;
        for (index, file) in self.files.iter().enumerate() {
            console.write_plain(&format!("{}) {}\n", index + 1, file.display_name()))?;
        }

        let count = u32::try_from(self.files.len()).unwrap_or(u32::MAX);
        let Some(number) = console.read_number(1, count, Message::EnterFileNumber)? else {
            return Ok(());
        };

        let files = self.files;
        self.play_file(&files[number as usize - 1], console)
    }

    pub fn play_all<R: BufRead, W: Write, E: Write>(
        &mut self,
        order: PlayOrder,
        console: &mut Console<R, W, E>,
    ) -> io::Result<()> {
        info!("Playing {} files {:?}", self.files.len(), order);
        for file in order.arrange(self.files) {
            self.play_file(file, console)?;
        }
        Ok(())
    }

    /// Launch failures are reported and swallowed so a sequence keeps going.
    fn play_file<R: BufRead, W: Write, E: Write>(
        &mut self,
        file: &AudioFile,
        console: &mut Console<R, W, E>,
    ) -> io::Result<()> {
        match self.player.play(file) {
            Ok(SessionEnd::Finished(_) | SessionEnd::Quit) => Ok(()),
            Err(e @ PlaybackError::Launch { .. }) => {
                error!("{}", e);
                console.warn(Message::LaunchFailed)
            }
            Err(PlaybackError::Io(e)) => {
                error!("Playback of {} aborted: {}", file.path.display(), e);
                Ok(())
            }
        }
    }
}
