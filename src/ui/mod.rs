// Terminal UI - line-based prompts and the main menu
// Playback itself switches the terminal to single keys, see terminal/.

mod app;
pub mod menu;

pub use app::{App, Outcome};
pub use menu::{Menu, MenuChoice, PlayOrder};

use crate::locale::{Language, Message};
use std::io::{self, BufRead, Write};

/// Line input plus localized output. Every message is rendered in the
/// language the console was created with.
pub struct Console<R, W, E = io::Stderr> {
    input: R,
    output: W,
    errors: E,
    lang: Language,
}

impl Console<io::StdinLock<'static>, io::Stdout, io::Stderr> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout(), io::stderr(), Language::default())
    }
}

impl<R: BufRead, W: Write, E: Write> Console<R, W, E> {
    pub fn new(input: R, output: W, errors: E, lang: Language) -> Self {
        Self { input, output, errors, lang }
    }

    pub fn lang(&self) -> Language {
        self.lang
    }

    pub fn set_language(&mut self, lang: Language) {
        self.lang = lang;
    }

    pub fn say(&mut self, message: Message<'_>) -> io::Result<()> {
        writeln!(self.output, "{}", message.localize(self.lang))
    }

    pub fn warn(&mut self, message: Message<'_>) -> io::Result<()> {
        writeln!(self.errors, "{}", message.localize(self.lang))?;
        self.errors.flush()
    }

    pub fn prompt(&mut self, message: Message<'_>) -> io::Result<()> {
        write!(self.output, "{}", message.localize(self.lang))?;
        self.output.flush()
    }

    /// Writes text that is the same in every language.
    pub fn write_plain(&mut self, text: &str) -> io::Result<()> {
        self.output.write_all(text.as_bytes())?;
        self.output.flush()
    }

    /// One line without its terminator, or `None` once input is exhausted.
    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    pub fn ask(&mut self, message: Message<'_>) -> io::Result<Option<String>> {
        self.prompt(message)?;
        self.read_line()
    }

    /// Keeps asking until the first word of a line is a number in
    /// `min..=max`. There is no attempt limit; end of input returns `None`.
    pub fn read_number(&mut self, min: u32, max: u32, prompt: Message<'_>) -> io::Result<Option<u32>> {
        loop {
            let Some(line) = self.ask(prompt.clone())? else {
                return Ok(None);
            };

            let Some(word) = line.split_whitespace().next() else {
                continue;
            };

            match word.parse::<i64>() {
                Ok(value) if (i64::from(min)..=i64::from(max)).contains(&value) => {
                    return Ok(Some(value as u32));
                }
                Ok(_) => self.say(Message::OutOfRange { min, max })?,
                Err(_) => self.say(Message::NotANumber)?,
            }
        }
    }

    pub fn into_parts(self) -> (R, W, E) {
        (self.input, self.output, self.errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    type TestConsole = Console<Cursor<&'static str>, Vec<u8>, Vec<u8>>;

    fn console(input: &'static str) -> TestConsole {
        Console::new(Cursor::new(input), Vec::new(), Vec::new(), Language::En)
    }

    fn stdout_of(console: TestConsole) -> String {
        String::from_utf8(console.into_parts().1).unwrap()
    }

    #[test]
    fn test_read_line_strips_terminators() {
        let mut console = console("first\r\nsecond\nlast");
        assert_eq!(console.read_line().unwrap().as_deref(), Some("first"));
        assert_eq!(console.read_line().unwrap().as_deref(), Some("second"));
        assert_eq!(console.read_line().unwrap().as_deref(), Some("last"));
        assert_eq!(console.read_line().unwrap(), None);
    }

    #[test]
    fn test_read_number_rejects_until_valid() {
        let mut console = console("0\n5\nabc\n\n3\n");
        let value = console
            .read_number(1, 4, Message::SelectOption { min: 1, max: 4 })
            .unwrap();
        assert_eq!(value, Some(3));

        let out = stdout_of(console);
        assert_eq!(out.matches("Input out of range (1-4). Try again.").count(), 2);
        assert_eq!(out.matches("Invalid input. Please enter a number.").count(), 1);
        assert_eq!(out.matches("Select playback option (1-4): ").count(), 5);
    }

    #[test]
    fn test_read_number_takes_first_word() {
        let mut console = console("  2 extra words\n");
        assert_eq!(console.read_number(1, 4, Message::EnterFileNumber).unwrap(), Some(2));
    }

    #[test]
    fn test_read_number_stops_at_end_of_input() {
        let mut console = console("x\n-1\n");
        assert_eq!(console.read_number(1, 3, Message::EnterFileNumber).unwrap(), None);
    }

    #[test]
    fn test_warn_goes_to_error_stream() {
        let mut console = console("");
        console.set_language(Language::Pl);
        console.warn(Message::DirectoryMissing).unwrap();
        let (_, out, err) = console.into_parts();
        assert!(out.is_empty());
        assert_eq!(String::from_utf8(err).unwrap(), "Katalog nie istnieje. Kończenie programu.\n");
    }
}
