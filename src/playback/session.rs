use super::dispatch::Action;
use super::mixer::{VolumeControl, VolumeDirection};
use super::process::{ControlSignal, DecoderProcess};
use crate::locale::{Language, Message};
use crate::terminal::KeyEvents;
use std::io::{self, Write};
use std::process::ExitStatus;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The decoder exited on its own.
    Finished(ExitStatus),
    /// The user pressed quit; the decoder was told to terminate.
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

/// One decoder plus the keystroke loop controlling it.
pub struct PlaybackSession<P> {
    process: P,
    paused: bool,
    lang: Language,
}

impl<P: DecoderProcess> PlaybackSession<P> {
    pub fn new(process: P, lang: Language) -> Self {
        Self { process, paused: false, lang }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pid(&self) -> u32 {
        self.process.id()
    }

    pub fn into_process(self) -> P {
        self.process
    }

    /// Runs until the decoder exits or the user quits. Each round checks the
    /// decoder first, then blocks for the next key.
    pub fn run(
        &mut self,
        keys: &mut impl KeyEvents,
        volume: &mut impl VolumeControl,
        out: &mut impl Write,
    ) -> io::Result<SessionEnd> {
        loop {
            if let Some(status) = self.process.try_wait()? {
                info!("Decoder {} finished: {}", self.process.id(), status);
                return Ok(SessionEnd::Finished(status));
            }

            let Some(key) = keys.next_key()? else {
                continue;
            };

            if self.handle_key(key, volume, out)? == Flow::Stop {
                info!("Playback quit by user");
                return Ok(SessionEnd::Quit);
            }
        }
    }

    pub fn handle_key(
        &mut self,
        key: u8,
        volume: &mut impl VolumeControl,
        out: &mut impl Write,
    ) -> io::Result<Flow> {
        match Action::from_key(key) {
            Some(action) => self.perform(action, volume, out),
            None => {
                debug!("Ignoring key {:#04x}", key);
                Ok(Flow::Continue)
            }
        }
    }

    pub fn perform(
        &mut self,
        action: Action,
        volume: &mut impl VolumeControl,
        out: &mut impl Write,
    ) -> io::Result<Flow> {
        let message = match action {
            Action::TogglePause => {
                // The flag follows the key, not the signal's success.
                self.paused = !self.paused;
                if self.paused {
                    if self.process.signal(ControlSignal::Pause) {
                        Message::Paused
                    } else {
                        Message::PauseFailed
                    }
                } else if self.process.signal(ControlSignal::Resume) {
                    Message::Resumed
                } else {
                    Message::ResumeFailed
                }
            }
            Action::VolumeUp => {
                if volume.adjust(VolumeDirection::Up) {
                    Message::VolumeUp
                } else {
                    Message::VolumeUpFailed
                }
            }
            Action::VolumeDown => {
                if volume.adjust(VolumeDirection::Down) {
                    Message::VolumeDown
                } else {
                    Message::VolumeDownFailed
                }
            }
            Action::Quit => {
                self.process.signal(ControlSignal::Terminate);
                return Ok(Flow::Stop);
            }
            Action::Help => Message::PlaybackHelp,
        };

        writeln!(out, "{}", message.localize(self.lang))?;
        out.flush()?;
        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::os::unix::process::ExitStatusExt;

    /// Exits after `polls_before_exit` calls to try_wait.
    struct FakeDecoder {
        pid: u32,
        polls: usize,
        polls_before_exit: usize,
        signals: Vec<ControlSignal>,
        signals_succeed: bool,
    }

    impl FakeDecoder {
        fn exiting_after(polls_before_exit: usize) -> Self {
            Self {
                pid: 4242,
                polls: 0,
                polls_before_exit,
                signals: Vec::new(),
                signals_succeed: true,
            }
        }

        fn failing_signals(mut self) -> Self {
            self.signals_succeed = false;
            self
        }
    }

    impl DecoderProcess for FakeDecoder {
        fn id(&self) -> u32 {
            self.pid
        }

        fn try_wait(&mut self) -> io::Result<Option<ExitStatus>> {
            self.polls += 1;
            if self.polls > self.polls_before_exit {
                Ok(Some(ExitStatus::from_raw(0)))
            } else {
                Ok(None)
            }
        }

        fn signal(&mut self, signal: ControlSignal) -> bool {
            self.signals.push(signal);
            self.signals_succeed
        }
    }

    struct ScriptedKeys(VecDeque<Option<u8>>);

    impl ScriptedKeys {
        fn new(keys: &[Option<u8>]) -> Self {
            Self(keys.iter().copied().collect())
        }
    }

    impl KeyEvents for ScriptedKeys {
        fn next_key(&mut self) -> io::Result<Option<u8>> {
            Ok(self.0.pop_front().flatten())
        }
    }

    #[derive(Default)]
    struct FakeVolume {
        calls: Vec<VolumeDirection>,
        fail: bool,
    }

    impl VolumeControl for FakeVolume {
        fn adjust(&mut self, direction: VolumeDirection) -> bool {
            self.calls.push(direction);
            !self.fail
        }
    }

    fn output(out: Vec<u8>) -> String {
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_decoder_exit_ends_session() {
        let mut session = PlaybackSession::new(FakeDecoder::exiting_after(2), Language::En);
        let mut keys = ScriptedKeys::new(&[Some(b'x'), None]);
        let mut out = Vec::new();

        let end = session.run(&mut keys, &mut FakeVolume::default(), &mut out).unwrap();

        assert!(matches!(end, SessionEnd::Finished(status) if status.success()));
        assert!(out.is_empty());
    }

    #[test]
    fn test_quit_sends_one_terminate_and_stops_polling() {
        let mut session = PlaybackSession::new(FakeDecoder::exiting_after(usize::MAX), Language::En);
        let mut keys = ScriptedKeys::new(&[Some(b'q'), Some(b's')]);
        let mut out = Vec::new();

        let end = session.run(&mut keys, &mut FakeVolume::default(), &mut out).unwrap();
        let decoder = session.into_process();

        assert_eq!(end, SessionEnd::Quit);
        assert_eq!(decoder.signals, vec![ControlSignal::Terminate]);
        assert_eq!(decoder.polls, 1);
    }

    #[test]
    fn test_unknown_keys_change_nothing() {
        let mut session = PlaybackSession::new(FakeDecoder::exiting_after(usize::MAX), Language::En);
        let mut volume = FakeVolume::default();
        let mut out = Vec::new();

        for key in [b'x', b'Q', b'S', 0u8, b'\n', b'+'] {
            let flow = session.handle_key(key, &mut volume, &mut out).unwrap();
            assert_eq!(flow, Flow::Continue);
            assert!(!session.is_paused());
            assert_eq!(session.pid(), 4242);
        }

        assert!(volume.calls.is_empty());
        assert!(session.into_process().signals.is_empty());
        assert!(out.is_empty());
    }

    #[test]
    fn test_pause_toggles_twice_back_to_start() {
        let mut session = PlaybackSession::new(FakeDecoder::exiting_after(usize::MAX), Language::En);
        let mut volume = FakeVolume::default();
        let mut out = Vec::new();

        session.handle_key(b's', &mut volume, &mut out).unwrap();
        assert!(session.is_paused());
        session.handle_key(b' ', &mut volume, &mut out).unwrap();
        assert!(!session.is_paused());

        assert_eq!(output(out), "[Paused]\n[Resumed]\n");
        assert_eq!(
            session.into_process().signals,
            vec![ControlSignal::Pause, ControlSignal::Resume]
        );
    }

    #[test]
    fn test_pause_flag_flips_even_when_signal_fails() {
        let decoder = FakeDecoder::exiting_after(usize::MAX).failing_signals();
        let mut session = PlaybackSession::new(decoder, Language::Pl);
        let mut volume = FakeVolume::default();
        let mut out = Vec::new();

        session.handle_key(b's', &mut volume, &mut out).unwrap();
        assert!(session.is_paused());
        session.handle_key(b's', &mut volume, &mut out).unwrap();
        assert!(!session.is_paused());

        assert_eq!(output(out), "Nie udało się wstrzymać\nNie udało się wznowić\n");
    }

    #[test]
    fn test_volume_keys_report_result() {
        let mut session = PlaybackSession::new(FakeDecoder::exiting_after(usize::MAX), Language::En);
        let mut volume = FakeVolume::default();
        let mut out = Vec::new();

        session.handle_key(b'B', &mut volume, &mut out).unwrap();
        session.handle_key(b'b', &mut volume, &mut out).unwrap();
        session.handle_key(b'-', &mut volume, &mut out).unwrap();
        volume.fail = true;
        session.handle_key(b'-', &mut volume, &mut out).unwrap();

        assert_eq!(
            volume.calls,
            vec![
                VolumeDirection::Up,
                VolumeDirection::Up,
                VolumeDirection::Down,
                VolumeDirection::Down
            ]
        );
        assert_eq!(
            output(out),
            "[Volume increased]\n[Volume increased]\n[Volume decreased]\n[Failed to decrease volume]\n"
        );
        assert!(!session.is_paused());
    }

    #[test]
    fn test_help_reprints_controls() {
        let mut session = PlaybackSession::new(FakeDecoder::exiting_after(usize::MAX), Language::En);
        let mut out = Vec::new();

        let flow = session.handle_key(b'h', &mut FakeVolume::default(), &mut out).unwrap();

        assert_eq!(flow, Flow::Continue);
        assert!(output(out).contains("Playback Controls:"));
        assert!(session.into_process().signals.is_empty());
    }

    #[test]
    fn test_empty_reads_keep_waiting_for_decoder() {
        let mut session = PlaybackSession::new(FakeDecoder::exiting_after(3), Language::En);
        let mut keys = ScriptedKeys::new(&[None, None, None]);
        let mut out = Vec::new();

        let end = session.run(&mut keys, &mut FakeVolume::default(), &mut out).unwrap();

        assert!(matches!(end, SessionEnd::Finished(_)));
        assert_eq!(session.into_process().polls, 4);
    }
}
