// Keystroke table for the playback loop. Case matters except for volume up.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    TogglePause,
    VolumeUp,
    VolumeDown,
    Quit,
    Help,
}

impl Action {
    pub fn from_key(key: u8) -> Option<Self> {
        match key {
            b's' | b' ' => Some(Action::TogglePause),
            b'B' | b'b' => Some(Action::VolumeUp),
            b'-' => Some(Action::VolumeDown),
            b'q' => Some(Action::Quit),
            b'h' => Some(Action::Help),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_table() {
        assert_eq!(Action::from_key(b's'), Some(Action::TogglePause));
        assert_eq!(Action::from_key(b' '), Some(Action::TogglePause));
        assert_eq!(Action::from_key(b'B'), Some(Action::VolumeUp));
        assert_eq!(Action::from_key(b'b'), Some(Action::VolumeUp));
        assert_eq!(Action::from_key(b'-'), Some(Action::VolumeDown));
        assert_eq!(Action::from_key(b'q'), Some(Action::Quit));
        assert_eq!(Action::from_key(b'h'), Some(Action::Help));
    }

    #[test]
    fn test_everything_else_is_ignored() {
        for key in [b'S', b'Q', b'H', b'+', b'x', b'\n', 0u8, 0x1b] {
            assert_eq!(Action::from_key(key), None, "key {key:#x}");
        }
    }
}
