//! Kiosk UI state

use std::fmt;

/// Which screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// Welcome overlay with the start button
    #[default]
    Title,
    /// Framed artwork with the sound, delay and watch controls
    Main,
}

/// Sound mode selected with the three round toggles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SoundMode {
    #[default]
    One,
    Two,
    Three,
}

impl SoundMode {
    pub const ALL: [SoundMode; 3] = [SoundMode::One, SoundMode::Two, SoundMode::Three];

    /// Value sent on the sound-mode channel (1-3)
    pub fn number(self) -> u8 {
        match self {
            SoundMode::One => 1,
            SoundMode::Two => 2,
            SoundMode::Three => 3,
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(SoundMode::One),
            2 => Some(SoundMode::Two),
            3 => Some(SoundMode::Three),
            _ => None,
        }
    }
}

impl fmt::Display for SoundMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sound{}", self.number())
    }
}

/// Every toggle the visitor controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub screen: Screen,
    pub sound_mode: SoundMode,
    pub delay_enabled: bool,
    /// Pointer colour sampling ("Watch") is on
    pub inspecting: bool,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            screen: Screen::Title,
            sound_mode: SoundMode::One,
            delay_enabled: true,
            inspecting: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let controls = Controls::default();
        assert_eq!(controls.screen, Screen::Title);
        assert_eq!(controls.sound_mode, SoundMode::One);
        assert!(controls.delay_enabled);
        assert!(!controls.inspecting);
    }

    #[test]
    fn test_sound_mode_numbers() {
        for mode in SoundMode::ALL {
            assert_eq!(SoundMode::from_number(mode.number()), Some(mode));
        }
        assert_eq!(SoundMode::from_number(0), None);
        assert_eq!(SoundMode::Three.to_string(), "Sound3");
    }
}
