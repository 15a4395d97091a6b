//! Game settings and preferences
//!
//! Persisted separately from the high score through [`crate::persistence::Storage`].

use serde::{Deserialize, Serialize};

/// User preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Sound effects
    pub sound_enabled: bool,
    /// Background music
    pub music_enabled: bool,
    /// Haptic feedback after each commit
    pub vibration_enabled: bool,
    /// Player avatar location, if one was picked
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_uri: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            music_enabled: true,
            vibration_enabled: true,
            avatar_uri: None,
        }
    }
}

/// A single toggleable preference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Sound,
    Music,
    Vibration,
}

impl Toggle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Toggle::Sound => "Sound",
            Toggle::Music => "Music",
            Toggle::Vibration => "Vibration",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "sound" | "sfx" => Some(Toggle::Sound),
            "music" => Some(Toggle::Music),
            "vibration" | "haptics" => Some(Toggle::Vibration),
            _ => None,
        }
    }
}

impl Settings {
    /// Read a toggle
    pub fn get(&self, toggle: Toggle) -> bool {
        match toggle {
            Toggle::Sound => self.sound_enabled,
            Toggle::Music => self.music_enabled,
            Toggle::Vibration => self.vibration_enabled,
        }
    }

    /// Flip a toggle, returning the new value
    pub fn toggle(&mut self, toggle: Toggle) -> bool {
        let slot = match toggle {
            Toggle::Sound => &mut self.sound_enabled,
            Toggle::Music => &mut self.music_enabled,
            Toggle::Vibration => &mut self.vibration_enabled,
        };
        *slot = !*slot;
        *slot
    }

    /// Whether commit feedback should fire
    pub fn feedback_enabled(&self) -> bool {
        self.vibration_enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_all_on() {
        let settings = Settings::default();
        assert!(settings.sound_enabled);
        assert!(settings.music_enabled);
        assert!(settings.vibration_enabled);
        assert!(settings.avatar_uri.is_none());
        assert!(settings.feedback_enabled());
    }

    #[test]
    fn test_toggle() {
        let mut settings = Settings::default();
        assert!(!settings.toggle(Toggle::Vibration));
        assert!(!settings.get(Toggle::Vibration));
        assert!(!settings.feedback_enabled());
        assert!(settings.toggle(Toggle::Vibration));
        assert!(settings.get(Toggle::Sound));
    }

    #[test]
    fn test_toggle_from_str() {
        assert_eq!(Toggle::from_str("Vibration"), Some(Toggle::Vibration));
        assert_eq!(Toggle::from_str("sfx"), Some(Toggle::Sound));
        assert_eq!(Toggle::from_str("volume"), None);
        assert_eq!(Toggle::Music.as_str(), "Music");
    }

    #[test]
    fn test_json_shape() {
        let json = r#"{"soundEnabled":false,"musicEnabled":true,"vibrationEnabled":false}"#;
        let settings: Settings = serde_json::from_str(json).unwrap();
        assert!(!settings.sound_enabled);
        assert!(settings.music_enabled);
        assert!(settings.avatar_uri.is_none());
        assert_eq!(serde_json::to_string(&settings).unwrap(), json);
    }
}
