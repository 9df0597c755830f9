//! Audio preferences
//!
//! The simulation never reads these; it emits sound events regardless. The
//! presentation layer consults the settings when deciding whether to
//! actually play them.

use serde::{Deserialize, Serialize};

/// Player audio preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Background music (menu and gameplay streams)
    pub music_enabled: bool,
    /// Sound effects (fire, hits, explosions, pickups)
    pub sound_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            music_enabled: true,
            sound_enabled: true,
        }
    }
}

impl Settings {
    /// Toggle music; sound effects follow the music switch.
    pub fn toggle_music(&mut self) {
        self.music_enabled = !self.music_enabled;
        self.sound_enabled = self.music_enabled;
    }

    /// Toggle sound effects; turning them off silences music too.
    pub fn toggle_all_sounds(&mut self) {
        self.sound_enabled = !self.sound_enabled;
        if !self.sound_enabled {
            self.music_enabled = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn music_toggle_links_sound() {
        let mut settings = Settings::default();
        settings.toggle_music();
        assert!(!settings.music_enabled);
        assert!(!settings.sound_enabled);
        settings.toggle_music();
        assert!(settings.music_enabled);
        assert!(settings.sound_enabled);
    }

    #[test]
    fn sound_off_silences_music() {
        let mut settings = Settings::default();
        settings.toggle_all_sounds();
        assert!(!settings.sound_enabled);
        assert!(!settings.music_enabled);

        // Re-enabling sound leaves music off
        settings.toggle_all_sounds();
        assert!(settings.sound_enabled);
        assert!(!settings.music_enabled);
    }
}
