//! Menu sound cues
//!
//! The menu never talks to an audio engine directly. It names the cue it wants
//! and an [`AudioSink`] decides how (or whether) to play it.

use log::debug;

/// Named sound cues the menu triggers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    EnterMenu,
    ExitMenu,
    /// Alternate exit, used when leaving the menu to start a game
    ExitMenuAlt,
    FocusChange,
    SelectionChange,
    ButtonPress,
    BackButtonPress,
    ItemChange,
    /// Played while dragging the sound volume slider
    Test,
    UserError,
}

/// Fire-and-forget audio output
pub trait AudioSink {
    /// Trigger a cue; must not block
    fn play(&mut self, cue: SoundCue);

    /// Apply volumes in the range 0.0 to 1.0
    fn set_volumes(&mut self, music: f32, sound: f32);
}

/// Audio sink that only logs, for hosts without an audio engine
#[derive(Debug, Default)]
pub struct LogAudio {
    music_volume: f32,
    sound_volume: f32,
}

impl LogAudio {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AudioSink for LogAudio {
    fn play(&mut self, cue: SoundCue) {
        if self.sound_volume > 0.0 {
            debug!("Sound cue {:?} at volume {:.2}", cue, self.sound_volume);
        }
    }

    fn set_volumes(&mut self, music: f32, sound: f32) {
        self.music_volume = music.clamp(0.0, 1.0);
        self.sound_volume = sound.clamp(0.0, 1.0);
        debug!("Volumes set: music {:.2}, sound {:.2}", self.music_volume, self.sound_volume);
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_audio_clamps_volumes() {
        let mut audio = LogAudio::new();
        audio.set_volumes(2.0, -1.0);
        assert_eq!(audio.music_volume, 1.0);
        assert_eq!(audio.sound_volume, 0.0);
    }

    #[test]
    fn test_recording_audio_shares_log() {
        let recorder = testing::RecordingAudio::default();
        let mut sink = recorder.clone();
        sink.play(SoundCue::ButtonPress);
        assert_eq!(*recorder.cues.borrow(), vec![SoundCue::ButtonPress]);
    }
}
