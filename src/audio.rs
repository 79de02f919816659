//! Audio context driven by simulation events
//!
//! The simulation only emits [`GameEvent`]s. [`AudioManager`] maps them to
//! sound effects and music and hands playback to an [`AudioBackend`]
//! supplied by the platform. Playback failures are logged and skipped.

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player hops
    Jump,
    /// Projectile fired
    Shoot,
    /// Hazard shot down
    Explosion,
    /// Player touched a hazard
    Hit,
    LevelComplete,
    GameOver,
}

impl SoundEffect {
    /// Bundled asset name
    pub fn file_name(&self) -> &'static str {
        match self {
            SoundEffect::Jump => "jump.wav",
            SoundEffect::Shoot => "shoot.wav",
            SoundEffect::Explosion => "explosion.wav",
            SoundEffect::Hit => "hit.wav",
            SoundEffect::LevelComplete => "level_complete.wav",
            SoundEffect::GameOver => "game_over.wav",
        }
    }
}

/// Looping music tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Music {
    Gameplay,
}

impl Music {
    pub fn file_name(&self) -> &'static str {
        match self {
            Music::Gameplay => "background_music.mp3",
        }
    }
}

/// Playback failure reported by a backend
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AudioError {
    #[error("audio file not found: {0}")]
    NotFound(String),

    #[error("could not play {file}: {reason}")]
    Playback { file: String, reason: String },
}

/// Platform audio output
pub trait AudioBackend {
    /// Fire-and-forget one-shot effect
    fn play_effect(&mut self, file: &str, volume: f32) -> Result<(), AudioError>;
    /// Start looping a music file, replacing any current track
    fn play_music(&mut self, file: &str, volume: f32) -> Result<(), AudioError>;
    fn set_music_volume(&mut self, volume: f32);
    fn pause_music(&mut self);
    fn resume_music(&mut self);
    fn stop_music(&mut self);
}

/// Backend that only logs, for headless runs
#[derive(Debug, Default)]
pub struct LogBackend {
    /// Effects played so far, in order
    pub played: Vec<String>,
    /// Track currently looping
    pub music: Option<String>,
    pub music_volume: f32,
}

impl AudioBackend for LogBackend {
    fn play_effect(&mut self, file: &str, volume: f32) -> Result<(), AudioError> {
        log::debug!("sfx {} @ {:.2}", file, volume);
        self.played.push(file.to_string());
        Ok(())
    }

    fn play_music(&mut self, file: &str, volume: f32) -> Result<(), AudioError> {
        log::debug!("music {} @ {:.2}", file, volume);
        self.music = Some(file.to_string());
        self.music_volume = volume;
        Ok(())
    }

    fn set_music_volume(&mut self, volume: f32) {
        self.music_volume = volume;
    }

    fn pause_music(&mut self) {}

    fn resume_music(&mut self) {}

    fn stop_music(&mut self) {
        log::debug!("music stopped");
        self.music = None;
    }
}

/// Fade-out duration for music (seconds)
pub const MUSIC_FADE_SECS: f32 = 1.0;
/// Volume steps in a fade-out
pub const MUSIC_FADE_STEPS: u32 = 20;

/// Stepped music fade in progress
#[derive(Debug, Clone, Copy)]
struct MusicFade {
    start_volume: f32,
    steps_done: u32,
    /// Time accumulated toward the next step
    accum: f32,
}

/// Audio manager for the game
pub struct AudioManager<B: AudioBackend> {
    backend: B,
    music_enabled: bool,
    sfx_enabled: bool,
    sfx_volume: f32,
    music_volume: f32,
    playing: Option<Music>,
    fade: Option<MusicFade>,
}

impl<B: AudioBackend> AudioManager<B> {
    pub fn new(backend: B, settings: &Settings) -> Self {
        Self {
            backend,
            music_enabled: settings.music_enabled,
            sfx_enabled: settings.sfx_enabled,
            sfx_volume: settings.effective_sfx_volume(),
            music_volume: settings.effective_music_volume(),
            playing: None,
            fade: None,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Currently looping track, if any
    pub fn playing(&self) -> Option<Music> {
        self.playing
    }

    /// React to one simulation event
    pub fn handle_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::MusicStart => self.play_music(Music::Gameplay),
            GameEvent::MusicStop => self.stop_music(true),
            GameEvent::Jump => self.play(SoundEffect::Jump),
            GameEvent::Shoot => self.play(SoundEffect::Shoot),
            GameEvent::Explosion { .. } => self.play(SoundEffect::Explosion),
            GameEvent::PlayerHit { .. } => self.play(SoundEffect::Hit),
            GameEvent::LevelComplete { .. } => self.play(SoundEffect::LevelComplete),
            GameEvent::GameOver { .. } => self.play(SoundEffect::GameOver),
            GameEvent::LevelStarted { .. } | GameEvent::RestartDue => {}
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        if !self.sfx_enabled || self.sfx_volume <= 0.0 {
            return;
        }
        if let Err(e) = self.backend.play_effect(effect.file_name(), self.sfx_volume) {
            log::warn!("{}", e);
        }
    }

    /// Start a music track (restarts it if already playing)
    pub fn play_music(&mut self, music: Music) {
        if !self.music_enabled {
            return;
        }
        self.fade = None;
        match self.backend.play_music(music.file_name(), self.music_volume) {
            Ok(()) => self.playing = Some(music),
            Err(e) => log::warn!("{}", e),
        }
    }

    /// Stop music, optionally fading out over [`MUSIC_FADE_SECS`]
    pub fn stop_music(&mut self, fade_out: bool) {
        if self.playing.is_none() {
            return;
        }
        if fade_out {
            if self.fade.is_none() {
                self.fade = Some(MusicFade {
                    start_volume: self.music_volume,
                    steps_done: 0,
                    accum: 0.0,
                });
            }
        } else {
            self.finish_stop();
        }
    }

    /// Advance a running fade; call once per frame
    pub fn update(&mut self, dt: f32) {
        let Some(mut fade) = self.fade else {
            return;
        };
        let step_len = MUSIC_FADE_SECS / MUSIC_FADE_STEPS as f32;
        fade.accum += dt;
        while fade.accum >= step_len && fade.steps_done < MUSIC_FADE_STEPS {
            fade.accum -= step_len;
            fade.steps_done += 1;
        }

        if fade.steps_done >= MUSIC_FADE_STEPS {
            self.finish_stop();
            return;
        }
        let remaining = 1.0 - fade.steps_done as f32 / MUSIC_FADE_STEPS as f32;
        self.backend.set_music_volume(fade.start_volume * remaining);
        self.fade = Some(fade);
    }

    fn finish_stop(&mut self) {
        self.fade = None;
        self.playing = None;
        self.backend.stop_music();
    }

    pub fn toggle_music(&mut self) {
        self.set_music_enabled(!self.music_enabled);
    }

    pub fn set_music_enabled(&mut self, enabled: bool) {
        self.music_enabled = enabled;
        if enabled {
            if self.playing.is_some() {
                self.backend.resume_music();
            }
        } else {
            self.backend.pause_music();
        }
    }

    pub fn toggle_sound_effects(&mut self) {
        self.sfx_enabled = !self.sfx_enabled;
    }

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, volume: f32) {
        self.music_volume = volume.clamp(0.0, 1.0);
        self.backend.set_music_volume(self.music_volume);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    /// Backend whose files are all missing
    #[derive(Default)]
    struct MissingAssets {
        attempts: u32,
    }

    impl AudioBackend for MissingAssets {
        fn play_effect(&mut self, file: &str, _volume: f32) -> Result<(), AudioError> {
            self.attempts += 1;
            Err(AudioError::NotFound(file.to_string()))
        }
        fn play_music(&mut self, file: &str, _volume: f32) -> Result<(), AudioError> {
            self.attempts += 1;
            Err(AudioError::NotFound(file.to_string()))
        }
        fn set_music_volume(&mut self, _volume: f32) {}
        fn pause_music(&mut self) {}
        fn resume_music(&mut self) {}
        fn stop_music(&mut self) {}
    }

    fn manager() -> AudioManager<LogBackend> {
        AudioManager::new(LogBackend::default(), &Settings::default())
    }

    #[test]
    fn test_events_map_to_effects() {
        let mut audio = manager();
        audio.handle_event(&GameEvent::Shoot);
        audio.handle_event(&GameEvent::Explosion {
            position: Vec2::ZERO,
        });
        audio.handle_event(&GameEvent::PlayerHit { lives_left: 2 });
        audio.handle_event(&GameEvent::RestartDue);
        assert_eq!(
            audio.backend().played,
            vec!["shoot.wav", "explosion.wav", "hit.wav"]
        );
    }

    #[test]
    fn test_music_fades_out_over_one_second() {
        let mut audio = manager();
        audio.handle_event(&GameEvent::MusicStart);
        assert_eq!(audio.playing(), Some(Music::Gameplay));

        audio.handle_event(&GameEvent::MusicStop);
        audio.update(0.5);
        assert_eq!(audio.playing(), Some(Music::Gameplay));
        assert!(audio.backend().music_volume < 0.5 && audio.backend().music_volume > 0.0);

        audio.update(0.6);
        assert_eq!(audio.playing(), None);
        assert!(audio.backend().music.is_none());
    }

    #[test]
    fn test_disabled_effects_are_silent() {
        let mut audio = manager();
        audio.toggle_sound_effects();
        audio.play(SoundEffect::Jump);
        assert!(audio.backend().played.is_empty());
    }

    #[test]
    fn test_missing_assets_are_skipped() {
        let mut audio = AudioManager::new(MissingAssets::default(), &Settings::default());
        audio.handle_event(&GameEvent::MusicStart);
        audio.play(SoundEffect::Explosion);
        assert_eq!(audio.backend().attempts, 2);
        assert_eq!(audio.playing(), None);
    }

    #[test]
    fn test_music_volume_clamped() {
        let mut audio = manager();
        audio.set_music_volume(3.0);
        assert_eq!(audio.backend().music_volume, 1.0);
    }
}
