//! Ambient audio controller.
//!
//! Owns the single ambient track. All play/pause traffic goes through this
//! controller so no other subsystem touches the sink directly. The enabled
//! flag is persisted under [`AUDIO_PREF_KEY`] on every toggle; a rejected
//! playback request (the system's only error path) reverts the flag and
//! the indicator and is never retried automatically.

use crate::platform::{AudioSink, PrefStore, Stage};
use crate::scene::SceneId;

/// Fixed ambient playback volume.
pub const AMBIENT_VOLUME: f32 = 0.25;
/// Fade cadence: volume drops every this many milliseconds.
pub const FADE_TICK_MS: u32 = 100;
/// Volume decrement per fade tick.
pub const FADE_STEP: f32 = 0.05;
/// Fade stops (and pauses the track) at or below this volume.
pub const FADE_FLOOR: f32 = 0.02;
/// Persisted preference key, shared with the web build.
pub const AUDIO_PREF_KEY: &str = "circle22_audio";
/// Ambient audio only plays from this scene on.
pub const AUDIO_MIN_SCENE: SceneId = SceneId::DESCENT;

#[derive(Debug)]
struct Fade {
    carry_ms: u32,
}

/// Ambient audio state and the fade-out routine.
pub struct AudioController {
    sink: Box<dyn AudioSink>,
    prefs: Box<dyn PrefStore>,
    enabled: bool,
    volume: f32,
    fade: Option<Fade>,
}

impl AudioController {
    pub fn new(sink: Box<dyn AudioSink>, prefs: Box<dyn PrefStore>) -> Self {
        Self {
            sink,
            prefs,
            enabled: false,
            volume: AMBIENT_VOLUME,
            fade: None,
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Restore the persisted preference. The value is informational at this
    /// point: it drives the indicator, but playback still needs a user
    /// gesture and an eligible scene. Returns the restored flag.
    pub fn restore_preference(&mut self) -> bool {
        let stored = self.prefs.read(AUDIO_PREF_KEY);
        self.enabled = stored.as_deref() == Some("true");
        tracing::info!(
            "Audio preference: {}",
            stored.as_deref().unwrap_or("not set")
        );
        self.enabled
    }

    /// Flip the enabled flag, update the indicator, persist, and start or
    /// stop playback.
    pub fn toggle(&mut self, stage: &mut dyn Stage, current: SceneId, gesture_seen: bool) {
        self.enabled = !self.enabled;
        stage.set_audio_indicator(self.enabled);
        self.prefs.write(
            AUDIO_PREF_KEY,
            if self.enabled { "true" } else { "false" },
        );
        tracing::debug!("Audio toggled {}", if self.enabled { "on" } else { "off" });

        if self.enabled {
            self.play(stage, current, gesture_seen);
        } else {
            self.pause();
        }
    }

    /// Request ambient playback. A no-op unless audio is enabled, the
    /// current scene has reached [`AUDIO_MIN_SCENE`], and a user gesture
    /// has been seen this session. Rejection reverts the enabled flag and
    /// the indicator; the stored preference is left alone and the request
    /// is only retried on the next explicit toggle.
    pub fn play(&mut self, stage: &mut dyn Stage, current: SceneId, gesture_seen: bool) {
        if !self.enabled {
            return;
        }
        if current < AUDIO_MIN_SCENE {
            tracing::debug!("Ambient not yet eligible at {}", current);
            return;
        }
        if !gesture_seen {
            tracing::debug!("Ambient withheld: no user gesture yet");
            return;
        }

        self.fade = None;
        self.volume = AMBIENT_VOLUME;
        self.sink.set_volume(self.volume);
        match self.sink.play() {
            Ok(()) => tracing::debug!("Ambient playing at volume {}", self.volume),
            Err(e) => {
                tracing::warn!("Ambient playback rejected: {}", e);
                self.enabled = false;
                stage.set_audio_indicator(false);
            }
        }
    }

    /// Stop playback and rewind. The enabled flag is untouched.
    pub fn pause(&mut self) {
        self.fade = None;
        self.sink.pause();
    }

    /// Begin fading the track out. Driven by [`AudioController::tick`];
    /// restarting an in-progress fade is a no-op.
    pub fn fade_out(&mut self) {
        if self.fade.is_none() {
            tracing::debug!("Ambient fade-out started");
            self.fade = Some(Fade { carry_ms: 0 });
        }
    }

    /// Advance the fade by `dt_ms` of engine time.
    pub fn tick(&mut self, dt_ms: u32) {
        let Some(fade) = self.fade.as_mut() else {
            return;
        };

        fade.carry_ms += dt_ms;
        let mut done = false;
        while fade.carry_ms >= FADE_TICK_MS {
            fade.carry_ms -= FADE_TICK_MS;
            self.volume = (self.volume - FADE_STEP).max(0.0);
            self.sink.set_volume(self.volume);
            if self.volume <= FADE_FLOOR {
                self.sink.pause();
                done = true;
                break;
            }
        }

        if done {
            tracing::debug!("Ambient fade-out complete");
            self.fade = None;
        }
    }
}
