//! Platform seams — what the host must provide.
//!
//! The web build of the experience runs against a browser page: DOM class
//! toggles, `scrollIntoView`, an `<audio>` element, localStorage, and
//! `navigator.vibrate`. Each of those becomes one small trait here so the
//! engine can run against a real window, a test harness, or nothing at all.

use thiserror::Error;

use crate::scene::SceneId;

/// Playback was refused by the platform (autoplay policy, missing device,
/// missing track). The only failure the engine has to handle.
#[derive(Debug, Error)]
#[error("playback rejected: {reason}")]
pub struct PlaybackError {
    reason: String,
}

impl PlaybackError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Visual and scroll side effects. One implementor owns the page.
pub trait Stage {
    /// Smooth-scroll the viewport so `scene` starts at the top.
    fn scroll_to_scene(&mut self, scene: SceneId);

    /// Jump to the very top of the page (no animation). Used at boot to
    /// defeat browser-style scroll restoration.
    fn reset_scroll(&mut self);

    /// Put the elevator scene into its "open" visual state. Monotonic;
    /// never cleared.
    fn set_door_open(&mut self);

    /// Put the button into its "pressed" visual state. Monotonic.
    fn set_button_pressed(&mut self);

    /// Audio indicator: true reads "On", false reads "Off".
    fn set_audio_indicator(&mut self, on: bool);

    /// Low-end device: render without scroll easing and heavy animation.
    fn set_reduce_motion(&mut self, on: bool);
}

/// The single ambient track. Exactly one owner issues play/pause: the
/// engine's audio controller. Hosts must not touch playback themselves.
pub trait AudioSink {
    /// Request playback from the start of the track, looping.
    fn play(&mut self) -> Result<(), PlaybackError>;

    /// Stop playback and rewind to the start.
    fn pause(&mut self);

    /// Set playback volume, 0.0 to 1.0.
    fn set_volume(&mut self, volume: f32);
}

/// One string preference, surviving restarts.
pub trait PrefStore {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&mut self, key: &str, value: &str);
}

/// Optional vibration capability. Best-effort: implementors without
/// hardware simply do nothing.
pub trait Haptics {
    fn vibrate(&mut self, ms: u32);
}

/// Haptics for hosts without a vibration capability.
pub struct NoHaptics;

impl Haptics for NoHaptics {
    fn vibrate(&mut self, _ms: u32) {}
}
