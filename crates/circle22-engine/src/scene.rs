//! Scene identity and the per-scene entry cue table.
//!
//! The narrative is a fixed five-scene sequence:
//!
//!   1. Arrival     — entering resets the ambient track
//!   2. Elevator    — doors open here once the button has been pressed
//!   3. Descent     — ambient audio becomes eligible from this scene on
//!   4. Door slam   — audio fades out, auto-advance to the final scene
//!   5. Invitation  — ambient audio is force-paused

use std::fmt;

/// Number of scenes in the sequence.
pub const SCENE_COUNT: u8 = 5;

/// A 1-based scene number, always within `1..=SCENE_COUNT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SceneId(u8);

impl SceneId {
    pub const ARRIVAL: SceneId = SceneId(1);
    pub const ELEVATOR: SceneId = SceneId(2);
    pub const DESCENT: SceneId = SceneId(3);
    pub const DOOR_SLAM: SceneId = SceneId(4);
    pub const INVITATION: SceneId = SceneId(5);

    /// Build a scene id, clamping into the valid range.
    pub fn new(n: u8) -> Self {
        SceneId(n.clamp(1, SCENE_COUNT))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// The following scene, clamped at the end of the sequence.
    pub fn next(self) -> Self {
        SceneId::new(self.0.saturating_add(1))
    }

    /// The preceding scene, clamped at the start.
    pub fn prev(self) -> Self {
        SceneId::new(self.0.saturating_sub(1))
    }

    pub fn last() -> Self {
        SceneId(SCENE_COUNT)
    }
}

impl fmt::Display for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "scene{}", self.0)
    }
}

/// Side effect to run when the viewport enters a scene. Declared as data so
/// the observer stays a pure index tracker; the session executes the cue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneCue {
    /// Pause and rewind the ambient track (enabled flag untouched).
    ResetAudio,
    /// Open the elevator doors if the button was already pressed.
    OpenDoorsIfPressed,
    /// Start the ambient track if audio is enabled.
    StartAmbient,
    /// Fade the ambient track out and auto-advance after a fixed delay.
    SlamAndAdvance,
    /// Force-pause the ambient track.
    ForcePause,
}

/// Entry cue for a scene. Every scene has exactly one.
pub fn cue_for(scene: SceneId) -> SceneCue {
    match scene {
        SceneId::ARRIVAL => SceneCue::ResetAudio,
        SceneId::ELEVATOR => SceneCue::OpenDoorsIfPressed,
        SceneId::DESCENT => SceneCue::StartAmbient,
        SceneId::DOOR_SLAM => SceneCue::SlamAndAdvance,
        _ => SceneCue::ForcePause,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_clamps_into_range() {
        assert_eq!(SceneId::new(0).get(), 1);
        assert_eq!(SceneId::new(3).get(), 3);
        assert_eq!(SceneId::new(99).get(), SCENE_COUNT);
    }

    #[test]
    fn next_and_prev_clamp_at_boundaries() {
        assert_eq!(SceneId::last().next(), SceneId::last());
        assert_eq!(SceneId::ARRIVAL.prev(), SceneId::ARRIVAL);
        assert_eq!(SceneId::ELEVATOR.next(), SceneId::DESCENT);
        assert_eq!(SceneId::DESCENT.prev(), SceneId::ELEVATOR);
    }

    #[test]
    fn every_scene_has_a_cue() {
        for n in 1..=SCENE_COUNT {
            // Must not panic, and scene 5 falls through to ForcePause
            let _ = cue_for(SceneId::new(n));
        }
        assert_eq!(cue_for(SceneId::INVITATION), SceneCue::ForcePause);
    }

    #[test]
    fn display_matches_element_ids() {
        assert_eq!(SceneId::ELEVATOR.to_string(), "scene2");
    }
}
