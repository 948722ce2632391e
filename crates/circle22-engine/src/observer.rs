//! Viewport intersection tracking.
//!
//! The host reports per-scene visibility fractions; a scene counts as
//! entered once it covers at least [`VISIBILITY_THRESHOLD`] of the
//! viewport. The observer is the sole writer of the current scene index.
//! Intersection reports can repeat for the same scene (resizes, partial
//! visibility churn), so consecutive identical entries are deduplicated —
//! each scene's entry cue fires exactly once per transition into it.

use crate::scene::{cue_for, SceneCue, SceneId};

/// Fraction of a scene that must be visible to count as entered.
pub const VISIBILITY_THRESHOLD: f32 = 0.5;

/// Maps visibility reports to the current scene index.
pub struct SceneObserver {
    current: SceneId,
    entered: Option<SceneId>,
}

impl Default for SceneObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneObserver {
    pub fn new() -> Self {
        Self {
            current: SceneId::ARRIVAL,
            entered: None,
        }
    }

    /// The scene currently intersecting the viewport at threshold.
    pub fn current(&self) -> SceneId {
        self.current
    }

    /// Report a scene's visibility fraction. Returns the scene's entry cue
    /// on a genuine transition, `None` for sub-threshold fractions and
    /// repeated reports of the same scene.
    pub fn on_intersection(&mut self, scene: SceneId, fraction: f32) -> Option<SceneCue> {
        if fraction < VISIBILITY_THRESHOLD {
            return None;
        }
        if self.entered == Some(scene) {
            return None;
        }

        tracing::debug!("Entered {} ({:.0}% visible)", scene, fraction * 100.0);
        self.entered = Some(scene);
        self.current = scene;
        Some(cue_for(scene))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sub_threshold_reports_are_ignored() {
        let mut obs = SceneObserver::new();
        assert!(obs.on_intersection(SceneId::ELEVATOR, 0.49).is_none());
        assert_eq!(obs.current(), SceneId::ARRIVAL);
    }

    #[test]
    fn entry_cue_fires_once_per_transition() {
        let mut obs = SceneObserver::new();
        assert_eq!(
            obs.on_intersection(SceneId::ELEVATOR, 0.6),
            Some(SceneCue::OpenDoorsIfPressed)
        );
        // Same scene refiring (resize, partial visibility churn)
        assert!(obs.on_intersection(SceneId::ELEVATOR, 0.8).is_none());
        assert!(obs.on_intersection(SceneId::ELEVATOR, 1.0).is_none());
        assert_eq!(obs.current(), SceneId::ELEVATOR);
    }

    #[test]
    fn reentering_a_scene_refires_its_cue() {
        let mut obs = SceneObserver::new();
        obs.on_intersection(SceneId::ELEVATOR, 1.0);
        obs.on_intersection(SceneId::DESCENT, 1.0);
        assert_eq!(
            obs.on_intersection(SceneId::ELEVATOR, 1.0),
            Some(SceneCue::OpenDoorsIfPressed)
        );
    }

    #[test]
    fn initial_entry_into_scene_one_fires() {
        let mut obs = SceneObserver::new();
        assert_eq!(
            obs.on_intersection(SceneId::ARRIVAL, 1.0),
            Some(SceneCue::ResetAudio)
        );
    }
}
