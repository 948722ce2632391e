//! The elevator button.
//!
//! Pressing it once starts the call sequence: an immediate scroll to the
//! elevator scene, the doors opening [`DOOR_OPEN_DELAY_MS`] later, and the
//! auto-advance to the descent [`ADVANCE_DELAY_MS`] after that. The pressed
//! flag is monotonic, so repeated activation (double click, key repeat)
//! runs the sequence exactly once. Once started the chain is never
//! cancelled, even if the user scrolls away mid-sequence.

use crate::platform::{Haptics, Stage};
use crate::scene::SceneId;
use crate::sequence::{Step, StepEffect, StepSequence};

/// Doors open this long after the press (scroll travel time).
pub const DOOR_OPEN_DELAY_MS: u32 = 700;
/// Auto-advance this long after the doors open (door animation time).
pub const ADVANCE_DELAY_MS: u32 = 1200;
/// Haptic pulse length on press, best-effort.
pub const VIBRATE_MS: u32 = 50;

/// Debounced single-shot button state.
pub struct ButtonController {
    pressed: bool,
    sequence: Option<StepSequence>,
}

impl Default for ButtonController {
    fn default() -> Self {
        Self::new()
    }
}

impl ButtonController {
    pub fn new() -> Self {
        Self {
            pressed: false,
            sequence: None,
        }
    }

    pub fn pressed(&self) -> bool {
        self.pressed
    }

    /// Press the button. Returns false (and does nothing) after the first
    /// successful press.
    pub fn press(&mut self, stage: &mut dyn Stage, haptics: &mut dyn Haptics) -> bool {
        if self.pressed {
            tracing::debug!("Button already pressed, ignoring");
            return false;
        }

        tracing::info!("Button pressed, starting call sequence");
        self.pressed = true;
        stage.set_button_pressed();
        haptics.vibrate(VIBRATE_MS);

        self.sequence = Some(StepSequence::new(vec![
            Step::new(0, StepEffect::ScrollToScene(SceneId::ELEVATOR)),
            Step::new(DOOR_OPEN_DELAY_MS, StepEffect::OpenDoors),
            Step::new(ADVANCE_DELAY_MS, StepEffect::ScrollToScene(SceneId::DESCENT)),
        ]));
        true
    }

    /// Advance the press sequence, returning the effects due this tick.
    pub fn tick(&mut self, dt_ms: u32) -> Vec<StepEffect> {
        let Some(seq) = self.sequence.as_mut() else {
            return Vec::new();
        };
        let fired = seq.tick(dt_ms);
        if seq.finished() {
            self.sequence = None;
        }
        fired
    }
}
