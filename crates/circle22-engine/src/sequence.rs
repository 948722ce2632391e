//! Scheduled step chains — explicit (delay, effect) lists instead of
//! nested timer callbacks.
//!
//! A sequence is a flat list of (delay, effect) steps. The host feeds
//! elapsed time in via [`StepSequence::tick`]; every step whose delay has
//! elapsed fires, several in one tick if the delta spans them. Delays are
//! relative to the previous step. There is no cancellation: once started,
//! a sequence runs to completion.

use crate::scene::SceneId;

/// What a fired step asks the session to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepEffect {
    /// Smooth-scroll to a scene.
    ScrollToScene(SceneId),
    /// Open the elevator doors (idempotent at the session level).
    OpenDoors,
}

/// One step: wait `delay_ms` after the previous step, then fire `effect`.
#[derive(Debug, Clone, Copy)]
pub struct Step {
    pub delay_ms: u32,
    pub effect: StepEffect,
}

impl Step {
    pub fn new(delay_ms: u32, effect: StepEffect) -> Self {
        Self { delay_ms, effect }
    }
}

/// A running chain of steps.
#[derive(Debug)]
pub struct StepSequence {
    steps: Vec<Step>,
    next: usize,
    wait_remaining: u32,
}

impl StepSequence {
    pub fn new(steps: Vec<Step>) -> Self {
        let wait_remaining = steps.first().map(|s| s.delay_ms).unwrap_or(0);
        Self {
            steps,
            next: 0,
            wait_remaining,
        }
    }

    pub fn finished(&self) -> bool {
        self.next >= self.steps.len()
    }

    /// Advance by `dt_ms`, returning every effect whose delay elapsed,
    /// in order. A zero-delay first step fires on the first tick, even
    /// `tick(0)`.
    pub fn tick(&mut self, dt_ms: u32) -> Vec<StepEffect> {
        let mut fired = Vec::new();
        let mut budget = dt_ms;

        while self.next < self.steps.len() {
            if budget < self.wait_remaining {
                self.wait_remaining -= budget;
                break;
            }
            budget -= self.wait_remaining;
            fired.push(self.steps[self.next].effect);
            self.next += 1;
            self.wait_remaining = self.steps.get(self.next).map(|s| s.delay_ms).unwrap_or(0);
        }

        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> StepSequence {
        StepSequence::new(vec![
            Step::new(0, StepEffect::ScrollToScene(SceneId::ELEVATOR)),
            Step::new(700, StepEffect::OpenDoors),
            Step::new(1200, StepEffect::ScrollToScene(SceneId::DESCENT)),
        ])
    }

    #[test]
    fn zero_delay_step_fires_immediately() {
        let mut seq = chain();
        assert_eq!(
            seq.tick(0),
            vec![StepEffect::ScrollToScene(SceneId::ELEVATOR)]
        );
        assert!(!seq.finished());
    }

    #[test]
    fn steps_fire_in_order_at_their_delays() {
        let mut seq = chain();
        seq.tick(0);
        assert!(seq.tick(699).is_empty());
        assert_eq!(seq.tick(1), vec![StepEffect::OpenDoors]);
        assert!(seq.tick(1199).is_empty());
        assert_eq!(
            seq.tick(1),
            vec![StepEffect::ScrollToScene(SceneId::DESCENT)]
        );
        assert!(seq.finished());
        assert!(seq.tick(5000).is_empty());
    }

    #[test]
    fn large_tick_fires_spanned_steps_in_order() {
        let mut seq = chain();
        assert_eq!(
            seq.tick(10_000),
            vec![
                StepEffect::ScrollToScene(SceneId::ELEVATOR),
                StepEffect::OpenDoors,
                StepEffect::ScrollToScene(SceneId::DESCENT),
            ]
        );
        assert!(seq.finished());
    }

    #[test]
    fn partial_waits_accumulate() {
        let mut seq = chain();
        seq.tick(0);
        assert!(seq.tick(300).is_empty());
        assert!(seq.tick(300).is_empty());
        assert_eq!(seq.tick(100), vec![StepEffect::OpenDoors]);
    }

    #[test]
    fn empty_sequence_is_finished() {
        let mut seq = StepSequence::new(Vec::new());
        assert!(seq.finished());
        assert!(seq.tick(100).is_empty());
    }
}
