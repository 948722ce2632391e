//! The experience session — wires the controllers together and owns the
//! shared flags.
//!
//! One [`Experience`] per page. The host constructs it with its platform
//! implementations, then feeds it input, intersection reports, and elapsed
//! time. The door-open flag is an idempotent monotone set shared by the
//! press sequence and the elevator scene's entry cue: whichever fires
//! first wins, the other is a no-op.

use crate::audio::AudioController;
use crate::button::ButtonController;
use crate::nav::{self, InputKey};
use crate::observer::SceneObserver;
use crate::platform::{AudioSink, Haptics, PrefStore, Stage};
use crate::scene::{SceneCue, SceneId};
use crate::sequence::{Step, StepEffect, StepSequence};

/// The door-slam scene auto-advances to the finale after this long.
pub const SLAM_ADVANCE_MS: u32 = 2000;
/// Fewer logical processors than this gets the reduced-motion treatment.
pub const REDUCE_MOTION_MIN_CORES: usize = 4;

/// Host facts gathered at startup.
#[derive(Debug, Clone, Copy)]
pub struct BootOptions {
    /// Logical processor count reported by the platform.
    pub logical_cores: usize,
}

/// Root controller for one page-lifetime of the experience.
pub struct Experience {
    stage: Box<dyn Stage>,
    haptics: Box<dyn Haptics>,
    audio: AudioController,
    button: ButtonController,
    observer: SceneObserver,
    slam_advance: Option<StepSequence>,
    door_open: bool,
    /// Playback needs a user gesture first (autoplay policy). Set by key
    /// input, button press, or audio toggle; never cleared.
    gesture_seen: bool,
}

impl Experience {
    /// Boot the experience: restore the audio preference (informational —
    /// playback still waits for a gesture), apply the low-end-device flag,
    /// and pin the scroll position to the top so scroll restoration cannot
    /// drop a reload mid-sequence.
    pub fn bootstrap(
        mut stage: Box<dyn Stage>,
        sink: Box<dyn AudioSink>,
        prefs: Box<dyn PrefStore>,
        haptics: Box<dyn Haptics>,
        opts: BootOptions,
    ) -> Self {
        let mut audio = AudioController::new(sink, prefs);
        let enabled = audio.restore_preference();
        stage.set_audio_indicator(enabled);

        if opts.logical_cores < REDUCE_MOTION_MIN_CORES {
            tracing::info!(
                "Low-end device ({} cores), reducing motion",
                opts.logical_cores
            );
            stage.set_reduce_motion(true);
        }

        let button = ButtonController::new();
        if !button.pressed() {
            stage.reset_scroll();
        }

        Self {
            stage,
            haptics,
            audio,
            button,
            observer: SceneObserver::new(),
            slam_advance: None,
            door_open: false,
            gesture_seen: false,
        }
    }

    pub fn current_scene(&self) -> SceneId {
        self.observer.current()
    }

    pub fn button_pressed(&self) -> bool {
        self.button.pressed()
    }

    pub fn door_open(&self) -> bool {
        self.door_open
    }

    pub fn audio_enabled(&self) -> bool {
        self.audio.enabled()
    }

    /// Keyboard input. `control_focused` suppresses space navigation while
    /// a control has focus.
    pub fn handle_key(&mut self, key: InputKey, control_focused: bool) {
        self.gesture_seen = true;
        let Some(command) = nav::command_for_key(key, control_focused) else {
            return;
        };
        if let Some(target) = nav::target_for(self.observer.current(), command) {
            self.stage.scroll_to_scene(target);
        }
    }

    /// The elevator button. Idempotent after the first press.
    pub fn press_button(&mut self) {
        self.gesture_seen = true;
        self.button.press(&mut *self.stage, &mut *self.haptics);
    }

    /// The audio on/off affordance.
    pub fn toggle_audio(&mut self) {
        self.gesture_seen = true;
        let current = self.observer.current();
        self.audio
            .toggle(&mut *self.stage, current, self.gesture_seen);
    }

    /// Per-scene visibility report from the host. Drives the current scene
    /// index and that scene's entry effects.
    pub fn on_intersection(&mut self, scene: SceneId, fraction: f32) {
        if let Some(cue) = self.observer.on_intersection(scene, fraction) {
            self.run_cue(cue);
        }
    }

    /// Page-visibility signal: pause ambient audio while backgrounded. The
    /// enabled flag survives; scene entry or a toggle resumes it later.
    pub fn set_hidden(&mut self, hidden: bool) {
        if hidden {
            tracing::debug!("Page hidden, pausing ambient");
            self.audio.pause();
        }
    }

    /// Advance engine time: press sequence, slam auto-advance, audio fade.
    pub fn tick(&mut self, dt_ms: u32) {
        for effect in self.button.tick(dt_ms) {
            self.apply_effect(effect);
        }

        if let Some(seq) = self.slam_advance.as_mut() {
            let fired = seq.tick(dt_ms);
            if seq.finished() {
                self.slam_advance = None;
            }
            for effect in fired {
                self.apply_effect(effect);
            }
        }

        self.audio.tick(dt_ms);
    }

    fn apply_effect(&mut self, effect: StepEffect) {
        match effect {
            StepEffect::ScrollToScene(scene) => self.stage.scroll_to_scene(scene),
            StepEffect::OpenDoors => self.open_doors(),
        }
    }

    fn run_cue(&mut self, cue: SceneCue) {
        let current = self.observer.current();
        match cue {
            SceneCue::ResetAudio => self.audio.pause(),
            SceneCue::OpenDoorsIfPressed => {
                if self.button.pressed() {
                    self.open_doors();
                }
            }
            SceneCue::StartAmbient => {
                self.audio
                    .play(&mut *self.stage, current, self.gesture_seen);
            }
            SceneCue::SlamAndAdvance => {
                self.audio.fade_out();
                if self.slam_advance.is_none() {
                    self.slam_advance = Some(StepSequence::new(vec![Step::new(
                        SLAM_ADVANCE_MS,
                        StepEffect::ScrollToScene(SceneId::INVITATION),
                    )]));
                }
            }
            SceneCue::ForcePause => self.audio.pause(),
        }
    }

    /// Both the press sequence and the elevator entry cue land here; the
    /// first one wins and the flag never clears.
    fn open_doors(&mut self) {
        if self.door_open {
            return;
        }
        tracing::info!("Elevator doors opening");
        self.door_open = true;
        self.stage.set_door_open();
    }
}
