//! Circle 22 scene-progression engine.
//!
//! The experience is a fixed sequence of five full-viewport scenes the user
//! moves through by scrolling, pressing the elevator button, or using
//! keyboard shortcuts, with an optional looping ambient track. This crate
//! holds all of the logic; the host supplies the platform behind four small
//! traits (see [`platform`]) and drives the engine cooperatively:
//!
//!   - input events go to [`Experience::handle_key`],
//!     [`Experience::press_button`], [`Experience::toggle_audio`]
//!   - per-scene viewport visibility goes to [`Experience::on_intersection`]
//!   - elapsed time goes to [`Experience::tick`], which advances the
//!     scheduled step chains (button press sequence, slam auto-advance)
//!     and the audio fade
//!
//! Everything is single-threaded and deterministic: no wall-clock timers,
//! no callbacks. Tests drive the engine with synthetic ticks.

pub mod audio;
pub mod button;
pub mod nav;
pub mod observer;
pub mod platform;
pub mod scene;
pub mod sequence;
pub mod session;

pub use audio::AudioController;
pub use button::ButtonController;
pub use nav::{InputKey, NavCommand};
pub use observer::SceneObserver;
pub use platform::{AudioSink, Haptics, NoHaptics, PlaybackError, PrefStore, Stage};
pub use scene::{SceneCue, SceneId, SCENE_COUNT};
pub use sequence::{Step, StepEffect, StepSequence};
pub use session::{BootOptions, Experience};
