//! Circle 22 — native player for the scroll-driven narrative.
//!
//! Architecture:
//!   view.rs      — page view, scroll state, Stage implementation, render
//!   audio_out.rs — rodio-backed ambient sink
//!   prefs.rs     — JSON preference file (localStorage stand-in)
//!
//! Controls: scroll wheel / Down / Space / Up to move between scenes,
//! Escape jumps to the finale, A toggles ambient audio, Enter or a click
//! on the red panel presses the elevator button, Q quits.

mod audio_out;
mod prefs;
mod view;

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Instant;

use anyhow::Result;
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};
use tracing_subscriber::EnvFilter;

use circle22_engine::{BootOptions, Experience, InputKey, NoHaptics, SceneId, SCENE_COUNT};

use crate::audio_out::RodioSink;
use crate::prefs::PrefsFile;
use crate::view::{ViewState, WindowStage, SCREEN_HEIGHT, SCREEN_WIDTH};

const FPS: usize = 30;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("circle22=debug".parse()?)
                .add_directive("circle22_engine=debug".parse()?),
        )
        .init();

    tracing::info!("Circle 22 v{}", env!("CARGO_PKG_VERSION"));

    let ambient = ambient_track_path();
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);

    let view = Rc::new(RefCell::new(ViewState::new()));
    let mut experience = Experience::bootstrap(
        Box::new(WindowStage::new(view.clone())),
        Box::new(RodioSink::new(ambient.as_deref())),
        Box::new(PrefsFile::load(&prefs_dir())),
        Box::new(NoHaptics),
        BootOptions {
            logical_cores: cores,
        },
    );

    let mut window = Window::new(
        "Circle 22",
        SCREEN_WIDTH,
        SCREEN_HEIGHT,
        WindowOptions::default(),
    )
    .map_err(|e| anyhow::anyhow!("Failed to open window: {}", e))?;
    window.set_target_fps(FPS);

    let mut framebuffer = vec![0u32; SCREEN_WIDTH * SCREEN_HEIGHT];
    let mut last_frame = Instant::now();
    let mut prev_mouse_down = false;
    let mut was_active = true;

    while window.is_open() && !window.is_key_down(Key::Q) {
        let now = Instant::now();
        let dt_ms = (now - last_frame).as_millis().min(250) as u32;
        last_frame = now;

        // Keyboard
        if window.is_key_pressed(Key::Down, KeyRepeat::No) {
            experience.handle_key(InputKey::ArrowDown, false);
        }
        if window.is_key_pressed(Key::Space, KeyRepeat::No) {
            experience.handle_key(InputKey::Space, false);
        }
        if window.is_key_pressed(Key::Up, KeyRepeat::No) {
            experience.handle_key(InputKey::ArrowUp, false);
        }
        if window.is_key_pressed(Key::Escape, KeyRepeat::No) {
            experience.handle_key(InputKey::Escape, false);
        }
        if window.is_key_pressed(Key::A, KeyRepeat::No) {
            experience.toggle_audio();
        }
        if window.is_key_pressed(Key::Enter, KeyRepeat::No) {
            experience.press_button();
        }

        // Mouse: click the call button
        let mouse_down = window.get_mouse_down(MouseButton::Left);
        if mouse_down && !prev_mouse_down {
            let rect = view.borrow().button_screen_rect();
            if let (Some((mx, my)), Some((bx, by, bw, bh))) =
                (window.get_mouse_pos(MouseMode::Discard), rect)
            {
                let (mx, my) = (mx as i32, my as i32);
                if mx >= bx && mx < bx + bw && my >= by && my < by + bh {
                    experience.press_button();
                }
            }
        }
        prev_mouse_down = mouse_down;

        // Wheel scroll (cancels any scripted smooth scroll)
        if let Some((_, dy)) = window.get_scroll_wheel() {
            view.borrow_mut().scroll_wheel(dy);
        }

        // Window focus stands in for the page-visibility signal
        let active = window.is_active();
        if active != was_active {
            experience.set_hidden(!active);
            was_active = active;
        }

        view.borrow_mut().animate(dt_ms as f32);

        // Report the dominant scene's visibility; the engine filters at its
        // threshold and deduplicates repeats. Reporting only the winner keeps
        // a 50/50 split from flip-flopping between two scenes.
        let mut best = (SceneId::new(1), 0.0f32);
        for n in 1..=SCENE_COUNT {
            let scene = SceneId::new(n);
            let fraction = view.borrow().visibility(scene);
            if fraction > best.1 {
                best = (scene, fraction);
            }
        }
        experience.on_intersection(best.0, best.1);

        experience.tick(dt_ms);

        view.borrow().render(&mut framebuffer);
        window
            .update_with_buffer(&framebuffer, SCREEN_WIDTH, SCREEN_HEIGHT)
            .map_err(|e| anyhow::anyhow!("Display error: {}", e))?;
    }

    tracing::info!("Player shutdown");
    Ok(())
}

/// Locate the ambient track. Priority: command-line argument, then
/// well-known files next to the working directory. Absence is fine — the
/// audio toggle then reports rejection instead of playing.
fn ambient_track_path() -> Option<PathBuf> {
    if let Some(arg) = std::env::args().nth(1) {
        let path = PathBuf::from(&arg);
        if path.is_file() {
            return Some(path);
        }
        tracing::warn!("Specified ambient track not found: {}", arg);
    }

    for candidate in ["assets/ambient.wav", "assets/ambient.ogg"] {
        let path = PathBuf::from(candidate);
        if path.is_file() {
            return Some(path);
        }
    }
    None
}

/// Preferences live next to the executable, falling back to the working
/// directory.
fn prefs_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}
