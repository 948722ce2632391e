//! Page view — scroll state, the Stage implementation, and rendering.
//!
//! The five scenes form one virtual page of stacked 640×480 panels; the
//! viewport is a window onto it at `offset`. Smooth scrolling eases toward
//! a target offset (instant under reduce-motion), and per-scene visibility
//! fractions are computed from the offset each frame and fed back to the
//! engine, which is what makes the observer scroll-driven.

use std::cell::RefCell;
use std::rc::Rc;

use circle22_engine::{SceneId, Stage, SCENE_COUNT};

pub const SCREEN_WIDTH: usize = 640;
pub const SCREEN_HEIGHT: usize = 480;
/// Total virtual page height in pixels.
pub const PAGE_HEIGHT: usize = SCREEN_HEIGHT * SCENE_COUNT as usize;

/// Pixels scrolled per wheel unit.
const WHEEL_STEP: f32 = 40.0;
/// Fraction of the remaining distance covered per 33ms frame while easing.
const SCROLL_EASE: f32 = 0.15;
/// Door travel time from closed to fully open, ms.
const DOOR_ANIM_MS: f32 = 1200.0;

/// Background shade per scene, top to bottom.
const SCENE_SHADES: [u32; SCENE_COUNT as usize] = [
    0xFF12161C, // arrival
    0xFF1A161E, // elevator lobby
    0xFF0C0C16, // descent
    0xFF1E1010, // door slam
    0xFF0A100A, // invitation
];

const DOOR_COLOR: u32 = 0xFF2A2E38;
const DOOR_INTERIOR: u32 = 0xFF4A4028;
const BUTTON_IDLE: u32 = 0xFF7A2424;
const BUTTON_PRESSED: u32 = 0xFFE85A4E;
const INDICATOR_ON: u32 = 0xFF3FA35F;
const INDICATOR_OFF: u32 = 0xFF303030;

/// Elevator call button, in page coordinates (right of the doors).
const BUTTON_X: usize = 548;
const BUTTON_Y: usize = SCREEN_HEIGHT + 300;
const BUTTON_W: usize = 56;
const BUTTON_H: usize = 56;

/// Mutable view of the page, shared between the stage and the frame loop.
pub struct ViewState {
    offset: f32,
    target: Option<f32>,
    pub reduce_motion: bool,
    pub door_open: bool,
    door_openness: f32,
    pub button_pressed: bool,
    pub audio_on: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewState {
    pub fn new() -> Self {
        Self {
            offset: 0.0,
            target: None,
            reduce_motion: false,
            door_open: false,
            door_openness: 0.0,
            button_pressed: false,
            audio_on: false,
        }
    }

    fn max_offset() -> f32 {
        (PAGE_HEIGHT - SCREEN_HEIGHT) as f32
    }

    fn scene_top(scene: SceneId) -> f32 {
        ((scene.get() as usize - 1) * SCREEN_HEIGHT) as f32
    }

    /// Begin a smooth scroll; completes over the following frames.
    pub fn begin_scroll_to(&mut self, scene: SceneId) {
        self.target = Some(Self::scene_top(scene));
    }

    pub fn jump_to_top(&mut self) {
        self.offset = 0.0;
        self.target = None;
    }

    /// Direct wheel input. Cancels any pending smooth scroll; the user's
    /// hand wins over a scripted target.
    pub fn scroll_wheel(&mut self, dy: f32) {
        self.target = None;
        self.offset = (self.offset - dy * WHEEL_STEP).clamp(0.0, Self::max_offset());
    }

    /// Advance scroll easing and the door animation by `dt_ms`.
    pub fn animate(&mut self, dt_ms: f32) {
        if let Some(target) = self.target {
            if self.reduce_motion {
                self.offset = target;
                self.target = None;
            } else {
                let alpha = (SCROLL_EASE * dt_ms / 33.0).min(1.0);
                self.offset += (target - self.offset) * alpha;
                if (target - self.offset).abs() < 1.0 {
                    self.offset = target;
                    self.target = None;
                }
            }
        }

        if self.door_open && self.door_openness < 1.0 {
            if self.reduce_motion {
                self.door_openness = 1.0;
            } else {
                self.door_openness = (self.door_openness + dt_ms / DOOR_ANIM_MS).min(1.0);
            }
        }
    }

    /// Fraction of `scene` currently inside the viewport, 0.0 to 1.0.
    pub fn visibility(&self, scene: SceneId) -> f32 {
        let top = Self::scene_top(scene);
        let bottom = top + SCREEN_HEIGHT as f32;
        let view_top = self.offset;
        let view_bottom = view_top + SCREEN_HEIGHT as f32;
        let overlap = (bottom.min(view_bottom) - top.max(view_top)).max(0.0);
        overlap / SCREEN_HEIGHT as f32
    }

    /// The call button's screen rect, if any part of it is on screen.
    /// (x, y, w, h) in screen pixels.
    pub fn button_screen_rect(&self) -> Option<(i32, i32, i32, i32)> {
        let y = BUTTON_Y as i32 - self.offset.round() as i32;
        if y + (BUTTON_H as i32) < 0 || y >= SCREEN_HEIGHT as i32 {
            return None;
        }
        Some((BUTTON_X as i32, y, BUTTON_W as i32, BUTTON_H as i32))
    }

    /// Draw the visible slice of the page into the 640×480 framebuffer.
    pub fn render(&self, fb: &mut [u32]) {
        let offset = self.offset.round().max(0.0) as usize;
        // Half-width of the gap between the door panels
        let gap = (self.door_openness * (SCREEN_WIDTH as f32 / 2.0)) as usize;
        let elevator_idx = SceneId::ELEVATOR.get() as usize - 1;

        for y in 0..SCREEN_HEIGHT {
            let page_y = offset + y;
            let scene_idx = (page_y / SCREEN_HEIGHT).min(SCENE_COUNT as usize - 1);
            let shade = SCENE_SHADES[scene_idx];
            let row = &mut fb[y * SCREEN_WIDTH..(y + 1) * SCREEN_WIDTH];

            if scene_idx == elevator_idx {
                // Elevator scene: door wall with a widening central gap.
                // A thin seam shows even when closed.
                let seam = gap.max(2);
                for (x, px) in row.iter_mut().enumerate() {
                    let from_center = x.abs_diff(SCREEN_WIDTH / 2);
                    *px = if from_center >= seam {
                        DOOR_COLOR
                    } else {
                        DOOR_INTERIOR
                    };
                }
            } else {
                row.fill(shade);
            }
        }

        // Call button (page space)
        if let Some((bx, by, bw, bh)) = self.button_screen_rect() {
            let color = if self.button_pressed {
                BUTTON_PRESSED
            } else {
                BUTTON_IDLE
            };
            for y in by.max(0)..(by + bh).min(SCREEN_HEIGHT as i32) {
                for x in bx.max(0)..(bx + bw).min(SCREEN_WIDTH as i32) {
                    fb[y as usize * SCREEN_WIDTH + x as usize] = color;
                }
            }
        }

        // Audio indicator (screen space, top-right)
        let color = if self.audio_on {
            INDICATOR_ON
        } else {
            INDICATOR_OFF
        };
        for y in 8..24 {
            for x in (SCREEN_WIDTH - 24)..(SCREEN_WIDTH - 8) {
                fb[y * SCREEN_WIDTH + x] = color;
            }
        }
    }
}

/// The engine-facing stage: forwards side effects into the shared view.
pub struct WindowStage {
    view: Rc<RefCell<ViewState>>,
}

impl WindowStage {
    pub fn new(view: Rc<RefCell<ViewState>>) -> Self {
        Self { view }
    }
}

impl Stage for WindowStage {
    fn scroll_to_scene(&mut self, scene: SceneId) {
        self.view.borrow_mut().begin_scroll_to(scene);
    }

    fn reset_scroll(&mut self) {
        self.view.borrow_mut().jump_to_top();
    }

    fn set_door_open(&mut self) {
        self.view.borrow_mut().door_open = true;
    }

    fn set_button_pressed(&mut self) {
        self.view.borrow_mut().button_pressed = true;
    }

    fn set_audio_indicator(&mut self, on: bool) {
        self.view.borrow_mut().audio_on = on;
    }

    fn set_reduce_motion(&mut self, on: bool) {
        self.view.borrow_mut().reduce_motion = on;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visibility_follows_the_offset() {
        let mut view = ViewState::new();
        assert_eq!(view.visibility(SceneId::ARRIVAL), 1.0);
        assert_eq!(view.visibility(SceneId::ELEVATOR), 0.0);

        view.scroll_wheel(-6.0); // 240px down
        assert!((view.visibility(SceneId::ARRIVAL) - 0.5).abs() < 1e-6);
        assert!((view.visibility(SceneId::ELEVATOR) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn wheel_scroll_clamps_to_the_page() {
        let mut view = ViewState::new();
        view.scroll_wheel(100.0); // up from the top
        assert_eq!(view.offset, 0.0);
        view.scroll_wheel(-100_000.0);
        assert_eq!(view.offset, ViewState::max_offset());
    }

    #[test]
    fn reduce_motion_scrolls_instantly() {
        let mut view = ViewState::new();
        view.reduce_motion = true;
        view.begin_scroll_to(SceneId::DESCENT);
        view.animate(16.0);
        assert_eq!(view.offset, ViewState::scene_top(SceneId::DESCENT));
    }

    #[test]
    fn easing_reaches_the_target() {
        let mut view = ViewState::new();
        view.begin_scroll_to(SceneId::ELEVATOR);
        for _ in 0..300 {
            view.animate(33.0);
        }
        assert_eq!(view.offset, ViewState::scene_top(SceneId::ELEVATOR));
    }

    #[test]
    fn wheel_cancels_a_pending_smooth_scroll() {
        let mut view = ViewState::new();
        view.begin_scroll_to(SceneId::INVITATION);
        view.scroll_wheel(-1.0);
        let offset = view.offset;
        view.animate(1000.0);
        assert_eq!(view.offset, offset);
    }

    #[test]
    fn button_rect_only_when_on_screen() {
        let mut view = ViewState::new();
        assert!(view.button_screen_rect().is_none());
        view.begin_scroll_to(SceneId::ELEVATOR);
        view.reduce_motion = true;
        view.animate(0.0);
        assert!(view.button_screen_rect().is_some());
    }

    #[test]
    fn door_wall_renders_on_the_elevator_scene() {
        let mut view = ViewState::new();
        view.reduce_motion = true;
        view.begin_scroll_to(SceneId::ELEVATOR);
        view.animate(0.0);

        let mut fb = vec![0u32; SCREEN_WIDTH * SCREEN_HEIGHT];
        view.render(&mut fb);

        let mid_row = (SCREEN_HEIGHT / 2) * SCREEN_WIDTH;
        // Closed doors: interior only shows through the thin center seam
        assert_eq!(fb[mid_row + SCREEN_WIDTH / 2], DOOR_INTERIOR);
        assert_eq!(fb[mid_row + 10], DOOR_COLOR);

        // Other scenes keep their flat shade
        view.begin_scroll_to(SceneId::DESCENT);
        view.animate(0.0);
        view.render(&mut fb);
        assert_eq!(fb[mid_row + SCREEN_WIDTH / 2], SCENE_SHADES[2]);
    }

    #[test]
    fn render_smoke() {
        let mut view = ViewState::new();
        view.door_open = true;
        view.animate(600.0);
        let mut fb = vec![0u32; SCREEN_WIDTH * SCREEN_HEIGHT];
        view.render(&mut fb);
        // Indicator square is drawn
        assert_eq!(fb[10 * SCREEN_WIDTH + SCREEN_WIDTH - 10], INDICATOR_OFF);
    }
}
