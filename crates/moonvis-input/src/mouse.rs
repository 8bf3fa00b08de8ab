//! Pointer state for drag-to-rotate and wheel zoom.
//!
//! [`MouseState`] folds winit pointer events into a per-frame snapshot: the
//! latest cursor position, which buttons are held, and edge-triggered
//! press/release flags. Wheel events carry no state; convert them with
//! [`scroll_lines`].

use glam::DVec2;
use winit::event::{ElementState, MouseButton, MouseScrollDelta};

/// Trackpads report wheel travel in pixels; this many pixels count as one
/// notch of a line-based wheel.
pub const PIXELS_PER_LINE: f64 = 40.0;

/// Converts a single wheel event into line units, positive when scrolling up
/// (away from the user).
#[must_use]
pub fn scroll_lines(delta: MouseScrollDelta) -> f32 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => y,
        MouseScrollDelta::PixelDelta(pos) => (pos.y / PIXELS_PER_LINE) as f32,
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct ButtonFrame {
    held: bool,
    just_pressed: bool,
    just_released: bool,
}

/// Left, right, middle. Other buttons are not tracked.
const TRACKED_BUTTONS: usize = 3;

fn slot(button: MouseButton) -> Option<usize> {
    match button {
        MouseButton::Left => Some(0),
        MouseButton::Right => Some(1),
        MouseButton::Middle => Some(2),
        _ => None,
    }
}

/// Per-frame pointer snapshot.
///
/// Feed winit events through the `on_*` methods, read the accessors while
/// handling the frame, then call [`clear_transients`](Self::clear_transients).
#[derive(Debug, Clone, Default)]
pub struct MouseState {
    position: DVec2,
    buttons: [ButtonFrame; TRACKED_BUTTONS],
}

impl MouseState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a `CursorMoved` position in physical pixels.
    pub fn on_cursor_moved(&mut self, x: f64, y: f64) {
        self.position = DVec2::new(x, y);
    }

    /// Records a `MouseInput` transition.
    pub fn on_button(&mut self, button: MouseButton, state: ElementState) {
        let Some(idx) = slot(button) else {
            return;
        };
        let b = &mut self.buttons[idx];
        match state {
            ElementState::Pressed => {
                b.held = true;
                b.just_pressed = true;
            }
            ElementState::Released => {
                b.held = false;
                b.just_released = true;
            }
        }
    }

    /// Leaving the window releases every held button, since winit will not
    /// report the release if it happens outside.
    pub fn on_cursor_left(&mut self) {
        for b in &mut self.buttons {
            if b.held {
                b.held = false;
                b.just_released = true;
            }
        }
    }

    /// Resets edge flags. Held state and position carry over to the next
    /// frame.
    pub fn clear_transients(&mut self) {
        for b in &mut self.buttons {
            b.just_pressed = false;
            b.just_released = false;
        }
    }

    #[must_use]
    pub fn position(&self) -> DVec2 {
        self.position
    }

    #[must_use]
    pub fn is_held(&self, button: MouseButton) -> bool {
        slot(button).is_some_and(|i| self.buttons[i].held)
    }

    #[must_use]
    pub fn just_pressed(&self, button: MouseButton) -> bool {
        slot(button).is_some_and(|i| self.buttons[i].just_pressed)
    }

    #[must_use]
    pub fn just_released(&self, button: MouseButton) -> bool {
        slot(button).is_some_and(|i| self.buttons[i].just_released)
    }
}
