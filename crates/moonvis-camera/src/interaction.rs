//! Input-driven viewing state: what the user has done to the body and the
//! camera, and the matrices that follow from it each frame.

use glam::{Mat4, Vec3};
use tracing::trace;

use crate::drag::{DragState, DragTracker};
use crate::orientation::Orientation;
use crate::rig::CameraRig;

/// Tuning constants for the interaction model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionSettings {
    /// Radians of rotation per logical pixel of pointer travel.
    pub drag_sensitivity: f32,
    /// World units moved along `forward` per scroll line.
    pub zoom_speed: f32,
    /// Wheel zoom only succeeds when the resulting distance from the origin
    /// lies strictly between `zoom_near` and `zoom_far`.
    pub zoom_near: f32,
    pub zoom_far: f32,
    /// Keyboard translation speed in world units per second.
    pub move_speed: f32,
    pub start_position: Vec3,
    pub forward: Vec3,
    pub up: Vec3,
}

impl Default for InteractionSettings {
    fn default() -> Self {
        Self {
            drag_sensitivity: 0.005,
            zoom_speed: 0.1,
            zoom_near: 1.4,
            zoom_far: 10.0,
            move_speed: 2.5,
            start_position: Vec3::new(0.0, 0.0, 3.5),
            forward: Vec3::NEG_Z,
            up: Vec3::Y,
        }
    }
}

/// A held-key movement direction relative to the camera basis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveDirection {
    Forward,
    Back,
    Left,
    Right,
}

/// Per-frame transforms handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameMatrices {
    pub model: Mat4,
    pub view: Mat4,
}

/// Owns orientation, camera and drag state, and applies input events to them.
#[derive(Debug, Clone)]
pub struct InteractionModel {
    settings: InteractionSettings,
    orientation: Orientation,
    rig: CameraRig,
    drag: DragTracker,
}

impl Default for InteractionModel {
    fn default() -> Self {
        Self::new(InteractionSettings::default())
    }
}

impl InteractionModel {
    pub fn new(settings: InteractionSettings) -> Self {
        Self {
            rig: CameraRig::new(settings.start_position, settings.forward, settings.up),
            orientation: Orientation::new(),
            drag: DragTracker::new(),
            settings,
        }
    }

    /// Pointer sample with the drag button's current held state.
    ///
    /// Rotates the body by the pointer delta once a drag is under way. The
    /// first held sample of every drag only anchors the position.
    pub fn on_pointer_move(&mut self, x: f64, y: f64, button_held: bool) {
        let Some(delta) = self.drag.sample(x, y, button_held) else {
            return;
        };
        let s = self.settings.drag_sensitivity;
        self.orientation
            .apply_world_rotation(delta.x as f32 * s, delta.y as f32 * s);
    }

    pub fn on_drag_released(&mut self) {
        self.drag.release();
    }

    /// Moves the camera along `forward` by `delta` scroll lines.
    ///
    /// Returns `false`, leaving the camera where it was, when the move would
    /// put it outside the open interval `(zoom_near, zoom_far)` from the
    /// origin.
    pub fn on_scroll(&mut self, delta: f32) -> bool {
        let candidate = self.rig.position() + self.rig.forward() * delta * self.settings.zoom_speed;
        let distance = candidate.length();
        if distance > self.settings.zoom_near && distance < self.settings.zoom_far {
            self.rig.set_position(candidate);
            true
        } else {
            trace!(delta, distance, "Zoom rejected");
            false
        }
    }

    /// Translates the camera for a key held during `elapsed` seconds.
    /// Unclamped, unlike wheel zoom.
    pub fn on_key_held(&mut self, direction: MoveDirection, elapsed: f32) {
        let step = self.settings.move_speed * elapsed;
        let offset = match direction {
            MoveDirection::Forward => self.rig.forward() * step,
            MoveDirection::Back => -self.rig.forward() * step,
            MoveDirection::Left => -self.rig.right() * step,
            MoveDirection::Right => self.rig.right() * step,
        };
        self.rig.translate(offset);
    }

    /// Model and view for the current state. Pure; calling it repeatedly
    /// without intervening events gives identical results.
    pub fn build_matrices(&self) -> FrameMatrices {
        FrameMatrices {
            model: self.orientation.matrix(),
            view: self.rig.view_matrix(),
        }
    }

    pub fn settings(&self) -> &InteractionSettings {
        &self.settings
    }

    pub fn orientation(&self) -> &Orientation {
        &self.orientation
    }

    pub fn rig(&self) -> &CameraRig {
        &self.rig
    }

    pub fn drag_state(&self) -> DragState {
        self.drag.state()
    }
}
