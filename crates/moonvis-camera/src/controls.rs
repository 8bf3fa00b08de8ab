//! Keyboard bindings for camera translation.

use moonvis_input::KeyboardState;
use winit::keyboard::KeyCode;

use crate::interaction::{InteractionModel, MoveDirection};

/// Physical keys that move the camera. Scan codes, so the cluster stays under
/// the left hand on non-QWERTY layouts.
pub const MOVE_BINDINGS: [(KeyCode, MoveDirection); 4] = [
    (KeyCode::KeyW, MoveDirection::Forward),
    (KeyCode::KeyS, MoveDirection::Back),
    (KeyCode::KeyA, MoveDirection::Left),
    (KeyCode::KeyD, MoveDirection::Right),
];

pub fn direction_for_key(code: KeyCode) -> Option<MoveDirection> {
    MOVE_BINDINGS
        .iter()
        .find(|(k, _)| *k == code)
        .map(|&(_, dir)| dir)
}

/// Applies every bound key held this frame for `elapsed` seconds.
/// Opposing keys cancel. Returns how many directions were applied.
pub fn apply_held_keys(model: &mut InteractionModel, keyboard: &KeyboardState, elapsed: f32) -> usize {
    let mut applied = 0;
    for (code, direction) in MOVE_BINDINGS {
        if keyboard.is_held(code) {
            model.on_key_held(direction, elapsed);
            applied += 1;
        }
    }
    applied
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use moonvis_input::RawKeyEvent;

    #[test]
    fn test_wasd_bindings() {
        assert_eq!(direction_for_key(KeyCode::KeyW), Some(MoveDirection::Forward));
        assert_eq!(direction_for_key(KeyCode::KeyS), Some(MoveDirection::Back));
        assert_eq!(direction_for_key(KeyCode::KeyA), Some(MoveDirection::Left));
        assert_eq!(direction_for_key(KeyCode::KeyD), Some(MoveDirection::Right));
        assert_eq!(direction_for_key(KeyCode::Space), None);
    }

    #[test]
    fn test_no_keys_no_movement() {
        let mut model = InteractionModel::default();
        let kb = KeyboardState::new();
        assert_eq!(apply_held_keys(&mut model, &kb, 0.5), 0);
        assert_eq!(model.rig().position(), Vec3::new(0.0, 0.0, 3.5));
    }

    #[test]
    fn test_held_w_moves_forward_scaled_by_time() {
        let mut model = InteractionModel::default();
        let mut kb = KeyboardState::new();
        kb.process_raw(RawKeyEvent::pressed(KeyCode::KeyW));

        assert_eq!(apply_held_keys(&mut model, &kb, 0.2), 1);
        assert!(model.rig().position().abs_diff_eq(Vec3::new(0.0, 0.0, 3.0), 1e-5));
    }

    #[test]
    fn test_opposing_keys_cancel() {
        let mut model = InteractionModel::default();
        let mut kb = KeyboardState::new();
        kb.process_raw(RawKeyEvent::pressed(KeyCode::KeyA));
        kb.process_raw(RawKeyEvent::pressed(KeyCode::KeyD));

        assert_eq!(apply_held_keys(&mut model, &kb, 0.1), 2);
        assert!(model.rig().position().abs_diff_eq(Vec3::new(0.0, 0.0, 3.5), 1e-6));
    }

    #[test]
    fn test_unbound_keys_ignored() {
        let mut model = InteractionModel::default();
        let mut kb = KeyboardState::new();
        kb.process_raw(RawKeyEvent::pressed(KeyCode::KeyQ));
        assert_eq!(apply_held_keys(&mut model, &kb, 1.0), 0);
    }
}
