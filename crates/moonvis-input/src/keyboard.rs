//! Held-key tracking for continuous camera movement.
//!
//! Keys are identified by physical scan code so that the movement cluster
//! sits under the same fingers on every keyboard layout.

use std::collections::HashSet;

use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// The parts of a winit [`KeyEvent`] that matter here. Constructible in tests,
/// unlike `KeyEvent` itself.
#[derive(Debug, Clone, Copy)]
pub struct RawKeyEvent {
    pub key: PhysicalKey,
    pub state: ElementState,
    pub repeat: bool,
}

impl RawKeyEvent {
    pub fn pressed(code: KeyCode) -> Self {
        Self {
            key: PhysicalKey::Code(code),
            state: ElementState::Pressed,
            repeat: false,
        }
    }

    pub fn released(code: KeyCode) -> Self {
        Self {
            key: PhysicalKey::Code(code),
            state: ElementState::Released,
            repeat: false,
        }
    }
}

impl From<&KeyEvent> for RawKeyEvent {
    fn from(event: &KeyEvent) -> Self {
        Self {
            key: event.physical_key,
            state: event.state,
            repeat: event.repeat,
        }
    }
}

/// Which keys are down, plus the edges seen since the last frame.
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    held: HashSet<KeyCode>,
    just_pressed: HashSet<KeyCode>,
    just_released: HashSet<KeyCode>,
}

impl KeyboardState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn process_event(&mut self, event: &KeyEvent) {
        self.process_raw(RawKeyEvent::from(event));
    }

    /// Applies one transition. OS auto-repeat and keys without a known
    /// scan code are dropped.
    pub fn process_raw(&mut self, event: RawKeyEvent) {
        if event.repeat {
            return;
        }
        let PhysicalKey::Code(code) = event.key else {
            return;
        };
        match event.state {
            ElementState::Pressed => {
                if self.held.insert(code) {
                    self.just_pressed.insert(code);
                }
            }
            ElementState::Released => {
                if self.held.remove(&code) {
                    self.just_released.insert(code);
                }
            }
        }
    }

    /// Releases everything, e.g. when the window loses focus and the
    /// matching release events will never arrive.
    pub fn release_all(&mut self) {
        self.just_released.extend(self.held.drain());
    }

    #[must_use]
    pub fn is_held(&self, code: KeyCode) -> bool {
        self.held.contains(&code)
    }

    #[must_use]
    pub fn just_pressed(&self, code: KeyCode) -> bool {
        self.just_pressed.contains(&code)
    }

    #[must_use]
    pub fn just_released(&self, code: KeyCode) -> bool {
        self.just_released.contains(&code)
    }

    /// Every key currently held, in no particular order.
    pub fn held_keys(&self) -> impl Iterator<Item = KeyCode> + '_ {
        self.held.iter().copied()
    }

    pub fn clear_transients(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
    }
}
