//! Pointer drag state machine.
//!
//! ```text
//! Idle ──held──▶ Started ──held──▶ Dragging ──held──▶ Dragging
//!  ▲                │                  │
//!  └──── not held ──┴──── not held ────┘
//! ```
//!
//! The first held sample only records the pointer position. Emitting a delta
//! there would measure from wherever the previous drag ended and make the
//! body jump on press.

use glam::DVec2;

/// Where a drag gesture currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    /// Button not held.
    #[default]
    Idle,
    /// Button held, first sample seen, no delta emitted yet.
    Started,
    /// Button held, every further sample emits a delta.
    Dragging,
}

/// Tracks one drag gesture and turns pointer samples into deltas.
#[derive(Debug, Clone, Default)]
pub struct DragTracker {
    state: DragState,
    last: DVec2,
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one pointer sample.
    ///
    /// Returns the movement since the previous sample of the same drag, or
    /// `None` when the button is up or this is the first sample of a drag.
    pub fn sample(&mut self, x: f64, y: f64, held: bool) -> Option<DVec2> {
        let pos = DVec2::new(x, y);
        if !held {
            self.state = DragState::Idle;
            return None;
        }
        match self.state {
            DragState::Idle => {
                self.state = DragState::Started;
                self.last = pos;
                None
            }
            DragState::Started | DragState::Dragging => {
                self.state = DragState::Dragging;
                let delta = pos - self.last;
                self.last = pos;
                Some(delta)
            }
        }
    }

    /// Forces the tracker back to [`DragState::Idle`].
    pub fn release(&mut self) {
        self.state = DragState::Idle;
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    /// Pointer position recorded by the last held sample.
    pub fn last_position(&self) -> DVec2 {
        self.last
    }
}
