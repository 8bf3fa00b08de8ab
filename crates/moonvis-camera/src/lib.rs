//! Interactive viewing model: drag-to-rotate orientation, a fixed-basis
//! camera rig with clamped wheel zoom and free keyboard translation.

pub mod controls;
pub mod drag;
pub mod geo;
pub mod interaction;
pub mod orientation;
pub mod rig;

pub use controls::{MOVE_BINDINGS, apply_held_keys, direction_for_key};
pub use drag::{DragState, DragTracker};
pub use geo::{lat_lon_to_unit, project_to_screen};
pub use interaction::{FrameMatrices, InteractionModel, InteractionSettings, MoveDirection};
pub use orientation::Orientation;
pub use rig::CameraRig;
