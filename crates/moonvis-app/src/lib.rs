//! The moon viewer application: window and event loop, frame timing, and the
//! per-frame input-then-draw sequence.

pub mod frame;
pub mod frame_clock;
pub mod platform;
pub mod window;

pub use window::{AppError, AppState, run};
