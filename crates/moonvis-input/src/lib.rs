//! Frame-coherent mouse and keyboard state built from winit window events.

pub mod keyboard;
pub mod mouse;

pub use keyboard::{KeyboardState, RawKeyEvent};
pub use mouse::{MouseState, PIXELS_PER_LINE, scroll_lines};
