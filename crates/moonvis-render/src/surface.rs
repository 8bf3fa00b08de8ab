//! Window size tracking for the swapchain.
//!
//! Minimized windows report 0×0 on most platforms. The tracker remembers that
//! state so the viewer can skip frames instead of configuring a zero-size
//! surface, while [`size`](ViewportTracker::size) always stays at least 1×1.

pub const MIN_SURFACE_DIMENSION: u32 = 1;

/// Physical pixel dimensions of the drawable area.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhysicalSize {
    pub width: u32,
    pub height: u32,
}

impl PhysicalSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(MIN_SURFACE_DIMENSION),
            height: height.max(MIN_SURFACE_DIMENSION),
        }
    }
}

#[derive(Debug)]
pub struct ViewportTracker {
    size: PhysicalSize,
    minimized: bool,
}

impl ViewportTracker {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: PhysicalSize::new(width, height),
            minimized: width == 0 || height == 0,
        }
    }

    /// Records a resize. Returns the new size only when the swapchain must be
    /// reconfigured: the clamped size changed and the window is visible.
    pub fn handle_resize(&mut self, width: u32, height: u32) -> Option<PhysicalSize> {
        self.minimized = width == 0 || height == 0;
        if self.minimized {
            return None;
        }
        let size = PhysicalSize::new(width, height);
        if size == self.size {
            return None;
        }
        self.size = size;
        Some(size)
    }

    pub fn size(&self) -> PhysicalSize {
        self.size
    }

    /// Whether frames should be skipped.
    pub fn is_minimized(&self) -> bool {
        self.minimized
    }
}
