//! Variable-timestep frame clock.
//!
//! The viewer has no simulation to keep deterministic, so each frame simply
//! advances by the wall-clock time since the previous one. Long stalls (a
//! dragged window, a debugger break) are clamped so held keys do not launch
//! the camera across the scene.

use std::time::Instant;
use tracing::warn;

/// Longest step a single frame may take, in seconds.
pub const MAX_FRAME_TIME: f64 = 0.25;

pub struct FrameClock {
    previous_time: Instant,
    frame_count: u64,
    total_time: f64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            previous_time: Instant::now(),
            frame_count: 0,
            total_time: 0.0,
        }
    }

    /// Measures the time since the last call and returns it in seconds,
    /// clamped to [`MAX_FRAME_TIME`].
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let frame_time = now.duration_since(self.previous_time).as_secs_f64();
        self.previous_time = now;
        self.advance(frame_time)
    }

    /// Restarts timing from now without counting a frame. Called after the
    /// window has been hidden so the gap is not reported as elapsed time.
    pub fn reset(&mut self) {
        self.previous_time = Instant::now();
    }

    fn advance(&mut self, frame_time: f64) -> f32 {
        let mut frame_time = frame_time.max(0.0);
        if frame_time > MAX_FRAME_TIME {
            warn!(
                "Frame time {:.1}ms exceeds maximum, clamping to {:.1}ms",
                frame_time * 1000.0,
                MAX_FRAME_TIME * 1000.0
            );
            frame_time = MAX_FRAME_TIME;
        }
        self.total_time += frame_time;
        self.frame_count += 1;
        frame_time as f32
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Sum of all clamped frame times, in seconds.
    pub fn total_time(&self) -> f64 {
        self.total_time
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clock_is_empty() {
        let clock = FrameClock::default();
        assert_eq!(clock.frame_count(), 0);
        assert_eq!(clock.total_time(), 0.0);
    }

    #[test]
    fn test_advance_returns_frame_time() {
        let mut clock = FrameClock::new();
        let elapsed = clock.advance(1.0 / 60.0);
        assert!((elapsed - 1.0 / 60.0).abs() < 1e-6);
        assert_eq!(clock.frame_count(), 1);
    }

    #[test]
    fn test_long_frames_are_clamped() {
        let mut clock = FrameClock::new();
        let elapsed = clock.advance(3.0);
        assert_eq!(elapsed as f64, MAX_FRAME_TIME);
        assert!((clock.total_time() - MAX_FRAME_TIME).abs() < 1e-12);
    }

    #[test]
    fn test_negative_time_counts_as_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.advance(-0.5), 0.0);
    }

    #[test]
    fn test_total_time_accumulates() {
        let mut clock = FrameClock::new();
        for ft in [0.016, 0.017, 0.020, 0.5] {
            clock.advance(ft);
        }
        assert_eq!(clock.frame_count(), 4);
        assert!((clock.total_time() - (0.016 + 0.017 + 0.020 + MAX_FRAME_TIME)).abs() < 1e-12);
    }

    #[test]
    fn test_tick_measures_wall_clock() {
        let mut clock = FrameClock::new();
        std::thread::sleep(std::time::Duration::from_millis(5));
        let elapsed = clock.tick();
        assert!(elapsed > 0.0);
        assert!(elapsed as f64 <= MAX_FRAME_TIME);
    }

    #[test]
    fn test_reset_does_not_count_a_frame() {
        let mut clock = FrameClock::new();
        clock.reset();
        assert_eq!(clock.frame_count(), 0);
    }
}
