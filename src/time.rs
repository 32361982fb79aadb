//! Frame timing.
//!
//! Tracks frame delta, frame count and a periodically refreshed FPS value,
//! which the window title shows.

use std::time::{Duration, Instant};

/// Frame timer.
#[derive(Debug)]
pub struct Time {
    last_frame: Instant,
    delta_secs: f32,
    frame_count: u64,
    fps: f32,
    fps_frame_count: u64,
    fps_update_time: Instant,
    fps_update_interval: Duration,
}

impl Time {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            last_frame: now,
            delta_secs: 0.0,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: now,
            fps_update_interval: Duration::from_millis(500),
        }
    }

    /// Advance one frame. Returns `true` when the FPS value was refreshed.
    pub fn update(&mut self) -> bool {
        let now = Instant::now();
        self.delta_secs = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.frame_count += 1;

        let fps_elapsed = now.duration_since(self.fps_update_time);
        if fps_elapsed >= self.fps_update_interval {
            let frames_since = self.frame_count - self.fps_frame_count;
            self.fps = frames_since as f32 / fps_elapsed.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = now;
            return true;
        }
        false
    }

    /// Time since last frame in seconds.
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Frames per second over the last refresh interval.
    pub fn fps(&self) -> f32 {
        self.fps
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_time_new() {
        let time = Time::new();
        assert_eq!(time.frame(), 0);
        assert_eq!(time.fps(), 0.0);
    }

    #[test]
    fn test_time_update() {
        let mut time = Time::new();
        thread::sleep(Duration::from_millis(10));
        time.update();

        assert!(time.delta() > 0.0);
        assert_eq!(time.frame(), 1);
    }

    #[test]
    fn test_fps_refresh() {
        let mut time = Time::new();
        assert!(!time.update());
        thread::sleep(Duration::from_millis(510));
        assert!(time.update());
        assert!(time.fps() > 0.0);
    }
}
