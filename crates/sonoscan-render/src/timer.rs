//! Frame timing.

use std::time::{Duration, Instant};

/// Tracks per-frame delta time and a frames-per-second counter.
#[derive(Debug, Clone, Default)]
pub struct FrameTimer {
    last_frame: Option<Instant>,
    window_start: Option<Instant>,
    frames_in_window: u32,
    delta: f32,
    fps: u32,
}

impl FrameTimer {
    /// Creates a timer that has not seen a frame yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a frame at the current time. See [`tick_at`](Self::tick_at).
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    /// Records a frame at `now` and returns the seconds since the previous one.
    ///
    /// The first frame reports a delta of zero. The FPS counter updates once a
    /// full second has elapsed since the last update.
    pub fn tick_at(&mut self, now: Instant) -> f32 {
        self.delta = self
            .last_frame
            .map_or(0.0, |last| now.saturating_duration_since(last).as_secs_f32());
        self.last_frame = Some(now);

        let window_start = *self.window_start.get_or_insert(now);
        self.frames_in_window += 1;
        if now.saturating_duration_since(window_start) >= Duration::from_secs(1) {
            self.fps = self.frames_in_window;
            self.frames_in_window = 0;
            self.window_start = Some(now);
            log::trace!("{} fps", self.fps);
        }

        self.delta
    }

    /// Seconds between the last two frames.
    #[must_use]
    pub fn delta(&self) -> f32 {
        self.delta
    }

    /// Frames counted over the last full second.
    #[must_use]
    pub fn fps(&self) -> u32 {
        self.fps
    }
}
