//! Frame clock for offline stepping.
//!
//! Frames are rendered, not displayed, so time advances by a fixed delta per
//! frame regardless of how long each frame takes to produce.
//!
//! # Example
//!
//! ```
//! use fieldtrace::time::Time;
//!
//! let mut time = Time::new(15.0);
//! let dt = time.tick();
//!
//! assert!((dt - 1.0 / 15.0).abs() < 1e-6);
//! assert_eq!(time.frame(), 1);
//! ```

/// Fixed-step time tracking for a rendered scene.
#[derive(Debug, Clone)]
pub struct Time {
    /// Frames per second of the output.
    fps: f32,
    /// Scaled scene time in seconds.
    elapsed_secs: f32,
    /// Delta returned by the last tick.
    delta_secs: f32,
    /// Frames ticked since start.
    frame_count: u64,
    /// Whether time is paused.
    paused: bool,
    /// Time scale multiplier (1.0 = normal speed).
    time_scale: f32,
}

impl Time {
    /// Clock producing `fps` frames per second of scene time.
    pub fn new(fps: f32) -> Self {
        Self {
            fps,
            elapsed_secs: 0.0,
            delta_secs: 0.0,
            frame_count: 0,
            paused: false,
            time_scale: 1.0,
        }
    }

    /// Advance one frame and return the (scaled) delta.
    ///
    /// While paused the frame counter still advances but the delta is 0.
    pub fn tick(&mut self) -> f32 {
        self.frame_count += 1;
        self.delta_secs = if self.paused {
            0.0
        } else {
            self.fixed_delta() * self.time_scale
        };
        self.elapsed_secs += self.delta_secs;
        self.delta_secs
    }

    /// Unscaled seconds per frame.
    #[inline]
    pub fn fixed_delta(&self) -> f32 {
        1.0 / self.fps
    }

    /// Total scaled time in seconds since start.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed_secs
    }

    /// Delta of the last tick.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    /// Frames ticked since start.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[inline]
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Set time scale multiplier.
    ///
    /// - `1.0` = normal speed
    /// - `0.5` = half speed (slow motion)
    /// - `2.0` = double speed
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(0.0);
    }

    /// Number of frames covering `duration` seconds, rounded to nearest.
    pub fn total_frames(&self, duration: f32) -> u64 {
        (duration * self.fps).round().max(0.0) as u64
    }

    /// Reset the clock to frame 0, keeping fps and time scale.
    pub fn reset(&mut self) {
        self.elapsed_secs = 0.0;
        self.delta_secs = 0.0;
        self.frame_count = 0;
        self.paused = false;
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new(15.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_new() {
        let time = Time::new(30.0);
        assert_eq!(time.frame(), 0);
        assert!(!time.is_paused());
        assert_eq!(time.time_scale(), 1.0);
        assert_eq!(time.elapsed(), 0.0);
    }

    #[test]
    fn test_time_tick_accumulates() {
        let mut time = Time::new(10.0);
        for _ in 0..10 {
            time.tick();
        }
        assert_eq!(time.frame(), 10);
        assert!((time.elapsed() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_time_pause() {
        let mut time = Time::new(15.0);
        time.tick();
        let before = time.elapsed();

        time.pause();
        assert_eq!(time.tick(), 0.0);
        assert_eq!(time.elapsed(), before);
        assert_eq!(time.frame(), 2);

        time.resume();
        assert!(time.tick() > 0.0);
    }

    #[test]
    fn test_time_scale() {
        let mut time = Time::new(10.0);
        time.set_time_scale(2.0);
        assert!((time.tick() - 0.2).abs() < 1e-6);

        // Negative scale should clamp to 0
        time.set_time_scale(-1.0);
        assert_eq!(time.time_scale(), 0.0);
    }

    #[test]
    fn test_reset_keeps_rate_and_scale() {
        let mut time = Time::new(24.0);
        time.set_time_scale(0.5);
        for _ in 0..5 {
            time.tick();
        }
        time.pause();

        time.reset();
        assert_eq!(time.frame(), 0);
        assert_eq!(time.elapsed(), 0.0);
        assert_eq!(time.delta(), 0.0);
        assert!(!time.is_paused());
        assert_eq!(time.fps(), 24.0);
        assert_eq!(time.time_scale(), 0.5);
    }

    #[test]
    fn test_total_frames() {
        let time = Time::new(15.0);
        assert_eq!(time.total_frames(3.0), 45);
        assert_eq!(time.total_frames(0.0), 0);
    }
}
