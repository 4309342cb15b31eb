use std::time::{Duration, Instant};

pub const DEFAULT_FPS: u32 = 60;

/// Holds each frame to a fixed budget and measures the time between them.
#[derive(Debug)]
pub struct FramePacer {
    budget: Duration,
    last: Instant,
}

impl Default for FramePacer {
    fn default() -> Self {
        Self::new(DEFAULT_FPS)
    }
}

impl FramePacer {
    pub fn new(fps: u32) -> Self {
        Self {
            budget: Duration::from_secs(1) / fps.max(1),
            last: Instant::now(),
        }
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Time left in the current frame's budget, given how long it has run.
    pub fn remaining(&self, elapsed: Duration) -> Duration {
        self.budget.saturating_sub(elapsed)
    }

    /// Sleeps out the rest of the frame and returns seconds since the
    /// previous call.
    pub fn wait(&mut self) -> f32 {
        let remaining = self.remaining(self.last.elapsed());
        if !remaining.is_zero() {
            std::thread::sleep(remaining);
        }
        let now = Instant::now();
        let dt = now.duration_since(self.last).as_secs_f32();
        self.last = now;
        dt
    }
}

/// Frame counter that reports a rolling rate every `interval` frames.
#[derive(Debug)]
pub struct FrameStats {
    interval: u64,
    frames: u64,
    window_start: Instant,
}

impl FrameStats {
    pub fn new(interval: u64) -> Self {
        Self {
            interval: interval.max(1),
            frames: 0,
            window_start: Instant::now(),
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Counts a frame; returns the rate over the window just closed, if any.
    pub fn record(&mut self) -> Option<f32> {
        self.frames += 1;
        if self.frames % self.interval != 0 {
            return None;
        }
        let secs = self.window_start.elapsed().as_secs_f32();
        self.window_start = Instant::now();
        let fps = if secs > 0.0 {
            self.interval as f32 / secs
        } else {
            0.0
        };
        log::debug!("{} frames, {:.1} fps", self.frames, fps);
        Some(fps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn budget_is_one_over_fps() {
        let pacer = FramePacer::new(50);
        assert_eq!(pacer.budget(), Duration::from_millis(20));
        let left = pacer.remaining(Duration::from_millis(5));
        assert_eq!(left, Duration::from_millis(15));
        assert_eq!(pacer.remaining(Duration::from_millis(40)), Duration::ZERO);
    }

    #[test]
    fn wait_reports_at_least_the_budget() {
        let mut pacer = FramePacer::new(200);
        let dt = pacer.wait();
        assert!(dt >= 0.004);
    }

    #[test]
    fn stats_report_once_per_window() {
        let mut stats = FrameStats::new(3);
        assert!(stats.record().is_none());
        assert!(stats.record().is_none());
        assert!(stats.record().is_some());
        assert!(stats.record().is_none());
        assert_eq!(stats.frames(), 4);
    }
}
