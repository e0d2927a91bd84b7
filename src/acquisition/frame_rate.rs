// src/acquisition/frame_rate.rs
//! Measured frame-rate estimation

use crate::utils::time::Clock;
use std::sync::Arc;

const SPAN_NANOS: u64 = 1_000_000_000;

/// Smoothed samples-per-second estimate over rolling one-second spans.
///
/// Every frame calls [`tick`](Self::tick); once a span of at least one
/// second has elapsed, the raw rate for that span is folded into an
/// exponentially smoothed estimate. The estimate starts from a configured
/// initial rate so analysis parameters are sane before the first span
/// completes. Touched only from the single processing call site.
pub struct FrameRateEstimator {
    clock: Arc<dyn Clock>,
    span_start_nanos: u64,
    frames_in_span: u32,
    fps: f32,
    smoothing: f32,
}

impl FrameRateEstimator {
    /// Estimator starting at `initial_fps`; `smoothing` is the weight of the
    /// previous estimate when a span completes.
    pub fn new(clock: Arc<dyn Clock>, initial_fps: f32, smoothing: f32) -> Self {
        let span_start_nanos = clock.now_nanos();
        Self {
            clock,
            span_start_nanos,
            frames_in_span: 0,
            fps: initial_fps,
            smoothing,
        }
    }

    /// Record one frame arrival.
    pub fn tick(&mut self) {
        let now = self.clock.now_nanos();
        let elapsed = now.saturating_sub(self.span_start_nanos);

        if elapsed >= SPAN_NANOS && self.frames_in_span > 0 {
            let raw = self.frames_in_span as f64 * SPAN_NANOS as f64 / elapsed as f64;
            self.fps = self.smoothing * self.fps + (1.0 - self.smoothing) * raw as f32;
            self.frames_in_span = 0;
            self.span_start_nanos = now;
        }

        self.frames_in_span += 1;
    }

    /// Current smoothed frames-per-second estimate.
    pub fn fps(&self) -> f32 {
        self.fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::time::ManualClock;

    #[test]
    fn starts_at_initial_estimate() {
        let clock = Arc::new(ManualClock::new(0));
        let estimator = FrameRateEstimator::new(clock, 30.0, 0.7);
        assert_eq!(estimator.fps(), 30.0);
    }

    #[test]
    fn converges_towards_measured_rate() {
        let clock = Arc::new(ManualClock::new(0));
        let mut estimator = FrameRateEstimator::new(clock.clone(), 30.0, 0.5);

        // 10 fps for ten seconds
        for _ in 0..100 {
            clock.advance(100_000_000);
            estimator.tick();
        }

        assert!(estimator.fps() < 12.0, "fps = {}", estimator.fps());
        assert!(estimator.fps() > 8.0, "fps = {}", estimator.fps());
    }

    #[test]
    fn estimate_unchanged_before_first_span_completes() {
        let clock = Arc::new(ManualClock::new(0));
        let mut estimator = FrameRateEstimator::new(clock.clone(), 30.0, 0.7);

        for _ in 0..5 {
            clock.advance(100_000_000);
            estimator.tick();
        }

        assert_eq!(estimator.fps(), 30.0);
    }
}
