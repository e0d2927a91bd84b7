// src/processing/pipeline.rs
//! The per-frame processing pipeline
//!
//! One pipeline instance exclusively owns the rolling window, the frame-rate
//! estimator, and the latest results. The synchronous
//! [`process_frame`](PpgPipeline::process_frame) entry point runs each pass
//! to completion before the next frame is accepted; external callers only
//! read immutable snapshots of the latest results, never the in-progress
//! buffer.

use crate::acquisition::{
    CombinationMode, FrameRateEstimator, FrameSample, SignalCombiner, SignalWindow,
};
use crate::config::PipelineConfig;
use crate::error::PpgError;
use crate::processing::features::{FeatureExtractor, FeatureVector};
use crate::processing::heart_rate::{HeartRateEstimator, HeartRateResult};
use crate::processing::hrv::{HrvEstimator, HrvResult};
use crate::processing::valleys::{Valley, ValleyDetector};
use crate::utils::time::{Clock, SystemClock};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// What a call to [`PpgPipeline::process_frame`] did with the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    /// No sample point was valid; nothing was appended.
    Skipped,
    /// Sample appended but the window is still below the analysis threshold.
    Buffering,
    /// Sample appended and a full analysis pass ran.
    Analyzed,
}

/// Plain result record a caller may serialize and persist after an analysis
/// pass. The core performs no I/O itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    /// Snapshot of the signal window the results were computed from.
    pub ppg_window: Vec<f32>,
    /// Heart-rate result of the pass.
    pub heart_rate: HeartRateResult,
    /// HRV result of the pass.
    pub hrv: HrvResult,
    /// When the pass completed, nanoseconds since the Unix epoch.
    pub timestamp_nanos: u64,
}

/// Frame counters for one pipeline instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineMetrics {
    /// Frames that produced a sample.
    pub frames_processed: u64,
    /// Frames skipped because no sample point was valid.
    pub frames_skipped: u64,
    /// Completed analysis passes.
    pub analysis_passes: u64,
}

/// The PPG processing pipeline: combine, buffer, detect, estimate.
///
/// Each acquired frame flows through the signal combiner into the rolling
/// window; once the window reaches the analysis threshold, every further
/// frame triggers valley detection and both estimators on the same valley
/// set. Feature extraction for the external classifier runs independently
/// via [`extract_features`](Self::extract_features).
pub struct PpgPipeline {
    config: PipelineConfig,
    combiner: SignalCombiner,
    window: SignalWindow,
    frame_rate: FrameRateEstimator,
    valley_detector: ValleyDetector,
    heart_rate_estimator: HeartRateEstimator,
    hrv_estimator: HrvEstimator,
    feature_extractor: FeatureExtractor,
    clock: Arc<dyn Clock>,
    latest_valleys: Vec<Valley>,
    latest_heart_rate: HeartRateResult,
    latest_hrv: HrvResult,
    latest_record: Option<AnalysisRecord>,
    metrics: PipelineMetrics,
}

impl PpgPipeline {
    /// Pipeline driven by the system clock.
    pub fn new(config: PipelineConfig) -> Result<Self, PpgError> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Pipeline with an injected clock for deterministic tests.
    pub fn with_clock(config: PipelineConfig, clock: Arc<dyn Clock>) -> Result<Self, PpgError> {
        config.validate()?;

        Ok(Self {
            combiner: SignalCombiner::new(config.combination_mode),
            window: SignalWindow::new(config.max_window_len),
            frame_rate: FrameRateEstimator::new(
                Arc::clone(&clock),
                config.initial_fps,
                config.fps_smoothing,
            ),
            valley_detector: ValleyDetector::new(Arc::clone(&clock)),
            heart_rate_estimator: HeartRateEstimator::new(),
            hrv_estimator: HrvEstimator::new(),
            feature_extractor: FeatureExtractor::new(config.feature_sample_rate_hz),
            clock,
            latest_valleys: Vec::new(),
            latest_heart_rate: HeartRateResult::default(),
            latest_hrv: HrvResult::default(),
            latest_record: None,
            metrics: PipelineMetrics::default(),
            config,
        })
    }

    /// Process one frame: combine, append, and once enough samples are
    /// buffered, run valley detection and both estimators.
    ///
    /// Below the analysis threshold the accessors keep returning the prior
    /// results unchanged rather than recomputing.
    pub fn process_frame(&mut self, frame: &FrameSample) -> FrameStatus {
        self.frame_rate.tick();

        let sample = match self.combiner.combine(frame) {
            Some(sample) => sample,
            None => {
                self.metrics.frames_skipped += 1;
                return FrameStatus::Skipped;
            }
        };

        self.window.push(sample);
        self.metrics.frames_processed += 1;

        if self.window.len() < self.config.min_analysis_len {
            return FrameStatus::Buffering;
        }

        self.run_analysis();
        FrameStatus::Analyzed
    }

    fn run_analysis(&mut self) {
        let fps = self.frame_rate.fps();
        let window = self.window.to_vec();

        let valleys = self.valley_detector.detect(&window, fps);
        let heart_rate = self.heart_rate_estimator.estimate(&valleys);
        let hrv = self.hrv_estimator.estimate(&valleys);

        tracing::debug!(
            valleys = valleys.len(),
            bpm = heart_rate.bpm,
            sdnn_ms = hrv.sdnn_ms,
            fps,
            "analysis pass"
        );

        self.latest_valleys = valleys;
        self.latest_heart_rate = heart_rate;
        self.latest_hrv = hrv;
        self.latest_record = Some(AnalysisRecord {
            ppg_window: window,
            heart_rate,
            hrv,
            timestamp_nanos: self.clock.now_nanos(),
        });
        self.metrics.analysis_passes += 1;
    }

    /// Feature vector over the current window for the external classifier,
    /// or `None` while the window is below the analysis threshold.
    pub fn extract_features(&mut self) -> Option<FeatureVector> {
        if self.window.len() < self.config.min_analysis_len {
            return None;
        }
        Some(self.feature_extractor.extract(&self.window.to_vec()))
    }

    /// Latest heart-rate result.
    pub fn heart_rate(&self) -> HeartRateResult {
        self.latest_heart_rate
    }

    /// Latest HRV result.
    pub fn hrv(&self) -> HrvResult {
        self.latest_hrv
    }

    /// Valleys from the latest analysis pass, ordered by index.
    pub fn valleys(&self) -> &[Valley] {
        &self.latest_valleys
    }

    /// Read-only view of the rolling signal window.
    pub fn window(&self) -> &SignalWindow {
        &self.window
    }

    /// Current smoothed frame-rate estimate.
    pub fn fps(&self) -> f32 {
        self.frame_rate.fps()
    }

    /// Active combination mode.
    pub fn combination_mode(&self) -> CombinationMode {
        self.combiner.mode()
    }

    /// Switch the combination mode between processing passes; applies from
    /// the next frame.
    pub fn set_combination_mode(&mut self, mode: CombinationMode) {
        self.combiner.set_mode(mode);
    }

    /// Record of the latest analysis pass, if one has run.
    pub fn latest_record(&self) -> Option<&AnalysisRecord> {
        self.latest_record.as_ref()
    }

    /// Frame counters.
    pub fn metrics(&self) -> PipelineMetrics {
        self.metrics
    }
}
