// src/processing/hrv.rs
//! Heart-rate-variability (SDNN) estimation from inter-valley intervals

use super::valleys::Valley;
use serde::{Deserialize, Serialize};

/// SDNN estimate in milliseconds with a confidence score.
///
/// Both values are rounded to whole numbers; `sdnn_ms == 0` with zero
/// confidence means undetermined.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HrvResult {
    /// Standard deviation of the NN intervals in milliseconds, rounded.
    pub sdnn_ms: f32,
    /// Confidence in [0, 100], rounded.
    pub confidence: f32,
}

/// Converts inter-valley intervals into SDNN plus confidence.
///
/// Runs on the same valley sequence as the heart-rate estimator but filters
/// and scores independently.
pub struct HrvEstimator {
    min_rr_ms: f32,
    max_rr_ms: f32,
}

impl Default for HrvEstimator {
    fn default() -> Self {
        Self {
            min_rr_ms: 250.0,
            max_rr_ms: 2000.0,
        }
    }
}

impl HrvEstimator {
    /// Estimator with the default RR-interval range.
    pub fn new() -> Self {
        Self::default()
    }

    /// Estimate SDNN from the detected valley sequence.
    pub fn estimate(&self, valleys: &[Valley]) -> HrvResult {
        if valleys.len() < 2 {
            return HrvResult::default();
        }

        let intervals: Vec<f32> = valleys
            .windows(2)
            .map(|pair| {
                pair[1].timestamp_nanos.saturating_sub(pair[0].timestamp_nanos) as f32 / 1e6
            })
            .filter(|&ms| ms >= self.min_rr_ms && ms <= self.max_rr_ms)
            .collect();

        if intervals.is_empty() {
            return HrvResult::default();
        }

        let n = intervals.len();
        let mean_rr = intervals.iter().sum::<f32>() / n as f32;

        // Sample standard deviation; a single interval has no spread to measure.
        let sdnn = if n > 1 {
            let sum_squared: f32 = intervals.iter().map(|rr| (rr - mean_rr).powi(2)).sum();
            (sum_squared / (n as f32 - 1.0)).sqrt()
        } else {
            0.0
        };

        let interval_confidence = ((n as f32 / 5.0) * 100.0).min(100.0);
        let consistency_confidence = if n > 1 {
            (100.0 - (sdnn / mean_rr) * 100.0).max(0.0)
        } else {
            0.0
        };
        let confidence = ((interval_confidence + consistency_confidence) / 2.0).clamp(0.0, 100.0);

        HrvResult {
            sdnn_ms: sdnn.round(),
            confidence: confidence.round(),
        }
    }
}
