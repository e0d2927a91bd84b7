// src/processing/heart_rate.rs
//! Heart-rate estimation from inter-valley intervals

use super::valleys::Valley;
use serde::{Deserialize, Serialize};

/// Heart-rate estimate in beats per minute with a confidence score.
///
/// `bpm == 0` means undetermined: fewer than two valleys, or no interval
/// inside the physiologically plausible range.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HeartRateResult {
    /// Beats per minute, 0 when undetermined.
    pub bpm: u32,
    /// Confidence in [0, 100]; steadier intervals score higher.
    pub confidence: f32,
}

/// Converts inter-valley time intervals into BPM plus confidence.
pub struct HeartRateEstimator {
    min_interval_secs: f32,
    max_interval_secs: f32,
}

impl Default for HeartRateEstimator {
    fn default() -> Self {
        // 0.4-2.0 s intervals, i.e. 30-150 BPM
        Self {
            min_interval_secs: 0.4,
            max_interval_secs: 2.0,
        }
    }
}

impl HeartRateEstimator {
    /// Estimator with the default physiological interval range.
    pub fn new() -> Self {
        Self::default()
    }

    /// Estimate BPM from the detected valley sequence.
    pub fn estimate(&self, valleys: &[Valley]) -> HeartRateResult {
        if valleys.len() < 2 {
            return HeartRateResult::default();
        }

        let intervals: Vec<f32> = valleys
            .windows(2)
            .map(|pair| {
                pair[1].timestamp_nanos.saturating_sub(pair[0].timestamp_nanos) as f32 / 1e9
            })
            .filter(|&secs| secs >= self.min_interval_secs && secs <= self.max_interval_secs)
            .collect();

        if intervals.is_empty() {
            return HeartRateResult::default();
        }

        let mut sorted = intervals.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        // Floor-division selection: the upper of the two middles on even counts.
        let median = sorted[sorted.len() / 2];

        let mean = intervals.iter().sum::<f32>() / intervals.len() as f32;
        let variance = intervals
            .iter()
            .map(|interval| (interval - mean).powi(2))
            .sum::<f32>()
            / intervals.len() as f32;
        let coefficient_of_variation = 100.0 * variance.sqrt() / mean;
        let confidence = (100.0 - coefficient_of_variation).clamp(0.0, 100.0);

        HeartRateResult {
            bpm: (60.0 / median).round() as u32,
            confidence,
        }
    }
}
