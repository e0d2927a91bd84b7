// src/acquisition/combiner.rs
//! Channel combination of the spatial sample points into one scalar

use super::frame::FrameSample;
use serde::{Deserialize, Serialize};

/// How the per-point RGB sums are reduced into the scalar PPG sample.
///
/// `R`, `G`, `B` are the channel sums over the valid sample points and `n`
/// the number of valid points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CombinationMode {
    /// `(2R - G - B) / n`, emphasizes the pulsatile red component.
    Default,
    /// `R / n`
    RedOnly,
    /// `G / n`
    GreenOnly,
    /// `B / n`
    BlueOnly,
    /// `(R - B) / n`
    RedMinusBlue,
    /// `(3R - G - B) / n`
    Custom,
}

impl Default for CombinationMode {
    fn default() -> Self {
        CombinationMode::Default
    }
}

/// Reduces one frame's sample-point readings into a single scalar sample.
pub struct SignalCombiner {
    mode: CombinationMode,
}

impl SignalCombiner {
    /// Combiner with the given initial mode.
    pub fn new(mode: CombinationMode) -> Self {
        Self { mode }
    }

    /// Active combination mode.
    pub fn mode(&self) -> CombinationMode {
        self.mode
    }

    /// Switch the combination mode. Takes effect on the next frame, never
    /// mid-frame.
    pub fn set_mode(&mut self, mode: CombinationMode) {
        self.mode = mode;
    }

    /// Combine the valid sample points into one scalar, or `None` when no
    /// point produced a reading (the frame carries no sample and is skipped).
    pub fn combine(&self, frame: &FrameSample) -> Option<f32> {
        let mut r_sum = 0.0f32;
        let mut g_sum = 0.0f32;
        let mut b_sum = 0.0f32;
        let mut valid_samples = 0usize;

        for point in frame.points.iter().flatten() {
            r_sum += point.r;
            g_sum += point.g;
            b_sum += point.b;
            valid_samples += 1;
        }

        if valid_samples == 0 {
            return None;
        }

        let n = valid_samples as f32;
        let value = match self.mode {
            CombinationMode::RedOnly => r_sum / n,
            CombinationMode::GreenOnly => g_sum / n,
            CombinationMode::BlueOnly => b_sum / n,
            CombinationMode::RedMinusBlue => (r_sum - b_sum) / n,
            CombinationMode::Custom => (3.0 * r_sum - g_sum - b_sum) / n,
            CombinationMode::Default => (2.0 * r_sum - g_sum - b_sum) / n,
        };

        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::acquisition::frame::Rgb;

    fn frame() -> FrameSample {
        FrameSample::uniform(Rgb {
            r: 10.0,
            g: 5.0,
            b: 2.0,
        })
    }

    #[test]
    fn combination_formulas() {
        let frame = frame();
        let combine = |mode: CombinationMode| SignalCombiner::new(mode).combine(&frame).unwrap();

        assert_eq!(combine(CombinationMode::Default), 13.0); // (100 - 25 - 10) / 5
        assert_eq!(combine(CombinationMode::RedOnly), 10.0);
        assert_eq!(combine(CombinationMode::GreenOnly), 5.0);
        assert_eq!(combine(CombinationMode::BlueOnly), 2.0);
        assert_eq!(combine(CombinationMode::RedMinusBlue), 8.0);
        assert_eq!(combine(CombinationMode::Custom), 23.0); // (150 - 25 - 10) / 5
    }

    #[test]
    fn all_points_invalid_yields_no_sample() {
        let combiner = SignalCombiner::new(CombinationMode::Default);
        assert_eq!(combiner.combine(&FrameSample::invalid()), None);
    }

    #[test]
    fn partial_validity_averages_over_valid_points() {
        let mut frame = frame();
        frame.points[0] = None;
        frame.points[3] = None;

        let combiner = SignalCombiner::new(CombinationMode::RedOnly);
        assert_eq!(combiner.combine(&frame), Some(10.0)); // 30 / 3
    }

    #[test]
    fn mode_switch_applies_to_next_combine() {
        let mut combiner = SignalCombiner::new(CombinationMode::Default);
        assert_eq!(combiner.combine(&frame()), Some(13.0));

        combiner.set_mode(CombinationMode::RedOnly);
        assert_eq!(combiner.combine(&frame()), Some(10.0));
    }

    #[test]
    fn modes_use_original_wire_names() {
        assert_eq!(
            serde_json::to_string(&CombinationMode::RedMinusBlue).unwrap(),
            "\"redMinusBlue\""
        );
        let mode: CombinationMode = serde_json::from_str("\"greenOnly\"").unwrap();
        assert_eq!(mode, CombinationMode::GreenOnly);
    }
}
