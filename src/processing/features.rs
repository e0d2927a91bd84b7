// src/processing/features.rs
//! Statistical and spectral feature extraction for the signal-quality
//! classifier
//!
//! The external classifier consumes the features positionally, so the order
//! produced by [`FeatureVector::to_flat_vector`] is fixed: mean, std_dev,
//! median, variance, skewness, kurtosis, signal_range, zero_crossings, rms,
//! peak_to_peak, dominant_frequency_hz, snr_db, perfusion_index, continuity,
//! entropy.

use rustfft::{num_complex::Complex, FftPlanner};

/// Number of features in the vector.
pub const FEATURE_COUNT: usize = 15;

/// Assumed sampling rate for the spectral feature, in Hz.
pub const ASSUMED_SAMPLE_RATE_HZ: f32 = 100.0;

/// Half-width of the moving-average window used for SNR estimation.
const SNR_SMOOTHING_HALF_WIDTH: usize = 5;

/// Number of histogram bins for the entropy estimate.
const ENTROPY_BINS: usize = 10;

/// Fixed-order statistical/spectral descriptors of one signal window.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureVector {
    /// Arithmetic mean.
    pub mean: f32,
    /// Population standard deviation.
    pub std_dev: f32,
    /// Median, floor-division selection on even counts.
    pub median: f32,
    /// Population variance.
    pub variance: f32,
    /// Third standardized moment; 0 for a flat signal.
    pub skewness: f32,
    /// Fourth standardized moment, non-excess; 0 for a flat signal.
    pub kurtosis: f32,
    /// max - min.
    pub signal_range: f32,
    /// Sign changes treating `>= 0` and `< 0` as the two signs.
    pub zero_crossings: u32,
    /// Root mean square.
    pub rms: f32,
    /// Identical to `signal_range`; kept as its own slot because the
    /// classifier expects fifteen positions.
    pub peak_to_peak: f32,
    /// Frequency of the magnitude-spectrum peak, assuming the fixed
    /// [`ASSUMED_SAMPLE_RATE_HZ`] rate.
    pub dominant_frequency_hz: f32,
    /// Smoothed-signal power over residual power in dB; 0 when either power
    /// is zero.
    pub snr_db: f32,
    /// Pulsatile over non-pulsatile component, percent; 0 when the mean is
    /// zero.
    pub perfusion_index: f32,
    /// 1 minus the fraction of adjacent jumps exceeding three standard
    /// deviations; 0 for windows shorter than two samples.
    pub continuity: f32,
    /// 10-bin histogram Shannon entropy; 0 for a flat signal.
    pub entropy: f32,
}

impl FeatureVector {
    /// Flatten into the fixed classifier order.
    pub fn to_flat_vector(&self) -> Vec<f32> {
        vec![
            self.mean,
            self.std_dev,
            self.median,
            self.variance,
            self.skewness,
            self.kurtosis,
            self.signal_range,
            self.zero_crossings as f32,
            self.rms,
            self.peak_to_peak,
            self.dominant_frequency_hz,
            self.snr_db,
            self.perfusion_index,
            self.continuity,
            self.entropy,
        ]
    }

    /// Feature names in flat-vector order, for interpretability.
    pub fn feature_names() -> [&'static str; FEATURE_COUNT] {
        [
            "mean",
            "std_dev",
            "median",
            "variance",
            "skewness",
            "kurtosis",
            "signal_range",
            "zero_crossings",
            "rms",
            "peak_to_peak",
            "dominant_frequency_hz",
            "snr_db",
            "perfusion_index",
            "continuity",
            "entropy",
        ]
    }
}

/// Computes the feature vector over a full signal window.
pub struct FeatureExtractor {
    sample_rate_hz: f32,
    planner: FftPlanner<f32>,
}

impl FeatureExtractor {
    /// Extractor assuming the given sampling rate for the spectral feature.
    pub fn new(sample_rate_hz: f32) -> Self {
        Self {
            sample_rate_hz,
            planner: FftPlanner::new(),
        }
    }

    /// Extract all features from `signal`. An empty window yields all zeros.
    pub fn extract(&mut self, signal: &[f32]) -> FeatureVector {
        if signal.is_empty() {
            return FeatureVector::default();
        }

        let n = signal.len() as f32;
        let mean = signal.iter().sum::<f32>() / n;
        let variance = signal.iter().map(|&x| (x - mean).powi(2)).sum::<f32>() / n;
        let std_dev = variance.sqrt();

        let mut sorted = signal.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let median = sorted[sorted.len() / 2];
        let min = sorted[0];
        let max = sorted[sorted.len() - 1];
        let signal_range = max - min;

        let (skewness, kurtosis) = if std_dev > 0.0 {
            let skewness =
                signal.iter().map(|&x| (x - mean).powi(3)).sum::<f32>() / n / std_dev.powi(3);
            let kurtosis =
                signal.iter().map(|&x| (x - mean).powi(4)).sum::<f32>() / n / std_dev.powi(4);
            (skewness, kurtosis)
        } else {
            (0.0, 0.0)
        };

        let rms = (signal.iter().map(|&x| x * x).sum::<f32>() / n).sqrt();

        let perfusion_index = if mean != 0.0 {
            (max - min) / mean * 100.0
        } else {
            0.0
        };

        FeatureVector {
            mean,
            std_dev,
            median,
            variance,
            skewness,
            kurtosis,
            signal_range,
            zero_crossings: count_zero_crossings(signal),
            rms,
            peak_to_peak: signal_range,
            dominant_frequency_hz: self.dominant_frequency(signal),
            snr_db: signal_to_noise_ratio(signal),
            perfusion_index,
            continuity: signal_continuity(signal, std_dev),
            entropy: histogram_entropy(signal, min, max),
        }
    }

    // Frequency of the magnitude-spectrum peak over the real bins 0..=N/2.
    fn dominant_frequency(&mut self, signal: &[f32]) -> f32 {
        let mut buffer: Vec<Complex<f32>> = signal
            .iter()
            .map(|&x| Complex::new(x, 0.0))
            .collect();
        let fft = self.planner.plan_fft_forward(buffer.len());
        fft.process(&mut buffer);

        let spectrum_len = buffer.len() / 2 + 1;
        let mut peak_index = 0;
        let mut peak_magnitude = f32::NEG_INFINITY;
        for (i, bin) in buffer[..spectrum_len].iter().enumerate() {
            let magnitude = bin.norm();
            if magnitude > peak_magnitude {
                peak_magnitude = magnitude;
                peak_index = i;
            }
        }

        peak_index as f32 * self.sample_rate_hz / (2.0 * spectrum_len as f32)
    }
}

fn count_zero_crossings(signal: &[f32]) -> u32 {
    let mut count = 0;
    for pair in signal.windows(2) {
        let (prev, curr) = (pair[0], pair[1]);
        if (curr >= 0.0 && prev < 0.0) || (curr < 0.0 && prev >= 0.0) {
            count += 1;
        }
    }
    count
}

// Signal power from a moving-average smoothed copy, noise power from the
// residual against it.
fn signal_to_noise_ratio(signal: &[f32]) -> f32 {
    if signal.len() < 4 {
        return 0.0;
    }

    let n = signal.len();
    let mut smoothed = Vec::with_capacity(n);
    for i in 0..n {
        let lo = i.saturating_sub(SNR_SMOOTHING_HALF_WIDTH);
        let hi = (i + SNR_SMOOTHING_HALF_WIDTH + 1).min(n);
        let window = &signal[lo..hi];
        smoothed.push(window.iter().sum::<f32>() / window.len() as f32);
    }

    let signal_power = smoothed.iter().map(|&x| x * x).sum::<f32>() / n as f32;
    let noise_power = signal
        .iter()
        .zip(&smoothed)
        .map(|(&x, &s)| (x - s).powi(2))
        .sum::<f32>()
        / n as f32;

    if noise_power > 0.0 && signal_power > 0.0 {
        10.0 * (signal_power / noise_power).log10()
    } else {
        0.0
    }
}

fn signal_continuity(signal: &[f32], std_dev: f32) -> f32 {
    if signal.len() < 2 {
        return 0.0;
    }

    let threshold = 3.0 * std_dev;
    let discontinuities = signal
        .windows(2)
        .filter(|pair| (pair[1] - pair[0]).abs() > threshold)
        .count();

    1.0 - discontinuities as f32 / (signal.len() - 1) as f32
}

fn histogram_entropy(signal: &[f32], min: f32, max: f32) -> f32 {
    let range = max - min;
    if !range.is_finite() || range <= 0.0 {
        return 0.0;
    }

    let mut bin_counts = [0usize; ENTROPY_BINS];
    for &value in signal {
        let bin = (((value - min) / range * ENTROPY_BINS as f32) as usize).min(ENTROPY_BINS - 1);
        bin_counts[bin] += 1;
    }

    let total = signal.len() as f32;
    bin_counts
        .iter()
        .filter(|&&count| count > 0)
        .map(|&count| {
            let p = count as f32 / total;
            -p * p.log2()
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn empty_window_yields_zeros() {
        let mut extractor = FeatureExtractor::new(ASSUMED_SAMPLE_RATE_HZ);
        assert_eq!(extractor.extract(&[]), FeatureVector::default());
    }

    #[test]
    fn flat_window_guards_all_divisions() {
        let mut extractor = FeatureExtractor::new(ASSUMED_SAMPLE_RATE_HZ);
        let features = extractor.extract(&[42.0; 150]);

        assert_eq!(features.mean, 42.0);
        assert_eq!(features.std_dev, 0.0);
        assert_eq!(features.skewness, 0.0);
        assert_eq!(features.kurtosis, 0.0);
        assert_eq!(features.signal_range, 0.0);
        assert_eq!(features.perfusion_index, 0.0);
        assert_eq!(features.entropy, 0.0);
        assert_eq!(features.continuity, 1.0);
        assert_eq!(features.snr_db, 0.0);
    }

    #[test]
    fn zero_crossings_use_sign_classes() {
        assert_eq!(count_zero_crossings(&[1.0, -1.0, 1.0, -1.0]), 3);
        // Negative to exactly zero changes class, zero to negative too.
        assert_eq!(count_zero_crossings(&[-1.0, 0.0, -1.0]), 2);
        assert_eq!(count_zero_crossings(&[1.0, 0.0, 2.0]), 0);
        assert_eq!(count_zero_crossings(&[]), 0);
    }

    #[test]
    fn two_level_signal_has_one_bit_of_entropy() {
        let signal: Vec<f32> = (0..100)
            .map(|i| if i % 2 == 0 { 0.0 } else { 10.0 })
            .collect();
        let mut extractor = FeatureExtractor::new(ASSUMED_SAMPLE_RATE_HZ);
        let features = extractor.extract(&signal);

        assert!((features.entropy - 1.0).abs() < 1e-5);
    }

    #[test]
    fn dominant_frequency_finds_the_sine() {
        // 5 Hz sine sampled at 100 Hz over 200 samples; the peak bin is 10
        // and the original's scaling maps it to 10 * 100 / (2 * 101).
        let signal: Vec<f32> = (0..200)
            .map(|i| (2.0 * PI * 5.0 * i as f32 / 100.0).sin())
            .collect();
        let mut extractor = FeatureExtractor::new(ASSUMED_SAMPLE_RATE_HZ);
        let features = extractor.extract(&signal);

        assert!((features.dominant_frequency_hz - 4.95).abs() < 0.15);
    }

    #[test]
    fn smooth_signal_has_positive_snr() {
        let signal: Vec<f32> = (0..150)
            .map(|i| 200.0 + 30.0 * (2.0 * PI * i as f32 / 30.0).sin())
            .collect();
        let features = FeatureExtractor::new(ASSUMED_SAMPLE_RATE_HZ).extract(&signal);

        assert!(features.snr_db > 0.0);
    }

    #[test]
    fn discontinuities_reduce_continuity() {
        let mut signal: Vec<f32> = vec![0.0; 100];
        signal[50] = 1000.0;
        let features = FeatureExtractor::new(ASSUMED_SAMPLE_RATE_HZ).extract(&signal);

        assert!(features.continuity < 1.0);
        assert!(features.continuity >= 0.0);
    }

    #[test]
    fn flat_vector_order_is_stable() {
        let mut features = FeatureVector::default();
        features.mean = 1.0;
        features.zero_crossings = 7;
        features.entropy = 2.5;

        let flat = features.to_flat_vector();
        assert_eq!(flat.len(), FEATURE_COUNT);
        assert_eq!(flat[0], 1.0);
        assert_eq!(flat[7], 7.0);
        assert_eq!(flat[14], 2.5);
        assert_eq!(FeatureVector::feature_names().len(), FEATURE_COUNT);
    }
}
