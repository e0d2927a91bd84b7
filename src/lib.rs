//! PPG-Core: Real-time photoplethysmography processing core
//!
//! This library extracts physiological metrics from a stream of per-frame
//! color-intensity samples derived from a camera-based PPG signal. It
//! features:
//!
//! - Channel combination of fixed spatial sample points into one scalar per
//!   frame
//! - Rolling signal window with bounded retention
//! - Valley (trough) detection with minimum-spacing enforcement
//! - Heart-rate and heart-rate-variability estimation with confidence scores
//! - Feature extraction feeding an external signal-quality classifier
//!
//! Camera acquisition, rendering, persistence, and the classifier internals
//! stay outside the crate; the pipeline consumes per-frame RGB readings and
//! exposes plain result values.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use ppg_core::acquisition::{FrameSample, Rgb};
//! use ppg_core::config::PipelineConfig;
//! use ppg_core::processing::PpgPipeline;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut pipeline = PpgPipeline::new(PipelineConfig::default())?;
//!
//!     // One frame's readings at the five fixed sample points
//!     let frame = FrameSample::uniform(Rgb { r: 182.0, g: 88.0, b: 64.0 });
//!     pipeline.process_frame(&frame);
//!
//!     let heart_rate = pipeline.heart_rate();
//!     println!("{} bpm ({:.0}% confidence)", heart_rate.bpm, heart_rate.confidence);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod acquisition;
pub mod config;
pub mod error;
pub mod processing;
pub mod quality;
#[cfg(feature = "simulation")]
pub mod simulation;
pub mod utils;

// Re-export commonly used types for convenience
pub use acquisition::{CombinationMode, FrameSample, Rgb, SignalWindow};
pub use config::PipelineConfig;
pub use error::PpgError;
pub use processing::{
    AnalysisRecord, FeatureVector, FrameStatus, HeartRateResult, HrvResult, PpgPipeline, Valley,
};
pub use quality::{
    ClassProbabilities, QualityAssessor, QualityClass, QualityModel, SignalQuality,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert!(!VERSION.is_empty());
        assert!(!NAME.is_empty());
    }
}
