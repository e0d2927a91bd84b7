// src/processing/mod.rs
//! Numeric analysis pipeline: valley detection, HR/HRV estimation, feature
//! extraction

pub mod features;
pub mod heart_rate;
pub mod hrv;
pub mod pipeline;
pub mod valleys;

pub use features::{FeatureExtractor, FeatureVector, FEATURE_COUNT};
pub use heart_rate::{HeartRateEstimator, HeartRateResult};
pub use hrv::{HrvEstimator, HrvResult};
pub use pipeline::{AnalysisRecord, FrameStatus, PipelineMetrics, PpgPipeline};
pub use valleys::{Valley, ValleyDetector};
