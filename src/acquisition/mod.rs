// src/acquisition/mod.rs
//! Frame intake: sample points, channel combination, rolling buffer, frame rate

pub mod combiner;
pub mod frame;
pub mod frame_rate;
pub mod window;

pub use combiner::{CombinationMode, SignalCombiner};
pub use frame::{sample_coordinates, FrameSample, Rgb, SAMPLE_POINTS, SAMPLE_POINT_COUNT};
pub use frame_rate::FrameRateEstimator;
pub use window::SignalWindow;
