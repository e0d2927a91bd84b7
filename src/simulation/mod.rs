// src/simulation/mod.rs
//! Synthetic PPG frame generation for tests, benches, and demos

use crate::acquisition::{FrameSample, Rgb, SAMPLE_POINT_COUNT};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::PI;

/// Parameters of the synthetic pulse signal.
#[derive(Debug, Clone)]
pub struct SyntheticPpgConfig {
    /// Simulated heart rate driving the waveform period.
    pub heart_rate_bpm: f32,
    /// Frame rate the source pretends to run at.
    pub frame_rate_hz: f32,
    /// Mean red-channel level.
    pub red_baseline: f32,
    /// Mean green/blue-channel level.
    pub chroma_baseline: f32,
    /// Peak pulsatile deviation on the red channel.
    pub pulse_amplitude: f32,
    /// Uniform noise amplitude added to every channel of every point.
    pub noise_amplitude: f32,
}

impl Default for SyntheticPpgConfig {
    fn default() -> Self {
        Self {
            heart_rate_bpm: 60.0,
            frame_rate_hz: 30.0,
            red_baseline: 180.0,
            chroma_baseline: 80.0,
            pulse_amplitude: 20.0,
            noise_amplitude: 0.5,
        }
    }
}

/// Deterministic-seedable source of synthetic PPG frames.
pub struct SyntheticPpgSource {
    config: SyntheticPpgConfig,
    phase: f32,
    rng: StdRng,
}

impl SyntheticPpgSource {
    /// Source with a fixed default seed.
    pub fn new(config: SyntheticPpgConfig) -> Self {
        Self::with_seed(config, 0x5eed)
    }

    /// Source with an explicit RNG seed for reproducible runs.
    pub fn with_seed(config: SyntheticPpgConfig, seed: u64) -> Self {
        Self {
            config,
            phase: 0.0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generate the next frame of the pulse waveform.
    pub fn next_frame(&mut self) -> FrameSample {
        let pulse = pulse_waveform(self.phase);

        self.phase += 2.0 * PI * self.config.heart_rate_bpm / 60.0 / self.config.frame_rate_hz;
        if self.phase > 2.0 * PI {
            self.phase -= 2.0 * PI;
        }

        let mut points = [None; SAMPLE_POINT_COUNT];
        for slot in points.iter_mut() {
            *slot = Some(Rgb {
                r: self.config.red_baseline
                    + self.config.pulse_amplitude * pulse
                    + self.noise(),
                g: self.config.chroma_baseline + self.noise(),
                b: self.config.chroma_baseline + self.noise(),
            });
        }

        FrameSample { points }
    }

    fn noise(&mut self) -> f32 {
        if self.config.noise_amplitude <= 0.0 {
            return 0.0;
        }
        self.rng
            .gen_range(-self.config.noise_amplitude..self.config.noise_amplitude)
    }
}

// Fundamental plus a small second harmonic standing in for the dicrotic
// notch.
fn pulse_waveform(phase: f32) -> f32 {
    phase.sin() + 0.25 * (2.0 * phase + 0.8).sin()
}
