//! Multi-octave fractal Brownian motion (fBm) over simplex noise.
//!
//! Each octave doubles in frequency and halves in amplitude, starting at
//! amplitude 0.5 and frequency 1, so the sum stays within roughly `[-1, 1]`.

use glam::Vec3;
use noise::{NoiseFn, Simplex};

/// Fractal gradient-noise sampler on 3D points.
#[derive(Clone, Debug)]
pub struct Fbm {
    noise: Simplex,
    octaves: u32,
    lacunarity: f64,
    persistence: f64,
}

impl Fbm {
    /// Starting amplitude of the first octave.
    pub const BASE_AMPLITUDE: f64 = 0.5;

    /// Create a sampler with the standard doubling/halving octave ladder.
    pub fn new(seed: u32, octaves: u32) -> Self {
        Self {
            noise: Simplex::new(seed),
            octaves,
            lacunarity: 2.0,
            persistence: 0.5,
        }
    }

    /// Sample the fractal sum at `p`.
    pub fn sample(&self, p: Vec3) -> f32 {
        let point = p.as_dvec3();
        let mut total = 0.0;
        let mut amplitude = Self::BASE_AMPLITUDE;
        let mut frequency = 1.0;

        for _ in 0..self.octaves {
            let scaled = point * frequency;
            total += amplitude * self.noise.get([scaled.x, scaled.y, scaled.z]);
            amplitude *= self.persistence;
            frequency *= self.lacunarity;
        }

        total as f32
    }

    /// Theoretical maximum absolute value (geometric series sum).
    pub fn max_amplitude(&self) -> f32 {
        let mut sum = 0.0;
        let mut amp = Self::BASE_AMPLITUDE;
        for _ in 0..self.octaves {
            sum += amp;
            amp *= self.persistence;
        }
        sum as f32
    }

    /// Number of octaves summed per sample.
    pub fn octaves(&self) -> u32 {
        self.octaves
    }
}
