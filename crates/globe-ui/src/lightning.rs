//! Background lightning bolts behind the title.
//!
//! Each bolt loops on its own period; it stays dark for the first 92% of the
//! cycle and then flickers through a fixed keyframe sequence.

use rand::Rng;

/// `(cycle fraction, opacity)`, linearly interpolated.
const OPACITY_KEYS: [(f32, f32); 7] = [
    (0.0, 0.0),
    (0.92, 0.0),
    (0.93, 0.6),
    (0.94, 0.2),
    (0.96, 0.9),
    (0.98, 0.4),
    (1.0, 0.0),
];

/// `(cycle fraction, rotation offset in degrees)`.
const ANGLE_KEYS: [(f32, f32); 7] = [
    (0.0, 0.0),
    (0.92, 0.0),
    (0.93, 5.0),
    (0.94, -3.0),
    (0.96, 2.0),
    (0.98, 0.0),
    (1.0, 0.0),
];

fn sample(keys: &[(f32, f32)], phase: f32) -> f32 {
    for pair in keys.windows(2) {
        let (t0, v0) = pair[0];
        let (t1, v1) = pair[1];
        if phase <= t1 {
            let f = ((phase - t0) / (t1 - t0)).clamp(0.0, 1.0);
            return v0 + (v1 - v0) * f;
        }
    }
    keys.last().map_or(0.0, |&(_, v)| v)
}

/// One randomly placed bolt.
#[derive(Clone, Debug, PartialEq)]
pub struct LightningBolt {
    /// Cycle length in seconds, 5..9.
    pub period: f32,
    /// Seconds already elapsed in the cycle at time zero, 0..5.
    pub offset: f32,
    /// Base rotation in degrees.
    pub angle: f32,
    /// Height in pixels, 20..50.
    pub height: f32,
    /// Horizontal position, percent of the title box.
    pub left: f32,
    /// Vertical position, percent of the title box.
    pub top: f32,
}

impl LightningBolt {
    pub fn random(rng: &mut impl Rng) -> Self {
        Self {
            period: rng.random_range(5.0..9.0),
            offset: rng.random_range(0.0..5.0),
            angle: rng.random_range(0.0..360.0),
            height: rng.random_range(20.0..50.0),
            left: rng.random_range(0.0..100.0),
            top: rng.random_range(0.0..100.0),
        }
    }

    /// Position within the cycle at `time`, in `[0, 1)`.
    pub fn phase(&self, time: f32) -> f32 {
        ((time + self.offset) / self.period).rem_euclid(1.0)
    }

    pub fn opacity_at(&self, time: f32) -> f32 {
        sample(&OPACITY_KEYS, self.phase(time))
    }

    /// Rotation in degrees at `time`.
    pub fn angle_at(&self, time: f32) -> f32 {
        self.angle + sample(&ANGLE_KEYS, self.phase(time))
    }
}
