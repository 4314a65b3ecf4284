//! Timed, eased interpolation of the camera position toward a fixed target.

use glam::Vec3;

use crate::easing::EasingFunction;
use crate::pose::CameraPose;

/// Shortest allowed duration; keeps progress finite.
const MIN_DURATION: f32 = 1e-6;

/// A single camera leg: position eases from `from` to `to` while the camera
/// keeps looking at `look_at`.
#[derive(Clone, Debug, PartialEq)]
pub struct Tween {
    from: Vec3,
    to: Vec3,
    look_at: Vec3,
    duration: f32,
    elapsed: f32,
    easing: EasingFunction,
}

impl Tween {
    pub fn new(from: Vec3, to: Vec3, look_at: Vec3, duration: f32, easing: EasingFunction) -> Self {
        Self {
            from,
            to,
            look_at,
            duration: duration.max(MIN_DURATION),
            elapsed: 0.0,
            easing,
        }
    }

    /// Advance by `dt`. Returns the unused time once the leg completes, so
    /// the caller can carry it into the next leg; `None` while running.
    pub fn advance(&mut self, dt: f32) -> Option<f32> {
        self.elapsed += dt;
        if self.elapsed >= self.duration {
            let leftover = self.elapsed - self.duration;
            self.elapsed = self.duration;
            Some(leftover)
        } else {
            None
        }
    }

    /// Linear progress in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Pose at the current progress. Lands exactly on the target.
    pub fn pose(&self) -> CameraPose {
        let position = if self.is_finished() {
            self.to
        } else {
            self.from.lerp(self.to, self.easing.apply(self.progress()))
        };
        CameraPose {
            position,
            look_at: self.look_at,
        }
    }

    pub fn target(&self) -> Vec3 {
        self.to
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tween(duration: f32) -> Tween {
        Tween::new(
            Vec3::ZERO,
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::Y,
            duration,
            EasingFunction::EaseInOut,
        )
    }

    #[test]
    fn test_starts_at_from() {
        let t = tween(2.0);
        assert_eq!(t.pose().position, Vec3::ZERO);
        assert_eq!(t.pose().look_at, Vec3::Y);
    }

    #[test]
    fn test_midpoint_is_eased() {
        let mut t = tween(2.0);
        assert_eq!(t.advance(0.5), None);
        // EaseInOut(0.25) = 0.125
        assert!((t.pose().position.x - 1.25).abs() < 1e-5);
        assert_eq!(t.advance(0.5), None);
        assert!((t.pose().position.x - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_leftover_carries() {
        let mut t = tween(2.0);
        assert_eq!(t.advance(1.5), None);
        let leftover = t.advance(0.75).unwrap();
        assert!((leftover - 0.25).abs() < 1e-6);
        assert_eq!(t.pose().position, Vec3::new(10.0, 0.0, 0.0));
        assert_eq!(t.progress(), 1.0);
    }

    #[test]
    fn test_zero_duration_completes_immediately() {
        let mut t = tween(0.0);
        let leftover = t.advance(0.01).unwrap();
        assert!((leftover - 0.01).abs() < 1e-5);
        assert!(t.is_finished());
    }
}
