//! Camera pose and the points of interest it can fly to.

use glam::{Mat3, Mat4, Quat, Vec3};
use globe_surface::{SurfacePoint, smoothstep};

/// Markers float this factor above the unit surface.
const MARKER_LIFT: f32 = 1.001;

/// Position plus look-at target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub look_at: Vec3,
}

impl CameraPose {
    /// Default orbit distance from the globe center.
    pub const DEFAULT_DISTANCE: f32 = 5.0;

    /// Home pose at `distance` along +Z, looking at the origin.
    pub fn home(distance: f32) -> Self {
        Self {
            position: Vec3::Z * distance,
            look_at: Vec3::ZERO,
        }
    }

    /// Distance from the camera to the globe center.
    pub fn distance(&self) -> f32 {
        self.position.length()
    }

    /// Position and look-at both within `tolerance` of `other`.
    pub fn approx_eq(&self, other: &CameraPose, tolerance: f32) -> bool {
        self.position.distance(other.position) <= tolerance
            && self.look_at.distance(other.look_at) <= tolerance
    }
}

impl Default for CameraPose {
    fn default() -> Self {
        Self::home(Self::DEFAULT_DISTANCE)
    }
}

/// A named location on the globe surface.
#[derive(Clone, Debug, PartialEq)]
pub struct PointOfInterest {
    pub id: String,
    pub position: SurfacePoint,
}

impl PointOfInterest {
    /// Point at the normalized `direction`. `None` for a zero or non-finite
    /// direction.
    pub fn new(id: impl Into<String>, direction: Vec3) -> Option<Self> {
        SurfacePoint::new(direction).map(|position| Self {
            id: id.into(),
            position,
        })
    }

    /// World-space position on the unit globe.
    pub fn world_position(&self) -> Vec3 {
        self.position.as_vec3()
    }

    /// Rotation that stands a marker upright on the surface: local +Y maps
    /// to the surface normal and local +X to the tangent `Y x normal`.
    ///
    /// At the poles, where that tangent vanishes, +X is used instead.
    pub fn alignment(&self) -> Mat3 {
        let up = self.world_position();
        let right = Vec3::Y
            .cross(up)
            .try_normalize()
            .unwrap_or(Vec3::X);
        let back = right.cross(up);
        Mat3::from_cols(right, up, back)
    }

    /// Full marker transform at `camera_distance`: lifted just off the
    /// surface, aligned with [`alignment`](Self::alignment) and scaled by
    /// [`marker_scale`](Self::marker_scale).
    pub fn marker_transform(&self, camera_distance: f32) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::splat(self.marker_scale(camera_distance)),
            Quat::from_mat3(&self.alignment()),
            self.world_position() * MARKER_LIFT,
        )
    }

    /// Marker opacity: fully shown inside distance 4, hidden beyond 6.
    pub fn marker_visibility(&self, camera_distance: f32) -> f32 {
        smoothstep(6.0, 4.0, camera_distance)
    }

    /// Marker scale: shrinks with distance, grows as the camera closes in.
    pub fn marker_scale(&self, camera_distance: f32) -> f32 {
        let d = camera_distance.max(1e-3);
        let base = (1.0 / (d * 3.0)).clamp(0.005, 0.1);
        base * (1.0 + (6.0 - d.min(6.0)) * 0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pose() {
        let pose = CameraPose::default();
        assert_eq!(pose.position, Vec3::new(0.0, 0.0, 5.0));
        assert_eq!(pose.look_at, Vec3::ZERO);
        assert_eq!(pose.distance(), 5.0);
    }

    #[test]
    fn test_poi_is_normalized() {
        let poi = PointOfInterest::new("city", Vec3::new(0.5, 0.1, -0.5)).unwrap();
        assert!((poi.world_position().length() - 1.0).abs() < 1e-6);
        assert!(PointOfInterest::new("nowhere", Vec3::ZERO).is_none());
    }

    #[test]
    fn test_marker_visibility_fades_with_distance() {
        let poi = PointOfInterest::new("city", Vec3::X).unwrap();
        assert_eq!(poi.marker_visibility(3.0), 1.0);
        assert_eq!(poi.marker_visibility(7.0), 0.0);
        let mid = poi.marker_visibility(5.0);
        assert!(mid > 0.0 && mid < 1.0);
    }

    fn assert_orthonormal(m: Mat3) {
        for (a, b) in [(m.x_axis, m.y_axis), (m.y_axis, m.z_axis), (m.x_axis, m.z_axis)] {
            assert!(a.dot(b).abs() < 1e-5);
        }
        for axis in [m.x_axis, m.y_axis, m.z_axis] {
            assert!((axis.length() - 1.0).abs() < 1e-5);
        }
        assert!((m.determinant() - 1.0).abs() < 1e-5, "not a rotation");
    }

    #[test]
    fn test_alignment_stands_marker_on_surface() {
        let poi = PointOfInterest::new("city", Vec3::new(0.5, 0.1, -0.5)).unwrap();
        let m = poi.alignment();
        assert_orthonormal(m);
        assert!((m * Vec3::Y - poi.world_position()).length() < 1e-5);
        // the tangent is horizontal
        assert!((m * Vec3::X).y.abs() < 1e-6);
    }

    #[test]
    fn test_alignment_at_poles() {
        for dir in [Vec3::Y, Vec3::NEG_Y] {
            let poi = PointOfInterest::new("pole", dir).unwrap();
            let m = poi.alignment();
            assert_orthonormal(m);
            assert!((m * Vec3::Y - dir).length() < 1e-6);
        }
    }

    #[test]
    fn test_marker_transform() {
        let poi = PointOfInterest::new("city", Vec3::X).unwrap();
        let t = poi.marker_transform(3.0);
        let origin = t.transform_point3(Vec3::ZERO);
        assert!((origin - Vec3::X * 1.001).length() < 1e-6);
        let top = t.transform_point3(Vec3::Y);
        let scale = poi.marker_scale(3.0);
        assert!((top - Vec3::X * (1.001 + scale)).length() < 1e-5);
    }

    #[test]
    fn test_marker_scale_bounds() {
        let poi = PointOfInterest::new("city", Vec3::X).unwrap();
        assert!((poi.marker_scale(10.0) - 1.0 / 30.0).abs() < 1e-6);
        // close up: clamped base, boosted by the approach factor
        assert!((poi.marker_scale(1.0) - 0.1 * 3.5).abs() < 1e-6);
        assert!(poi.marker_scale(0.0).is_finite());
    }
}
