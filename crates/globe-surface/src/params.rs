//! Surface inputs: points on the unit sphere, immutable noise parameters and
//! the per-frame uniform set shared by the vertex and fragment procedures.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// A point on the unit sphere.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfacePoint(Vec3);

impl SurfacePoint {
    /// Project `v` onto the unit sphere. Returns `None` for zero or
    /// non-finite vectors.
    pub fn new(v: Vec3) -> Option<Self> {
        v.try_normalize().map(Self)
    }

    /// Point at the given latitude/longitude in radians (`y` is up).
    pub fn from_lat_lon(latitude: f32, longitude: f32) -> Self {
        Self(Vec3::new(
            latitude.cos() * longitude.cos(),
            latitude.sin(),
            latitude.cos() * longitude.sin(),
        ))
    }

    /// The unit vector.
    pub fn as_vec3(self) -> Vec3 {
        self.0
    }

    /// Signed latitude in radians.
    pub fn latitude(self) -> f32 {
        self.0.y.clamp(-1.0, 1.0).asin()
    }
}

impl From<SurfacePoint> for Vec3 {
    fn from(p: SurfacePoint) -> Self {
        p.0
    }
}

/// Immutable noise-field configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceParams {
    /// Seed for the simplex permutation table.
    pub seed: u32,
    /// Octaves per fbm sum.
    pub octaves: u32,
    /// Maximum continental displacement along the normal.
    pub elevation: f32,
    /// Camera distance at which detail is finest.
    pub lod_near: f32,
    /// Camera distance at which detail is broadest.
    pub lod_far: f32,
    /// Noise scale used at or below `lod_near`.
    pub near_scale: f32,
    /// Noise scale used at or beyond `lod_far`.
    pub far_scale: f32,
    /// Frequency multiplier of the continent field relative to the base field.
    pub continent_scale: f32,
    /// Gain applied to the continent field before thresholding.
    pub continent_gain: f32,
    /// Radius around the focus point inside which noise frequency doubles.
    pub focus_radius: f32,
}

impl Default for SurfaceParams {
    fn default() -> Self {
        Self {
            seed: 0,
            octaves: 4,
            elevation: 0.04,
            lod_near: 1.5,
            lod_far: 4.0,
            near_scale: 4.0,
            far_scale: 1.5,
            continent_scale: 0.2,
            continent_gain: 2.5,
            focus_radius: 0.5,
        }
    }
}

/// Per-frame inputs shared by the vertex and fragment procedures.
///
/// Passed by value; nothing in the surface code mutates it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceUniforms {
    /// Continental displacement scale.
    pub elevation: f32,
    /// Distance from the camera to the globe center.
    pub camera_distance: f32,
    /// Point whose neighbourhood receives extra detail.
    pub focus_point: Vec3,
    /// Seconds since start; drifts the ocean shimmer.
    pub time: f32,
}

impl SurfaceUniforms {
    /// Uniforms with no focus point and time zero.
    pub fn new(elevation: f32, camera_distance: f32) -> Self {
        Self {
            elevation,
            camera_distance,
            focus_point: Vec3::ZERO,
            time: 0.0,
        }
    }

    /// Replace the focus point.
    pub fn with_focus(self, focus_point: Vec3) -> Self {
        Self {
            focus_point,
            ..self
        }
    }

    /// Replace the time.
    pub fn with_time(self, time: f32) -> Self {
        Self { time, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_point_is_unit_length() {
        let p = SurfacePoint::new(Vec3::new(3.0, -4.0, 12.0)).unwrap();
        assert!((p.as_vec3().length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_surface_point_rejects_zero() {
        assert!(SurfacePoint::new(Vec3::ZERO).is_none());
        assert!(SurfacePoint::new(Vec3::new(f32::NAN, 0.0, 1.0)).is_none());
    }

    #[test]
    fn test_lat_lon_round_trip_latitude() {
        let p = SurfacePoint::from_lat_lon(0.6, 2.0);
        assert!((p.latitude() - 0.6).abs() < 1e-5);
        assert!((p.as_vec3().length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_uniform_builders() {
        let u = SurfaceUniforms::new(0.04, 5.0)
            .with_focus(Vec3::X)
            .with_time(2.0);
        assert_eq!(u.focus_point, Vec3::X);
        assert_eq!(u.time, 2.0);
        assert_eq!(u.camera_distance, 5.0);
    }

    #[test]
    fn test_params_partial_ron() {
        let params: SurfaceParams = ron::from_str("(seed: 9, elevation: 0.1)").unwrap();
        assert_eq!(params.seed, 9);
        assert_eq!(params.elevation, 0.1);
        assert_eq!(params.octaves, 4);
    }
}
