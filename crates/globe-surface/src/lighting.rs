//! Fixed directional light and atmospheric rim for the globe surface.
//!
//! Diffuse plus ambient everywhere, a Blinn specular highlight that only
//! shows over water, and a Fresnel-like rim that blends toward the sky color
//! at grazing view angles. Ambient occlusion is not modeled.

use glam::Vec3;

/// A single infinitely distant light.
#[derive(Clone, Debug, PartialEq)]
pub struct DirectionalLight {
    /// Normalized direction from the surface TOWARD the light.
    pub direction: Vec3,
    /// Constant term added before the diffuse contribution.
    pub ambient: f32,
    /// Weight of the Lambert term.
    pub diffuse: f32,
    /// Weight of the specular highlight over fully open water.
    pub specular: f32,
    /// Blinn-Phong exponent.
    pub shininess: f32,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            direction: Vec3::ONE.normalize(),
            ambient: 0.4,
            diffuse: 0.6,
            specular: 0.3,
            shininess: 50.0,
        }
    }
}

/// Atmospheric rim tint.
#[derive(Clone, Debug, PartialEq)]
pub struct Atmosphere {
    /// Color approached at grazing angles.
    pub color: Vec3,
    /// Blend weight at a fully grazing angle.
    pub strength: f32,
}

impl Default for Atmosphere {
    fn default() -> Self {
        Self {
            color: Vec3::new(0.6, 0.8, 1.0),
            strength: 0.15,
        }
    }
}

impl DirectionalLight {
    /// Set the light direction, normalizing the input. A near-zero vector is
    /// ignored and the previous direction kept.
    pub fn set_direction(&mut self, dir: Vec3) {
        match dir.try_normalize() {
            Some(d) => self.direction = d,
            None => tracing::warn!(?dir, "ignoring degenerate light direction"),
        }
    }

    /// Lambert factor `max(0, n·l)`.
    pub fn lambert(&self, normal: Vec3) -> f32 {
        normal.dot(self.direction).max(0.0)
    }

    /// Light a base color. `land_mask` suppresses the specular highlight
    /// over land; both direction vectors are expected to be normalized.
    pub fn shade(
        &self,
        base: Vec3,
        normal: Vec3,
        view_dir: Vec3,
        land_mask: f32,
        atmosphere: &Atmosphere,
    ) -> Vec3 {
        let lighting = self.ambient + self.diffuse * self.lambert(normal);
        let mut color = base * lighting;

        let half_dir = (self.direction + view_dir).normalize_or_zero();
        let specular = normal.dot(half_dir).max(0.0).powf(self.shininess);
        color += Vec3::splat((1.0 - land_mask.clamp(0.0, 1.0)) * specular * self.specular);

        let rim = (1.0 - normal.dot(view_dir).abs()).clamp(0.0, 1.0).powi(2);
        color = color.lerp(atmosphere.color, rim * atmosphere.strength);

        color.clamp(Vec3::ZERO, Vec3::ONE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_is_normalized() {
        let light = DirectionalLight::default();
        assert!((light.direction.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_set_direction_normalizes() {
        let mut light = DirectionalLight::default();
        light.set_direction(Vec3::new(3.0, -4.0, 0.0));
        assert!((light.direction.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_direction_is_ignored() {
        let mut light = DirectionalLight::default();
        let before = light.direction;
        light.set_direction(Vec3::ZERO);
        assert_eq!(light.direction, before);
    }

    #[test]
    fn test_back_side_gets_only_ambient() {
        let light = DirectionalLight::default();
        let normal = -light.direction;
        assert_eq!(light.lambert(normal), 0.0);
        let c = light.shade(Vec3::ONE, normal, normal, 1.0, &Atmosphere {
            strength: 0.0,
            ..Default::default()
        });
        assert!((c - Vec3::splat(light.ambient)).length() < 1e-5);
    }

    #[test]
    fn test_specular_only_over_water() {
        let light = DirectionalLight::default();
        let atmosphere = Atmosphere::default();
        let n = light.direction;
        let base = Vec3::splat(0.1);
        let land = light.shade(base, n, n, 1.0, &atmosphere);
        let water = light.shade(base, n, n, 0.0, &atmosphere);
        assert!(water.x > land.x);
        assert!((land - base * (light.ambient + light.diffuse)).length() < 1e-5);
    }

    #[test]
    fn test_rim_tints_grazing_angles() {
        let light = DirectionalLight {
            specular: 0.0,
            ..Default::default()
        };
        let atmosphere = Atmosphere::default();
        let n = Vec3::Z;
        let head_on = light.shade(Vec3::ZERO, n, Vec3::Z, 1.0, &atmosphere);
        let grazing = light.shade(Vec3::ZERO, n, Vec3::X, 1.0, &atmosphere);
        assert!(head_on.length() < 1e-6);
        assert!((grazing - atmosphere.color * atmosphere.strength).length() < 1e-5);
    }

    #[test]
    fn test_output_is_clamped() {
        let light = DirectionalLight::default();
        let n = light.direction;
        let c = light.shade(Vec3::splat(5.0), n, n, 0.0, &Atmosphere::default());
        assert!(c.max_element() <= 1.0);
        assert!(c.min_element() >= 0.0);
    }
}
