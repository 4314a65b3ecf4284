//! Biome coloring by noisy latitude and terrain height.
//!
//! Bands, in order of increasing latitude: temperate/tropical greens with a
//! desert band around latitude 0.3, tundra, then polar snow. Every band edge
//! is a smoothstep blend so color is continuous in both inputs.

use glam::Vec3;

use crate::math::{mix, smoothstep};

/// Linear RGB colors used by the surface shader.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BiomePalette {
    pub deep_green: Vec3,
    pub light_green: Vec3,
    pub desert: Vec3,
    pub mountain: Vec3,
    pub snow: Vec3,
    pub deep_ocean: Vec3,
    pub shallow_ocean: Vec3,
}

impl Default for BiomePalette {
    fn default() -> Self {
        Self {
            deep_green: Vec3::new(0.15, 0.35, 0.15),
            light_green: Vec3::new(0.35, 0.45, 0.20),
            desert: Vec3::new(0.76, 0.70, 0.50),
            mountain: Vec3::new(0.55, 0.55, 0.55),
            snow: Vec3::new(0.95, 0.95, 0.95),
            deep_ocean: Vec3::new(0.05, 0.15, 0.3),
            shallow_ocean: Vec3::new(0.1, 0.25, 0.4),
        }
    }
}

impl BiomePalette {
    /// Land color for a noise-perturbed absolute latitude (`|y|` on the unit
    /// sphere) and a terrain height in roughly `[0, 1]`.
    pub fn land(&self, latitude: f32, height: f32) -> Vec3 {
        // Temperate: lowland greens, peaks above 0.7 fade to rock then snow.
        let lowland = self
            .deep_green
            .lerp(self.light_green, smoothstep(0.3, 0.7, height) * 0.5);
        let peaks = self
            .mountain
            .lerp(self.snow, smoothstep(0.7, 0.85, height));
        let mut color = lowland.lerp(peaks, smoothstep(0.6, 0.7, height));

        let desert = smoothstep(0.2, 0.3, latitude) * (1.0 - smoothstep(0.3, 0.4, latitude));
        color = color.lerp(self.desert, desert);

        let tundra = self
            .light_green
            .lerp(self.snow, smoothstep(0.55, 0.75, latitude));
        color = color.lerp(tundra, smoothstep(0.45, 0.55, latitude));

        let polar = self
            .mountain
            .lerp(self.snow, smoothstep(0.75, 0.85, latitude));
        color.lerp(polar, smoothstep(0.75, 0.8, latitude))
    }

    /// Ocean color for a depth term in roughly `[0, 1]` (1 = shallow).
    pub fn ocean(&self, depth: f32) -> Vec3 {
        self.deep_ocean
            .lerp(self.shallow_ocean, depth.clamp(0.0, 1.0))
    }

    /// Map an fbm sample to the ocean depth term.
    pub fn ocean_depth(sample: f32) -> f32 {
        mix(0.8, 1.0, sample)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn max_channel_delta(a: Vec3, b: Vec3) -> f32 {
        (a - b).abs().max_element()
    }

    #[test]
    fn test_latitude_sweep_is_continuous() {
        let palette = BiomePalette::default();
        for height in [0.1, 0.5, 0.65, 0.8, 0.95] {
            let mut prev = palette.land(0.0, height);
            for i in 1..=20_000 {
                let lat = i as f32 * 1.2 / 20_000.0;
                let color = palette.land(lat, height);
                let delta = max_channel_delta(prev, color);
                assert!(
                    delta < 0.01,
                    "color jumped by {delta} at latitude {lat}, height {height}"
                );
                prev = color;
            }
        }
    }

    #[test]
    fn test_height_sweep_is_continuous() {
        let palette = BiomePalette::default();
        for lat in [0.0, 0.1, 0.3, 0.6, 0.9] {
            let mut prev = palette.land(lat, 0.0);
            for i in 1..=10_000 {
                let h = i as f32 / 10_000.0;
                let color = palette.land(lat, h);
                assert!(max_channel_delta(prev, color) < 0.01);
                prev = color;
            }
        }
    }

    #[test]
    fn test_equator_lowland_is_green() {
        let palette = BiomePalette::default();
        let c = palette.land(0.0, 0.3);
        assert!(c.y > c.x && c.y > c.z, "expected green, got {c:?}");
    }

    #[test]
    fn test_desert_band_peaks_at_mid_latitude() {
        let palette = BiomePalette::default();
        let c = palette.land(0.3, 0.3);
        assert!(max_channel_delta(c, palette.desert) < 1e-5);
    }

    #[test]
    fn test_pole_is_snow() {
        let palette = BiomePalette::default();
        let c = palette.land(1.0, 0.3);
        assert!(max_channel_delta(c, palette.snow) < 1e-5);
    }

    #[test]
    fn test_high_temperate_terrain_is_snowcapped() {
        let palette = BiomePalette::default();
        let c = palette.land(0.0, 0.9);
        assert!(max_channel_delta(c, palette.snow) < 1e-5);
    }

    #[test]
    fn test_ocean_depth_blend() {
        let palette = BiomePalette::default();
        assert!(max_channel_delta(palette.ocean(0.0), palette.deep_ocean) < 1e-6);
        assert!(max_channel_delta(palette.ocean(1.0), palette.shallow_ocean) < 1e-6);
        assert!(max_channel_delta(palette.ocean(7.0), palette.shallow_ocean) < 1e-6);
        assert!((BiomePalette::ocean_depth(0.5) - 0.9).abs() < 1e-6);
    }
}
