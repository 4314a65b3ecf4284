//! CPU reference for the globe surface procedures.
//!
//! [`SurfaceGenerator::displace_vertex`] and [`SurfaceGenerator::shade_fragment`]
//! are independent procedures that both derive the land mask through
//! [`SurfaceGenerator::land_mask`], so geometry and color never disagree about
//! where the coastline is. Everything here is a pure function of its inputs.

use glam::Vec3;

use crate::biome::BiomePalette;
use crate::fbm::Fbm;
use crate::lighting::{Atmosphere, DirectionalLight};
use crate::math::{mix, smoothstep};
use crate::params::{SurfaceParams, SurfacePoint, SurfaceUniforms};

/// Ocean shimmer drift per second of uniform time.
const OCEAN_DRIFT: f32 = 0.02;

/// Output of the per-vertex procedure.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VertexOutput {
    /// Displaced position (unit sphere point pushed along its normal).
    pub position: Vec3,
    /// Displacement along the outward normal.
    pub elevation_offset: f32,
    /// Land mask the displacement was derived from.
    pub land_mask: f32,
}

/// Combined surface evaluation at one point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShadingResult {
    /// Displacement along the outward normal.
    pub elevation_offset: f32,
    /// Lit linear RGB color in `[0, 1]`.
    pub color: Vec3,
    /// How land-like the point is, in `[0, 1]`.
    pub land_mask: f32,
}

/// Stateless surface evaluator. Cheap to share across threads.
#[derive(Clone, Debug)]
pub struct SurfaceGenerator {
    params: SurfaceParams,
    fbm: Fbm,
    palette: BiomePalette,
    light: DirectionalLight,
    atmosphere: Atmosphere,
}

impl SurfaceGenerator {
    /// Build a generator with the default palette and light.
    pub fn new(params: SurfaceParams) -> Self {
        let fbm = Fbm::new(params.seed, params.octaves);
        Self {
            params,
            fbm,
            palette: BiomePalette::default(),
            light: DirectionalLight::default(),
            atmosphere: Atmosphere::default(),
        }
    }

    /// Replace the light.
    pub fn with_light(mut self, light: DirectionalLight) -> Self {
        self.light = light;
        self
    }

    /// Replace the palette.
    pub fn with_palette(mut self, palette: BiomePalette) -> Self {
        self.palette = palette;
        self
    }

    pub fn params(&self) -> &SurfaceParams {
        &self.params
    }

    pub fn light(&self) -> &DirectionalLight {
        &self.light
    }

    /// Uniforms for a camera at `camera_distance` with no focus point.
    pub fn uniforms(&self, camera_distance: f32) -> SurfaceUniforms {
        SurfaceUniforms::new(self.params.elevation, camera_distance)
    }

    /// 0 when the camera is close (finest detail), 1 when far.
    ///
    /// A non-finite distance is treated as far away.
    pub fn detail_factor(&self, camera_distance: f32) -> f32 {
        let distance = if camera_distance.is_finite() {
            camera_distance
        } else {
            self.params.lod_far
        };
        smoothstep(self.params.lod_near, self.params.lod_far, distance)
    }

    /// Noise frequency at `p`: widens smoothly with camera distance and
    /// doubles near the focus point.
    pub fn noise_scale(&self, p: Vec3, uniforms: &SurfaceUniforms) -> f32 {
        let detail = self.detail_factor(uniforms.camera_distance);
        let base = mix(self.params.near_scale, self.params.far_scale, detail);
        let focus = smoothstep(self.params.focus_radius, 0.0, p.distance(uniforms.focus_point));
        mix(base, base * 2.0, focus)
    }

    /// Continuous land/ocean mask in `[0, 1]`.
    pub fn land_mask(&self, point: SurfacePoint, uniforms: &SurfaceUniforms) -> f32 {
        let p = point.as_vec3();
        self.mask_at(p * self.noise_scale(p, uniforms))
    }

    fn mask_at(&self, q: Vec3) -> f32 {
        let continents = self.fbm.sample(q * self.params.continent_scale) * self.params.continent_gain;
        let n = self.fbm.sample(q);
        smoothstep(0.2, 0.3, continents) * smoothstep(-0.2, 0.2, n)
    }

    /// Per-vertex procedure: continental displacement along the normal.
    ///
    /// Ocean (mask 0) is left exactly on the sphere.
    pub fn displace_vertex(&self, point: SurfacePoint, uniforms: &SurfaceUniforms) -> VertexOutput {
        let p = point.as_vec3();
        let land_mask = self.land_mask(point, uniforms);
        let q = p * self.noise_scale(p, uniforms);

        let detail = self.detail_factor(uniforms.camera_distance);
        let micro = self.fbm.sample(q * 4.0) * 0.1 * (1.0 - detail);
        let roughness = self.fbm.sample(q * 2.0) * 0.4 + micro;
        let elevation_offset = land_mask * uniforms.elevation * (1.0 + roughness);

        VertexOutput {
            position: p + p * elevation_offset,
            elevation_offset,
            land_mask,
        }
    }

    /// Per-pixel procedure: biome/ocean color under the fixed light.
    ///
    /// `point` is the undisplaced sphere position the fragment was
    /// interpolated from.
    pub fn shade_fragment(
        &self,
        point: SurfacePoint,
        normal: Vec3,
        view_dir: Vec3,
        uniforms: &SurfaceUniforms,
    ) -> Vec3 {
        let p = point.as_vec3();
        let land_mask = self.land_mask(point, uniforms);
        let q = p * self.noise_scale(p, uniforms);

        let drift = Vec3::splat(uniforms.time * OCEAN_DRIFT);
        let depth = BiomePalette::ocean_depth(self.fbm.sample(q * 1.5 + drift));
        let ocean = self.palette.ocean(depth);

        let height = self.fbm.sample(q * 2.0) * 0.7 + 0.3;
        let latitude = p.y.abs() + self.fbm.sample(p * 4.0) * 0.2;
        let land = self.palette.land(latitude, height);

        let base = ocean.lerp(land, smoothstep(0.45, 0.55, land_mask));
        self.light.shade(
            base,
            normal.normalize_or_zero(),
            view_dir.normalize_or_zero(),
            land_mask,
            &self.atmosphere,
        )
    }

    /// Run both procedures for one point seen from `camera_position`.
    pub fn evaluate(
        &self,
        point: SurfacePoint,
        camera_position: Vec3,
        uniforms: &SurfaceUniforms,
    ) -> ShadingResult {
        let vertex = self.displace_vertex(point, uniforms);
        let normal = point.as_vec3();
        let view_dir = camera_position - vertex.position;
        let color = self.shade_fragment(point, normal, view_dir, uniforms);
        ShadingResult {
            elevation_offset: vertex.elevation_offset,
            color,
            land_mask: vertex.land_mask,
        }
    }

    /// Evaluate `point` as seen from the default camera axis (+Z) at
    /// `camera_distance`, with no focus point and time zero.
    pub fn evaluate_surface(&self, point: SurfacePoint, camera_distance: f32) -> ShadingResult {
        let uniforms = self.uniforms(camera_distance);
        let camera_position = Vec3::Z * camera_distance;
        self.evaluate(point, camera_position, &uniforms)
    }
}
