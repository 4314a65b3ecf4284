//! Procedural planet surface: fbm continents, land mask, elevation, biome
//! coloring and lighting, evaluated per vertex and per pixel.
//!
//! The CPU procedures in [`SurfaceGenerator`] are the reference
//! implementation; [`gpu`] carries the WGSL twin and its render pipeline.

mod bake;
mod biome;
mod fbm;
mod generator;
mod lighting;
mod math;
mod mesh;
mod params;

pub mod gpu;

pub use bake::{BakeError, bake_equirect, write_png};
pub use biome::BiomePalette;
pub use fbm::Fbm;
pub use generator::{ShadingResult, SurfaceGenerator, VertexOutput};
pub use lighting::{Atmosphere, DirectionalLight};
pub use math::{mix, smoothstep};
pub use mesh::{SphereMesh, uv_sphere};
pub use params::{SurfaceParams, SurfacePoint, SurfaceUniforms};
