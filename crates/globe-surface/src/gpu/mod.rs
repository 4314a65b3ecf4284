//! GPU twin of the surface procedures: WGSL shader, uniform block, vertex
//! layout and render pipeline.
//!
//! `vs_main` and `fs_main` in [`GLOBE_SHADER_SOURCE`] both call the shared
//! `fbm`, `noise_scale` and `land_mask` functions, so geometry and color see
//! the same coastline. Those functions follow the CPU reference step for step.

mod pipeline;
mod uniform;

pub use pipeline::{GLOBE_SHADER_SOURCE, GlobeMesh, GlobePipeline, draw_globe};
pub use uniform::{MAX_GPU_OCTAVES, SurfaceUniformBlock, SurfaceVertex};
