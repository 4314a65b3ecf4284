//! Plain-old-data types uploaded to the GPU.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::params::{SurfaceParams, SurfaceUniforms};

/// Uniform block bound at `@group(0) @binding(0)` for both shader stages.
///
/// 144 bytes, std140-compatible. Every [`SurfaceParams`] field the shader
/// reads is carried here so a configured octave count or scale reaches the
/// GPU.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct SurfaceUniformBlock {
    /// Camera view-projection matrix.
    pub view_proj: [[f32; 4]; 4],
    /// xyz = camera world position, w = noise seed offset.
    pub camera_position: [f32; 4],
    /// xyz = focus point, w = time in seconds.
    pub focus_time: [f32; 4],
    /// x = elevation, y = camera distance, z = LOD near, w = LOD far.
    pub params: [f32; 4],
    /// x = near scale, y = far scale, z = continent scale, w = continent gain.
    pub noise: [f32; 4],
    /// x = focus radius, y = octave count, zw unused.
    pub detail: [f32; 4],
}

impl SurfaceUniformBlock {
    /// Pack the per-frame uniforms together with the camera.
    pub fn new(
        view_proj: Mat4,
        camera_position: Vec3,
        uniforms: &SurfaceUniforms,
        params: &SurfaceParams,
    ) -> Self {
        let focus = uniforms.focus_point;
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            camera_position: camera_position.extend(seed_offset(params.seed)).to_array(),
            focus_time: [focus.x, focus.y, focus.z, uniforms.time],
            params: [
                uniforms.elevation,
                uniforms.camera_distance,
                params.lod_near,
                params.lod_far,
            ],
            noise: [
                params.near_scale,
                params.far_scale,
                params.continent_scale,
                params.continent_gain,
            ],
            detail: [
                params.focus_radius,
                params.octaves.min(MAX_GPU_OCTAVES) as f32,
                0.0,
                0.0,
            ],
        }
    }
}

/// Upper bound on the octave loop in the shader.
pub const MAX_GPU_OCTAVES: u32 = 12;

/// The GPU noise has a fixed permutation; seeds translate the sample domain
/// instead. Kept small so f32 precision survives the offset.
pub(crate) fn seed_offset(seed: u32) -> f32 {
    (seed % 256) as f32 * 7.31
}

/// Sphere vertex: position and outward normal.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct SurfaceVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl SurfaceVertex {
    /// Get the vertex buffer layout for this vertex type.
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        use wgpu::{VertexAttribute, VertexFormat};

        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SurfaceVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: VertexFormat::Float32x3,
                },
                VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: VertexFormat::Float32x3,
                },
            ],
        }
    }
}
