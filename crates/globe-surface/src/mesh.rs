//! UV-sphere tessellation for the globe pipeline.

use std::f32::consts::{PI, TAU};

use crate::gpu::SurfaceVertex;

/// Indexed unit-sphere mesh.
#[derive(Clone, Debug, Default)]
pub struct SphereMesh {
    pub vertices: Vec<SurfaceVertex>,
    pub indices: Vec<u32>,
}

/// Tessellate the unit sphere into `segments` longitude slices and `rings`
/// latitude bands. Both counts are raised to the minimum that still encloses
/// volume (3 segments, 2 rings).
///
/// Normals equal positions; the vertex shader displaces along them.
pub fn uv_sphere(segments: u32, rings: u32) -> SphereMesh {
    let segments = segments.max(3);
    let rings = rings.max(2);

    let mut vertices = Vec::with_capacity(((segments + 1) * (rings + 1)) as usize);
    for ring in 0..=rings {
        let v = ring as f32 / rings as f32;
        let theta = v * PI;
        let (sin_t, cos_t) = theta.sin_cos();
        for seg in 0..=segments {
            let u = seg as f32 / segments as f32;
            let (sin_p, cos_p) = (u * TAU).sin_cos();
            let p = [sin_t * cos_p, cos_t, sin_t * sin_p];
            vertices.push(SurfaceVertex {
                position: p,
                normal: p,
            });
        }
    }

    let stride = segments + 1;
    let mut indices = Vec::with_capacity((segments * rings * 6) as usize);
    for ring in 0..rings {
        for seg in 0..segments {
            let a = ring * stride + seg;
            let b = a + stride;
            // Counter-clockwise seen from outside.
            indices.extend_from_slice(&[a, a + 1, b, a + 1, b + 1, b]);
        }
    }

    SphereMesh { vertices, indices }
}
