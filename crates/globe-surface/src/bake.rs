//! Equirectangular color bake of the surface, for previews and textures.
//!
//! Rows run north to south, columns west to east starting at longitude -π.
//! Each pixel is shaded head-on (camera straight above the point), so the
//! bake carries the diffuse terminator but no atmosphere rim.

use std::f32::consts::{FRAC_PI_2, PI, TAU};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::generator::SurfaceGenerator;
use crate::params::SurfacePoint;

/// Errors raised while writing a bake to disk.
#[derive(Debug, thiserror::Error)]
pub enum BakeError {
    #[error("failed to write bake: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode PNG: {0}")]
    Encode(#[from] png::EncodingError),
    #[error("pixel buffer holds {actual} pixels, expected {expected}")]
    SizeMismatch { expected: usize, actual: usize },
}

/// Sphere point at the center of pixel `(x, y)`.
fn pixel_point(x: u32, y: u32, width: u32, height: u32) -> SurfacePoint {
    let longitude = (x as f32 + 0.5) / width as f32 * TAU - PI;
    let latitude = FRAC_PI_2 - (y as f32 + 0.5) / height as f32 * PI;
    SurfacePoint::from_lat_lon(latitude, longitude)
}

fn to_rgba8(color: glam::Vec3) -> [u8; 4] {
    let c = (color.clamp(glam::Vec3::ZERO, glam::Vec3::ONE) * 255.0).round();
    [c.x as u8, c.y as u8, c.z as u8, 255]
}

/// Shade a `width` x `height` equirectangular map with the camera at
/// `camera_distance`. Row bands are spread over all cores.
///
/// Returns an empty buffer when either dimension is zero.
pub fn bake_equirect(
    generator: &SurfaceGenerator,
    width: u32,
    height: u32,
    camera_distance: f32,
) -> Vec<[u8; 4]> {
    if width == 0 || height == 0 {
        return Vec::new();
    }

    let uniforms = generator.uniforms(camera_distance);
    let mut pixels = vec![[0u8; 4]; width as usize * height as usize];

    let workers = num_cpus::get().clamp(1, height as usize);
    let rows_per_band = (height as usize).div_ceil(workers);
    let band_len = rows_per_band * width as usize;

    std::thread::scope(|scope| {
        for (band, chunk) in pixels.chunks_mut(band_len).enumerate() {
            let first_row = band * rows_per_band;
            let uniforms = &uniforms;
            scope.spawn(move || {
                for (i, pixel) in chunk.iter_mut().enumerate() {
                    let x = (i % width as usize) as u32;
                    let y = (first_row + i / width as usize) as u32;
                    let point = pixel_point(x, y, width, height);
                    let camera = point.as_vec3() * camera_distance.max(1.0);
                    let shaded = generator.evaluate(point, camera, uniforms);
                    *pixel = to_rgba8(shaded.color);
                }
            });
        }
    });

    tracing::debug!(width, height, workers, "baked equirectangular surface");
    pixels
}

/// Write RGBA pixels as an 8-bit PNG.
pub fn write_png(path: &Path, width: u32, height: u32, pixels: &[[u8; 4]]) -> Result<(), BakeError> {
    let expected = width as usize * height as usize;
    if pixels.len() != expected {
        return Err(BakeError::SizeMismatch {
            expected,
            actual: pixels.len(),
        });
    }

    let file = File::create(path)?;
    let mut encoder = png::Encoder::new(BufWriter::new(file), width, height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(pixels.as_flattened())?;
    writer.finish()?;

    tracing::info!(path = %path.display(), width, height, "wrote surface bake");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::SurfaceParams;

    fn generator() -> SurfaceGenerator {
        SurfaceGenerator::new(SurfaceParams::default())
    }

    #[test]
    fn test_bake_dimensions() {
        let pixels = bake_equirect(&generator(), 64, 32, 3.0);
        assert_eq!(pixels.len(), 64 * 32);
        assert!(pixels.iter().all(|p| p[3] == 255));
    }

    #[test]
    fn test_bake_is_deterministic() {
        let g = generator();
        assert_eq!(bake_equirect(&g, 48, 24, 2.0), bake_equirect(&g, 48, 24, 2.0));
    }

    #[test]
    fn test_bake_matches_single_pixel_evaluation() {
        let g = generator();
        let (w, h) = (40, 20);
        let pixels = bake_equirect(&g, w, h, 5.0);
        let u = g.uniforms(5.0);
        for (x, y) in [(0, 0), (13, 7), (39, 19)] {
            let p = pixel_point(x, y, w, h);
            let expected = to_rgba8(g.evaluate(p, p.as_vec3() * 5.0, &u).color);
            assert_eq!(pixels[(y * w + x) as usize], expected);
        }
    }

    #[test]
    fn test_empty_bake() {
        assert!(bake_equirect(&generator(), 0, 10, 3.0).is_empty());
    }

    #[test]
    fn test_top_row_is_north() {
        let p = pixel_point(5, 0, 10, 10);
        assert!(p.as_vec3().y > 0.9);
        let q = pixel_point(5, 9, 10, 10);
        assert!(q.as_vec3().y < -0.9);
    }

    #[test]
    fn test_write_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("surface.png");
        let pixels = bake_equirect(&generator(), 16, 8, 3.0);
        write_png(&path, 16, 8, &pixels).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
    }

    #[test]
    fn test_write_png_rejects_wrong_size() {
        let dir = tempfile::tempdir().unwrap();
        let err = write_png(&dir.path().join("x.png"), 4, 4, &[[0; 4]; 3]).unwrap_err();
        assert!(matches!(err, BakeError::SizeMismatch { expected: 16, actual: 3 }));
    }
}
