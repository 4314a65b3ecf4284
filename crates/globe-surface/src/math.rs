//! Scalar blend helpers shared by every surface procedure.

/// Hermite smoothstep of `x` between `edge0` and `edge1`, clamped to `[0, 1]`.
///
/// Reversed edges (`edge0 > edge1`) produce a falling ramp. A NaN input
/// yields 0 and coincident edges act as a step at `edge0`.
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    if x.is_nan() {
        return 0.0;
    }
    let span = edge1 - edge0;
    if span == 0.0 {
        return if x < edge0 { 0.0 } else { 1.0 };
    }
    let t = ((x - edge0) / span).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Linear interpolation between `a` and `b`.
pub fn mix(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smoothstep_boundary_values() {
        assert!((smoothstep(0.0, 1.0, 0.0) - 0.0).abs() < f32::EPSILON);
        assert!((smoothstep(0.0, 1.0, 1.0) - 1.0).abs() < f32::EPSILON);
        assert!((smoothstep(0.0, 1.0, 0.5) - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_smoothstep_clamps_outside_range() {
        assert_eq!(smoothstep(0.2, 0.3, -10.0), 0.0);
        assert_eq!(smoothstep(0.2, 0.3, 10.0), 1.0);
        assert_eq!(smoothstep(0.2, 0.3, f32::INFINITY), 1.0);
        assert_eq!(smoothstep(0.2, 0.3, f32::NEG_INFINITY), 0.0);
    }

    #[test]
    fn test_smoothstep_reversed_edges_fall() {
        assert_eq!(smoothstep(0.5, 0.0, 0.0), 1.0);
        assert_eq!(smoothstep(0.5, 0.0, 0.5), 0.0);
        assert!(smoothstep(0.5, 0.0, 0.1) > smoothstep(0.5, 0.0, 0.4));
    }

    #[test]
    fn test_smoothstep_nan_and_degenerate() {
        assert_eq!(smoothstep(0.0, 1.0, f32::NAN), 0.0);
        assert_eq!(smoothstep(0.3, 0.3, 0.2), 0.0);
        assert_eq!(smoothstep(0.3, 0.3, 0.3), 1.0);
    }

    #[test]
    fn test_smoothstep_is_monotonic() {
        let mut prev = 0.0;
        for i in 0..=1000 {
            let v = smoothstep(0.45, 0.55, i as f32 / 1000.0);
            assert!(v >= prev - 1e-7);
            prev = v;
        }
    }

    #[test]
    fn test_mix_endpoints() {
        assert_eq!(mix(4.0, 1.5, 0.0), 4.0);
        assert_eq!(mix(4.0, 1.5, 1.0), 1.5);
        assert!((mix(0.8, 1.0, 0.5) - 0.9).abs() < 1e-6);
    }
}
