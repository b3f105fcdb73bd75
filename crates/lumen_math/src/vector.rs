//! Vector helpers used by the scattering models.

use crate::Vec3;

/// Per-component magnitude below which a vector counts as degenerate.
pub const NEAR_ZERO_EPSILON: f32 = 1e-8;

/// Extension trait for glam's Vec3 with ray tracing predicates.
pub trait Vec3Ext {
    /// True if every component's magnitude is below [`NEAR_ZERO_EPSILON`].
    fn near_zero(&self) -> bool;
}

impl Vec3Ext for Vec3 {
    #[inline]
    fn near_zero(&self) -> bool {
        self.x.abs() < NEAR_ZERO_EPSILON
            && self.y.abs() < NEAR_ZERO_EPSILON
            && self.z.abs() < NEAR_ZERO_EPSILON
    }
}

/// Reflect a vector about a normal.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract a unit vector through a surface with the given `etai_over_etat` ratio
/// (Snell's law split into perpendicular and parallel parts).
#[inline]
pub fn refract(uv: Vec3, n: Vec3, etai_over_etat: f32) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_near_zero() {
        assert!(Vec3::ZERO.near_zero());
        assert!(Vec3::new(1e-9, -1e-9, 0.0).near_zero());
        assert!(!Vec3::new(1e-9, 1e-3, 0.0).near_zero());
    }

    #[test]
    fn test_reflect() {
        let v = Vec3::new(1.0, -1.0, 0.0);
        let r = reflect(v, Vec3::Y);
        assert_eq!(r, Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_refract_unit_ratio_passes_straight_through() {
        let uv = Vec3::new(1.0, -1.0, 0.0).normalize();
        let r = refract(uv, Vec3::Y, 1.0);
        assert!((r - uv).length() < 1e-5);
    }

    #[test]
    fn test_refract_bends_towards_normal() {
        // Entering a denser medium the refracted ray is closer to -normal.
        let uv = Vec3::new(1.0, -1.0, 0.0).normalize();
        let r = refract(uv, Vec3::Y, 1.0 / 1.5);
        assert!(r.x.abs() < uv.x.abs());
        assert!(r.y < 0.0);
        assert!((r.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_unit_vector_length() {
        for v in [
            Vec3::new(3.0, 4.0, 0.0),
            Vec3::new(-1e-3, 2e-3, 5e-4),
            Vec3::new(120.0, -555.0, 0.5),
        ] {
            assert!((v.normalize().length() - 1.0).abs() < 1e-5);
        }
    }
}
