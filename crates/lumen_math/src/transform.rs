// Transform utilities for bounding boxes.
//
// glam::Mat3 already provides mul_vec3/transpose; this only adds the
// box-of-transformed-corners computation used by rotated instances.

use crate::{Aabb, Mat3, Vec3};

/// Transform an axis-aligned bounding box by a linear map.
///
/// Computes the bounding box of all 8 transformed corners. An empty box
/// stays empty.
pub fn transform_aabb(transform: &Mat3, aabb: &Aabb) -> Aabb {
    if aabb.x.min > aabb.x.max || aabb.y.min > aabb.y.max || aabb.z.min > aabb.z.max {
        return Aabb::EMPTY;
    }

    let lo = aabb.min();
    let hi = aabb.max();

    let mut result_min = Vec3::splat(f32::INFINITY);
    let mut result_max = Vec3::splat(f32::NEG_INFINITY);

    for i in 0..2 {
        for j in 0..2 {
            for k in 0..2 {
                let corner = Vec3::new(
                    if i == 0 { lo.x } else { hi.x },
                    if j == 0 { lo.y } else { hi.y },
                    if k == 0 { lo.z } else { hi.z },
                );
                let transformed = transform.mul_vec3(corner);
                result_min = result_min.min(transformed);
                result_max = result_max.max(transformed);
            }
        }
    }

    Aabb::from_points(result_min, result_max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_aabb_identity() {
        let aabb = Aabb::from_points(Vec3::new(-1.0, 0.0, 2.0), Vec3::new(3.0, 4.0, 5.0));
        assert_eq!(transform_aabb(&Mat3::IDENTITY, &aabb), aabb);
    }

    #[test]
    fn test_transform_aabb_rotate_y_quarter_turn() {
        let aabb = Aabb::from_points(Vec3::ZERO, Vec3::new(2.0, 1.0, 1.0));
        let rotated = transform_aabb(&Mat3::from_rotation_y(std::f32::consts::FRAC_PI_2), &aabb);

        // x extent moves onto -z, z extent onto +x
        assert!((rotated.x.min - 0.0).abs() < 1e-5);
        assert!((rotated.x.max - 1.0).abs() < 1e-5);
        assert!((rotated.z.min + 2.0).abs() < 1e-5);
        assert!(rotated.z.max.abs() < 1e-5);
        assert_eq!(rotated.y, aabb.y);
    }

    #[test]
    fn test_transform_aabb_empty() {
        let rotated = transform_aabb(&Mat3::from_rotation_y(0.3), &Aabb::EMPTY);
        assert_eq!(rotated, Aabb::EMPTY);
    }
}
