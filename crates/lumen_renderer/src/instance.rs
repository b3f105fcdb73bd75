//! Instance wrappers that place a child object in the world.
//!
//! Rays are moved into the child's local frame, intersected there, and the
//! resulting hit is moved back to world space.

use crate::{hittable::HitRecord, Hittable, Ray};
use lumen_math::{transform_aabb, Aabb, Interval, Mat3, Vec3};
use rand::RngCore;

/// Offsets a child by a fixed displacement.
pub struct Translate {
    object: Box<Hittable>,
    offset: Vec3,
    bbox: Aabb,
}

impl Translate {
    pub fn new(object: impl Into<Hittable>, offset: Vec3) -> Self {
        let object = Box::new(object.into());
        let bbox = object.bounding_box().translate(offset);
        Self {
            object,
            offset,
            bbox,
        }
    }

    pub fn hit<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        rng: &mut dyn RngCore,
    ) -> Option<HitRecord<'a>> {
        let moved = Ray::new(ray.origin() - self.offset, ray.direction(), ray.time());

        let mut rec = self.object.hit(&moved, ray_t, rng)?;
        rec.p += self.offset;
        Some(rec)
    }

    pub fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

/// Rotates a child about the world y axis.
pub struct RotateY {
    object: Box<Hittable>,
    to_world: Mat3,
    to_local: Mat3,
    bbox: Aabb,
}

impl RotateY {
    /// Rotate `object` counter-clockwise (seen from +y) by `angle` degrees.
    pub fn new(object: impl Into<Hittable>, angle: f32) -> Self {
        let object = Box::new(object.into());
        let to_world = Mat3::from_rotation_y(angle.to_radians());
        // Rotation matrices are orthonormal, so the inverse is the transpose
        let to_local = to_world.transpose();
        let bbox = transform_aabb(&to_world, &object.bounding_box());

        Self {
            object,
            to_world,
            to_local,
            bbox,
        }
    }

    pub fn hit<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        rng: &mut dyn RngCore,
    ) -> Option<HitRecord<'a>> {
        let local_ray = Ray::new(
            self.to_local.mul_vec3(ray.origin()),
            self.to_local.mul_vec3(ray.direction()),
            ray.time(),
        );

        let mut rec = self.object.hit(&local_ray, ray_t, rng)?;

        // Rotation keeps angles, so the local front_face answer still holds
        rec.p = self.to_world.mul_vec3(rec.p);
        rec.normal = self.to_world.mul_vec3(rec.normal);
        Some(rec)
    }

    pub fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}
