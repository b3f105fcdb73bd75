//! Homogeneous participating media (smoke, fog).

use crate::{hittable::HitRecord, Hittable, Isotropic, Material, Ray, Texture};
use lumen_math::{gen_f32, Aabb, Color, Interval, Vec3};
use rand::RngCore;
use std::sync::Arc;

/// Gap between the entry hit and the search for the exit hit.
const EXIT_EPSILON: f32 = 0.0001;

/// A volume of constant density bounded by a convex child object.
///
/// Rays entering the boundary travel an exponentially distributed distance
/// before scattering off the isotropic phase function.
pub struct ConstantMedium {
    boundary: Box<Hittable>,
    neg_inv_density: f32,
    phase_function: Material,
}

impl ConstantMedium {
    pub fn new(boundary: impl Into<Hittable>, density: f32, albedo: Color) -> Self {
        Self::from_texture(boundary, density, Arc::new(albedo.into()))
    }

    pub fn from_texture(boundary: impl Into<Hittable>, density: f32, albedo: Arc<Texture>) -> Self {
        Self {
            boundary: Box::new(boundary.into()),
            neg_inv_density: -1.0 / density,
            phase_function: Isotropic::from_texture(albedo).into(),
        }
    }

    pub fn hit<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        rng: &mut dyn RngCore,
    ) -> Option<HitRecord<'a>> {
        let entry = self.boundary.hit(ray, Interval::UNIVERSE, rng)?.t;
        let exit = self
            .boundary
            .hit(ray, Interval::new(entry + EXIT_EPSILON, f32::INFINITY), rng)?
            .t;

        let entry = entry.max(ray_t.min);
        let exit = exit.min(ray_t.max);
        if entry >= exit {
            return None;
        }
        let entry = entry.max(0.0);

        let ray_length = ray.direction().length();
        let distance_inside_boundary = (exit - entry) * ray_length;
        let hit_distance = self.neg_inv_density * gen_f32(rng).ln();

        if hit_distance > distance_inside_boundary {
            return None;
        }

        let t = entry + hit_distance / ray_length;

        // Normal and face are arbitrary inside a volume
        Some(HitRecord {
            p: ray.at(t),
            normal: Vec3::X,
            material: &self.phase_function,
            t,
            u: 0.0,
            v: 0.0,
            front_face: true,
        })
    }

    pub fn bounding_box(&self) -> Aabb {
        self.boundary.bounding_box()
    }
}
