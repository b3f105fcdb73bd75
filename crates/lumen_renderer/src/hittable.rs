//! Hittable scene graph and HitRecord for ray-object intersection.
//!
//! The scene graph is a closed set of node kinds. Using an enum keeps
//! dispatch to a single `match` per query and lets composite nodes own
//! their children directly.

use crate::{
    AaRect, ConstantMedium, Cuboid, Material, MovingSphere, Ray, RotateY, Sphere, Translate,
};
use lumen_math::{Aabb, Interval, Vec3};
use rand::RngCore;

/// Record of a ray-object intersection.
#[derive(Clone, Copy)]
pub struct HitRecord<'a> {
    /// Point of intersection
    pub p: Vec3,
    /// Surface normal at intersection (always points against ray)
    pub normal: Vec3,
    /// Material at the intersection point
    pub material: &'a Material,
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Surface coordinates
    pub u: f32,
    pub v: f32,
    /// Whether the ray hit the front face (outside) of the surface
    pub front_face: bool,
}

impl<'a> HitRecord<'a> {
    /// Build a record from a geometric (outward) normal, orienting it against the ray.
    pub fn new(
        ray: &Ray,
        t: f32,
        outward_normal: Vec3,
        (u, v): (f32, f32),
        material: &'a Material,
    ) -> Self {
        let mut rec = Self {
            p: ray.at(t),
            normal: outward_normal,
            material,
            t,
            u,
            v,
            front_face: true,
        };
        rec.set_face_normal(ray, outward_normal);
        rec
    }

    /// Set the face normal based on ray direction and outward normal.
    ///
    /// The normal is always stored pointing against the ray direction,
    /// so we need to track whether we hit the front or back face.
    pub fn set_face_normal(&mut self, ray: &Ray, outward_normal: Vec3) {
        self.front_face = ray.direction().dot(outward_normal) < 0.0;
        self.normal = if self.front_face {
            outward_normal
        } else {
            -outward_normal
        };
    }
}

/// Anything a ray can intersect.
pub enum Hittable {
    Sphere(Sphere),
    MovingSphere(MovingSphere),
    Rect(AaRect),
    Cuboid(Cuboid),
    Translate(Translate),
    RotateY(RotateY),
    ConstantMedium(ConstantMedium),
    List(HittableList),
}

impl Hittable {
    /// Test if a ray hits this object within the given interval.
    ///
    /// The generator is only consumed by participating media, which sample
    /// a scattering distance.
    pub fn hit<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        rng: &mut dyn RngCore,
    ) -> Option<HitRecord<'a>> {
        match self {
            Hittable::Sphere(sphere) => sphere.hit(ray, ray_t),
            Hittable::MovingSphere(sphere) => sphere.hit(ray, ray_t),
            Hittable::Rect(rect) => rect.hit(ray, ray_t),
            Hittable::Cuboid(cuboid) => cuboid.hit(ray, ray_t, rng),
            Hittable::Translate(translate) => translate.hit(ray, ray_t, rng),
            Hittable::RotateY(rotate) => rotate.hit(ray, ray_t, rng),
            Hittable::ConstantMedium(medium) => medium.hit(ray, ray_t, rng),
            Hittable::List(list) => list.hit(ray, ray_t, rng),
        }
    }

    /// Get the axis-aligned bounding box of this object.
    pub fn bounding_box(&self) -> Aabb {
        match self {
            Hittable::Sphere(sphere) => sphere.bounding_box(),
            Hittable::MovingSphere(sphere) => sphere.bounding_box(),
            Hittable::Rect(rect) => rect.bounding_box(),
            Hittable::Cuboid(cuboid) => cuboid.bounding_box(),
            Hittable::Translate(translate) => translate.bounding_box(),
            Hittable::RotateY(rotate) => rotate.bounding_box(),
            Hittable::ConstantMedium(medium) => medium.bounding_box(),
            Hittable::List(list) => list.bounding_box(),
        }
    }
}

macro_rules! impl_from_node {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Hittable {
                fn from(node: $ty) -> Self {
                    Hittable::$variant(node)
                }
            }
        )*
    };
}

impl_from_node! {
    Sphere => Sphere,
    MovingSphere => MovingSphere,
    Rect => AaRect,
    Cuboid => Cuboid,
    Translate => Translate,
    RotateY => RotateY,
    ConstantMedium => ConstantMedium,
    List => HittableList,
}

/// A list of hittable objects.
pub struct HittableList {
    objects: Vec<Hittable>,
    bbox: Aabb,
}

impl HittableList {
    /// Create a new empty hittable list.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            bbox: Aabb::EMPTY,
        }
    }

    /// Add an object to the list.
    pub fn add(&mut self, object: impl Into<Hittable>) {
        let object = object.into();
        self.bbox = Aabb::surrounding(&self.bbox, &object.bounding_box());
        self.objects.push(object);
    }

    /// Clear all objects from the list.
    pub fn clear(&mut self) {
        self.objects.clear();
        self.bbox = Aabb::EMPTY;
    }

    /// Get the number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Closest hit among all children.
    ///
    /// Each child is queried with the window shrunk to the nearest hit so far,
    /// which yields nearest-hit semantics without sorting.
    pub fn hit<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        rng: &mut dyn RngCore,
    ) -> Option<HitRecord<'a>> {
        let mut closest: Option<HitRecord<'a>> = None;
        let mut closest_so_far = ray_t.max;

        for object in &self.objects {
            if let Some(rec) = object.hit(ray, Interval::new(ray_t.min, closest_so_far), rng) {
                closest_so_far = rec.t;
                closest = Some(rec);
            }
        }

        closest
    }

    pub fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

impl Default for HittableList {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Into<Hittable>> FromIterator<H> for HittableList {
    fn from_iter<I: IntoIterator<Item = H>>(iter: I) -> Self {
        let mut list = HittableList::new();
        for object in iter {
            list.add(object);
        }
        list
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Lambertian, Sphere};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    fn gray() -> Arc<Material> {
        Arc::new(Lambertian::new(Vec3::splat(0.5)).into())
    }

    #[test]
    fn test_set_face_normal() {
        let material = Material::from(Lambertian::new(Vec3::ONE));
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), 0.0);

        let outside = HitRecord::new(&ray, 1.0, Vec3::Z, (0.0, 0.0), &material);
        assert!(outside.front_face);
        assert_eq!(outside.normal, Vec3::Z);

        let inside = HitRecord::new(&ray, 1.0, Vec3::NEG_Z, (0.0, 0.0), &material);
        assert!(!inside.front_face);
        assert_eq!(inside.normal, Vec3::Z);
    }

    #[test]
    fn test_list_returns_nearest_hit() {
        let mut list = HittableList::new();
        list.add(Sphere::new(Vec3::new(0.0, 0.0, -10.0), 1.0, gray()));
        list.add(Sphere::new(Vec3::new(0.0, 0.0, -3.0), 1.0, gray()));
        list.add(Sphere::new(Vec3::new(0.0, 0.0, -6.0), 1.0, gray()));
        assert_eq!(list.len(), 3);

        let mut rng = StdRng::seed_from_u64(0);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), 0.0);
        let rec = list
            .hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rng)
            .unwrap();

        assert!((rec.t - 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_list_miss_outside_bounds() {
        let list: HittableList = vec![
            Sphere::new(Vec3::new(0.0, 0.0, -3.0), 1.0, gray()),
            Sphere::new(Vec3::new(4.0, 0.0, -3.0), 1.0, gray()),
        ]
        .into_iter()
        .collect();

        let mut rng = StdRng::seed_from_u64(0);

        // Pointing away from every sphere.
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0), 0.0);
        assert!(list
            .hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rng)
            .is_none());

        // Spheres lie beyond t_max.
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), 0.0);
        assert!(list.hit(&ray, Interval::new(0.001, 1.5), &mut rng).is_none());
    }

    #[test]
    fn test_empty_list() {
        let mut list = HittableList::new();
        list.add(Sphere::new(Vec3::ZERO, 1.0, gray()));
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.bounding_box(), Aabb::EMPTY);

        let mut rng = StdRng::seed_from_u64(0);
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z, 0.0);
        assert!(list.hit(&ray, Interval::UNIVERSE, &mut rng).is_none());
    }

    #[test]
    fn test_list_bounding_box() {
        let mut list = HittableList::new();
        list.add(Sphere::new(Vec3::new(-2.0, 0.0, 0.0), 1.0, gray()));
        list.add(Sphere::new(Vec3::new(2.0, 1.0, 0.0), 1.0, gray()));

        let bbox = list.bounding_box();
        assert_eq!(bbox.min(), Vec3::new(-3.0, -1.0, -1.0));
        assert_eq!(bbox.max(), Vec3::new(3.0, 2.0, 1.0));
    }
}
