//! Axis-aligned rectangles and the boxes built from them.

use crate::{
    hittable::{HitRecord, HittableList},
    Material, Ray,
};
use lumen_math::{Aabb, Interval, Vec3};
use rand::RngCore;
use std::sync::Arc;

/// Which coordinate plane a rectangle lies in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plane {
    XY,
    XZ,
    YZ,
}

impl Plane {
    /// Indices of the two in-plane axes followed by the fixed axis.
    fn axes(self) -> (usize, usize, usize) {
        match self {
            Plane::XY => (0, 1, 2),
            Plane::XZ => (0, 2, 1),
            Plane::YZ => (1, 2, 0),
        }
    }
}

/// A rectangle perpendicular to one of the coordinate axes.
///
/// Spans `a` and `b` along the two in-plane axes at constant `k` on the third.
/// The geometric normal is the positive fixed axis.
pub struct AaRect {
    plane: Plane,
    a: Interval,
    b: Interval,
    k: f32,
    material: Arc<Material>,
}

impl AaRect {
    pub fn new(plane: Plane, a: Interval, b: Interval, k: f32, material: Arc<Material>) -> Self {
        Self {
            plane,
            a,
            b,
            k,
            material,
        }
    }

    /// Rectangle in the plane `z = k`.
    pub fn xy(x0: f32, x1: f32, y0: f32, y1: f32, k: f32, material: Arc<Material>) -> Self {
        Self::new(Plane::XY, Interval::new(x0, x1), Interval::new(y0, y1), k, material)
    }

    /// Rectangle in the plane `y = k`.
    pub fn xz(x0: f32, x1: f32, z0: f32, z1: f32, k: f32, material: Arc<Material>) -> Self {
        Self::new(Plane::XZ, Interval::new(x0, x1), Interval::new(z0, z1), k, material)
    }

    /// Rectangle in the plane `x = k`.
    pub fn yz(y0: f32, y1: f32, z0: f32, z1: f32, k: f32, material: Arc<Material>) -> Self {
        Self::new(Plane::YZ, Interval::new(y0, y1), Interval::new(z0, z1), k, material)
    }

    pub fn plane(&self) -> Plane {
        self.plane
    }

    pub fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        let (ia, ib, ik) = self.plane.axes();
        let origin = ray.origin();
        let direction = ray.direction();

        // Zero direction on the fixed axis gives +-inf or NaN, both rejected here
        let t = (self.k - origin[ik]) / direction[ik];
        if !ray_t.contains(t) {
            return None;
        }

        let a = origin[ia] + t * direction[ia];
        let b = origin[ib] + t * direction[ib];
        if !self.a.contains(a) || !self.b.contains(b) {
            return None;
        }

        let u = (a - self.a.min) / self.a.size();
        let v = (b - self.b.min) / self.b.size();

        let mut outward_normal = Vec3::ZERO;
        outward_normal[ik] = 1.0;

        Some(HitRecord::new(ray, t, outward_normal, (u, v), &self.material))
    }

    pub fn bounding_box(&self) -> Aabb {
        let (ia, ib, ik) = self.plane.axes();
        let mut lo = Vec3::ZERO;
        let mut hi = Vec3::ZERO;
        lo[ia] = self.a.min;
        hi[ia] = self.a.max;
        lo[ib] = self.b.min;
        hi[ib] = self.b.max;
        lo[ik] = self.k;
        hi[ik] = self.k;
        Aabb::from_points(lo, hi)
    }
}

/// A closed rectangular prism made of six axis-aligned rectangles.
pub struct Cuboid {
    sides: HittableList,
    bbox: Aabb,
}

impl Cuboid {
    /// Box spanning the two opposite corners `p0` and `p1`.
    pub fn new(p0: Vec3, p1: Vec3, material: Arc<Material>) -> Self {
        let min = p0.min(p1);
        let max = p0.max(p1);

        let mut sides = HittableList::new();
        sides.add(AaRect::xy(min.x, max.x, min.y, max.y, max.z, material.clone()));
        sides.add(AaRect::xy(min.x, max.x, min.y, max.y, min.z, material.clone()));
        sides.add(AaRect::xz(min.x, max.x, min.z, max.z, max.y, material.clone()));
        sides.add(AaRect::xz(min.x, max.x, min.z, max.z, min.y, material.clone()));
        sides.add(AaRect::yz(min.y, max.y, min.z, max.z, max.x, material.clone()));
        sides.add(AaRect::yz(min.y, max.y, min.z, max.z, min.x, material));

        Self {
            sides,
            bbox: Aabb::from_points(min, max),
        }
    }

    pub fn hit<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        rng: &mut dyn RngCore,
    ) -> Option<HitRecord<'a>> {
        self.sides.hit(ray, ray_t, rng)
    }

    pub fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}
