// Re-export glam for convenience
pub use glam::*;

// Lumen math types
mod aabb;
mod interval;
mod random;
mod ray;
mod transform;
mod vector;

pub use aabb::Aabb;
pub use interval::Interval;
pub use random::{
    gen_f32, gen_range_f32, random_in_unit_disk, random_in_unit_sphere, random_unit_vector,
    random_vec3,
};
pub use ray::Ray;
pub use transform::transform_aabb;
pub use vector::{reflect, refract, Vec3Ext, NEAR_ZERO_EPSILON};

/// Color type alias (linear RGB, typically 0-1 but unbounded for lights)
pub type Color = Vec3;
