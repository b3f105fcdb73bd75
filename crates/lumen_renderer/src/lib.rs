//! Lumen Renderer - CPU stochastic ray tracing
//!
//! A recursive Monte Carlo ray tracer: jittered camera rays are traced
//! through a scene of spheres, rectangles, boxes and participating media,
//! scattering off diffuse, metal, glass and volumetric materials until they
//! escape, hit a light, or run out of depth.
//!
//! Shapes, materials and textures are closed enums dispatched by `match`.
//! Materials and textures are shared between objects through `Arc`. Every
//! sampling call takes the generator explicitly, so a seed fixes the image.

mod camera;
mod hittable;
mod instance;
mod material;
mod medium;
mod perlin;
mod rect;
mod renderer;
mod scene;
mod sphere;
mod texture;

pub use camera::Camera;
pub use hittable::{HitRecord, Hittable, HittableList};
pub use instance::{RotateY, Translate};
pub use material::{
    Dielectric, DiffuseLight, Isotropic, Lambertian, Material, Metal, ScatterResult,
};
pub use medium::ConstantMedium;
pub use perlin::{Perlin, DEFAULT_TURBULENCE_DEPTH};
pub use rect::{AaRect, Cuboid, Plane};
pub use renderer::{
    color_to_rgb, linear_to_gamma, ray_color, render, render_pixel, sky_gradient, ImageBuffer,
    RenderConfig, MAX_CHANNEL_VALUE,
};
pub use scene::Scene;
pub use sphere::{MovingSphere, Sphere};
pub use texture::{CheckerTexture, NoiseTexture, SolidColor, Texture};

/// Re-export Vec3 and common math types from lumen_math
pub use lumen_math::{Aabb, Color, Interval, Ray, Vec3};
