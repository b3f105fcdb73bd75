//! Procedural surface colors.

use crate::perlin::{Perlin, DEFAULT_TURBULENCE_DEPTH};
use lumen_math::{Color, Vec3};
use rand::RngCore;
use std::sync::Arc;

/// A constant color.
#[derive(Debug, Clone, Copy)]
pub struct SolidColor {
    albedo: Color,
}

impl SolidColor {
    pub fn new(albedo: Color) -> Self {
        Self { albedo }
    }
}

/// Alternates between two textures on a 3D sine lattice.
///
/// The sign of `sin(10x) * sin(10y) * sin(10z)` picks the cell, so the
/// pattern fills space rather than following the surface parameterization.
pub struct CheckerTexture {
    even: Arc<Texture>,
    odd: Arc<Texture>,
}

impl CheckerTexture {
    pub fn new(even: Arc<Texture>, odd: Arc<Texture>) -> Self {
        Self { even, odd }
    }

    pub fn from_colors(even: Color, odd: Color) -> Self {
        Self::new(
            Arc::new(SolidColor::new(even).into()),
            Arc::new(SolidColor::new(odd).into()),
        )
    }
}

/// Marble-like stripes perturbed by Perlin turbulence.
pub struct NoiseTexture {
    noise: Perlin,
    scale: f32,
}

impl NoiseTexture {
    pub fn new(scale: f32, rng: &mut dyn RngCore) -> Self {
        Self {
            noise: Perlin::new(rng),
            scale,
        }
    }
}

/// Surface color as a function of `(u, v)` and the world-space hit point.
pub enum Texture {
    Solid(SolidColor),
    Checker(CheckerTexture),
    Noise(NoiseTexture),
}

impl Texture {
    pub fn value(&self, u: f32, v: f32, p: Vec3) -> Color {
        match self {
            Texture::Solid(solid) => solid.albedo,
            Texture::Checker(checker) => {
                let sines = (10.0 * p.x).sin() * (10.0 * p.y).sin() * (10.0 * p.z).sin();
                if sines < 0.0 {
                    checker.odd.value(u, v, p)
                } else {
                    checker.even.value(u, v, p)
                }
            }
            Texture::Noise(noise) => {
                let turb = noise.noise.turbulence(p, DEFAULT_TURBULENCE_DEPTH);
                Color::ONE * 0.5 * (1.0 + (noise.scale * p.z + 10.0 * turb).sin())
            }
        }
    }
}

impl From<SolidColor> for Texture {
    fn from(solid: SolidColor) -> Self {
        Texture::Solid(solid)
    }
}

impl From<CheckerTexture> for Texture {
    fn from(checker: CheckerTexture) -> Self {
        Texture::Checker(checker)
    }
}

impl From<NoiseTexture> for Texture {
    fn from(noise: NoiseTexture) -> Self {
        Texture::Noise(noise)
    }
}

impl From<Color> for Texture {
    fn from(albedo: Color) -> Self {
        Texture::Solid(SolidColor::new(albedo))
    }
}
