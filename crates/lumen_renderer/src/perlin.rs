//! Gradient noise over a permuted integer lattice.

use lumen_math::{random_unit_vector, Vec3};
use rand::seq::SliceRandom;
use rand::RngCore;

const POINT_COUNT: usize = 256;

/// Default number of octaves summed by [`Perlin::turbulence`].
pub const DEFAULT_TURBULENCE_DEPTH: u32 = 7;

/// Perlin noise generator.
///
/// Tables are filled once at construction and never change afterwards.
pub struct Perlin {
    ranvec: Vec<Vec3>,
    perm_x: Vec<usize>,
    perm_y: Vec<usize>,
    perm_z: Vec<usize>,
}

impl Perlin {
    pub fn new(rng: &mut dyn RngCore) -> Self {
        let ranvec = (0..POINT_COUNT)
            .map(|_| random_unit_vector(rng))
            .collect();

        Self {
            ranvec,
            perm_x: Self::generate_perm(rng),
            perm_y: Self::generate_perm(rng),
            perm_z: Self::generate_perm(rng),
        }
    }

    /// Noise value at `p`, roughly in [-1, 1].
    pub fn noise(&self, p: Vec3) -> f32 {
        let base = p.floor();
        let frac = p - base;
        let (i, j, k) = (base.x as i32, base.y as i32, base.z as i32);

        let mut c = [[[Vec3::ZERO; 2]; 2]; 2];
        for (di, plane) in c.iter_mut().enumerate() {
            for (dj, row) in plane.iter_mut().enumerate() {
                for (dk, corner) in row.iter_mut().enumerate() {
                    let index = self.perm_x[Self::wrap(i + di as i32)]
                        ^ self.perm_y[Self::wrap(j + dj as i32)]
                        ^ self.perm_z[Self::wrap(k + dk as i32)];
                    *corner = self.ranvec[index];
                }
            }
        }

        Self::trilinear_interp(&c, frac)
    }

    /// Sum of `depth` octaves of `|noise|`, halving the weight and doubling
    /// the frequency at each step.
    pub fn turbulence(&self, p: Vec3, depth: u32) -> f32 {
        let mut accum = 0.0;
        let mut temp_p = p;
        let mut weight = 1.0;

        for _ in 0..depth {
            accum += weight * self.noise(temp_p).abs();
            weight *= 0.5;
            temp_p *= 2.0;
        }

        accum
    }

    fn wrap(n: i32) -> usize {
        (n & (POINT_COUNT as i32 - 1)) as usize
    }

    fn generate_perm(rng: &mut dyn RngCore) -> Vec<usize> {
        let mut perm: Vec<usize> = (0..POINT_COUNT).collect();
        perm.shuffle(rng);
        perm
    }

    // Hermite-smoothed blend of corner gradients dotted with the offset to each corner.
    fn trilinear_interp(c: &[[[Vec3; 2]; 2]; 2], frac: Vec3) -> f32 {
        let smooth = frac * frac * (Vec3::splat(3.0) - 2.0 * frac);
        let mut accum = 0.0;

        for (i, plane) in c.iter().enumerate() {
            for (j, row) in plane.iter().enumerate() {
                for (k, gradient) in row.iter().enumerate() {
                    let (fi, fj, fk) = (i as f32, j as f32, k as f32);
                    let weight = frac - Vec3::new(fi, fj, fk);
                    accum += (fi * smooth.x + (1.0 - fi) * (1.0 - smooth.x))
                        * (fj * smooth.y + (1.0 - fj) * (1.0 - smooth.y))
                        * (fk * smooth.z + (1.0 - fk) * (1.0 - smooth.z))
                        * gradient.dot(weight);
                }
            }
        }

        accum
    }
}
