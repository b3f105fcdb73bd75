//! Surface scattering models.

use crate::{hittable::HitRecord, texture::Texture, Ray};
use lumen_math::{
    gen_f32, random_in_unit_sphere, random_unit_vector, reflect, refract, Color, Vec3, Vec3Ext,
};
use rand::RngCore;
use std::sync::Arc;

/// Outcome of a successful scatter.
#[derive(Debug, Clone, Copy)]
pub struct ScatterResult {
    /// Per-channel multiplier applied to light arriving along `scattered`
    pub attenuation: Color,
    pub scattered: Ray,
}

/// Lambertian (diffuse) material.
#[derive(Clone)]
pub struct Lambertian {
    albedo: Arc<Texture>,
}

impl Lambertian {
    /// Create a new Lambertian material with the given albedo color.
    pub fn new(albedo: Color) -> Self {
        Self::from_texture(Arc::new(albedo.into()))
    }

    pub fn from_texture(albedo: Arc<Texture>) -> Self {
        Self { albedo }
    }
}

/// Metal (specular) material.
#[derive(Debug, Clone, Copy)]
pub struct Metal {
    albedo: Color,
    fuzz: f32,
}

impl Metal {
    /// Create a new Metal material.
    ///
    /// - `albedo`: The color of the metal
    /// - `fuzz`: Roughness, 0.0 = perfect mirror, 1.0 = very rough
    pub fn new(albedo: Color, fuzz: f32) -> Self {
        Self {
            albedo,
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }
}

/// Dielectric (glass) material.
#[derive(Debug, Clone, Copy)]
pub struct Dielectric {
    /// Index of refraction
    ior: f32,
}

impl Dielectric {
    /// Create a new Dielectric material.
    ///
    /// - `ior`: Index of refraction (1.0 = air, 1.5 = glass, 2.4 = diamond)
    pub fn new(ior: f32) -> Self {
        Self { ior }
    }

    /// Schlick's approximation for reflectance.
    pub fn reflectance(cosine: f32, ref_idx: f32) -> f32 {
        let r0 = (1.0 - ref_idx) / (1.0 + ref_idx);
        let r0 = r0 * r0;
        r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
    }
}

/// Diffuse light emitter.
#[derive(Clone)]
pub struct DiffuseLight {
    emit: Arc<Texture>,
}

impl DiffuseLight {
    /// Create a new diffuse light with the given emission color.
    pub fn new(emit: Color) -> Self {
        Self::from_texture(Arc::new(emit.into()))
    }

    pub fn from_texture(emit: Arc<Texture>) -> Self {
        Self { emit }
    }
}

/// Phase function of a participating medium: scatters uniformly in all directions.
#[derive(Clone)]
pub struct Isotropic {
    albedo: Arc<Texture>,
}

impl Isotropic {
    pub fn new(albedo: Color) -> Self {
        Self::from_texture(Arc::new(albedo.into()))
    }

    pub fn from_texture(albedo: Arc<Texture>) -> Self {
        Self { albedo }
    }
}

/// How light interacts with a surface or volume.
pub enum Material {
    Lambertian(Lambertian),
    Metal(Metal),
    Dielectric(Dielectric),
    DiffuseLight(DiffuseLight),
    Isotropic(Isotropic),
}

impl Material {
    /// Scatter an incoming ray.
    ///
    /// Returns `None` if the ray is absorbed. Scattered rays keep the
    /// incoming ray's time.
    pub fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        match self {
            Material::Lambertian(lambertian) => {
                let mut scatter_direction = rec.normal + random_unit_vector(rng);

                // Catch degenerate scatter direction
                if scatter_direction.near_zero() {
                    scatter_direction = rec.normal;
                }

                Some(ScatterResult {
                    attenuation: lambertian.albedo.value(rec.u, rec.v, rec.p),
                    scattered: Ray::new(rec.p, scatter_direction, ray_in.time()),
                })
            }
            Material::Metal(metal) => {
                let reflected = reflect(ray_in.direction().normalize(), rec.normal);
                let direction = reflected + metal.fuzz * random_in_unit_sphere(rng);

                // Only scatter if the reflected ray is in the same hemisphere as the normal
                if direction.dot(rec.normal) > 0.0 {
                    Some(ScatterResult {
                        attenuation: metal.albedo,
                        scattered: Ray::new(rec.p, direction, ray_in.time()),
                    })
                } else {
                    None
                }
            }
            Material::Dielectric(dielectric) => {
                let refraction_ratio = if rec.front_face {
                    1.0 / dielectric.ior
                } else {
                    dielectric.ior
                };

                let unit_direction = ray_in.direction().normalize();
                let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
                let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

                // Check for total internal reflection
                let cannot_refract = refraction_ratio * sin_theta > 1.0;

                let direction = if cannot_refract
                    || Dielectric::reflectance(cos_theta, refraction_ratio) > gen_f32(rng)
                {
                    reflect(unit_direction, rec.normal)
                } else {
                    refract(unit_direction, rec.normal, refraction_ratio)
                };

                Some(ScatterResult {
                    attenuation: Color::ONE,
                    scattered: Ray::new(rec.p, direction, ray_in.time()),
                })
            }
            // Lights don't scatter rays
            Material::DiffuseLight(_) => None,
            Material::Isotropic(isotropic) => Some(ScatterResult {
                attenuation: isotropic.albedo.value(rec.u, rec.v, rec.p),
                scattered: Ray::new(rec.p, random_in_unit_sphere(rng), ray_in.time()),
            }),
        }
    }

    /// Light emitted at the given surface coordinates. Black for everything but lights.
    pub fn emitted(&self, u: f32, v: f32, p: Vec3) -> Color {
        match self {
            Material::DiffuseLight(light) => light.emit.value(u, v, p),
            _ => Color::ZERO,
        }
    }
}

impl From<Lambertian> for Material {
    fn from(m: Lambertian) -> Self {
        Material::Lambertian(m)
    }
}

impl From<Metal> for Material {
    fn from(m: Metal) -> Self {
        Material::Metal(m)
    }
}

impl From<Dielectric> for Material {
    fn from(m: Dielectric) -> Self {
        Material::Dielectric(m)
    }
}

impl From<DiffuseLight> for Material {
    fn from(m: DiffuseLight) -> Self {
        Material::DiffuseLight(m)
    }
}

impl From<Isotropic> for Material {
    fn from(m: Isotropic) -> Self {
        Material::Isotropic(m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn record(material: &Material, normal: Vec3, front_face: bool) -> HitRecord<'_> {
        HitRecord {
            p: Vec3::ZERO,
            normal,
            material,
            t: 1.0,
            u: 0.5,
            v: 0.5,
            front_face,
        }
    }

    #[test]
    fn test_lambertian_scatters_into_hemisphere() {
        let mut rng = StdRng::seed_from_u64(42);
        let material: Material = Lambertian::new(Color::new(0.8, 0.3, 0.3)).into();
        let rec = record(&material, Vec3::Y, true);
        let ray_in = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Y, 0.25);

        for _ in 0..100 {
            let result = material.scatter(&ray_in, &rec, &mut rng).unwrap();
            assert_eq!(result.attenuation, Color::new(0.8, 0.3, 0.3));
            assert!(result.scattered.direction().dot(Vec3::Y) >= 0.0);
            assert_eq!(result.scattered.time(), 0.25);
        }
    }

    #[test]
    fn test_metal_mirror_reflection() {
        let mut rng = StdRng::seed_from_u64(42);
        let material: Material = Metal::new(Color::splat(0.9), 0.0).into();
        let rec = record(&material, Vec3::Y, true);
        let ray_in = Ray::new(Vec3::new(-1.0, 1.0, 0.0), Vec3::new(1.0, -1.0, 0.0), 0.0);

        let result = material.scatter(&ray_in, &rec, &mut rng).unwrap();
        let expected = Vec3::new(1.0, 1.0, 0.0).normalize();
        assert!((result.scattered.direction() - expected).length() < 1e-5);
        assert_eq!(result.attenuation, Color::splat(0.9));
    }

    #[test]
    fn test_metal_absorbs_below_surface() {
        let mut rng = StdRng::seed_from_u64(42);
        let material: Material = Metal::new(Color::ONE, 0.0).into();
        // Normal facing along the ray: the mirror direction points into the surface
        let rec = record(&material, Vec3::NEG_Y, true);
        let ray_in = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Y, 0.0);

        assert!(material.scatter(&ray_in, &rec, &mut rng).is_none());
    }

    #[test]
    fn test_metal_fuzz_is_clamped() {
        let metal = Metal::new(Color::ONE, 3.0);
        assert_eq!(metal.fuzz, 1.0);
    }

    #[test]
    fn test_schlick_normal_incidence() {
        for ref_idx in [1.3_f32, 1.5, 2.4] {
            let r0 = ((1.0 - ref_idx) / (1.0 + ref_idx)).powi(2);
            assert!((Dielectric::reflectance(1.0, ref_idx) - r0).abs() < 1e-7);
        }
        // Grazing incidence always reflects
        assert!((Dielectric::reflectance(0.0, 1.5) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_dielectric_total_internal_reflection() {
        let mut rng = StdRng::seed_from_u64(42);
        let material: Material = Dielectric::new(1.5).into();
        // Exiting glass at a grazing angle
        let rec = record(&material, Vec3::NEG_Y, false);
        let ray_in = Ray::new(Vec3::ZERO, Vec3::new(1.0, 0.2, 0.0), 0.0);

        for _ in 0..20 {
            let result = material.scatter(&ray_in, &rec, &mut rng).unwrap();
            assert_eq!(result.attenuation, Color::ONE);
            assert!(result.scattered.direction().y < 0.0);
        }
    }

    #[test]
    fn test_dielectric_refracts_head_on() {
        let mut rng = StdRng::seed_from_u64(1);
        let material: Material = Dielectric::new(1.5).into();
        let rec = record(&material, Vec3::Y, true);
        let ray_in = Ray::new(Vec3::Y, Vec3::NEG_Y, 0.0);

        // r0 is 0.04 at normal incidence, so most draws refract straight through
        let refracted = (0..100)
            .filter(|_| {
                let result = material.scatter(&ray_in, &rec, &mut rng).unwrap();
                result.scattered.direction().y < 0.0
            })
            .count();
        assert!(refracted > 80);
    }

    #[test]
    fn test_diffuse_light() {
        let mut rng = StdRng::seed_from_u64(42);
        let material: Material = DiffuseLight::new(Color::splat(4.0)).into();
        let rec = record(&material, Vec3::Z, true);
        let ray_in = Ray::new(Vec3::Z, Vec3::NEG_Z, 0.0);

        assert!(material.scatter(&ray_in, &rec, &mut rng).is_none());
        assert_eq!(material.emitted(0.0, 0.0, Vec3::ZERO), Color::splat(4.0));
    }

    #[test]
    fn test_non_lights_emit_black() {
        let material: Material = Lambertian::new(Color::ONE).into();
        assert_eq!(material.emitted(0.3, 0.3, Vec3::ONE), Color::ZERO);
    }

    #[test]
    fn test_isotropic_scatters_from_hit_point() {
        let mut rng = StdRng::seed_from_u64(42);
        let material: Material = Isotropic::new(Color::splat(0.5)).into();
        let mut rec = record(&material, Vec3::X, true);
        rec.p = Vec3::new(1.0, 2.0, 3.0);
        let ray_in = Ray::new(Vec3::ZERO, Vec3::ONE, 0.5);

        let result = material.scatter(&ray_in, &rec, &mut rng).unwrap();
        assert_eq!(result.scattered.origin(), rec.p);
        assert!(result.scattered.direction().length() < 1.0);
        assert_eq!(result.attenuation, Color::splat(0.5));
    }
}
