//! Built-in scenes selectable from the command line or the config file.

use std::sync::Arc;

use clap::ValueEnum;
use lumen_math::{gen_f32, gen_range_f32, random_vec3, Color, Vec3};
use lumen_renderer::{
    AaRect, CheckerTexture, ConstantMedium, Cuboid, Dielectric, DiffuseLight, Hittable,
    HittableList, Lambertian, Material, Metal, MovingSphere, NoiseTexture, RotateY, Sphere,
    Texture, Translate,
};
use rand::RngCore;

/// A named scene preset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "snake_case")]
pub enum ScenePreset {
    /// Two large checkered spheres touching at the origin
    TwoSpheres,
    /// Small moving, metal and glass spheres on a checkered ground
    RandomSpheres,
    /// Marble-textured sphere on a marble ground
    TwoPerlinSpheres,
    /// Marble spheres lit by a single rectangle light
    SimpleLight,
    /// The Cornell box with two rotated blocks
    #[default]
    CornellBox,
    /// The Cornell box with its blocks replaced by smoke
    CornellSmoke,
    /// One diffuse sphere over a large ground sphere
    SingleSphere,
}

impl ScenePreset {
    /// Construct the world for this preset.
    ///
    /// The generator drives random placement and noise tables, so a fixed
    /// seed rebuilds the same world.
    pub fn build(self, rng: &mut dyn RngCore) -> HittableList {
        match self {
            ScenePreset::TwoSpheres => two_spheres(),
            ScenePreset::RandomSpheres => random_spheres(rng),
            ScenePreset::TwoPerlinSpheres => two_perlin_spheres(rng),
            ScenePreset::SimpleLight => simple_light(rng),
            ScenePreset::CornellBox => cornell_box(),
            ScenePreset::CornellSmoke => cornell_smoke(),
            ScenePreset::SingleSphere => single_sphere(),
        }
    }
}

fn shared(material: impl Into<Material>) -> Arc<Material> {
    Arc::new(material.into())
}

fn ground_checker() -> Arc<Texture> {
    let checker = CheckerTexture::from_colors(Color::new(0.2, 0.3, 0.1), Color::new(0.9, 0.9, 0.9));
    Arc::new(checker.into())
}

fn two_spheres() -> HittableList {
    let checker = shared(Lambertian::from_texture(ground_checker()));

    let mut objects = HittableList::new();
    objects.add(Sphere::new(Vec3::new(0.0, -10.0, 0.0), 10.0, checker.clone()));
    objects.add(Sphere::new(Vec3::new(0.0, 10.0, 0.0), 10.0, checker));
    objects
}

fn random_spheres(rng: &mut dyn RngCore) -> HittableList {
    let mut world = HittableList::new();
    world.add(Sphere::new(
        Vec3::new(0.0, -100.0, 0.0),
        100.0,
        shared(Lambertian::from_texture(ground_checker())),
    ));

    for a in -3..3 {
        for b in -3..3 {
            let choose_mat = gen_f32(rng);
            let center = Vec3::new(
                a as f32 + 0.9 * gen_f32(rng),
                0.2,
                b as f32 + 0.9 * gen_f32(rng),
            );

            if (center - Vec3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            if choose_mat < 0.8 {
                // diffuse, bouncing upward over the shutter interval
                let albedo = random_vec3(rng, 0.0, 1.0) * random_vec3(rng, 0.0, 1.0);
                let center2 = center + Vec3::new(0.0, gen_range_f32(rng, 0.0, 0.5), 0.0);
                world.add(MovingSphere::new(
                    (center, center2),
                    (0.0, 1.0),
                    0.2,
                    shared(Lambertian::new(albedo)),
                ));
            } else if choose_mat < 0.95 {
                let albedo = random_vec3(rng, 0.5, 1.0);
                let fuzz = gen_range_f32(rng, 0.0, 0.5);
                world.add(Sphere::new(center, 0.2, shared(Metal::new(albedo, fuzz))));
            } else {
                world.add(Sphere::new(center, 0.2, shared(Dielectric::new(1.5))));
            }
        }
    }

    world.add(Sphere::new(Vec3::new(0.0, 1.0, 0.0), 0.3, shared(Dielectric::new(1.5))));
    world.add(Sphere::new(
        Vec3::new(-2.0, 1.0, 0.0),
        0.3,
        shared(Lambertian::new(Color::new(0.4, 0.2, 0.1))),
    ));
    world.add(Sphere::new(
        Vec3::new(2.0, 1.0, 0.0),
        0.3,
        shared(Metal::new(Color::new(0.7, 0.6, 0.5), 0.0)),
    ));

    world
}

fn marble(rng: &mut dyn RngCore) -> Arc<Material> {
    let pertext: Arc<Texture> = Arc::new(NoiseTexture::new(4.0, rng).into());
    shared(Lambertian::from_texture(pertext))
}

fn two_perlin_spheres(rng: &mut dyn RngCore) -> HittableList {
    let pertext = marble(rng);

    let mut objects = HittableList::new();
    objects.add(Sphere::new(Vec3::new(0.0, -100.0, 0.0), 100.0, pertext.clone()));
    objects.add(Sphere::new(Vec3::new(0.0, 1.0, 0.0), 1.0, pertext));
    objects
}

fn simple_light(rng: &mut dyn RngCore) -> HittableList {
    let pertext = marble(rng);

    let mut objects = HittableList::new();
    objects.add(Sphere::new(Vec3::new(0.0, -1000.0, 0.0), 1000.0, pertext.clone()));
    objects.add(Sphere::new(Vec3::new(0.0, 2.0, 0.0), 2.0, pertext));

    let difflight = shared(DiffuseLight::new(Color::splat(4.0)));
    objects.add(AaRect::xy(3.0, 5.0, 1.0, 3.0, -2.0, difflight));
    objects
}

/// Walls, ceiling light and the two blocks of the Cornell box.
fn cornell_room() -> (HittableList, Hittable, Hittable) {
    let red = shared(Lambertian::new(Color::new(0.65, 0.05, 0.05)));
    let white = shared(Lambertian::new(Color::new(0.73, 0.73, 0.73)));
    let green = shared(Lambertian::new(Color::new(0.12, 0.45, 0.15)));
    let light = shared(DiffuseLight::new(Color::splat(7.0)));

    let mut objects = HittableList::new();
    objects.add(AaRect::yz(0.0, 555.0, 0.0, 555.0, 555.0, green));
    objects.add(AaRect::yz(0.0, 555.0, 0.0, 555.0, 0.0, red));
    objects.add(AaRect::xz(113.0, 443.0, 127.0, 432.0, 554.0, light));
    objects.add(AaRect::xz(0.0, 555.0, 0.0, 555.0, 555.0, white.clone()));
    objects.add(AaRect::xz(0.0, 555.0, 0.0, 555.0, 0.0, white.clone()));
    objects.add(AaRect::xy(0.0, 555.0, 0.0, 555.0, 555.0, white.clone()));

    let tall = Cuboid::new(Vec3::ZERO, Vec3::new(165.0, 330.0, 165.0), white.clone());
    let tall = Translate::new(RotateY::new(tall, 15.0), Vec3::new(265.0, 0.0, 295.0));

    let short = Cuboid::new(Vec3::ZERO, Vec3::splat(165.0), white);
    let short = Translate::new(RotateY::new(short, -18.0), Vec3::new(130.0, 0.0, 65.0));

    (objects, tall.into(), short.into())
}

fn cornell_box() -> HittableList {
    let (mut objects, tall, short) = cornell_room();
    objects.add(tall);
    objects.add(short);
    objects
}

fn cornell_smoke() -> HittableList {
    let (mut objects, tall, short) = cornell_room();
    objects.add(ConstantMedium::new(tall, 0.01, Color::ZERO));
    objects.add(ConstantMedium::new(short, 0.01, Color::ONE));
    objects
}

fn single_sphere() -> HittableList {
    let mut objects = HittableList::new();
    objects.add(Sphere::new(
        Vec3::new(0.0, -100.5, -1.0),
        100.0,
        shared(Lambertian::new(Color::new(0.8, 0.8, 0.0))),
    ));
    objects.add(Sphere::new(
        Vec3::new(0.0, 0.0, -1.0),
        0.5,
        shared(Lambertian::new(Color::new(0.7, 0.3, 0.3))),
    ));
    objects
}
