//! A fully assembled scene: image settings, camera and world.

use crate::{render, Camera, Hittable, ImageBuffer, RenderConfig};
use lumen_core::{OutputResult, PixelSink, SceneConfig};
use rand::RngCore;
use std::time::Instant;

/// Everything needed to produce an image. Immutable once built.
pub struct Scene {
    pub image_width: u32,
    pub image_height: u32,
    pub config: RenderConfig,
    pub camera: Camera,
    pub world: Hittable,
}

impl Scene {
    /// Build a scene from loaded parameters and an already constructed world.
    pub fn from_config(params: &SceneConfig, world: impl Into<Hittable>) -> Self {
        let mut camera = Camera::new()
            .with_position(params.look_from(), params.look_at(), params.vup())
            .with_lens(params.vfov, params.aperture, params.dist_to_focus)
            .with_aspect_ratio(params.aspect_ratio)
            .with_shutter(params.time0, params.time1);
        camera.initialize();

        Self {
            image_width: params.image_width,
            image_height: params.image_height(),
            config: RenderConfig {
                samples_per_pixel: params.samples_per_pixel,
                max_depth: params.max_depth,
                background: params.background(),
                use_sky_gradient: params.sky_gradient,
            },
            camera,
            world: world.into(),
        }
    }

    /// Trace every pixel into a new image buffer.
    pub fn render(&self, rng: &mut dyn RngCore) -> ImageBuffer {
        log::info!(
            "Rendering {}x{} at {} spp (max depth {}) from {}",
            self.image_width,
            self.image_height,
            self.config.samples_per_pixel,
            self.config.max_depth,
            self.camera.look_from()
        );
        let start = Instant::now();

        let image = render(
            &self.camera,
            &self.world,
            self.image_width,
            self.image_height,
            &self.config,
            rng,
        );

        log::info!("Render finished in {:.2?}", start.elapsed());
        image
    }

    /// Render and stream the result to `sink`.
    pub fn render_to(&self, sink: &mut dyn PixelSink, rng: &mut dyn RngCore) -> OutputResult<()> {
        self.render(rng).write_to(sink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{HittableList, Lambertian, Material, Sphere};
    use lumen_core::PpmSink;
    use lumen_math::{Color, Vec3};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    const PARAMS: &str = r#"{
        "image_width": 8,
        "samples_per_pixel": 2,
        "max_depth": 4,
        "background": { "r": 0.7, "g": 0.8, "b": 1.0 },
        "lookfrom": { "x": 0, "y": 0, "z": 0 },
        "lookat": { "x": 0, "y": 0, "z": -1 },
        "vup": { "x": 0, "y": 1, "z": 0 },
        "vfov": 90.0,
        "aspect_ratio": 2.0,
        "aperture": 0.0,
        "dist_to_focus": 1.0
    }"#;

    fn world() -> HittableList {
        let material: Arc<Material> = Arc::new(Lambertian::new(Color::splat(0.5)).into());
        let mut world = HittableList::new();
        world.add(Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, material));
        world
    }

    #[test]
    fn test_from_config() {
        let params = SceneConfig::from_json_str(PARAMS).unwrap();
        let scene = Scene::from_config(&params, world());

        assert_eq!(scene.image_width, 8);
        assert_eq!(scene.image_height, 4);
        assert_eq!(scene.config.samples_per_pixel, 2);
        assert_eq!(scene.config.max_depth, 4);
        assert_eq!(scene.config.background, Color::new(0.7, 0.8, 1.0));
        assert!(!scene.config.use_sky_gradient);
    }

    #[test]
    fn test_render_is_reproducible() {
        let params = SceneConfig::from_json_str(PARAMS).unwrap();
        let scene = Scene::from_config(&params, world());

        let a = scene.render(&mut StdRng::seed_from_u64(9));
        let b = scene.render(&mut StdRng::seed_from_u64(9));
        assert_eq!(a.pixels, b.pixels);
    }

    #[test]
    fn test_render_to_sink() {
        let params = SceneConfig::from_json_str(PARAMS).unwrap();
        let scene = Scene::from_config(&params, world());
        let mut rng = StdRng::seed_from_u64(1);

        let mut sink = PpmSink::new(Vec::new());
        scene.render_to(&mut sink, &mut rng).unwrap();

        let text = String::from_utf8(sink.into_inner()).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("P3"));
        assert_eq!(lines.next(), Some("8 4"));
        assert_eq!(lines.next(), Some("255"));
        assert_eq!(lines.count(), 32);
    }
}
