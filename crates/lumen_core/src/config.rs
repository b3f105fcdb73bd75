//! Scene parameters loaded from a JSON config file.
//!
//! The renderer only needs a resolved set of typed values: image width, sample
//! count, recursion depth, background color and the camera description. This
//! module reads them from JSON and validates ranges before anything renders.

use std::fs;
use std::path::Path;

use lumen_math::{Color, Vec3};
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur while loading scene parameters.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid value for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// A point or direction written as `{"x": .., "y": .., "z": ..}`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Vec3Def {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl From<Vec3Def> for Vec3 {
    fn from(v: Vec3Def) -> Self {
        Vec3::new(v.x, v.y, v.z)
    }
}

/// A color written as `{"r": .., "g": .., "b": ..}`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ColorDef {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl From<ColorDef> for Color {
    fn from(c: ColorDef) -> Self {
        Color::new(c.r, c.g, c.b)
    }
}

/// Resolved scene parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SceneConfig {
    /// Output width in pixels; height follows from `aspect_ratio`
    pub image_width: u32,
    /// Camera rays averaged per pixel
    pub samples_per_pixel: u32,
    /// Maximum number of scattering events per path
    pub max_depth: u32,
    /// Radiance returned by rays that escape the scene
    pub background: ColorDef,

    // Camera positioning
    pub lookfrom: Vec3Def,
    pub lookat: Vec3Def,
    pub vup: Vec3Def,

    // Lens settings
    /// Vertical field of view in degrees
    pub vfov: f32,
    pub aspect_ratio: f32,
    /// Lens diameter; 0 gives a pinhole camera
    pub aperture: f32,
    /// Distance from the eye to the plane of perfect focus
    pub dist_to_focus: f32,

    // Shutter interval
    #[serde(default)]
    pub time0: f32,
    #[serde(default)]
    pub time1: f32,

    /// Scene preset to build; the binary decides what names exist
    #[serde(default)]
    pub scene: Option<String>,
    /// Use the white-to-blue sky instead of the constant background
    #[serde(default)]
    pub sky_gradient: bool,
    /// Seed for the sampling generator
    #[serde(default)]
    pub seed: Option<u64>,
}

impl SceneConfig {
    /// Parse and validate a config from JSON text.
    pub fn from_json_str(text: &str) -> ConfigResult<Self> {
        let config: SceneConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a config file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let config = Self::from_json_str(&text)?;
        log::debug!("Loaded scene config from {}", path.display());
        Ok(config)
    }

    /// Check every value the renderer relies on.
    pub fn validate(&self) -> ConfigResult<()> {
        fn invalid(key: &'static str, reason: impl Into<String>) -> ConfigError {
            ConfigError::Invalid {
                key,
                reason: reason.into(),
            }
        }

        if self.image_width == 0 {
            return Err(invalid("image_width", "must be at least 1"));
        }
        if self.samples_per_pixel == 0 {
            return Err(invalid("samples_per_pixel", "must be at least 1"));
        }
        if !(self.aspect_ratio.is_finite() && self.aspect_ratio > 0.0) {
            return Err(invalid(
                "aspect_ratio",
                format!("must be positive, got {}", self.aspect_ratio),
            ));
        }
        if !(self.vfov > 0.0 && self.vfov < 180.0) {
            return Err(invalid(
                "vfov",
                format!("must be between 0 and 180 degrees, got {}", self.vfov),
            ));
        }
        if self.aperture.is_nan() || self.aperture < 0.0 {
            return Err(invalid(
                "aperture",
                format!("must not be negative, got {}", self.aperture),
            ));
        }
        if !(self.dist_to_focus.is_finite() && self.dist_to_focus > 0.0) {
            return Err(invalid(
                "dist_to_focus",
                format!("must be positive, got {}", self.dist_to_focus),
            ));
        }

        // The camera basis needs a view direction and an up vector off that axis
        let view = self.look_from() - self.look_at();
        if !view.is_finite() || view.length_squared() == 0.0 {
            return Err(invalid("lookat", "must differ from lookfrom"));
        }
        let side = self.vup().cross(view.normalize());
        if !side.is_finite() || side.length_squared() < 1e-12 {
            return Err(invalid("vup", "must not be zero or parallel to the view direction"));
        }

        if self.time1 < self.time0 {
            return Err(invalid(
                "time1",
                format!("shutter closes ({}) before it opens ({})", self.time1, self.time0),
            ));
        }
        Ok(())
    }

    /// Image height derived from width and aspect ratio (at least 1).
    pub fn image_height(&self) -> u32 {
        ((self.image_width as f32 / self.aspect_ratio) as u32).max(1)
    }

    pub fn background(&self) -> Color {
        self.background.into()
    }

    pub fn look_from(&self) -> Vec3 {
        self.lookfrom.into()
    }

    pub fn look_at(&self) -> Vec3 {
        self.lookat.into()
    }

    pub fn vup(&self) -> Vec3 {
        self.vup.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CORNELL: &str = r#"{
        "image_width": 600,
        "samples_per_pixel": 200,
        "max_depth": 50,
        "background": { "r": 0, "g": 0, "b": 0 },
        "lookfrom": { "x": 278, "y": 278, "z": -800 },
        "lookat": { "x": 278, "y": 278, "z": 0 },
        "vup": { "x": 0, "y": 1, "z": 0 },
        "vfov": 40.0,
        "aspect_ratio": 1.0,
        "aperture": 0.0,
        "dist_to_focus": 10.0,
        "time0": 0.0,
        "time1": 1.0
    }"#;

    #[test]
    fn test_parse_reference_config() {
        let config = SceneConfig::from_json_str(CORNELL).unwrap();

        assert_eq!(config.image_width, 600);
        assert_eq!(config.samples_per_pixel, 200);
        assert_eq!(config.max_depth, 50);
        assert_eq!(config.background(), Color::ZERO);
        assert_eq!(config.look_from(), Vec3::new(278.0, 278.0, -800.0));
        assert_eq!(config.vup(), Vec3::Y);
        assert_eq!(config.time1, 1.0);
        assert_eq!(config.scene, None);
        assert!(!config.sky_gradient);
        assert_eq!(config.image_height(), 600);
    }

    #[test]
    fn test_optional_keys() {
        let text = CORNELL.replace(
            "\"time0\": 0.0,",
            "\"scene\": \"cornell_smoke\", \"sky_gradient\": true, \"seed\": 7, \"time0\": 0.0,",
        );
        let config = SceneConfig::from_json_str(&text).unwrap();

        assert_eq!(config.scene.as_deref(), Some("cornell_smoke"));
        assert!(config.sky_gradient);
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn test_image_height_from_aspect() {
        let text = CORNELL.replace("\"aspect_ratio\": 1.0", "\"aspect_ratio\": 1.7777778");
        let config = SceneConfig::from_json_str(&text).unwrap();
        assert_eq!(config.image_height(), 337);
    }

    #[test]
    fn test_missing_key_is_parse_error() {
        let text = CORNELL.replace("\"max_depth\": 50,", "");
        let err = SceneConfig::from_json_str(&text).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_invalid_values() {
        const UP: &str = "\"vup\": { \"x\": 0, \"y\": 1, \"z\": 0 }";
        let cases = [
            ("\"image_width\": 600", "\"image_width\": 0", "image_width"),
            ("\"samples_per_pixel\": 200", "\"samples_per_pixel\": 0", "samples_per_pixel"),
            ("\"aspect_ratio\": 1.0", "\"aspect_ratio\": -1.0", "aspect_ratio"),
            ("\"vfov\": 40.0", "\"vfov\": 180.0", "vfov"),
            ("\"aperture\": 0.0", "\"aperture\": -0.5", "aperture"),
            ("\"time1\": 1.0", "\"time1\": -1.0", "time1"),
            ("\"dist_to_focus\": 10.0", "\"dist_to_focus\": 0.0", "dist_to_focus"),
            ("\"dist_to_focus\": 10.0", "\"dist_to_focus\": -2.0", "dist_to_focus"),
            ("\"z\": -800", "\"z\": 0", "lookat"),
            // Along the view axis, then zero
            (UP, "\"vup\": { \"x\": 0, \"y\": 0, \"z\": 3 }", "vup"),
            (UP, "\"vup\": { \"x\": 0, \"y\": 0, \"z\": 0 }", "vup"),
        ];

        for (from, to, expected_key) in cases {
            let err = SceneConfig::from_json_str(&CORNELL.replace(from, to)).unwrap_err();
            match err {
                ConfigError::Invalid { key, .. } => assert_eq!(key, expected_key),
                other => panic!("expected Invalid for {expected_key}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_focus_distance_must_be_finite() {
        let mut config = SceneConfig::from_json_str(CORNELL).unwrap();
        config.dist_to_focus = f32::INFINITY;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { key: "dist_to_focus", .. })
        ));

        config.dist_to_focus = f32::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_aperture_nan_is_rejected() {
        let mut config = SceneConfig::from_json_str(CORNELL).unwrap();
        config.aperture = f32::NAN;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { key: "aperture", .. })
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = SceneConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
