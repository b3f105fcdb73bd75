//! Lumen Core - scene parameters and image output for the lumen ray tracer.
//!
//! This crate provides:
//!
//! - **Scene parameters**: `SceneConfig`, the resolved bag of image, sampling
//!   and camera values, loaded from a JSON file
//! - **Pixel sinks**: `PixelSink` and its PPM / image-file implementations
//!
//! # Example
//!
//! ```ignore
//! use lumen_core::{open_sink, SceneConfig};
//!
//! let config = SceneConfig::load("config.json")?;
//! let mut sink = open_sink(Some("render.png".as_ref()))?;
//! ```

pub mod config;
pub mod output;

// Re-export commonly used types
pub use config::{ColorDef, ConfigError, ConfigResult, SceneConfig, Vec3Def};
pub use output::{open_sink, ImageFileSink, OutputError, OutputResult, PixelSink, PpmSink};
