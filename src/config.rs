//! Scene configuration.
//!
//! A [`SceneConfig`] describes a whole run and can be saved to and loaded
//! from JSON. Missing keys fall back to the defaults, which reproduce the
//! reference scene: 200 particles orbiting in a circular field, 20 more every
//! 0.1 s, 15-point traces, three seconds at 15 fps.

use crate::bounds::Viewport;
use crate::error::ConfigError;
use crate::field::VectorField;
use crate::visuals::VisualConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Extra room beyond the visible frame before a particle is removed.
pub const DEFAULT_OFFSCREEN_MARGIN: f32 = 10.0;

/// Complete scene configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Scene length in seconds.
    pub duration: f32,
    /// Output frames per second.
    pub fps: f32,
    /// Particles created before the first frame.
    pub initial_count: usize,
    /// Particles created per spawn batch.
    pub batch_size: usize,
    /// Seconds between spawn batches.
    pub spawn_interval: f32,
    /// New particles appear uniformly in `[-spawn_extent, spawn_extent)²`.
    pub spawn_extent: f32,
    /// Motion speed multiplier applied in the particle update.
    pub time_scale: f32,
    /// Points kept in each particle's trace.
    pub max_trace_length: usize,
    /// Velocity field.
    pub field: VectorField,
    /// Removal bounds. `None` means the visible frame plus
    /// [`DEFAULT_OFFSCREEN_MARGIN`] on each side.
    pub viewport: Option<Viewport>,
    /// RNG seed for reproducible runs.
    pub seed: Option<u64>,
    /// Look of rendered frames.
    pub visuals: VisualConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            duration: 3.0,
            fps: 15.0,
            initial_count: 200,
            batch_size: 20,
            spawn_interval: 0.1,
            spawn_extent: 5.0,
            time_scale: 1.0,
            max_trace_length: 15,
            field: VectorField::Circular,
            viewport: None,
            seed: None,
            visuals: VisualConfig::default(),
        }
    }
}

impl SceneConfig {
    /// Save the configuration as pretty JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = self.to_json()?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load and validate a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Parse and validate a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SceneConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Removal bounds, explicit or derived from the visible frame.
    pub fn effective_viewport(&self) -> Viewport {
        self.viewport.unwrap_or_else(|| {
            Viewport::around_frame(
                self.visuals.frame_width,
                self.visuals.frame_height,
                DEFAULT_OFFSCREEN_MARGIN,
            )
        })
    }

    /// Reject values the scene cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("duration", self.duration)?;
        positive("fps", self.fps)?;
        positive("spawn_interval", self.spawn_interval)?;
        non_negative("spawn_extent", self.spawn_extent)?;
        non_negative("time_scale", self.time_scale)?;
        non_negative("visuals.particle_radius", self.visuals.particle_radius)?;
        non_negative("visuals.trace_width", self.visuals.trace_width)?;
        positive("visuals.frame_width", self.visuals.frame_width)?;
        positive("visuals.frame_height", self.visuals.frame_height)?;

        if let Some(vp) = self.viewport {
            positive("viewport.half_width", vp.half_width)?;
            positive("viewport.half_height", vp.half_height)?;
        }

        let [w, h] = self.visuals.resolution;
        if w == 0 || h == 0 {
            return Err(ConfigError::invalid(
                "visuals.resolution",
                format!("must be non-zero, got {}x{}", w, h),
            ));
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("must be positive, got {}", value)))
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("must be non-negative, got {}", value)))
    }
}
