//! Visual configuration: colors, sizes and the frame the scene is viewed through.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Named colors, RGB 0.0-1.0.
pub mod colors {
    use glam::Vec3;

    /// `#FC6255`
    pub const RED: Vec3 = Vec3::new(0.988, 0.384, 0.333);
    /// `#FFFFFF`
    pub const WHITE: Vec3 = Vec3::new(1.0, 1.0, 1.0);
    /// `#000000`
    pub const BLACK: Vec3 = Vec3::new(0.0, 0.0, 0.0);
    /// `#58C4DD`
    pub const BLUE: Vec3 = Vec3::new(0.345, 0.769, 0.867);
    /// `#FFFF00`
    pub const YELLOW: Vec3 = Vec3::new(1.0, 1.0, 0.0);
}

/// How a newly spawned particle is colored.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorMode {
    /// Every particle gets the same color.
    Solid(Vec3),
    /// Random hue per particle at fixed saturation and value.
    RandomHue {
        /// 0.0 (gray) to 1.0 (vivid).
        saturation: f32,
        /// 0.0 (black) to 1.0 (bright).
        value: f32,
    },
}

impl Default for ColorMode {
    fn default() -> Self {
        ColorMode::Solid(colors::RED)
    }
}

/// Look of the rendered frames.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualConfig {
    /// Clear color.
    pub background: Vec3,
    /// Particle dot radius in scene units.
    pub particle_radius: f32,
    /// Particle dot color.
    pub particle_color: ColorMode,
    /// Trace stroke color.
    pub trace_color: Vec3,
    /// Trace stroke width in pixels.
    pub trace_width: f32,
    /// Visible frame width in scene units, centred on the origin.
    pub frame_width: f32,
    /// Visible frame height in scene units, centred on the origin.
    pub frame_height: f32,
    /// Output image size in pixels `[width, height]`.
    pub resolution: [u32; 2],
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            background: colors::BLACK,
            particle_radius: 0.05,
            particle_color: ColorMode::default(),
            trace_color: colors::WHITE,
            trace_width: 1.0,
            frame_width: 8.0 * 16.0 / 9.0,
            frame_height: 8.0,
            resolution: [854, 480],
        }
    }
}

impl VisualConfig {
    /// Half extents of the visible frame.
    pub fn half_frame(&self) -> Vec2 {
        Vec2::new(self.frame_width, self.frame_height) * 0.5
    }

    /// Map a scene position to pixel coordinates (y down, origin top-left).
    pub fn to_pixel(&self, p: Vec2) -> Vec2 {
        let [w, h] = self.resolution;
        let half = self.half_frame();
        Vec2::new(
            (p.x + half.x) / self.frame_width * w as f32,
            (half.y - p.y) / self.frame_height * h as f32,
        )
    }

    /// Pixels per scene unit along x.
    pub fn pixels_per_unit(&self) -> f32 {
        self.resolution[0] as f32 / self.frame_width
    }
}

/// Convert HSV to RGB.
///
/// * `h` - 0.0 to 1.0 (wraps: red → yellow → green → cyan → blue → magenta → red)
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> Vec3 {
    let h = h.rem_euclid(1.0);
    let c = v * s;
    let x = c * (1.0 - ((h * 6.0) % 2.0 - 1.0).abs());
    let m = v - c;

    let (r, g, b) = match (h * 6.0) as u32 % 6 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    Vec3::new(r + m, g + m, b + m)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_pixel_corners() {
        let visuals = VisualConfig::default();
        let half = visuals.half_frame();

        let top_left = visuals.to_pixel(Vec2::new(-half.x, half.y));
        assert!(top_left.length() < 1e-3);

        let center = visuals.to_pixel(Vec2::ZERO);
        assert!((center - Vec2::new(427.0, 240.0)).length() < 1e-3);
    }

    #[test]
    fn test_hsv_to_rgb() {
        let red = hsv_to_rgb(0.0, 1.0, 1.0);
        assert!((red.x - 1.0).abs() < 0.001);
        assert!(red.y < 0.001);
        assert!(red.z < 0.001);

        let gray = hsv_to_rgb(0.3, 0.0, 0.5);
        assert!((gray - Vec3::splat(0.5)).length() < 0.001);
    }

    #[test]
    fn test_color_mode_json() {
        let json = serde_json::to_string(&ColorMode::Solid(colors::WHITE)).unwrap();
        assert_eq!(json, r#"{"solid":[1.0,1.0,1.0]}"#);
    }
}
