//! Software rasterizer for scene frames.
//!
//! Draws anti-aliased traces and dots into an RGB image. Coverage is derived
//! from the pixel centre's distance to the shape, which gives a one-pixel soft
//! edge without supersampling.

use crate::particle::Particle;
use crate::visuals::VisualConfig;
use glam::{Vec2, Vec3};
use image::{Rgb, RgbImage};

/// An RGB frame buffer in scene coordinates.
pub struct Canvas {
    image: RgbImage,
}

impl Canvas {
    /// Blank canvas at the configured resolution, cleared to the background.
    pub fn new(visuals: &VisualConfig) -> Self {
        let [w, h] = visuals.resolution;
        let image = RgbImage::from_pixel(w, h, to_rgb(visuals.background));
        Self { image }
    }

    /// Draw all traces, then all dots on top.
    pub fn draw_particles(&mut self, particles: &[Particle], visuals: &VisualConfig) {
        let half_stroke = visuals.trace_width * 0.5;
        for particle in particles {
            let points: Vec<Vec2> = particle.trace.points().map(|p| visuals.to_pixel(p)).collect();
            for segment in points.windows(2) {
                self.stroke_segment(segment[0], segment[1], half_stroke, visuals.trace_color);
            }
        }

        let scale = visuals.pixels_per_unit();
        for particle in particles {
            let center = visuals.to_pixel(particle.position);
            self.fill_disc(center, particle.radius * scale, particle.color);
        }
    }

    /// Anti-aliased filled circle. `center` and `radius` in pixels.
    pub fn fill_disc(&mut self, center: Vec2, radius: f32, color: Vec3) {
        let reach = radius + 1.0;
        self.shade_region(center - Vec2::splat(reach), center + Vec2::splat(reach), color, |p| {
            coverage(p.distance(center), radius)
        });
    }

    /// Anti-aliased line segment of half-width `half_width`, in pixels.
    pub fn stroke_segment(&mut self, a: Vec2, b: Vec2, half_width: f32, color: Vec3) {
        let reach = Vec2::splat(half_width + 1.0);
        self.shade_region(a.min(b) - reach, a.max(b) + reach, color, |p| {
            coverage(distance_to_segment(p, a, b), half_width)
        });
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn into_image(self) -> RgbImage {
        self.image
    }

    /// Blend `color` into every pixel of the clipped box `[min, max]` by `alpha(pixel_centre)`.
    fn shade_region(&mut self, min: Vec2, max: Vec2, color: Vec3, alpha: impl Fn(Vec2) -> f32) {
        let (w, h) = self.image.dimensions();
        if w == 0 || h == 0 || !min.is_finite() || !max.is_finite() {
            return;
        }
        let x0 = min.x.floor().max(0.0) as u32;
        let y0 = min.y.floor().max(0.0) as u32;
        let x1 = (max.x.ceil().max(0.0) as u32).min(w - 1);
        let y1 = (max.y.ceil().max(0.0) as u32).min(h - 1);
        if x0 > x1 || y0 > y1 {
            return;
        }

        for y in y0..=y1 {
            for x in x0..=x1 {
                let a = alpha(Vec2::new(x as f32 + 0.5, y as f32 + 0.5));
                if a > 0.0 {
                    let pixel = self.image.get_pixel_mut(x, y);
                    *pixel = blend(*pixel, color, a);
                }
            }
        }
    }
}

/// Fraction of a pixel at `distance` covered by a shape with edge at `extent`.
fn coverage(distance: f32, extent: f32) -> f32 {
    (extent + 0.5 - distance).clamp(0.0, 1.0)
}

fn distance_to_segment(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= f32::EPSILON {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

fn to_rgb(c: Vec3) -> Rgb<u8> {
    let c = c.clamp(Vec3::ZERO, Vec3::ONE) * 255.0;
    Rgb([c.x.round() as u8, c.y.round() as u8, c.z.round() as u8])
}

fn blend(dst: Rgb<u8>, src: Vec3, alpha: f32) -> Rgb<u8> {
    let d = Vec3::new(dst[0] as f32, dst[1] as f32, dst[2] as f32) / 255.0;
    to_rgb(d.lerp(src, alpha))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visuals::colors;

    fn small() -> VisualConfig {
        VisualConfig {
            resolution: [64, 36],
            frame_width: 16.0,
            frame_height: 9.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_background_fill() {
        let canvas = Canvas::new(&small());
        assert!(canvas.image().pixels().all(|p| *p == Rgb([0, 0, 0])));
    }

    #[test]
    fn test_disc_center_and_outside() {
        let mut canvas = Canvas::new(&small());
        canvas.fill_disc(Vec2::new(10.0, 10.0), 3.0, colors::WHITE);
        assert_eq!(*canvas.image().get_pixel(10, 10), Rgb([255, 255, 255]));
        assert_eq!(*canvas.image().get_pixel(20, 10), Rgb([0, 0, 0]));
    }

    #[test]
    fn test_offscreen_shapes_are_clipped() {
        let mut canvas = Canvas::new(&small());
        canvas.fill_disc(Vec2::new(-50.0, -50.0), 3.0, colors::WHITE);
        canvas.stroke_segment(Vec2::new(100.0, 0.0), Vec2::new(200.0, 0.0), 1.0, colors::WHITE);
        canvas.fill_disc(Vec2::new(f32::NAN, 0.0), 3.0, colors::WHITE);
        assert!(canvas.image().pixels().all(|p| *p == Rgb([0, 0, 0])));
    }

    #[test]
    fn test_segment_covers_its_path() {
        let mut canvas = Canvas::new(&small());
        canvas.stroke_segment(Vec2::new(2.0, 5.5), Vec2::new(30.0, 5.5), 0.5, colors::WHITE);
        assert_eq!(*canvas.image().get_pixel(15, 5), Rgb([255, 255, 255]));
        assert_eq!(*canvas.image().get_pixel(15, 9), Rgb([0, 0, 0]));
    }

    #[test]
    fn test_distance_to_segment() {
        let a = Vec2::ZERO;
        let b = Vec2::new(10.0, 0.0);
        assert_eq!(distance_to_segment(Vec2::new(5.0, 3.0), a, b), 3.0);
        assert_eq!(distance_to_segment(Vec2::new(-4.0, 3.0), a, b), 5.0);
        assert_eq!(distance_to_segment(Vec2::new(1.0, 1.0), a, a), 2f32.sqrt());
    }
}
