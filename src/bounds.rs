//! Viewport bounds and offscreen removal.

use crate::particle::Particle;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned region centred on the origin.
///
/// A particle is inside while `|x| <= half_width` and `|y| <= half_height`.
/// Points exactly on the edge are kept.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub half_width: f32,
    pub half_height: f32,
}

impl Viewport {
    pub fn new(half_width: f32, half_height: f32) -> Self {
        Self {
            half_width,
            half_height,
        }
    }

    /// Visible frame extended by `margin` on every side.
    pub fn around_frame(frame_width: f32, frame_height: f32, margin: f32) -> Self {
        Self::new(frame_width * 0.5 + margin, frame_height * 0.5 + margin)
    }

    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x.abs() <= self.half_width && p.y.abs() <= self.half_height
    }

    /// Remove every particle outside the viewport, trace included.
    ///
    /// Walks the list from the back so removal never shifts an index that is
    /// still to be visited. Survivors keep their relative order. Returns the
    /// number of particles removed.
    pub fn cull(&self, particles: &mut Vec<Particle>) -> usize {
        let mut removed = 0;
        for i in (0..particles.len()).rev() {
            if !self.contains(particles[i].position) {
                particles.remove(i);
                removed += 1;
            }
        }
        removed
    }
}
