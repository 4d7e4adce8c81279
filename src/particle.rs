//! Particles and their traces.
//!
//! A [`Particle`] owns its [`Trace`]. There is no back-reference between the
//! two: dropping the particle drops its path history with it.

use crate::field::VectorField;
use glam::{Vec2, Vec3};
use serde::Serialize;
use std::collections::VecDeque;

/// Capped history of visited positions, oldest first.
///
/// Once more than `max_len` samples have been pushed, the oldest are dropped
/// so only the most recent `max_len` remain.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Trace {
    points: VecDeque<Vec2>,
    #[serde(skip)]
    max_len: usize,
}

impl Trace {
    /// Create an empty trace keeping at most `max_len` points.
    pub fn with_capacity(max_len: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(max_len),
            max_len,
        }
    }

    /// Append a sample, evicting the oldest ones past the cap.
    pub fn push(&mut self, point: Vec2) {
        self.points.push_back(point);
        while self.points.len() > self.max_len {
            self.points.pop_front();
        }
    }

    /// Number of stored samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Maximum number of samples kept.
    #[inline]
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Samples from oldest to newest.
    pub fn points(&self) -> impl ExactSizeIterator<Item = Vec2> + DoubleEndedIterator + '_ {
        self.points.iter().copied()
    }

    /// Most recent sample.
    pub fn latest(&self) -> Option<Vec2> {
        self.points.back().copied()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }
}

/// A point-like particle with a fixed look and its own trace.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Particle {
    /// Current position in scene units.
    pub position: Vec2,
    /// Visual radius in scene units.
    #[serde(skip)]
    pub radius: f32,
    /// RGB color, 0.0-1.0 per channel.
    #[serde(skip)]
    pub color: Vec3,
    /// Recent path.
    pub trace: Trace,
}

impl Particle {
    /// Create a particle at `position` with an empty trace.
    pub fn new(position: Vec2, radius: f32, color: Vec3, max_trace_length: usize) -> Self {
        Self {
            position,
            radius,
            color,
            trace: Trace::with_capacity(max_trace_length),
        }
    }

    /// One explicit Euler step through `field`.
    ///
    /// `position += field(position) * dt * time_scale`, then the new position
    /// is recorded in the trace.
    pub fn advance(&mut self, field: &VectorField, dt: f32, time_scale: f32) {
        let velocity = field.evaluate(self.position);
        self.position += velocity * dt * time_scale;
        self.trace.push(self.position);
    }
}
