//! Particle spawning.
//!
//! [`SpawnContext`] carries the scene's random number generator and the
//! helpers used to place and color new particles. [`Spawner`] turns elapsed
//! time into fixed-size batches on a fixed interval.

use crate::particle::Particle;
use crate::visuals::{hsv_to_rgb, ColorMode};
use glam::{Vec2, Vec3};
use log::warn;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;

/// Random source and placement helpers for new particles.
///
/// ```
/// use fieldtrace::SpawnContext;
///
/// let mut ctx = SpawnContext::new(5.0, Some(7));
/// let p = ctx.random_in_bounds();
/// assert!(p.x.abs() <= 5.0 && p.y.abs() <= 5.0);
/// ```
pub struct SpawnContext {
    /// Half-size of the spawn square.
    pub extent: f32,
    rng: SmallRng,
}

impl SpawnContext {
    /// Create a context spawning inside `[-extent, extent)²`.
    ///
    /// With `seed` set the particle layout is reproducible; otherwise the RNG
    /// is seeded from the clock and differs every run.
    pub fn new(extent: f32, seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(42)
        });

        Self {
            extent,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    // ========== Random primitives ==========

    /// Random f32 between 0.0 and 1.0.
    #[inline]
    pub fn random(&mut self) -> f32 {
        self.rng.gen()
    }

    /// Random f32 in `[min, max)`. Returns `min` for an empty range.
    #[inline]
    pub fn random_range(&mut self, min: f32, max: f32) -> f32 {
        if max > min {
            self.rng.gen_range(min..max)
        } else {
            min
        }
    }

    // ========== Position helpers ==========

    /// Uniform point in the square `[-half_size, half_size)²`.
    pub fn random_in_square(&mut self, half_size: f32) -> Vec2 {
        Vec2::new(
            self.random_range(-half_size, half_size),
            self.random_range(-half_size, half_size),
        )
    }

    /// Uniform point in the spawn square.
    ///
    /// Equivalent to `random_in_square(ctx.extent)`.
    pub fn random_in_bounds(&mut self) -> Vec2 {
        self.random_in_square(self.extent)
    }

    /// Uniform point inside a disk centred on the origin.
    pub fn random_in_disk(&mut self, radius: f32) -> Vec2 {
        let theta = self.random_range(0.0, TAU);
        // sqrt for uniform area density
        let r = radius * self.random().sqrt();
        Vec2::new(r * theta.cos(), r * theta.sin())
    }

    // ========== Color helpers ==========

    /// Random color with given saturation and value (HSV model).
    pub fn random_hue(&mut self, saturation: f32, value: f32) -> Vec3 {
        let hue = self.random();
        hsv_to_rgb(hue, saturation, value)
    }

    /// Color from HSV values.
    pub fn hsv(&self, hue: f32, saturation: f32, value: f32) -> Vec3 {
        hsv_to_rgb(hue, saturation, value)
    }

    /// Resolve a [`ColorMode`] into a concrete color.
    pub fn color(&mut self, mode: ColorMode) -> Vec3 {
        match mode {
            ColorMode::Solid(c) => c,
            ColorMode::RandomHue { saturation, value } => self.random_hue(saturation, value),
        }
    }
}

/// Fixed properties every new particle starts with.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleTemplate {
    /// Dot radius in scene units.
    pub radius: f32,
    /// How the dot is colored.
    pub color: ColorMode,
    /// Trace cap.
    pub max_trace_length: usize,
}

impl ParticleTemplate {
    /// Instantiate one particle at a random position in the spawn square.
    pub fn instantiate(&self, ctx: &mut SpawnContext) -> Particle {
        let position = ctx.random_in_bounds();
        let color = ctx.color(self.color);
        Particle::new(position, self.radius, color, self.max_trace_length)
    }

    /// Instantiate `count` particles.
    pub fn batch(&self, ctx: &mut SpawnContext, count: usize) -> Vec<Particle> {
        (0..count).map(|_| self.instantiate(ctx)).collect()
    }
}

/// Emits a batch of particles every `interval` seconds.
#[derive(Clone, Debug)]
pub struct Spawner {
    interval: f32,
    batch_size: usize,
    template: ParticleTemplate,
    accumulator: f32,
    batches: u64,
}

impl Spawner {
    /// `batch_size` particles every `interval` seconds of scene time.
    ///
    /// A zero, negative or NaN `interval` disables spawning rather than
    /// firing on every tick.
    pub fn new(interval: f32, batch_size: usize, template: ParticleTemplate) -> Self {
        let interval = if interval > 0.0 {
            interval
        } else {
            warn!("spawn interval {} is not positive; spawning disabled", interval);
            f32::INFINITY
        };
        Self {
            interval,
            batch_size,
            template,
            accumulator: 0.0,
            batches: 0,
        }
    }

    /// Advance the timer by `dt` and return a batch if the interval elapsed.
    ///
    /// The timer restarts from zero after each batch; any overshoot past the
    /// interval is discarded, so at most one batch is produced per call.
    pub fn tick(&mut self, dt: f32, ctx: &mut SpawnContext) -> Option<Vec<Particle>> {
        self.accumulator += dt;
        if self.accumulator < self.interval {
            return None;
        }
        self.accumulator = 0.0;
        self.batches += 1;
        Some(self.template.batch(ctx, self.batch_size))
    }

    #[inline]
    pub fn interval(&self) -> f32 {
        self.interval
    }

    #[inline]
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    #[inline]
    pub fn template(&self) -> &ParticleTemplate {
        &self.template
    }

    /// Batches emitted so far.
    #[inline]
    pub fn batches(&self) -> u64 {
        self.batches
    }

    /// Time accumulated toward the next batch.
    #[inline]
    pub fn pending(&self) -> f32 {
        self.accumulator
    }
}
