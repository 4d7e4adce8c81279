//! Simulation builder and the scene loop.
//!
//! [`Simulation`] collects settings; [`Simulation::build`] produces a
//! [`Scene`] owning every live particle. Each [`Scene::step`]:
//!
//! 1. advances every particle through the field (explicit Euler),
//! 2. ticks the spawner and appends a batch when the interval elapsed,
//! 3. removes particles outside the viewport.
//!
//! Particles spawned during a step start moving on the next one.

use crate::bounds::Viewport;
use crate::config::SceneConfig;
use crate::error::OutputError;
use crate::field::VectorField;
use crate::output::FrameSink;
use crate::particle::Particle;
use crate::spawn::{ParticleTemplate, SpawnContext, Spawner};
use crate::time::Time;
use crate::visuals::VisualConfig;
use log::{debug, info, trace};

/// A scene builder.
///
/// Use method chaining to configure, then call `.build()`.
///
/// ```
/// use fieldtrace::{Simulation, VectorField};
///
/// let mut scene = Simulation::new()
///     .with_field(VectorField::Circular)
///     .with_initial_count(10)
///     .with_spawn(0.1, 5)
///     .with_seed(1)
///     .build();
///
/// scene.step(1.0 / 15.0);
/// assert_eq!(scene.len(), 10);
/// ```
pub struct Simulation {
    config: SceneConfig,
}

impl Simulation {
    /// Create a builder with the default scene settings.
    pub fn new() -> Self {
        Self {
            config: SceneConfig::default(),
        }
    }

    /// Start from a loaded configuration.
    pub fn from_config(config: SceneConfig) -> Self {
        Self { config }
    }

    /// Set the velocity field.
    pub fn with_field(mut self, field: VectorField) -> Self {
        self.config.field = field;
        self
    }

    /// Set the number of particles present before the first step.
    pub fn with_initial_count(mut self, count: usize) -> Self {
        self.config.initial_count = count;
        self
    }

    /// Spawn `batch_size` particles every `interval` seconds.
    pub fn with_spawn(mut self, interval: f32, batch_size: usize) -> Self {
        self.config.spawn_interval = interval;
        self.config.batch_size = batch_size;
        self
    }

    /// Set the half-size of the square new particles appear in.
    pub fn with_spawn_extent(mut self, extent: f32) -> Self {
        self.config.spawn_extent = extent;
        self
    }

    /// Set the removal bounds.
    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.config.viewport = Some(viewport);
        self
    }

    /// Set the motion speed multiplier.
    pub fn with_time_scale(mut self, time_scale: f32) -> Self {
        self.config.time_scale = time_scale;
        self
    }

    /// Set how many points each trace keeps.
    pub fn with_trace_length(mut self, max_len: usize) -> Self {
        self.config.max_trace_length = max_len;
        self
    }

    /// Set the look of rendered frames.
    pub fn with_visuals(mut self, visuals: VisualConfig) -> Self {
        self.config.visuals = visuals;
        self
    }

    /// Seed the RNG for a reproducible layout.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Current settings.
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Create the scene with its initial batch of particles.
    pub fn build(self) -> Scene {
        let config = self.config;
        let template = ParticleTemplate {
            radius: config.visuals.particle_radius,
            color: config.visuals.particle_color,
            max_trace_length: config.max_trace_length,
        };
        let mut spawn_ctx = SpawnContext::new(config.spawn_extent, config.seed);
        let particles = template.batch(&mut spawn_ctx, config.initial_count);
        let spawner = Spawner::new(config.spawn_interval, config.batch_size, template);
        let viewport = config.effective_viewport();

        info!(
            "scene: {} field, {} initial particles, {} every {}s, viewport {}x{}",
            config.field.name(),
            particles.len(),
            config.batch_size,
            config.spawn_interval,
            viewport.half_width,
            viewport.half_height,
        );

        Scene {
            field: config.field,
            time_scale: config.time_scale,
            viewport,
            visuals: config.visuals,
            spawner,
            spawn_ctx,
            particles,
            elapsed: 0.0,
            frame: 0,
        }
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of one [`Scene::step`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Particles added by the spawner.
    pub spawned: usize,
    /// Particles removed for leaving the viewport.
    pub removed: usize,
    /// Particles alive after the step.
    pub alive: usize,
}

/// Totals over a whole [`Scene::run`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: u64,
    pub spawned: usize,
    pub removed: usize,
    /// Largest live particle count seen after any step.
    pub peak_alive: usize,
    /// Live particles at the end.
    pub alive: usize,
}

/// All live particles and the rules that move them.
pub struct Scene {
    field: VectorField,
    time_scale: f32,
    viewport: Viewport,
    visuals: VisualConfig,
    spawner: Spawner,
    spawn_ctx: SpawnContext,
    particles: Vec<Particle>,
    elapsed: f32,
    frame: u64,
}

impl Scene {
    /// Advance the scene by `dt` seconds.
    pub fn step(&mut self, dt: f32) -> StepReport {
        for particle in &mut self.particles {
            particle.advance(&self.field, dt, self.time_scale);
        }

        let mut spawned = 0;
        if let Some(batch) = self.spawner.tick(dt, &mut self.spawn_ctx) {
            spawned = batch.len();
            self.particles.extend(batch);
            debug!("frame {}: spawned batch of {}", self.frame, spawned);
        }

        let removed = self.viewport.cull(&mut self.particles);
        if removed > 0 {
            debug!("frame {}: removed {} offscreen", self.frame, removed);
        }

        self.elapsed += dt;
        self.frame += 1;

        let report = StepReport {
            spawned,
            removed,
            alive: self.particles.len(),
        };
        trace!("frame {} at {:.3}s: {:?}", self.frame, self.elapsed, report);
        report
    }

    /// Step `frames` times with deltas from `time`, handing each frame to `sink`.
    ///
    /// The sink sees the initial state first (`begin`) and then the state
    /// after every step.
    pub fn run(
        &mut self,
        time: &mut Time,
        frames: u64,
        sink: &mut dyn FrameSink,
    ) -> Result<RunSummary, OutputError> {
        let mut summary = RunSummary {
            peak_alive: self.particles.len(),
            ..Default::default()
        };

        sink.begin(self)?;
        for _ in 0..frames {
            let dt = time.tick();
            let report = self.step(dt);
            summary.frames += 1;
            summary.spawned += report.spawned;
            summary.removed += report.removed;
            summary.peak_alive = summary.peak_alive.max(report.alive);
            sink.frame(self, time.frame())?;
        }
        sink.finish()?;

        summary.alive = self.particles.len();
        info!(
            "rendered {} frames ({:.2}s): spawned {}, removed {}, peak {}, final {}",
            summary.frames,
            self.elapsed,
            summary.spawned,
            summary.removed,
            summary.peak_alive,
            summary.alive,
        );
        Ok(summary)
    }

    /// Live particles, in spawn order.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Scene time in seconds.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Steps taken so far.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn field(&self) -> &VectorField {
        &self.field
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn visuals(&self) -> &VisualConfig {
        &self.visuals
    }

    pub fn spawner(&self) -> &Spawner {
        &self.spawner
    }

    /// Insert a particle directly, bypassing the spawner.
    pub fn insert(&mut self, particle: Particle) {
        self.particles.push(particle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec2, Vec3};

    fn quiet_scene(initial: usize, batch: usize) -> Scene {
        // Spawn near the centre of a huge viewport so nothing leaves.
        Simulation::new()
            .with_initial_count(initial)
            .with_spawn(0.1, batch)
            .with_spawn_extent(1.0)
            .with_viewport(Viewport::new(1000.0, 1000.0))
            .with_seed(11)
            .build()
    }

    #[test]
    fn test_initial_batch() {
        let scene = quiet_scene(200, 20);
        assert_eq!(scene.len(), 200);
        assert!(scene.particles().iter().all(|p| p.trace.is_empty()));
    }

    #[test]
    fn test_spawn_after_one_interval() {
        let mut scene = quiet_scene(200, 20);
        let report = scene.step(0.1);
        assert_eq!(report.spawned, 20);
        assert_eq!(report.removed, 0);
        assert_eq!(scene.len(), 220);
    }

    #[test]
    fn test_new_particles_move_next_step() {
        let mut scene = quiet_scene(0, 3);
        scene.step(0.1);
        let fresh: Vec<Vec2> = scene.particles().iter().map(|p| p.position).collect();
        assert!(scene.particles().iter().all(|p| p.trace.is_empty()));

        scene.step(0.05);
        for (p, before) in scene.particles().iter().zip(fresh) {
            assert_ne!(p.position, before);
            assert_eq!(p.trace.len(), 1);
        }
    }

    #[test]
    fn test_zero_dt_changes_nothing() {
        let mut scene = quiet_scene(50, 20);
        let before: Vec<Vec2> = scene.particles().iter().map(|p| p.position).collect();
        let report = scene.step(0.0);
        let after: Vec<Vec2> = scene.particles().iter().map(|p| p.position).collect();
        assert_eq!(before, after);
        assert_eq!(report.spawned, 0);
    }

    #[test]
    fn test_offscreen_removed_within_one_step() {
        let mut scene = Simulation::new()
            .with_initial_count(0)
            .with_spawn(10.0, 0)
            .with_viewport(Viewport::new(2.0, 2.0))
            .with_seed(3)
            .build();
        scene.insert(Particle::new(Vec2::new(5.0, 0.0), 0.05, Vec3::ONE, 4));
        scene.insert(Particle::new(Vec2::new(0.5, 0.0), 0.05, Vec3::ONE, 4));

        let report = scene.step(1.0 / 15.0);
        assert_eq!(report.removed, 1);
        assert_eq!(scene.len(), 1);
        assert!(scene.viewport().contains(scene.particles()[0].position));
    }

    #[test]
    fn test_non_positive_interval_never_spawns() {
        for interval in [0.0, f32::NAN] {
            let mut scene = Simulation::new()
                .with_initial_count(5)
                .with_spawn(interval, 10)
                .with_seed(12)
                .build();
            assert_eq!(scene.step(0.0).spawned, 0);
            assert_eq!(scene.step(1.0 / 15.0).spawned, 0);
            assert_eq!(scene.len(), 5);
        }
    }

    #[test]
    fn test_elapsed_and_frame() {
        let mut scene = quiet_scene(1, 1);
        scene.step(0.25);
        scene.step(0.25);
        assert_eq!(scene.frame(), 2);
        assert!((scene.elapsed() - 0.5).abs() < 1e-6);
    }
}
