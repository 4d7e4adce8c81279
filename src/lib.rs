//! # fieldtrace
//!
//! Particles drifting through a 2D vector field, each leaving a short trace,
//! rendered frame by frame.
//!
//! A scene starts with a batch of particles scattered over a square, adds a
//! new batch on a fixed interval, moves every particle along the field with an
//! explicit Euler step, and drops particles (with their traces) once they
//! leave the viewport.
//!
//! ## Quick Start
//!
//! ```no_run
//! use fieldtrace::prelude::*;
//!
//! let mut scene = Simulation::new()
//!     .with_field(VectorField::Circular)
//!     .with_initial_count(200)
//!     .with_spawn(0.1, 20)
//!     .with_trace_length(15)
//!     .build();
//!
//! let mut time = Time::new(15.0);
//! let frames = time.total_frames(3.0);
//! let mut sink = PngSequence::new("frames").unwrap();
//! scene.run(&mut time, frames, &mut sink).unwrap();
//! ```
//!
//! ## Core Concepts
//!
//! | Piece | Role |
//! |-------|------|
//! | [`VectorField`] | Maps a position to a velocity |
//! | [`Particle`] / [`Trace`] | Position, look, and capped path history |
//! | [`Spawner`] | Emits fixed-size batches on a fixed interval |
//! | [`Viewport`] | Bounds outside of which particles are removed |
//! | [`Scene`] | Owns all live particles and steps them |
//! | [`FrameSink`] | Consumes the scene after every step |

pub mod bounds;
pub mod config;
pub mod error;
pub mod field;
pub mod output;
pub mod particle;
mod simulation;
pub mod spawn;
pub mod time;
pub mod visuals;

pub use bounds::Viewport;
pub use config::SceneConfig;
pub use error::{ConfigError, OutputError};
pub use field::VectorField;
pub use glam::{Mat2, Vec2, Vec3};
pub use output::{FrameSink, JsonLines, NullSink, PngSequence};
pub use particle::{Particle, Trace};
pub use simulation::{RunSummary, Scene, Simulation, StepReport};
pub use spawn::{ParticleTemplate, SpawnContext, Spawner};
pub use visuals::{ColorMode, VisualConfig};

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use fieldtrace::prelude::*;
/// ```
pub mod prelude {
    pub use crate::bounds::Viewport;
    pub use crate::config::SceneConfig;
    pub use crate::field::VectorField;
    pub use crate::output::{FrameSink, JsonLines, NullSink, PngSequence};
    pub use crate::particle::{Particle, Trace};
    pub use crate::simulation::{Scene, Simulation};
    pub use crate::time::Time;
    pub use crate::visuals::{colors, ColorMode, VisualConfig};
    pub use crate::{Mat2, Vec2, Vec3};
}
