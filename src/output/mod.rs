//! Frame output.
//!
//! A [`FrameSink`] receives the scene once before the first step and again
//! after every step. Sinks never mutate the scene.
//!
//! | Sink | Output |
//! |------|--------|
//! | [`PngSequence`] | `frame_00000.png` (initial state), `frame_00001.png`, ... |
//! | [`JsonLines`] | one JSON object per frame, frame 0 first |
//! | [`NullSink`] | nothing |

mod jsonl;
mod png;
mod raster;

pub use jsonl::{FrameRecord, JsonLines};
pub use png::PngSequence;
pub use raster::Canvas;

use crate::error::OutputError;
use crate::simulation::Scene;

/// Consumer of per-frame scene state.
pub trait FrameSink {
    /// Called once with the initial state, before any step.
    ///
    /// Sinks that write files record it as frame 0.
    fn begin(&mut self, _scene: &Scene) -> Result<(), OutputError> {
        Ok(())
    }

    /// Called after each step. `frame` starts at 1.
    fn frame(&mut self, scene: &Scene, frame: u64) -> Result<(), OutputError>;

    /// Called once after the last frame.
    fn finish(&mut self) -> Result<(), OutputError> {
        Ok(())
    }
}

/// Discards every frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl FrameSink for NullSink {
    fn frame(&mut self, _scene: &Scene, _frame: u64) -> Result<(), OutputError> {
        Ok(())
    }
}
