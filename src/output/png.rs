use super::raster::Canvas;
use super::FrameSink;
use crate::error::OutputError;
use crate::simulation::Scene;
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

/// Writes each frame as `frame_NNNNN.png` into a directory.
///
/// `frame_00000.png` is the initial state; each step adds the next number.
///
/// The numbered sequence can be assembled into a video with any external
/// encoder, e.g. `ffmpeg -framerate 15 -i frame_%05d.png out.mp4`.
pub struct PngSequence {
    dir: PathBuf,
    written: u64,
}

impl PngSequence {
    /// Create the sink, creating `dir` if needed.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self, OutputError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir, written: 0 })
    }

    /// Path of the image for `frame`.
    pub fn frame_path(&self, frame: u64) -> PathBuf {
        self.dir.join(format!("frame_{:05}.png", frame))
    }

    /// Number of images written so far.
    pub fn written(&self) -> u64 {
        self.written
    }
}

impl FrameSink for PngSequence {
    fn begin(&mut self, scene: &Scene) -> Result<(), OutputError> {
        let [w, h] = scene.visuals().resolution;
        info!("writing {}x{} PNG frames to {}", w, h, self.dir.display());
        self.frame(scene, 0)
    }

    fn frame(&mut self, scene: &Scene, frame: u64) -> Result<(), OutputError> {
        let mut canvas = Canvas::new(scene.visuals());
        canvas.draw_particles(scene.particles(), scene.visuals());

        let path = self.frame_path(frame);
        canvas.image().save(&path)?;
        self.written += 1;
        debug!("wrote {}", path.display());
        Ok(())
    }

    fn finish(&mut self) -> Result<(), OutputError> {
        info!("wrote {} frames to {}", self.written, self.dir.display());
        Ok(())
    }
}
