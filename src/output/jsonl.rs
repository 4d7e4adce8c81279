use super::FrameSink;
use crate::error::OutputError;
use crate::particle::Particle;
use crate::simulation::Scene;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// One line of [`JsonLines`] output.
#[derive(Serialize)]
pub struct FrameRecord<'a> {
    pub frame: u64,
    /// Scene time in seconds.
    pub time: f32,
    /// Live particles with their position and trace.
    pub particles: &'a [Particle],
}

/// Writes one JSON object per frame, newline separated.
///
/// Frame 0 is the initial state; each step appends the next frame.
pub struct JsonLines<W: Write> {
    writer: W,
}

impl JsonLines<BufWriter<File>> {
    /// Write to a new file at `path`, truncating any existing one.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, OutputError> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> JsonLines<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_record(&mut self, scene: &Scene, frame: u64) -> Result<(), OutputError> {
        let record = FrameRecord {
            frame,
            time: scene.elapsed(),
            particles: scene.particles(),
        };
        serde_json::to_writer(&mut self.writer, &record)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }
}

impl<W: Write> FrameSink for JsonLines<W> {
    fn begin(&mut self, scene: &Scene) -> Result<(), OutputError> {
        self.write_record(scene, 0)
    }

    fn frame(&mut self, scene: &Scene, frame: u64) -> Result<(), OutputError> {
        self.write_record(scene, frame)
    }

    fn finish(&mut self) -> Result<(), OutputError> {
        self.writer.flush()?;
        Ok(())
    }
}
