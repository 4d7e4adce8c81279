//! End-to-end tests for scene stepping and frame output.
//!
//! These drive whole scenes through many frames and check the properties
//! that must hold after every step.

use fieldtrace::prelude::*;
use fieldtrace::{RunSummary, StepReport};

// ============================================================================
// Stepping
// ============================================================================

fn reference_scene(seed: u64) -> Scene {
    Simulation::new().with_seed(seed).build()
}

#[test]
fn test_traces_stay_capped_over_a_full_run() {
    let mut scene = reference_scene(1);
    let mut time = Time::new(15.0);
    for _ in 0..time.total_frames(3.0) {
        scene.step(time.tick());
        assert!(scene.particles().iter().all(|p| p.trace.len() <= 15));
    }
}

#[test]
fn test_every_survivor_is_inside_viewport_after_each_step() {
    // Saddle flow pushes particles out along x; some must leave.
    let mut scene = Simulation::new()
        .with_field(VectorField::Hyperbolic)
        .with_viewport(Viewport::new(6.0, 6.0))
        .with_seed(2)
        .build();

    let mut removed = 0;
    for _ in 0..60 {
        let report = scene.step(1.0 / 15.0);
        removed += report.removed;
        let viewport = scene.viewport();
        assert!(scene.particles().iter().all(|p| viewport.contains(p.position)));
    }
    assert!(removed > 0);
}

#[test]
fn test_batches_accumulate_before_anything_leaves() {
    let mut scene = Simulation::new()
        .with_initial_count(200)
        .with_spawn(0.1, 20)
        .with_seed(3)
        .build();

    // Default viewport is far larger than the spawn square; nothing exits in 0.2s.
    let first = scene.step(0.1);
    assert_eq!(first, StepReport { spawned: 20, removed: 0, alive: 220 });
    let second = scene.step(0.1);
    assert_eq!(second, StepReport { spawned: 20, removed: 0, alive: 240 });
}

#[test]
fn test_circular_orbits_keep_their_radius() {
    let mut scene = Simulation::new()
        .with_initial_count(50)
        .with_spawn(100.0, 0)
        .with_seed(4)
        .build();
    let start: Vec<f32> = scene.particles().iter().map(|p| p.position.length()).collect();

    // Small steps keep the Euler drift small.
    for _ in 0..100 {
        scene.step(0.001);
    }
    for (p, r0) in scene.particles().iter().zip(start) {
        assert!((p.position.length() - r0).abs() < 1e-3 * r0.max(1.0));
    }
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let mut a = reference_scene(42);
    let mut b = reference_scene(42);
    for _ in 0..20 {
        a.step(1.0 / 15.0);
        b.step(1.0 / 15.0);
    }
    assert_eq!(a.particles(), b.particles());
}

// ============================================================================
// Output
// ============================================================================

#[test]
fn test_png_sequence_writes_initial_frame_and_one_per_step() {
    let dir = tempfile::tempdir().unwrap();
    let visuals = VisualConfig {
        resolution: [96, 54],
        ..Default::default()
    };
    let mut scene = Simulation::new()
        .with_initial_count(20)
        .with_visuals(visuals)
        .with_seed(5)
        .build();
    let mut time = Time::new(15.0);
    let mut sink = PngSequence::new(dir.path()).unwrap();

    let summary: RunSummary = scene.run(&mut time, 3, &mut sink).unwrap();
    assert_eq!(summary.frames, 3);
    // Initial state plus one image per step, numbered like the JSON lines output.
    assert_eq!(sink.written(), 4);

    for frame in 0..=3 {
        let img = image::open(sink.frame_path(frame)).unwrap().to_rgb8();
        assert_eq!(img.dimensions(), (96, 54));
    }
    assert!(!sink.frame_path(4).exists());
}

#[test]
fn test_png_and_json_sinks_number_frames_alike() {
    let dir = tempfile::tempdir().unwrap();
    let visuals = VisualConfig {
        resolution: [32, 18],
        ..Default::default()
    };

    let mut png_scene = Simulation::new().with_visuals(visuals.clone()).with_seed(8).build();
    let mut png = PngSequence::new(dir.path()).unwrap();
    png_scene.run(&mut Time::new(15.0), 2, &mut png).unwrap();

    let mut json_scene = Simulation::new().with_visuals(visuals).with_seed(8).build();
    let mut json = JsonLines::new(Vec::new());
    json_scene.run(&mut Time::new(15.0), 2, &mut json).unwrap();
    let lines = String::from_utf8(json.into_inner()).unwrap();

    assert_eq!(png.written() as usize, lines.lines().count());
}

#[test]
fn test_rendered_frame_shows_particles() {
    let dir = tempfile::tempdir().unwrap();
    let visuals = VisualConfig {
        resolution: [160, 90],
        particle_radius: 0.2,
        ..Default::default()
    };
    let mut scene = Simulation::new()
        .with_initial_count(30)
        .with_visuals(visuals)
        .with_seed(6)
        .build();
    let mut time = Time::new(15.0);
    let mut sink = PngSequence::new(dir.path()).unwrap();
    scene.run(&mut time, 1, &mut sink).unwrap();

    let img = image::open(sink.frame_path(1)).unwrap().to_rgb8();
    assert!(img.pixels().any(|p| p.0 != [0, 0, 0]));
}

#[test]
fn test_null_sink_run_summary() {
    let mut scene = reference_scene(7);
    let mut time = Time::new(15.0);
    let frames = time.total_frames(3.0);
    let summary = scene.run(&mut time, frames, &mut NullSink).unwrap();

    assert_eq!(summary.frames, 45);
    assert_eq!(summary.alive, scene.len());
    assert_eq!(summary.alive + summary.removed, 200 + summary.spawned);
    assert!(summary.peak_alive >= summary.alive);
}
