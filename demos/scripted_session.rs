//! # Scripted VR Session
//!
//! Drives the engine through one immersive session without a headset. Poses,
//! trigger events and gamepad buttons are scripted frame by frame and every
//! frame is "rendered" by a renderer that logs the pointer lines.
//!
//! ## Usage:
//! ```bash
//! RUST_LOG=debug cargo run --example scripted_session
//! ```
//!
//! ## What happens:
//! - Two primitives are placed on the model ring and fall to the floor
//! - Controller 0 grabs the cube and drags it into the right wall
//! - Controller 1 points at the sphere and the delete button removes it
//! - A copy of a random model is spawned in front of the viewer
//! - The session ends and the desktop camera comes back

use std::time::Duration;

use anyhow::{bail, Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use xr_room::gfx::camera::OrbitCamera;
use xr_room::prelude::*;

const FRAME: Duration = Duration::from_millis(16);

/// Logs what a real renderer would draw
#[derive(Default)]
struct LoggingRenderer {
    frames: u64,
}

impl FrameRenderer for LoggingRenderer {
    fn render(&mut self, scene: &SceneGraph, _camera: &OrbitCamera, pointers: &[Option<PointerLine>]) {
        self.frames += 1;
        if self.frames % 30 != 0 {
            return;
        }
        log::info!("frame {}: {} nodes", self.frames, scene.len());
        for (index, pointer) in pointers.iter().enumerate() {
            if let Some(pointer) = pointer {
                log::info!("  pointer {} ends at {:?}", index, pointer.end());
            }
        }
    }
}

/// Delete button state for both input sources
fn buttons(delete_pressed: bool) -> Vec<InputSource> {
    let mut second = [false; 6];
    second[4] = delete_pressed;
    vec![
        InputSource::with_buttons(&[false; 6]),
        InputSource::with_buttons(&second),
    ]
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut engine = xr_room::default();
    let mut renderer = LoggingRenderer::default();
    let mut rng = StdRng::seed_from_u64(42);
    let mut time = Duration::ZERO;

    let cube = engine
        .add_model("Model_1", Mesh::from_geometry(&generate_cube()), 0, 2)
        .context("adding cube")?;
    let sphere = engine
        .add_model("Model_2", Mesh::from_geometry(&generate_sphere(16, 8)), 1, 2)
        .context("adding sphere")?;

    // Let both land before entering VR
    while engine.fall().is_falling(cube) || engine.fall().is_falling(sphere) {
        time += FRAME;
        engine.frame(FrameInput::at(time), &mut renderer);
        if time > Duration::from_secs(120) {
            bail!("models never reached the floor");
        }
    }
    log::info!("models landed after {:?}", time);

    engine.set_xr_supported(true);
    engine.start_session().context("starting immersive session")?;
    let viewer = Pose::from_position(Vector3::new(0.0, 1.5, 4.0));

    // Grab the cube from above
    let cube_position = engine
        .scene()
        .world_position(cube)
        .context("cube vanished")?;
    let grab = Pose::looking_along(cube_position + Vector3::new(0.0, 3.0, 0.0), -Vector3::unit_y());
    time += FRAME;
    engine.frame(
        FrameInput::at(time)
            .with_viewer(viewer)
            .with_controller(0, grab)
            .with_event(ControllerEvent::SelectStart { controller: 0 })
            .with_input_sources(buttons(false)),
        &mut renderer,
    );
    log::info!("selected: {:?}", engine.callbacks().selected_object);

    // Drag it well past the right wall
    for step in 1..=40 {
        time += FRAME;
        let pose = Pose::looking_along(grab.position + Vector3::new(step as f32 * 0.25, 0.0, 0.0), -Vector3::unit_y());
        engine.frame(
            FrameInput::at(time)
                .with_viewer(viewer)
                .with_controller(0, pose)
                .with_input_sources(buttons(false)),
            &mut renderer,
        );
    }
    log::info!(
        "cube held at {:?}, status {:?}",
        engine.scene().world_position(cube),
        engine.callbacks().status()
    );

    time += FRAME;
    engine.frame(
        FrameInput::at(time)
            .with_viewer(viewer)
            .with_event(ControllerEvent::SelectEnd { controller: 0 })
            .with_input_sources(buttons(false)),
        &mut renderer,
    );

    // Point controller 1 at the sphere and press delete
    let sphere_position = engine
        .scene()
        .world_position(sphere)
        .context("sphere vanished")?;
    let aim = Pose::looking_along(viewer.position, sphere_position + Vector3::new(0.0, 0.5, 0.0) - viewer.position);
    for pressed in [false, true, true, false] {
        time += FRAME;
        engine.frame(
            FrameInput::at(time)
                .with_viewer(viewer)
                .with_controller(1, aim)
                .with_input_sources(buttons(pressed)),
            &mut renderer,
        );
    }
    log::info!("sphere deleted: {}", !engine.scene().contains(sphere));

    if let Some(copy) = engine.spawn_random_copy(&mut rng)? {
        log::info!(
            "spawned {:?} at {:?}",
            engine.scene().get(copy).map(|node| node.display_name().to_owned()),
            engine.scene().world_position(copy)
        );
    }
    for _ in 0..60 {
        time += FRAME;
        engine.frame(FrameInput::at(time).with_viewer(viewer), &mut renderer);
    }

    engine.end_session().context("ending immersive session")?;
    log::info!(
        "session over after {} frames, {} objects in the room, button reads {:?}",
        renderer.frames,
        engine.objects().len(),
        engine.callbacks().xr_button_label()
    );
    Ok(())
}
