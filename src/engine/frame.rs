use std::time::Duration;

use crate::constants::CONTROLLER_COUNT;
use crate::gfx::renderer::{FrameRenderer, PointerLine};
use crate::simulation::Simulation;
use crate::xr::{ControllerEvent, InputSource, Pose};

use super::{Engine, EngineCallbacks};

/// Everything the outside world tells the engine about one frame
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    /// Monotonic time of this frame
    pub time: Duration,
    /// Controller poses; `None` while a controller is not tracked
    pub controllers: [Option<Pose>; CONTROLLER_COUNT],
    /// Head pose during an immersive session
    pub viewer: Option<Pose>,
    pub events: Vec<ControllerEvent>,
    pub input_sources: Vec<InputSource>,
}

impl FrameInput {
    pub fn at(time: Duration) -> Self {
        Self {
            time,
            ..Default::default()
        }
    }

    pub fn with_controller(mut self, index: usize, pose: Pose) -> Self {
        if let Some(slot) = self.controllers.get_mut(index) {
            *slot = Some(pose);
        }
        self
    }

    pub fn with_viewer(mut self, pose: Pose) -> Self {
        self.viewer = Some(pose);
        self
    }

    pub fn with_event(mut self, event: ControllerEvent) -> Self {
        self.events.push(event);
        self
    }

    pub fn with_input_sources(mut self, sources: Vec<InputSource>) -> Self {
        self.input_sources = sources;
        self
    }
}

impl<C: EngineCallbacks> Engine<C> {
    /// Runs one frame and hands the result to `renderer`
    pub fn frame<R: FrameRenderer + ?Sized>(&mut self, input: FrameInput, renderer: &mut R) {
        let FrameInput {
            time,
            controllers,
            viewer,
            events,
            input_sources,
        } = input;

        self.time = time;
        for (state, pose) in self.controllers.iter_mut().zip(controllers) {
            state.pose = pose;
        }
        self.viewer = viewer;

        for event in events {
            self.handle_event(event);
        }

        let restored = self.reverts.run_due(time, &mut self.scene);
        if restored > 0 {
            log::trace!("restored {} blocked meshes", restored);
        }

        self.fall.update(&mut self.scene, &self.room);

        for index in 0..CONTROLLER_COUNT {
            self.update_drag(index);
        }

        self.clean_intersected();
        for index in 0..CONTROLLER_COUNT {
            self.intersect_objects(index);
        }
        self.update_hover();

        if self.session.is_active() {
            self.check_buttons(&input_sources);
        }

        let pointers = self.pointer_lines();
        renderer.render(&self.scene, &self.camera.camera, &pointers);
    }

    fn check_buttons(&mut self, sources: &[InputSource]) {
        let pressed = self.buttons.poll(sources);
        if pressed.contains(&self.config.delete_binding) {
            log::debug!("delete button pressed");
            self.handle_delete();
        }
    }

    fn pointer_lines(&self) -> [Option<PointerLine>; CONTROLLER_COUNT] {
        let mut lines = [None; CONTROLLER_COUNT];
        for (line, state) in lines.iter_mut().zip(&self.controllers) {
            *line = state.pose.map(|pose| PointerLine {
                origin: pose.position,
                direction: pose.forward(),
                length: state.ray_length,
            });
        }
        lines
    }
}
