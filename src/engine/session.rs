//! Immersive session transitions and desktop input

use winit::event::{DeviceEvent, ElementState};
use winit::keyboard::PhysicalKey;

use crate::gfx::camera::CameraState;
use crate::gfx::scene::{Highlight, NodeId};

use super::{Engine, EngineCallbacks, EngineError};

impl<C: EngineCallbacks> Engine<C> {
    /// Records whether the platform can run immersive sessions
    pub fn set_xr_supported(&mut self, supported: bool) {
        self.session.set_supported(supported);
        log::info!("immersive VR supported: {}", supported);
        self.callbacks.on_xr_supported(supported);
    }

    /// Enters an immersive session
    ///
    /// The desktop camera is saved and its controls disabled until the
    /// session ends. Grabs, ray tints, hover and pending reverts from the
    /// desktop are dropped; released objects resume falling.
    pub fn start_session(&mut self) -> Result<(), EngineError> {
        self.session.request()?;

        self.saved_camera = Some(CameraState::save(&self.camera.camera));
        self.camera.controller.release_all();
        self.camera.controller.enabled = false;

        log::info!("immersive session started");
        self.callbacks.on_xr_start();

        for object in self.reset_transient(false) {
            self.fall.start_falling(object);
        }
        Ok(())
    }

    /// Leaves the immersive session
    ///
    /// Restores the desktop camera and drops every piece of transient
    /// interaction state, so nothing refers to objects across the
    /// transition. Fall states are cleared too, so objects stop where they
    /// are. Hover is reported as `None` exactly once, without first
    /// re-reporting the last hovered name.
    pub fn end_session(&mut self) -> Result<(), EngineError> {
        self.session.end()?;

        if let Some(saved) = self.saved_camera.take() {
            saved.restore(&mut self.camera.camera);
        }
        self.camera.controller.enabled = true;

        log::info!("immersive session ended");
        self.callbacks.on_xr_end();

        self.reset_transient(true);
        self.fall.clear();
        Ok(())
    }

    /// Releases grabs and clears tints, reverts, hover, buttons and poses
    ///
    /// Returns the objects that were held. Hover is reported as `None` when
    /// something was hovered, or unconditionally with `always_report_hover`.
    fn reset_transient(&mut self, always_report_hover: bool) -> Vec<NodeId> {
        let mut released = Vec::new();
        for index in 0..self.controllers.len() {
            let state = &mut self.controllers[index];
            state.pose = None;
            state.ray_length = self.config.ray_length;
            if let Some(object) = state.release() {
                self.scene.set_highlight_recursive(object, Highlight::None);
                released.push(object);
            }
        }
        if !released.is_empty() {
            log::debug!("released {} held objects", released.len());
            self.callbacks.on_object_selected(None, 0);
        }

        while let Some(mesh) = self.intersected.pop() {
            if let Some(node) = self.scene.get_mut(mesh) {
                node.highlight = Highlight::None;
            }
        }
        self.reverts.clear();

        if self.last_hovered.take().is_some() || always_report_hover {
            self.callbacks.on_object_hovered(None, 0);
        }

        self.buttons.clear();
        self.viewer = None;
        released
    }

    /// Window resized; only the desktop projection depends on it
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.camera.camera.resize_projection(width, height);
    }

    /// Feeds a raw mouse event to the desktop camera
    ///
    /// Returns `true` if the camera moved. Ignored during immersive sessions.
    pub fn process_device_event(&mut self, event: &DeviceEvent) -> bool {
        self.camera.process_event(event)
    }

    pub fn process_key(&mut self, key: PhysicalKey, state: ElementState) {
        let camera = &mut self.camera;
        camera.controller.process_key(key, state, &mut camera.camera);
    }
}
