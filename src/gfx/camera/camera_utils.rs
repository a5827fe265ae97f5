use cgmath::{Rad, Vector3};
use winit::event::DeviceEvent;

use super::{camera_controller::CameraController, orbit_camera::OrbitCamera};

pub struct CameraManager {
    pub camera: OrbitCamera,
    pub controller: CameraController,
}

impl CameraManager {
    pub fn new(camera: OrbitCamera, controller: CameraController) -> Self {
        Self { camera, controller }
    }

    /// Returns `true` if the camera moved
    pub fn process_event(&mut self, event: &DeviceEvent) -> bool {
        self.controller.process_events(event, &mut self.camera)
    }
}

impl Default for CameraManager {
    fn default() -> Self {
        Self::new(OrbitCamera::default(), CameraController::new(0.005, 0.1))
    }
}

/// Snapshot of the desktop camera taken when an immersive session starts
///
/// The headset drives the view during the session and may leave the shared
/// camera in any state, so it is put back on session end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    pub eye: Vector3<f32>,
    pub target: Vector3<f32>,
    pub distance: f32,
    pub pitch: f32,
    pub yaw: f32,
    pub fovy: Rad<f32>,
    pub aspect: f32,
}

impl CameraState {
    pub fn save(camera: &OrbitCamera) -> Self {
        Self {
            eye: camera.eye,
            target: camera.target,
            distance: camera.distance,
            pitch: camera.pitch,
            yaw: camera.yaw,
            fovy: camera.fovy,
            aspect: camera.aspect,
        }
    }

    pub fn restore(&self, camera: &mut OrbitCamera) {
        camera.eye = self.eye;
        camera.target = self.target;
        camera.distance = self.distance;
        camera.pitch = self.pitch;
        camera.yaw = self.yaw;
        camera.fovy = self.fovy;
        camera.aspect = self.aspect;
    }
}

impl Default for CameraState {
    fn default() -> Self {
        Self::save(&OrbitCamera::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Deg;

    #[test]
    fn test_save_restore_round_trip() {
        let mut camera = OrbitCamera::default();
        camera.set_yaw(0.7);
        camera.pan((0.5, 0.25));
        let saved = CameraState::save(&camera);
        let expected = camera;

        camera.reset_to_default();
        camera.fovy = Deg(90.0).into();
        camera.aspect = 2.0;
        saved.restore(&mut camera);

        assert_eq!(camera, expected);
    }
}
