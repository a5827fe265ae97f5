use winit::{
    dpi::PhysicalPosition,
    event::{DeviceEvent, ElementState, MouseScrollDelta},
    keyboard::{KeyCode, PhysicalKey},
};

use super::orbit_camera::OrbitCamera;

pub struct CameraController {
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    /// Cleared while an immersive session owns the view
    pub enabled: bool,
    is_shift_held: bool,
    is_mouse_pressed: bool,
}

impl CameraController {
    pub fn new(rotate_speed: f32, zoom_speed: f32) -> Self {
        Self {
            rotate_speed,
            zoom_speed,
            pan_speed: 0.01,
            enabled: true,
            is_shift_held: false,
            is_mouse_pressed: false,
        }
    }

    /// Applies a raw device event to the camera
    ///
    /// Returns `true` if the camera moved and a redraw is wanted.
    pub fn process_events(&mut self, event: &DeviceEvent, camera: &mut OrbitCamera) -> bool {
        if !self.enabled {
            return false;
        }

        match event {
            DeviceEvent::Button {
                button: 0, // Left Mouse Button
                state,
            } => {
                self.is_mouse_pressed = *state == ElementState::Pressed;
                false
            }
            DeviceEvent::MouseWheel { delta } => {
                let scroll_amount = -match delta {
                    MouseScrollDelta::LineDelta(_, scroll) => *scroll,
                    MouseScrollDelta::PixelDelta(PhysicalPosition { y: scroll, .. }) => {
                        *scroll as f32
                    }
                };
                camera.add_distance(scroll_amount * self.zoom_speed);
                true
            }
            DeviceEvent::MouseMotion { delta } if self.is_mouse_pressed => {
                if self.is_shift_held {
                    // SHIFT + DRAG = PAN (move focus point)
                    camera.pan((
                        -delta.0 as f32 * self.pan_speed,
                        delta.1 as f32 * self.pan_speed,
                    ));
                } else {
                    // NORMAL DRAG = ROTATE (orbit around focus)
                    camera.add_yaw(-delta.0 as f32 * self.rotate_speed);
                    camera.add_pitch(delta.1 as f32 * self.rotate_speed);
                }
                true
            }
            _ => false,
        }
    }

    pub fn process_key(&mut self, key: PhysicalKey, state: ElementState, camera: &mut OrbitCamera) {
        match key {
            PhysicalKey::Code(KeyCode::ShiftLeft | KeyCode::ShiftRight) => {
                self.is_shift_held = state == ElementState::Pressed;
            }
            // Shift+C puts the camera back where it started
            PhysicalKey::Code(KeyCode::KeyC)
                if state == ElementState::Pressed && self.is_shift_held && self.enabled =>
            {
                log::debug!("resetting camera to default position");
                camera.reset_to_default();
            }
            _ => (),
        }
    }

    /// Returns true if currently panning
    pub fn is_panning(&self) -> bool {
        self.enabled && self.is_mouse_pressed && self.is_shift_held
    }

    /// Returns true if currently rotating
    pub fn is_rotating(&self) -> bool {
        self.enabled && self.is_mouse_pressed && !self.is_shift_held
    }

    /// Forget any held buttons, e.g. when input focus is lost
    pub fn release_all(&mut self) {
        self.is_mouse_pressed = false;
        self.is_shift_held = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press_left(controller: &mut CameraController, camera: &mut OrbitCamera) {
        controller.process_events(
            &DeviceEvent::Button {
                button: 0,
                state: ElementState::Pressed,
            },
            camera,
        );
    }

    #[test]
    fn test_drag_rotates_camera() {
        let mut camera = OrbitCamera::default();
        let mut controller = CameraController::new(0.005, 0.1);

        // Motion without a pressed button does nothing
        assert!(!controller.process_events(&DeviceEvent::MouseMotion { delta: (10.0, 0.0) }, &mut camera));

        press_left(&mut controller, &mut camera);
        assert!(controller.is_rotating());
        assert!(controller.process_events(&DeviceEvent::MouseMotion { delta: (10.0, 0.0) }, &mut camera));
        assert!((camera.yaw + 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_shift_drag_pans() {
        let mut camera = OrbitCamera::default();
        let mut controller = CameraController::new(0.005, 0.1);

        controller.process_key(
            PhysicalKey::Code(KeyCode::ShiftLeft),
            ElementState::Pressed,
            &mut camera,
        );
        press_left(&mut controller, &mut camera);
        assert!(controller.is_panning());

        controller.process_events(&DeviceEvent::MouseMotion { delta: (0.0, 10.0) }, &mut camera);
        assert!(camera.target.y > 0.0);
        assert_eq!(camera.yaw, 0.0);
    }

    #[test]
    fn test_disabled_controller_ignores_input() {
        let mut camera = OrbitCamera::default();
        let before = camera;
        let mut controller = CameraController::new(0.005, 0.1);
        controller.enabled = false;

        press_left(&mut controller, &mut camera);
        let moved = controller.process_events(
            &DeviceEvent::MouseWheel {
                delta: MouseScrollDelta::LineDelta(0.0, 3.0),
            },
            &mut camera,
        );

        assert!(!moved);
        assert_eq!(camera, before);
        assert!(!controller.is_rotating());
    }
}
