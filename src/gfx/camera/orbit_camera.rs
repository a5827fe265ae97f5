use cgmath::*;

use crate::constants::{CAMERA_DISTANCE, CAMERA_FOV, CAMERA_ZFAR, CAMERA_ZNEAR};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    pub distance: f32,
    pub pitch: f32,
    pub yaw: f32,
    pub eye: Vector3<f32>,
    pub target: Vector3<f32>,
    pub up: Vector3<f32>,
    pub bounds: OrbitCameraBounds,
    pub aspect: f32,
    pub fovy: Rad<f32>,
    pub znear: f32,
    pub zfar: f32,
}

impl OrbitCamera {
    pub fn new(distance: f32, pitch: f32, yaw: f32, target: Vector3<f32>, aspect: f32) -> Self {
        let mut camera = Self {
            distance,
            pitch,
            yaw,
            eye: Vector3::zero(), // Will be auto-calculated in `update()` nevertheless.
            target,
            up: Vector3::unit_y(),
            bounds: OrbitCameraBounds::default(),
            aspect,
            fovy: Deg(CAMERA_FOV).into(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        };
        camera.update();
        camera
    }

    pub fn reset_to_default(&mut self) {
        self.distance = CAMERA_DISTANCE;
        self.pitch = 0.0;
        self.yaw = 0.0;
        self.target = Vector3::zero();

        self.update(); // Recalculate eye position
    }

    /// Unit vector from the eye towards the target
    pub fn forward(&self) -> Vector3<f32> {
        (self.target - self.eye).normalize()
    }

    pub fn set_distance(&mut self, distance: f32) {
        self.distance = distance.clamp(
            self.bounds.min_distance.unwrap_or(f32::EPSILON),
            self.bounds.max_distance.unwrap_or(f32::MAX),
        );
        self.update();
    }

    pub fn add_distance(&mut self, delta: f32) {
        let corrected_zoom = f32::log10(self.distance) * delta;
        self.set_distance(self.distance + corrected_zoom);
    }

    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch.clamp(self.bounds.min_pitch, self.bounds.max_pitch);
        self.update();
    }

    pub fn add_pitch(&mut self, delta: f32) {
        self.set_pitch(self.pitch + delta);
    }

    pub fn set_yaw(&mut self, yaw: f32) {
        let mut bounded_yaw = yaw;
        if let Some(min_yaw) = self.bounds.min_yaw {
            bounded_yaw = bounded_yaw.clamp(min_yaw, f32::MAX);
        }
        if let Some(max_yaw) = self.bounds.max_yaw {
            bounded_yaw = bounded_yaw.clamp(f32::MIN, max_yaw);
        }
        self.yaw = bounded_yaw;
        self.update();
    }

    pub fn add_yaw(&mut self, delta: f32) {
        self.set_yaw(self.yaw + delta);
    }

    /// Pans the camera relative to the current view direction
    /// delta.0 = horizontal pan (left/right relative to camera view)
    /// delta.1 = vertical pan (up/down relative to camera view)
    pub fn pan(&mut self, delta: (f32, f32)) {
        let forward = self.forward();
        let right = forward.cross(self.up).normalize();
        let up = right.cross(forward).normalize();

        // Scale pan movement by distance for consistent feel at all zoom levels
        let pan_scale = self.distance * 0.1;

        let movement = right * delta.0 * pan_scale + up * delta.1 * pan_scale;

        // Move both eye and target to maintain the view direction
        self.eye += movement;
        self.target += movement;
    }

    /// Updates the camera after changing `distance`, `pitch` or `yaw`.
    fn update(&mut self) {
        self.eye =
            calculate_cartesian_eye_position(self.pitch, self.yaw, self.distance, self.target);
    }

    pub fn resize_projection(&mut self, width: u32, height: u32) {
        if height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    /// OpenGL-convention `perspective * view`, clip depth in `[-1, 1]`
    ///
    /// Hosts with a `[0, 1]` depth range apply their own correction.
    pub fn view_projection_matrix(&self) -> Matrix4<f32> {
        let eye = Point3::from_vec(self.eye);
        let target = Point3::from_vec(self.target);
        let view = Matrix4::look_at_rh(eye, target, self.up);
        perspective(self.fovy, self.aspect, self.znear, self.zfar) * view
    }
}

impl Default for OrbitCamera {
    /// Camera at `(0, 0, CAMERA_DISTANCE)` looking at the origin
    fn default() -> Self {
        Self::new(CAMERA_DISTANCE, 0.0, 0.0, Vector3::zero(), 1.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCameraBounds {
    pub min_distance: Option<f32>,
    pub max_distance: Option<f32>,
    pub min_pitch: f32,
    pub max_pitch: f32,
    pub min_yaw: Option<f32>,
    pub max_yaw: Option<f32>,
}

impl Default for OrbitCameraBounds {
    fn default() -> Self {
        Self {
            min_distance: Some(1.1),
            max_distance: Some(16.0),
            min_pitch: -std::f32::consts::PI / 2.0 + f32::EPSILON,
            max_pitch: std::f32::consts::PI / 2.0 - f32::EPSILON,
            min_yaw: None,
            max_yaw: None,
        }
    }
}

fn calculate_cartesian_eye_position(
    pitch: f32,
    yaw: f32,
    distance: f32,
    target: Vector3<f32>,
) -> Vector3<f32> {
    Vector3::new(
        distance * yaw.sin() * pitch.cos(),
        distance * pitch.sin(),
        distance * yaw.cos() * pitch.cos(),
    ) + target
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_camera_looks_down_negative_z() {
        let camera = OrbitCamera::default();
        assert_eq!(camera.eye, Vector3::new(0.0, 0.0, CAMERA_DISTANCE));
        assert_eq!(camera.forward(), Vector3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_distance_is_bounded() {
        let mut camera = OrbitCamera::default();
        camera.set_distance(100.0);
        assert_eq!(camera.distance, 16.0);
        camera.set_distance(0.0);
        assert_eq!(camera.distance, 1.1);
    }

    #[test]
    fn test_pan_moves_eye_and_target_together() {
        let mut camera = OrbitCamera::default();
        let offset = camera.eye - camera.target;
        camera.pan((1.0, 0.0));
        assert!(camera.target.x > 0.0);
        assert!(((camera.eye - camera.target) - offset).magnitude() < 1e-5);
    }

    #[test]
    fn test_view_projection_uses_gl_depth_range() {
        let camera = OrbitCamera::default();
        let vp = camera.view_projection_matrix();

        let project = |point: Vector3<f32>| {
            let clip = vp * point.extend(1.0);
            clip.truncate() / clip.w
        };

        let centre = project(camera.target);
        assert!(centre.x.abs() < 1e-5 && centre.y.abs() < 1e-5);

        let near = project(camera.eye + camera.forward() * camera.znear);
        let far = project(camera.eye + camera.forward() * camera.zfar);
        assert!((near.z + 1.0).abs() < 1e-3);
        assert!((far.z - 1.0).abs() < 1e-3);
    }
}
