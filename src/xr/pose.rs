use cgmath::{InnerSpace, Matrix4, One, Quaternion, Rotation, Vector3};

use crate::gfx::picking::Ray;

/// How a controller's pointing ray is produced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TargetRayMode {
    /// Tracked motion controller
    #[default]
    TrackedPointer,
    /// Ray follows the viewer's head
    Gaze,
    /// Ray comes from a tap on a flat screen; never used for hover
    Screen,
}

/// Position and orientation of a controller or of the viewer's head
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vector3<f32>,
    pub rotation: Quaternion<f32>,
    pub target_ray_mode: TargetRayMode,
}

impl Pose {
    pub fn new(position: Vector3<f32>, rotation: Quaternion<f32>) -> Self {
        Self {
            position,
            rotation,
            target_ray_mode: TargetRayMode::default(),
        }
    }

    /// Unrotated pose, pointing down -Z
    pub fn from_position(position: Vector3<f32>) -> Self {
        Self::new(position, Quaternion::one())
    }

    /// Pose at `position` whose forward axis points along `direction`
    pub fn looking_along(position: Vector3<f32>, direction: Vector3<f32>) -> Self {
        let rotation = Quaternion::from_arc(-Vector3::unit_z(), direction.normalize(), None);
        Self::new(position, rotation)
    }

    pub fn with_target_ray_mode(mut self, mode: TargetRayMode) -> Self {
        self.target_ray_mode = mode;
        self
    }

    /// Local -Z in world space
    pub fn forward(&self) -> Vector3<f32> {
        self.rotation.rotate_vector(-Vector3::unit_z())
    }

    /// Pointing ray from the pose's origin along its forward axis
    pub fn ray(&self) -> Ray {
        Ray::new(self.position, self.forward())
    }

    pub fn matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.position) * Matrix4::from(self.rotation)
    }

    /// Expresses a world point in this pose's local frame
    pub fn world_to_local(&self, point: Vector3<f32>) -> Vector3<f32> {
        self.rotation
            .conjugate()
            .rotate_vector(point - self.position)
    }

    /// Maps a point in this pose's local frame back to world space
    pub fn local_to_world(&self, local: Vector3<f32>) -> Vector3<f32> {
        self.position + self.rotation.rotate_vector(local)
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::from_position(Vector3::new(0.0, 0.0, 0.0))
    }
}
