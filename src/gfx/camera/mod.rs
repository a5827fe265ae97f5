//! Desktop orbit camera
//!
//! Outside an immersive session the room is viewed through an orbit camera
//! driven by mouse input. The camera's eye and forward vector also decide where
//! spawned objects appear.

pub mod camera_controller;
pub mod camera_utils;
pub mod orbit_camera;

// Re-export main types
pub use camera_controller::CameraController;
pub use camera_utils::{CameraManager, CameraState};
pub use orbit_camera::OrbitCamera;
