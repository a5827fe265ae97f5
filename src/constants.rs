//! # Room and Interaction Constants
//!
//! Default dimensions, physics parameters and input bindings. Everything here
//! can be overridden per engine through [`EngineConfig`](crate::engine::EngineConfig).

use std::time::Duration;

/// Room extent along X (walls at `±ROOM_WIDTH / 2`)
pub const ROOM_WIDTH: f32 = 10.0;
/// Room extent along Y, measured up from the floor
pub const ROOM_HEIGHT: f32 = 4.0;
/// Room extent along Z (walls at `±ROOM_DEPTH / 2`)
pub const ROOM_DEPTH: f32 = 10.0;

/// Height of the floor plane
pub const FLOOR_Y: f32 = -0.5;

/// Velocity added to a falling object every frame (units per frame)
pub const GRAVITY: f32 = -0.001;

/// How long a dragged object flashes the blocked colour after hitting a wall
pub const BLOCKED_FLASH: Duration = Duration::from_millis(100);

/// Number of tracked motion controllers
pub const CONTROLLER_COUNT: usize = 2;

/// Input source whose button deletes objects
pub const DELETE_SOURCE_INDEX: usize = 1;
/// Button on [`DELETE_SOURCE_INDEX`] that deletes objects
pub const DELETE_BUTTON_INDEX: usize = 4;
/// Controller whose grab or ray the delete action targets
pub const DELETE_CONTROLLER_INDEX: usize = 1;

/// Uniform scale applied to models on load
pub const MODEL_SCALE: f32 = 5.0;
/// Radius of the ring loaded models are placed on
pub const OBJECTS_DISTANCE_FROM_CAMERA: f32 = 3.0;

/// Length of a controller's pointer line when its ray hits nothing
pub const DEFAULT_RAY_LENGTH: f32 = 5.0;

/// Vertical field of view of the desktop camera, in degrees
pub const CAMERA_FOV: f32 = 50.0;
/// Distance of the desktop camera from its target
pub const CAMERA_DISTANCE: f32 = 7.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 100.0;
