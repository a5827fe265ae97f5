use std::time::Duration;

use crate::constants::*;
use crate::simulation::RoomBounds;
use crate::xr::ButtonBinding;

/// Tunables of an [`Engine`](super::Engine)
///
/// Defaults come from [`constants`](crate::constants); override them with the
/// `with_*` builders.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub room_width: f32,
    pub room_height: f32,
    pub room_depth: f32,
    pub floor_y: f32,
    /// Velocity change per frame for falling objects
    pub gravity: f32,
    pub blocked_flash: Duration,
    pub delete_binding: ButtonBinding,
    /// Controller whose grab or ray a delete press targets
    pub delete_controller: usize,
    pub model_scale: f32,
    pub model_ring_radius: f32,
    /// Pointer length when a ray hits nothing
    pub ray_length: f32,
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_room(mut self, width: f32, height: f32, depth: f32) -> Self {
        self.room_width = width;
        self.room_height = height;
        self.room_depth = depth;
        self
    }

    pub fn with_floor_y(mut self, floor_y: f32) -> Self {
        self.floor_y = floor_y;
        self
    }

    pub fn with_gravity(mut self, gravity: f32) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_blocked_flash(mut self, duration: Duration) -> Self {
        self.blocked_flash = duration;
        self
    }

    pub fn with_delete_binding(mut self, source: usize, button: usize) -> Self {
        self.delete_binding = ButtonBinding::new(source, button);
        self
    }

    pub fn with_delete_controller(mut self, controller: usize) -> Self {
        self.delete_controller = controller;
        self
    }

    pub fn with_model_scale(mut self, scale: f32) -> Self {
        self.model_scale = scale;
        self
    }

    pub fn with_model_ring_radius(mut self, radius: f32) -> Self {
        self.model_ring_radius = radius;
        self
    }

    pub fn with_ray_length(mut self, length: f32) -> Self {
        self.ray_length = length;
        self
    }

    /// Room box the interactive objects are clamped into
    pub fn room_bounds(&self) -> RoomBounds {
        RoomBounds::from_dimensions(
            self.room_width,
            self.room_height,
            self.room_depth,
            self.floor_y,
        )
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            room_width: ROOM_WIDTH,
            room_height: ROOM_HEIGHT,
            room_depth: ROOM_DEPTH,
            floor_y: FLOOR_Y,
            gravity: GRAVITY,
            blocked_flash: BLOCKED_FLASH,
            delete_binding: ButtonBinding::new(DELETE_SOURCE_INDEX, DELETE_BUTTON_INDEX),
            delete_controller: DELETE_CONTROLLER_INDEX,
            model_scale: MODEL_SCALE,
            model_ring_radius: OBJECTS_DISTANCE_FROM_CAMERA,
            ray_length: DEFAULT_RAY_LENGTH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_room_bounds() {
        let room = EngineConfig::default().room_bounds();
        assert_eq!((room.min_x, room.max_x), (-5.0, 5.0));
        assert_eq!((room.min_y, room.max_y), (-0.5, 3.5));
        assert_eq!((room.min_z, room.max_z), (-5.0, 5.0));
    }

    #[test]
    fn test_builders_override_defaults() {
        let config = EngineConfig::new()
            .with_room(4.0, 2.0, 6.0)
            .with_floor_y(0.0)
            .with_delete_binding(0, 1)
            .with_blocked_flash(Duration::from_millis(250));

        let room = config.room_bounds();
        assert_eq!((room.min_x, room.max_x), (-2.0, 2.0));
        assert_eq!((room.min_y, room.max_y), (0.0, 2.0));
        assert_eq!((room.min_z, room.max_z), (-3.0, 3.0));
        assert_eq!(config.delete_binding, ButtonBinding::new(0, 1));
        assert_eq!(config.blocked_flash, Duration::from_millis(250));
        assert_eq!(config.gravity, GRAVITY);
    }
}
