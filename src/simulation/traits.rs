//! Core simulation traits
//!
//! Defines the interface per-frame simulations implement so the engine can
//! drive them from its frame loop.

use crate::gfx::scene::SceneGraph;
use crate::simulation::bounds::RoomBounds;

/// Core trait for simulations stepped once per frame
pub trait Simulation {
    /// Advance the simulation by one frame
    ///
    /// # Arguments
    /// * `scene` - Scene whose objects the simulation moves
    /// * `room` - Bounds every moved object has to stay inside
    fn update(&mut self, scene: &mut SceneGraph, room: &RoomBounds);

    /// Get simulation name for logging
    fn name(&self) -> &str;

    /// Whether simulation is currently running
    fn is_running(&self) -> bool;

    /// Start/pause simulation
    fn set_running(&mut self, running: bool);

    /// Reset simulation to initial state
    fn reset(&mut self);
}
