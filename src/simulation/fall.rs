//! Gravity for released objects
//!
//! Every tracked object carries a [`FallState`]. While it is falling, each
//! frame adds the gravity constant to its vertical velocity and moves it by
//! that velocity. Once its bounding box reaches the floor it is snapped back
//! onto the floor and stops. Settled objects keep their entry until they are
//! grabbed or dropped again.

use std::collections::HashMap;

use crate::gfx::scene::{NodeId, SceneGraph};
use crate::simulation::bounds::{compute_bounds, constrain, RoomBounds};
use crate::simulation::traits::Simulation;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FallState {
    /// Vertical velocity in units per frame
    pub velocity: f32,
    pub is_falling: bool,
}

impl FallState {
    fn falling() -> Self {
        Self {
            velocity: 0.0,
            is_falling: true,
        }
    }
}

pub struct FallSimulator {
    states: HashMap<NodeId, FallState>,
    gravity: f32,
    floor_y: f32,
    running: bool,
}

impl FallSimulator {
    /// `gravity` is added to the velocity every frame, so it is negative for
    /// a downward pull.
    pub fn new(gravity: f32, floor_y: f32) -> Self {
        Self {
            states: HashMap::new(),
            gravity,
            floor_y,
            running: true,
        }
    }

    /// (Re)starts falling from rest on the next frame
    pub fn start_falling(&mut self, id: NodeId) {
        self.states.insert(id, FallState::falling());
    }

    /// Forgets the object entirely, returning its last state
    pub fn stop_falling(&mut self, id: NodeId) -> Option<FallState> {
        self.states.remove(&id)
    }

    pub fn state(&self, id: NodeId) -> Option<FallState> {
        self.states.get(&id).copied()
    }

    pub fn is_falling(&self, id: NodeId) -> bool {
        self.states.get(&id).is_some_and(|state| state.is_falling)
    }

    pub fn clear(&mut self) {
        self.states.clear();
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn gravity(&self) -> f32 {
        self.gravity
    }

    pub fn floor_y(&self) -> f32 {
        self.floor_y
    }

    /// Integrates one object, returning `false` if its node is gone
    fn step(
        &self,
        scene: &mut SceneGraph,
        room: &RoomBounds,
        id: NodeId,
        state: &mut FallState,
    ) -> bool {
        let Some(mut position) = scene.world_position(id) else {
            return false;
        };

        state.velocity += self.gravity;
        position.y += state.velocity;
        if scene.set_world_position(id, position).is_err() {
            return false;
        }

        let Some(bounds) = compute_bounds(scene, id) else {
            return false;
        };
        if bounds.aabb.min.y <= self.floor_y {
            position.y += self.floor_y - bounds.aabb.min.y;
            if scene.set_world_position(id, position).is_err() {
                return false;
            }
            state.velocity = 0.0;
            state.is_falling = false;
            log::debug!("{:?} landed at y = {}", id, position.y);
        }

        constrain(scene, id, room).is_ok()
    }
}

impl Default for FallSimulator {
    fn default() -> Self {
        Self::new(crate::constants::GRAVITY, crate::constants::FLOOR_Y)
    }
}

impl Simulation for FallSimulator {
    fn update(&mut self, scene: &mut SceneGraph, room: &RoomBounds) {
        if !self.running {
            return;
        }

        let mut stale = Vec::new();
        let mut states = std::mem::take(&mut self.states);

        for (&id, state) in states.iter_mut() {
            if !scene.contains(id) {
                stale.push(id);
                continue;
            }
            if state.is_falling && !self.step(scene, room, id, state) {
                stale.push(id);
            }
        }

        for id in stale {
            log::trace!("dropping fall state of destroyed {:?}", id);
            states.remove(&id);
        }
        self.states = states;
    }

    fn name(&self) -> &str {
        "Fall Simulator"
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    fn reset(&mut self) {
        self.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{FLOOR_Y, GRAVITY, ROOM_DEPTH, ROOM_HEIGHT, ROOM_WIDTH};
    use crate::gfx::geometry::generate_cube;
    use crate::gfx::scene::{Mesh, Node, Transform};
    use cgmath::Vector3;

    fn room() -> RoomBounds {
        RoomBounds::from_dimensions(ROOM_WIDTH, ROOM_HEIGHT, ROOM_DEPTH, FLOOR_Y)
    }

    fn add_cube(scene: &mut SceneGraph, position: Vector3<f32>) -> NodeId {
        let root = scene.root();
        let object = scene
            .insert(
                Node::new("cube").with_transform(Transform::from_position(position)),
                Some(root),
            )
            .unwrap();
        scene
            .insert(
                Node::new("cube_mesh").with_mesh(Mesh::from_geometry(&generate_cube())),
                Some(object),
            )
            .unwrap();
        object
    }

    #[test]
    fn test_start_and_stop_falling() {
        let mut scene = SceneGraph::new();
        let cube = add_cube(&mut scene, Vector3::new(0.0, 2.0, 0.0));
        let mut fall = FallSimulator::default();

        fall.start_falling(cube);
        assert_eq!(
            fall.state(cube),
            Some(FallState {
                velocity: 0.0,
                is_falling: true
            })
        );
        assert!(fall.stop_falling(cube).is_some());
        assert_eq!(fall.state(cube), None);
        assert!(fall.is_empty());
    }

    #[test]
    fn test_velocity_accumulates_gravity() {
        let mut scene = SceneGraph::new();
        let cube = add_cube(&mut scene, Vector3::new(0.0, 2.0, 0.0));
        let mut fall = FallSimulator::default();
        fall.start_falling(cube);

        let mut expected_y = 2.0f32;
        let mut expected_velocity = 0.0f32;
        for _ in 0..3 {
            fall.update(&mut scene, &room());
            expected_velocity += GRAVITY;
            expected_y += expected_velocity;

            let state = fall.state(cube).unwrap();
            assert_eq!(state.velocity, expected_velocity);
            assert!(state.is_falling);
            assert_eq!(scene.world_position(cube).unwrap().y, expected_y);
        }
    }

    #[test]
    fn test_lands_exactly_on_floor() {
        let mut scene = SceneGraph::new();
        let cube = add_cube(&mut scene, Vector3::new(0.0, 0.125, 0.0));
        let mut fall = FallSimulator::new(-0.25, FLOOR_Y);
        fall.start_falling(cube);

        fall.update(&mut scene, &room());

        let state = fall.state(cube).unwrap();
        assert_eq!(state.velocity, 0.0);
        assert!(!state.is_falling);
        let bounds = compute_bounds(&scene, cube).unwrap();
        assert_eq!(bounds.aabb.min.y, FLOOR_Y);
        assert_eq!(scene.world_position(cube).unwrap().y, 0.0);

        // Settled objects stay put and keep their entry
        fall.update(&mut scene, &room());
        assert_eq!(scene.world_position(cube).unwrap().y, 0.0);
        assert_eq!(fall.len(), 1);
    }

    #[test]
    fn test_restart_resets_velocity() {
        let mut scene = SceneGraph::new();
        let cube = add_cube(&mut scene, Vector3::new(0.0, 3.0, 0.0));
        let mut fall = FallSimulator::new(-0.25, FLOOR_Y);
        fall.start_falling(cube);
        fall.update(&mut scene, &room());
        fall.update(&mut scene, &room());
        assert_eq!(fall.state(cube).unwrap().velocity, -0.5);

        fall.start_falling(cube);
        assert_eq!(fall.state(cube).unwrap().velocity, 0.0);
        fall.update(&mut scene, &room());
        assert_eq!(fall.state(cube).unwrap().velocity, -0.25);
    }

    #[test]
    fn test_falling_object_is_kept_in_room() {
        let mut scene = SceneGraph::new();
        let cube = add_cube(&mut scene, Vector3::new(8.0, 2.0, 0.0));
        let mut fall = FallSimulator::new(-0.25, FLOOR_Y);
        fall.start_falling(cube);

        fall.update(&mut scene, &room());
        assert_eq!(scene.world_position(cube).unwrap().x, 4.5);
    }

    #[test]
    fn test_destroyed_objects_are_pruned() {
        let mut scene = SceneGraph::new();
        let cube = add_cube(&mut scene, Vector3::new(0.0, 2.0, 0.0));
        let mut fall = FallSimulator::default();
        fall.start_falling(cube);
        scene.remove(cube).unwrap();

        fall.update(&mut scene, &room());
        assert!(fall.is_empty());
    }

    #[test]
    fn test_paused_simulation_does_not_move_objects() {
        let mut scene = SceneGraph::new();
        let cube = add_cube(&mut scene, Vector3::new(0.0, 2.0, 0.0));
        let mut fall = FallSimulator::default();
        fall.start_falling(cube);
        fall.set_running(false);

        fall.update(&mut scene, &room());
        assert_eq!(scene.world_position(cube).unwrap().y, 2.0);
        assert_eq!(fall.state(cube).unwrap().velocity, 0.0);
    }
}
