//! # Interaction Engine
//!
//! The per-frame core of the room viewer. An [`Engine`] owns the scene graph
//! and every piece of interaction state: what each controller holds, which
//! meshes are tinted this frame, what is hovered, which buttons were down last
//! frame and which blocked-flash reverts are pending.
//!
//! Each call to [`Engine::frame`] runs the same fixed sequence:
//!
//! 1. apply controller and viewer poses
//! 2. dispatch controller events (select start/end, connect/disconnect)
//! 3. run due highlight reverts
//! 4. advance the fall simulation
//! 5. move dragged objects, clamping them into the room
//! 6. clear last frame's intersected highlights
//! 7. re-intersect both controller rays
//! 8. update the hovered object
//! 9. poll gamepad buttons (immersive sessions only)
//! 10. render
//!
//! The engine reads nothing but its [`FrameInput`] and its own state, and
//! reports to the outside only through [`EngineCallbacks`].
//!
//! ## Usage
//!
//! ```rust
//! use std::time::Duration;
//! use cgmath::Vector3;
//! use xr_room::engine::{Engine, FrameInput};
//! use xr_room::gfx::geometry::generate_cube;
//! use xr_room::gfx::renderer::HeadlessRenderer;
//! use xr_room::gfx::scene::Mesh;
//! use xr_room::xr::{ControllerEvent, Pose};
//!
//! let mut engine = Engine::default();
//! let cube = engine
//!     .add_object("Model_1", Mesh::from_geometry(&generate_cube()), Vector3::new(0.25, 0.0, 0.0))
//!     .unwrap();
//! let mut renderer = HeadlessRenderer::default();
//!
//! let input = FrameInput::at(Duration::ZERO)
//!     .with_controller(0, Pose::from_position(Vector3::new(0.0, 0.0, 3.0)))
//!     .with_event(ControllerEvent::SelectStart { controller: 0 });
//! engine.frame(input, &mut renderer);
//!
//! assert_eq!(engine.controller(0).unwrap().selected, Some(cube));
//! assert_eq!(engine.callbacks().selected_object.as_deref(), Some("Model_1"));
//! ```

use std::time::Duration;

use cgmath::{Deg, Quaternion, Rotation3, Vector3};

use crate::constants::CONTROLLER_COUNT;
use crate::gfx::camera::{CameraManager, CameraState};
use crate::gfx::geometry::generate_plane;
use crate::gfx::picking::ObjectPicker;
use crate::gfx::scene::{Mesh, Node, NodeId, SceneGraph, Transform};
use crate::simulation::{FallSimulator, RoomBounds};
use crate::xr::{ButtonEdgeDetector, Pose, XrSession};

pub mod callbacks;
pub mod config;
pub mod error;
pub mod timers;

mod frame;
mod interaction;
mod objects;
mod session;


pub use callbacks::{EngineCallbacks, ObjectStatus, XrStatus};
pub use config::EngineConfig;
pub use error::EngineError;
pub use frame::FrameInput;
pub use timers::{PendingRevert, RevertQueue};

/// Grab state of one controller
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerState {
    /// Pose from the latest frame; `None` while untracked
    pub pose: Option<Pose>,
    pub connected: bool,
    /// Top-level object being dragged
    pub selected: Option<NodeId>,
    /// Position of the dragged object in the controller's local frame
    pub selected_offset: Option<Vector3<f32>>,
    /// Pointer length after the latest intersection pass
    pub ray_length: f32,
}

impl ControllerState {
    fn new(ray_length: f32) -> Self {
        Self {
            pose: None,
            connected: false,
            selected: None,
            selected_offset: None,
            ray_length,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.selected.is_some()
    }

    fn release(&mut self) -> Option<NodeId> {
        self.selected_offset = None;
        self.selected.take()
    }
}

pub struct Engine<C: EngineCallbacks = XrStatus> {
    config: EngineConfig,
    room: RoomBounds,
    scene: SceneGraph,
    group: NodeId,
    picker: ObjectPicker,
    fall: FallSimulator,
    controllers: [ControllerState; CONTROLLER_COUNT],
    /// Meshes tinted by a controller ray this frame
    intersected: Vec<NodeId>,
    last_hovered: Option<String>,
    buttons: ButtonEdgeDetector,
    reverts: RevertQueue,
    camera: CameraManager,
    saved_camera: Option<CameraState>,
    session: XrSession,
    viewer: Option<Pose>,
    /// Detached copies of every loaded model, used for spawning
    templates: Vec<NodeId>,
    spawn_serial: u64,
    time: Duration,
    callbacks: C,
}

impl<C: EngineCallbacks> Engine<C> {
    /// Creates an engine with an empty room
    pub fn new(config: EngineConfig, callbacks: C) -> Self {
        let mut scene = SceneGraph::new();
        let root = scene.root();

        if let Err(err) = build_room_shell(&mut scene, &config) {
            log::warn!("could not build room shell: {}", err);
        }

        // Inserting under the live root cannot fail
        let group = scene
            .insert(Node::new("interactive"), Some(root))
            .unwrap_or(root);

        let room = config.room_bounds();
        let fall = FallSimulator::new(config.gravity, config.floor_y);
        let controllers = [ControllerState::new(config.ray_length); CONTROLLER_COUNT];

        log::info!(
            "engine ready: room x [{}, {}], y [{}, {}], z [{}, {}]",
            room.min_x,
            room.max_x,
            room.min_y,
            room.max_y,
            room.min_z,
            room.max_z
        );

        Self {
            config,
            room,
            scene,
            group,
            picker: ObjectPicker::new(),
            fall,
            controllers,
            intersected: Vec::new(),
            last_hovered: None,
            buttons: ButtonEdgeDetector::new(),
            reverts: RevertQueue::new(),
            camera: CameraManager::default(),
            saved_camera: None,
            session: XrSession::new(),
            viewer: None,
            templates: Vec::new(),
            spawn_serial: 0,
            time: Duration::ZERO,
            callbacks,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn room(&self) -> &RoomBounds {
        &self.room
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut SceneGraph {
        &mut self.scene
    }

    /// Parent of all pickable, movable objects
    pub fn group(&self) -> NodeId {
        self.group
    }

    /// Top-level interactive objects
    pub fn objects(&self) -> &[NodeId] {
        self.scene.children(self.group)
    }

    pub fn controller(&self, index: usize) -> Option<&ControllerState> {
        self.controllers.get(index)
    }

    pub fn fall(&self) -> &FallSimulator {
        &self.fall
    }

    pub fn intersected(&self) -> &[NodeId] {
        &self.intersected
    }

    pub fn hovered(&self) -> Option<&str> {
        self.last_hovered.as_deref()
    }

    pub fn pending_reverts(&self) -> &RevertQueue {
        &self.reverts
    }

    pub fn templates(&self) -> &[NodeId] {
        &self.templates
    }

    pub fn camera(&self) -> &CameraManager {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut CameraManager {
        &mut self.camera
    }

    pub fn callbacks(&self) -> &C {
        &self.callbacks
    }

    pub fn callbacks_mut(&mut self) -> &mut C {
        &mut self.callbacks
    }

    /// Time of the latest frame
    pub fn time(&self) -> Duration {
        self.time
    }

    pub fn is_immersive(&self) -> bool {
        self.session.is_active()
    }
}

impl Default for Engine<XrStatus> {
    fn default() -> Self {
        Self::new(EngineConfig::default(), XrStatus::default())
    }
}

/// Floor and four walls around the room, outside the interactive group
fn build_room_shell(scene: &mut SceneGraph, config: &EngineConfig) -> Result<NodeId, crate::gfx::scene::SceneError> {
    let root = scene.root();
    let shell = scene.insert(Node::new("room"), Some(root))?;

    let (width, height, depth) = (config.room_width, config.room_height, config.room_depth);
    let wall_y = config.floor_y + height / 2.0;
    let upright = Quaternion::from_angle_x(Deg(90.0));

    let floor = Transform::from_position(Vector3::new(0.0, config.floor_y, 0.0));
    scene.insert(
        Node::new("floor")
            .with_mesh(Mesh::from_geometry(&generate_plane(width, depth, 1, 1)))
            .with_transform(floor),
        Some(shell),
    )?;

    let walls = [
        ("wall_front", width, Vector3::new(0.0, wall_y, -depth / 2.0), Deg(0.0)),
        ("wall_back", width, Vector3::new(0.0, wall_y, depth / 2.0), Deg(180.0)),
        ("wall_left", depth, Vector3::new(-width / 2.0, wall_y, 0.0), Deg(90.0)),
        ("wall_right", depth, Vector3::new(width / 2.0, wall_y, 0.0), Deg(-90.0)),
    ];
    for (name, span, position, yaw) in walls {
        let rotation = Quaternion::from_angle_y(yaw) * upright;
        scene.insert(
            Node::new(name)
                .with_mesh(Mesh::from_geometry(&generate_plane(span, height, 1, 1)))
                .with_transform(Transform::from_position(position).with_rotation(rotation)),
            Some(shell),
        )?;
    }

    Ok(shell)
}
