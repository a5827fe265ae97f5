//! # XR Room Prelude
//!
//! Commonly used types in one import, for hosts that drive the engine frame
//! by frame.
//!
//! ## Usage
//!
//! ```rust
//! use xr_room::prelude::*;
//!
//! let mut engine = xr_room::default();
//! let mut renderer = HeadlessRenderer::default();
//!
//! engine.add_object("crate", Mesh::from_geometry(&generate_cube()), Vector3::new(0.0, 1.0, 0.0))?;
//! engine.frame(FrameInput::at(Duration::from_millis(16)), &mut renderer);
//! assert_eq!(renderer.frames, 1);
//! # Ok::<(), EngineError>(())
//! ```

// Re-export engine types
pub use crate::default;
pub use crate::engine::{
    ControllerState, Engine, EngineCallbacks, EngineConfig, EngineError, FrameInput,
    ObjectStatus, XrStatus,
};

// Re-export graphics and scene types
pub use crate::gfx::camera::{CameraManager, OrbitCamera};
pub use crate::gfx::geometry::{generate_cube, generate_plane, generate_sphere, GeometryData};
pub use crate::gfx::picking::{Hit, ObjectPicker, Ray};
pub use crate::gfx::renderer::{FrameRenderer, HeadlessRenderer, PointerLine};
pub use crate::gfx::scene::{Highlight, Mesh, Node, NodeId, SceneGraph, Transform};

// Re-export simulation framework
pub use crate::simulation::{FallSimulator, RoomBounds, Simulation};

// Re-export XR input types
pub use crate::xr::{ControllerEvent, InputSource, Pose, TargetRayMode};

// Re-export common external dependencies
pub use cgmath::{InnerSpace, Vector3, Zero};

// Re-export common standard library types
pub use std::time::Duration;
