//! # Graphics Module
//!
//! Everything the engine knows about the room as geometry: the scene graph,
//! procedural primitives, ray picking, the desktop camera and the seam to the
//! host's renderer.
//!
//! ## Architecture Overview
//!
//! - **Scene Graph** ([`scene`]) - Arena of named nodes with transforms and meshes
//! - **Geometry** ([`geometry`]) - Procedural cube, sphere and plane
//! - **Picking** ([`picking`]) - Ray casts against mesh triangles
//! - **Camera System** ([`camera`]) - Orbit camera used outside immersive sessions
//! - **Renderer** ([`renderer`]) - What the engine hands over once per frame
//!
//! Drawing itself is left to the host; the engine only decides what the
//! scene looks like, including highlight colours and pointer lengths.

pub mod camera;
pub mod geometry;
pub mod picking;
pub mod renderer;
pub mod scene;

// Re-export commonly used types
pub use camera::orbit_camera::OrbitCamera;
pub use scene::{SceneGraph, SceneError};
