// src/lib.rs
//! XR Room
//!
//! Interaction core for a VR room viewer: a scene graph of loaded models, two
//! motion controllers that point at, grab and drag them, a gravity simulation
//! that drops released objects onto the floor, and room bounds every object is
//! kept inside. Rendering and the platform session are supplied by the host
//! through [`gfx::renderer::FrameRenderer`] and [`engine::FrameInput`].

pub mod constants;
pub mod engine;
pub mod gfx;
pub mod prelude;
pub mod simulation;
pub mod xr;

// Re-export main types for convenience
pub use engine::{Engine, EngineCallbacks, EngineConfig, EngineError, FrameInput};

/// Creates an engine with the default room and a status-tracking callback sink
pub fn default() -> Engine {
    Engine::default()
}
