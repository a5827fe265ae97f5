// src/simulation/mod.rs
//! Simulation system
//!
//! Per-frame simulations acting on the interactive objects: room bounds
//! clamping and the gravity integrator that drops released objects to the
//! floor.

pub mod bounds;
pub mod fall;
pub mod traits;

pub use bounds::{compute_bounds, constrain, ObjectBounds, RoomBounds};
pub use fall::{FallSimulator, FallState};
pub use traits::Simulation;
