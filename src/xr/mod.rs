//! # XR Input
//!
//! Types describing what an immersive session feeds the engine each frame:
//! controller and head poses, discrete controller events and gamepad button
//! states.

pub mod input;
pub mod pose;
pub mod session;

pub use input::{ButtonBinding, ButtonEdgeDetector, Gamepad, GamepadButton, InputSource};
pub use pose::{Pose, TargetRayMode};
pub use session::XrSession;

/// Discrete controller event, addressed by controller index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerEvent {
    /// Trigger pressed
    SelectStart { controller: usize },
    /// Trigger released
    SelectEnd { controller: usize },
    Connected { controller: usize },
    Disconnected { controller: usize },
}

impl ControllerEvent {
    pub fn controller(&self) -> usize {
        match *self {
            ControllerEvent::SelectStart { controller }
            | ControllerEvent::SelectEnd { controller }
            | ControllerEvent::Connected { controller }
            | ControllerEvent::Disconnected { controller } => controller,
        }
    }
}
