//! Render seam
//!
//! Drawing happens outside this crate. At the end of every frame the engine
//! hands the scene, the desktop camera and the controller pointer lines to a
//! [`FrameRenderer`]; highlights are read from each node's
//! [`Highlight`](crate::gfx::scene::Highlight).

use cgmath::Vector3;

use crate::gfx::camera::OrbitCamera;
use crate::gfx::scene::SceneGraph;

/// Pointer line drawn from a controller
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerLine {
    pub origin: Vector3<f32>,
    pub direction: Vector3<f32>,
    /// Distance to the nearest hit, or the default ray length
    pub length: f32,
}

impl PointerLine {
    pub fn end(&self) -> Vector3<f32> {
        self.origin + self.direction * self.length
    }
}

pub trait FrameRenderer {
    /// Draws one frame; `pointers` has one entry per controller
    fn render(&mut self, scene: &SceneGraph, camera: &OrbitCamera, pointers: &[Option<PointerLine>]);
}

/// Renderer that draws nothing and counts frames
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    pub frames: u64,
    pub last_pointers: Vec<Option<PointerLine>>,
}

impl FrameRenderer for HeadlessRenderer {
    fn render(&mut self, _scene: &SceneGraph, _camera: &OrbitCamera, pointers: &[Option<PointerLine>]) {
        self.frames += 1;
        self.last_pointers = pointers.to_vec();
    }
}
