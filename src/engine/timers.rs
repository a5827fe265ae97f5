//! Deferred highlight reverts
//!
//! A dragged object that hits a wall flashes the blocked colour and goes back
//! to its selected colour a short time later. Reverts are queued with their
//! due time and run by the frame loop; a revert whose node has been destroyed
//! or re-highlighted in the meantime does nothing.

use std::time::Duration;

use crate::gfx::scene::{Highlight, NodeId, SceneGraph};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingRevert {
    pub due: Duration,
    pub node: NodeId,
    pub restore: Highlight,
}

#[derive(Debug, Default)]
pub struct RevertQueue {
    pending: Vec<PendingRevert>,
}

impl RevertQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due: Duration, node: NodeId, restore: Highlight) {
        self.pending.push(PendingRevert { due, node, restore });
    }

    /// Applies every revert due at `now`, returning how many meshes changed
    ///
    /// Only meshes still showing [`Highlight::Blocked`] are restored.
    pub fn run_due(&mut self, now: Duration, scene: &mut SceneGraph) -> usize {
        let (due, pending): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|revert| revert.due <= now);
        self.pending = pending;

        let mut restored = 0;
        for revert in due {
            if !scene.contains(revert.node) {
                log::trace!("skipping revert for destroyed {:?}", revert.node);
                continue;
            }
            for mesh in scene.mesh_descendants(revert.node) {
                if let Some(node) = scene.get_mut(mesh) {
                    if node.highlight == Highlight::Blocked {
                        node.highlight = revert.restore;
                        restored += 1;
                    }
                }
            }
        }
        restored
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::generate_cube;
    use crate::gfx::scene::{Mesh, Node};

    fn blocked_cube(scene: &mut SceneGraph) -> (NodeId, NodeId) {
        let root = scene.root();
        let object = scene.insert(Node::new("cube"), Some(root)).unwrap();
        let mesh = scene
            .insert(
                Node::new("cube_mesh").with_mesh(Mesh::from_geometry(&generate_cube())),
                Some(object),
            )
            .unwrap();
        scene.set_highlight_recursive(object, Highlight::Blocked);
        (object, mesh)
    }

    #[test]
    fn test_revert_waits_until_due() {
        let mut scene = SceneGraph::new();
        let (object, mesh) = blocked_cube(&mut scene);
        let mut queue = RevertQueue::new();
        queue.schedule(Duration::from_millis(1100), object, Highlight::Selected);

        assert_eq!(queue.run_due(Duration::from_millis(1050), &mut scene), 0);
        assert_eq!(scene.get(mesh).unwrap().highlight, Highlight::Blocked);
        assert_eq!(queue.len(), 1);

        assert_eq!(queue.run_due(Duration::from_millis(1100), &mut scene), 1);
        assert_eq!(scene.get(mesh).unwrap().highlight, Highlight::Selected);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_revert_skips_rehighlighted_meshes() {
        let mut scene = SceneGraph::new();
        let (object, mesh) = blocked_cube(&mut scene);
        let mut queue = RevertQueue::new();
        queue.schedule(Duration::from_millis(100), object, Highlight::Selected);

        // Released before the flash ended
        scene.set_highlight_recursive(object, Highlight::None);
        assert_eq!(queue.run_due(Duration::from_millis(200), &mut scene), 0);
        assert_eq!(scene.get(mesh).unwrap().highlight, Highlight::None);
    }

    #[test]
    fn test_revert_for_destroyed_node_is_dropped() {
        let mut scene = SceneGraph::new();
        let (object, _) = blocked_cube(&mut scene);
        let mut queue = RevertQueue::new();
        queue.schedule(Duration::from_millis(100), object, Highlight::Selected);

        scene.remove(object).unwrap();
        // Reuses the freed slot with a new generation
        let (reused, reused_mesh) = blocked_cube(&mut scene);
        assert_ne!(reused, object);

        assert_eq!(queue.run_due(Duration::from_millis(200), &mut scene), 0);
        assert_eq!(scene.get(reused_mesh).unwrap().highlight, Highlight::Blocked);
        assert!(queue.is_empty());
    }
}
