use cgmath::{Matrix4, SquareMatrix, Vector3};
use thiserror::Error;

use super::node::{Highlight, Node, NodeId, Transform};

/// Errors raised by structural scene operations
#[derive(Debug, Error, PartialEq)]
pub enum SceneError {
    #[error("node {0:?} no longer exists")]
    StaleNode(NodeId),
    #[error("the scene root cannot be moved or removed")]
    RootMutation,
    #[error("attaching {child:?} under {parent:?} would create a cycle")]
    CyclicAttach { child: NodeId, parent: NodeId },
    #[error("parent {0:?} has a singular world transform")]
    SingularTransform(NodeId),
}

struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// Arena-backed scene graph
///
/// Nodes live in slots addressed by [`NodeId`]. Parent links are explicit and
/// every walk up the hierarchy is bounded by the number of slots, so a chain
/// can never loop. Nodes inserted without a parent are detached: they are not
/// reachable from [`root`](Self::root) and are used as spawn templates.
pub struct SceneGraph {
    slots: Vec<Slot>,
    free_list: Vec<u32>,
    root: NodeId,
}

impl SceneGraph {
    /// Creates an empty scene containing only the root node
    pub fn new() -> Self {
        let mut scene = Self {
            slots: Vec::new(),
            free_list: Vec::new(),
            root: NodeId {
                index: 0,
                generation: 0,
            },
        };
        scene.root = scene.allocate(Node::new("Scene"));
        scene
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    fn allocate(&mut self, node: Node) -> NodeId {
        if let Some(index) = self.free_list.pop() {
            let slot = &mut self.slots[index as usize];
            slot.node = Some(node);
            NodeId {
                index,
                generation: slot.generation,
            }
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 0,
                node: Some(node),
            });
            NodeId {
                index,
                generation: 0,
            }
        }
    }

    /// Inserts a node under `parent`, or detached when `parent` is `None`
    ///
    /// Any parent/children links already on `node` are ignored.
    pub fn insert(&mut self, mut node: Node, parent: Option<NodeId>) -> Result<NodeId, SceneError> {
        if let Some(parent) = parent {
            if !self.contains(parent) {
                return Err(SceneError::StaleNode(parent));
            }
        }

        node.parent = parent;
        node.children.clear();
        let id = self.allocate(node);

        if let Some(parent) = parent.and_then(|p| self.get_mut(p)) {
            parent.children.push(id);
        }

        Ok(id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|node| node.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|node| node.children()).unwrap_or(&[])
    }

    /// Number of live nodes, detached templates included
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.node.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `id` and all of its descendants in pre-order
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        if !self.contains(id) {
            return out;
        }

        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            out.push(current);
            // Reverse so children come out in insertion order
            stack.extend(self.children(current).iter().rev().copied());
        }
        out
    }

    /// Whether `id` is `ancestor` or lies somewhere below it
    pub fn is_descendant_of(&self, id: NodeId, ancestor: NodeId) -> bool {
        let mut current = Some(id);
        for _ in 0..=self.slots.len() {
            match current {
                Some(node) if node == ancestor => return true,
                Some(node) => current = self.parent(node),
                None => return false,
            }
        }
        false
    }

    /// First live node with the given name, searched from the root
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .find(|&id| self.get(id).is_some_and(|node| node.name == name))
    }

    /// World transform of a node, composed along its parent chain
    pub fn world_matrix(&self, id: NodeId) -> Option<Matrix4<f32>> {
        let mut chain = Vec::new();
        let mut current = Some(id);

        while let Some(node_id) = current {
            if chain.len() > self.slots.len() {
                log::warn!("parent chain of {:?} does not terminate", id);
                return None;
            }
            let node = self.get(node_id)?;
            chain.push(node.transform.matrix());
            current = node.parent;
        }

        Some(
            chain
                .into_iter()
                .rev()
                .fold(Matrix4::identity(), |world, local| world * local),
        )
    }

    pub fn world_position(&self, id: NodeId) -> Option<Vector3<f32>> {
        self.world_matrix(id).map(|m| m.w.truncate())
    }

    /// Moves a node so that its origin lands on `position` in world space
    pub fn set_world_position(
        &mut self,
        id: NodeId,
        position: Vector3<f32>,
    ) -> Result<(), SceneError> {
        let parent_world = match self.parent(id) {
            Some(parent) => self
                .world_matrix(parent)
                .ok_or(SceneError::StaleNode(parent))?,
            None => Matrix4::identity(),
        };

        let local = if parent_world == Matrix4::identity() {
            position
        } else {
            let inverse = parent_world
                .invert()
                .ok_or(SceneError::SingularTransform(id))?;
            (inverse * position.extend(1.0)).truncate()
        };

        let node = self.get_mut(id).ok_or(SceneError::StaleNode(id))?;
        node.transform.position = local;
        Ok(())
    }

    /// Reparents `id` under `parent`, keeping its world transform
    ///
    /// Does nothing if `id` is already a direct child of `parent`.
    pub fn attach(&mut self, id: NodeId, parent: NodeId) -> Result<(), SceneError> {
        if id == self.root {
            return Err(SceneError::RootMutation);
        }
        if !self.contains(id) {
            return Err(SceneError::StaleNode(id));
        }
        if !self.contains(parent) {
            return Err(SceneError::StaleNode(parent));
        }
        if self.parent(id) == Some(parent) {
            return Ok(());
        }
        if self.is_descendant_of(parent, id) {
            return Err(SceneError::CyclicAttach { child: id, parent });
        }

        let world = self.world_matrix(id).ok_or(SceneError::StaleNode(id))?;
        let parent_inverse = self
            .world_matrix(parent)
            .ok_or(SceneError::StaleNode(parent))?
            .invert()
            .ok_or(SceneError::SingularTransform(parent))?;
        let local = Transform::from_matrix(&(parent_inverse * world));

        self.unlink(id);
        if let Some(node) = self.get_mut(id) {
            node.parent = Some(parent);
            node.transform = local;
        }
        if let Some(parent_node) = self.get_mut(parent) {
            parent_node.children.push(id);
        }
        Ok(())
    }

    fn unlink(&mut self, id: NodeId) {
        if let Some(parent) = self.parent(id) {
            if let Some(parent_node) = self.get_mut(parent) {
                parent_node.children.retain(|&child| child != id);
            }
        }
    }

    /// Destroys a node and its subtree
    ///
    /// Returns the number of meshes released. Freed slots get a new
    /// generation so outstanding handles go stale.
    pub fn remove(&mut self, id: NodeId) -> Result<usize, SceneError> {
        if id == self.root {
            return Err(SceneError::RootMutation);
        }
        if !self.contains(id) {
            return Err(SceneError::StaleNode(id));
        }

        self.unlink(id);

        let mut released = 0;
        for node_id in self.descendants(id) {
            let slot = &mut self.slots[node_id.index as usize];
            if let Some(node) = slot.node.take() {
                if node.mesh.is_some() {
                    released += 1;
                }
            }
            slot.generation = slot.generation.wrapping_add(1);
            self.free_list.push(node_id.index);
        }
        Ok(released)
    }

    /// Deep-copies a subtree under `parent` (or detached)
    ///
    /// Meshes are cloned so the copy owns its geometry, and highlights are
    /// cleared.
    pub fn duplicate(&mut self, id: NodeId, parent: Option<NodeId>) -> Result<NodeId, SceneError> {
        let source = self.get(id).ok_or(SceneError::StaleNode(id))?;
        let mut copy = source.clone();
        copy.highlight = Highlight::None;
        let children = source.children.clone();

        let new_id = self.insert(copy, parent)?;
        for child in children {
            self.duplicate(child, Some(new_id))?;
        }
        Ok(new_id)
    }

    /// Applies a highlight to every mesh in the subtree
    pub fn set_highlight_recursive(&mut self, id: NodeId, highlight: Highlight) {
        for node_id in self.descendants(id) {
            if let Some(node) = self.get_mut(node_id) {
                if node.mesh.is_some() {
                    node.highlight = highlight;
                }
            }
        }
    }

    /// Mesh nodes in the subtree
    pub fn mesh_descendants(&self, id: NodeId) -> Vec<NodeId> {
        self.descendants(id)
            .into_iter()
            .filter(|&node_id| self.get(node_id).is_some_and(|node| node.mesh.is_some()))
            .collect()
    }

    /// Triangle count of the subtree, floored
    pub fn polygon_count(&self, id: NodeId) -> u32 {
        let count: f64 = self
            .descendants(id)
            .into_iter()
            .filter_map(|node_id| self.get(node_id)?.mesh.as_ref())
            .map(|mesh| mesh.polygon_count())
            .sum();
        count.floor() as u32
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}
