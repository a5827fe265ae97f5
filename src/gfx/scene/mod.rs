//! # Scene Management Module
//!
//! An arena-backed scene graph holding the room's interactive objects. Nodes
//! are addressed by generation-checked [`NodeId`] handles rather than
//! references, so the interaction engine can keep handles in maps and queues
//! and detect when the object behind one has been destroyed.
//!
//! ## Key Components
//!
//! - [`SceneGraph`] - Node storage, parent links, world transforms, reparenting
//! - [`Node`] - Name, local [`Transform`], optional [`Mesh`] and [`Highlight`]
//! - [`loader`] - OBJ model loading into the graph
//!
//! ## Usage
//!
//! ```rust
//! use xr_room::gfx::scene::{Node, SceneGraph};
//!
//! let mut scene = SceneGraph::new();
//! let group = scene.insert(Node::new("interactive"), Some(scene.root())).unwrap();
//! let model = scene.insert(Node::new("Model_1"), Some(group)).unwrap();
//! assert_eq!(scene.parent(model), Some(group));
//! ```

pub mod loader;
pub mod node;
pub mod scene;

// Re-export main types
pub use node::{Highlight, Mesh, Node, NodeId, Transform};
pub use scene::{SceneError, SceneGraph};
