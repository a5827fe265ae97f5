//! OBJ model loading
//!
//! Models are loaded with triangulation and a single index buffer. Each model
//! becomes one top-level node with a child mesh node per OBJ object. Materials
//! are not read; interaction feedback only needs the emissive highlight.

use std::io::BufRead;
use std::path::Path;

use super::node::{Mesh, Node, NodeId};
use super::scene::{SceneError, SceneGraph};

/// Errors from loading a model into the scene
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("could not parse OBJ data: {0}")]
    Obj(#[from] tobj::LoadError),
    #[error("OBJ data contains no geometry")]
    Empty,
    #[error(transparent)]
    Scene(#[from] SceneError),
}

fn load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        triangulate: true,
        single_index: true,
        ..Default::default()
    }
}

/// Loads an OBJ file as a new node under `parent` (or detached)
///
/// The top-level node takes the file stem as its name.
pub fn load_obj<P: AsRef<Path>>(
    scene: &mut SceneGraph,
    path: P,
    parent: Option<NodeId>,
) -> Result<NodeId, LoadError> {
    let path = path.as_ref();
    let (models, _materials) = tobj::load_obj(path, &load_options())?;

    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();

    insert_models(scene, &name, &models, parent)
}

/// Loads OBJ data from a reader; material libraries are ignored
pub fn load_obj_buf<B: BufRead>(
    scene: &mut SceneGraph,
    reader: &mut B,
    name: &str,
    parent: Option<NodeId>,
) -> Result<NodeId, LoadError> {
    let (models, _materials) =
        tobj::load_obj_buf(reader, &load_options(), |_| Ok(Default::default()))?;

    insert_models(scene, name, &models, parent)
}

fn insert_models(
    scene: &mut SceneGraph,
    name: &str,
    models: &[tobj::Model],
    parent: Option<NodeId>,
) -> Result<NodeId, LoadError> {
    if models.iter().all(|m| m.mesh.positions.is_empty()) {
        return Err(LoadError::Empty);
    }

    let root = scene.insert(Node::new(name), parent)?;

    for model in models {
        let mesh = &model.mesh;
        if mesh.positions.is_empty() {
            continue;
        }

        let part = Node::new(model.name.clone())
            .with_mesh(Mesh::from_flat(&mesh.positions, mesh.indices.clone()));
        scene.insert(part, Some(root))?;
    }

    log::debug!(
        "loaded model '{}' with {} polygons",
        name,
        scene.polygon_count(root)
    );
    Ok(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const QUAD_OBJ: &str = "\
o quad
v -0.5 0.0 -0.5
v 0.5 0.0 -0.5
v 0.5 0.0 0.5
v -0.5 0.0 0.5
f 1 2 3 4
o tri
v 0.0 1.0 0.0
v 1.0 1.0 0.0
v 0.0 2.0 0.0
f 5 6 7
";

    #[test]
    fn test_load_obj_buf_builds_hierarchy() {
        let mut scene = SceneGraph::new();
        let root = scene.root();
        let mut reader = Cursor::new(QUAD_OBJ.as_bytes());

        let model = load_obj_buf(&mut scene, &mut reader, "donut", Some(root)).unwrap();

        let node = scene.get(model).unwrap();
        assert_eq!(node.name, "donut");
        assert_eq!(node.children().len(), 2);
        // quad triangulates into two triangles, plus one triangle
        assert_eq!(scene.polygon_count(model), 3);
    }

    #[test]
    fn test_load_obj_buf_rejects_empty_data() {
        let mut scene = SceneGraph::new();
        let mut reader = Cursor::new("# nothing here\n".as_bytes());

        let result = load_obj_buf(&mut scene, &mut reader, "empty", None);
        assert!(matches!(result, Err(LoadError::Empty)));
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn test_load_obj_missing_file() {
        let mut scene = SceneGraph::new();
        let result = load_obj(&mut scene, "does/not/exist.obj", None);
        assert!(matches!(result, Err(LoadError::Obj(_))));
    }
}
