//! Creating, loading, spawning and deleting interactive objects

use std::f32::consts::PI;
use std::io::BufRead;
use std::path::{Path, PathBuf};

use cgmath::Vector3;
use rand::Rng;

use crate::gfx::scene::loader::{self, LoadError};
use crate::gfx::scene::{Mesh, Node, NodeId, SceneError, Transform};

use super::{Engine, EngineCallbacks, EngineError};

impl<C: EngineCallbacks> Engine<C> {
    /// Adds a single-mesh object to the group at `position`
    ///
    /// The object stays where it is put until something grabs or drops it.
    pub fn add_object(
        &mut self,
        name: &str,
        mesh: Mesh,
        position: Vector3<f32>,
    ) -> Result<NodeId, EngineError> {
        let object = self.scene.insert(
            Node::new(name).with_transform(Transform::from_position(position)),
            Some(self.group),
        )?;
        self.scene
            .insert(Node::new(format!("{}_mesh", name)).with_mesh(mesh), Some(object))?;
        Ok(object)
    }

    /// Adds a single-mesh model as model `index` of `count`
    ///
    /// See [`load_model`](Self::load_model) for placement.
    pub fn add_model(
        &mut self,
        name: &str,
        mesh: Mesh,
        index: usize,
        count: usize,
    ) -> Result<NodeId, EngineError> {
        let model = self.add_object(name, mesh, Vector3::new(0.0, 0.0, 0.0))?;
        self.place_model(model, index, count)?;
        Ok(model)
    }

    /// Loads an OBJ file as model `index` of `count`
    ///
    /// Models are spread on a ring around the room centre, scaled up, and
    /// dropped. A detached copy is kept as a template for
    /// [`spawn_random_copy`](Self::spawn_random_copy).
    pub fn load_model<P: AsRef<Path>>(
        &mut self,
        path: P,
        index: usize,
        count: usize,
    ) -> Result<NodeId, EngineError> {
        let path = path.as_ref();
        let model = loader::load_obj(&mut self.scene, path, Some(self.group))
            .map_err(|source| model_load_error(path, source))?;
        self.place_model(model, index, count)?;
        log::info!("loaded model {:?} as {:?}", path, model);
        Ok(model)
    }

    /// Like [`load_model`](Self::load_model), reading OBJ data from memory
    pub fn load_model_buf<B: BufRead>(
        &mut self,
        reader: &mut B,
        name: &str,
        index: usize,
        count: usize,
    ) -> Result<NodeId, EngineError> {
        let model = loader::load_obj_buf(&mut self.scene, reader, name, Some(self.group))
            .map_err(|source| model_load_error(Path::new(name), source))?;
        self.place_model(model, index, count)?;
        log::info!("loaded model {} as {:?}", name, model);
        Ok(model)
    }

    /// Loads every model in `paths`, skipping the ones that fail
    pub fn load_models<P: AsRef<Path>>(&mut self, paths: &[P]) -> Vec<NodeId> {
        let count = paths.len();
        paths
            .iter()
            .enumerate()
            .filter_map(|(index, path)| match self.load_model(path, index, count) {
                Ok(model) => Some(model),
                Err(err) => {
                    log::warn!("skipping model: {}", err);
                    None
                }
            })
            .collect()
    }

    fn place_model(&mut self, model: NodeId, index: usize, count: usize) -> Result<(), EngineError> {
        let angle = index as f32 / count.max(1) as f32 * PI * 2.0;
        let radius = self.config.model_ring_radius;
        let position = Vector3::new(angle.cos() * radius, 0.0, angle.sin() * radius);

        let node = self
            .scene
            .get_mut(model)
            .ok_or(SceneError::StaleNode(model))?;
        node.transform.position = position;
        let scale = self.config.model_scale;
        node.transform.scale = Vector3::new(scale, scale, scale);

        let template = self.scene.duplicate(model, None)?;
        self.templates.push(template);
        self.fall.start_falling(model);
        Ok(())
    }

    /// Drops a copy of a random loaded model in front of the viewer
    ///
    /// During an immersive session the head pose is used when available,
    /// otherwise the desktop camera. Returns `None` when no model has been
    /// loaded yet.
    pub fn spawn_random_copy<R: Rng>(
        &mut self,
        rng: &mut R,
    ) -> Result<Option<NodeId>, EngineError> {
        if self.templates.is_empty() {
            return Ok(None);
        }

        let template_index = rng.random_range(0..self.templates.len());
        let template = self.templates[template_index];
        let copy = self.scene.duplicate(template, Some(self.group))?;

        let (eye, forward) = match self.viewer {
            Some(viewer) if self.session.is_active() => (viewer.position, viewer.forward()),
            _ => (self.camera.camera.eye, self.camera.camera.forward()),
        };

        let distance = 2.0 + rng.random::<f32>();
        let base = eye + forward * distance;
        let offset = Vector3::new(
            (rng.random::<f32>() - 0.5) * 1.0,
            (rng.random::<f32>() - 0.5) * 0.5,
            (rng.random::<f32>() - 0.5) * 1.0,
        );
        let position = self.room.clamp_point(base + offset);
        self.scene.set_world_position(copy, position)?;

        let name = format!("Model_{}_{}", template_index + 1, self.spawn_serial);
        self.spawn_serial += 1;
        if let Some(node) = self.scene.get_mut(copy) {
            node.name = name;
        }

        self.fall.start_falling(copy);
        log::debug!("spawned {:?} at {:?}", copy, position);
        Ok(Some(copy))
    }

    /// Removes a top-level object and releases its meshes
    pub fn delete_object(&mut self, object: NodeId) -> Result<(), EngineError> {
        if !self.scene.contains(object) {
            return Err(SceneError::StaleNode(object).into());
        }

        self.fall.stop_falling(object);
        let scene = &self.scene;
        self.intersected
            .retain(|&mesh| !scene.is_descendant_of(mesh, object));
        for state in self.controllers.iter_mut() {
            if state.selected == Some(object) {
                state.release();
            }
        }

        let released = self.scene.remove(object)?;
        log::debug!("deleted {:?}, released {} meshes", object, released);
        self.callbacks.on_object_selected(None, 0);
        Ok(())
    }

    /// Delete button: the delete controller's grab, else the first tinted
    /// mesh, else whatever the delete controller points at
    pub(super) fn handle_delete(&mut self) {
        let controller = self.config.delete_controller;

        let held = self
            .controllers
            .get_mut(controller)
            .and_then(|state| state.release());
        let target = held
            .or_else(|| {
                self.intersected
                    .first()
                    .and_then(|&mesh| self.top_level(mesh))
            })
            .or_else(|| self.pick(controller).and_then(|hit| self.top_level(hit.node)));

        let Some(object) = target else {
            log::trace!("delete pressed with nothing to delete");
            return;
        };
        if let Err(err) = self.delete_object(object) {
            log::warn!("could not delete {:?}: {}", object, err);
        }
    }
}

fn model_load_error(path: &Path, source: LoadError) -> EngineError {
    EngineError::ModelLoad {
        path: PathBuf::from(path),
        source,
    }
}
