//! Controller grab/drag state machine and hover tracking

use crate::gfx::picking::{Hit, ObjectPicker};
use crate::gfx::scene::{Highlight, NodeId};
use crate::simulation::constrain;
use crate::xr::{ControllerEvent, TargetRayMode};

use super::{Engine, EngineCallbacks};

impl<C: EngineCallbacks> Engine<C> {
    pub(super) fn handle_event(&mut self, event: ControllerEvent) {
        let index = event.controller();
        if index >= self.controllers.len() {
            log::warn!("event for unknown controller {}: {:?}", index, event);
            return;
        }

        match event {
            ControllerEvent::SelectStart { .. } => self.select_start(index),
            ControllerEvent::SelectEnd { .. } => self.select_end(index),
            ControllerEvent::Connected { .. } => {
                log::debug!("controller {} connected", index);
                self.controllers[index].connected = true;
            }
            ControllerEvent::Disconnected { .. } => {
                log::debug!("controller {} disconnected", index);
                self.controllers[index].connected = false;
                // Drop whatever it held the same way a trigger release would
                self.select_end(index);
            }
        }
    }

    /// Nearest hit along a controller's ray
    pub(super) fn pick(&self, index: usize) -> Option<Hit> {
        let pose = self.controllers.get(index)?.pose?;
        self.picker.intersect_first(&self.scene, self.group, &pose.ray())
    }

    pub(super) fn top_level(&self, node: NodeId) -> Option<NodeId> {
        ObjectPicker::resolve_top_level(&self.scene, self.group, node)
    }

    fn select_start(&mut self, index: usize) {
        if self.controllers[index].is_dragging() {
            return;
        }
        let Some(pose) = self.controllers[index].pose else {
            log::trace!("select on untracked controller {}", index);
            return;
        };
        let Some(object) = self.pick(index).and_then(|hit| self.top_level(hit.node)) else {
            return;
        };
        let Some(position) = self.scene.world_position(object) else {
            return;
        };

        // Taking an object out of the other hand
        for (other, state) in self.controllers.iter_mut().enumerate() {
            if other != index && state.selected == Some(object) {
                log::debug!("controller {} takes {:?} from controller {}", index, object, other);
                state.release();
            }
        }

        self.scene.set_highlight_recursive(object, Highlight::Selected);
        self.fall.stop_falling(object);

        let state = &mut self.controllers[index];
        state.selected = Some(object);
        state.selected_offset = Some(pose.world_to_local(position));

        let name = self.display_name(object);
        let polygons = self.scene.polygon_count(object);
        log::debug!("controller {} grabbed {} ({} polygons)", index, name, polygons);
        self.callbacks.on_object_selected(Some(name.as_str()), polygons);
    }

    fn select_end(&mut self, index: usize) {
        let Some(object) = self.controllers[index].release() else {
            return;
        };
        if !self.scene.contains(object) {
            return;
        }

        self.scene.set_highlight_recursive(object, Highlight::None);
        if let Err(err) = constrain(&mut self.scene, object, &self.room) {
            log::warn!("could not constrain released {:?}: {}", object, err);
        }
        if let Err(err) = self.scene.attach(object, self.group) {
            log::warn!("could not return {:?} to the group: {}", object, err);
        }
        self.fall.start_falling(object);

        log::debug!("controller {} released {:?}", index, object);
        self.callbacks.on_object_selected(None, 0);
    }

    /// Moves a held object with its controller
    pub(super) fn update_drag(&mut self, index: usize) {
        let state = self.controllers[index];
        let (Some(object), Some(offset), Some(pose)) =
            (state.selected, state.selected_offset, state.pose)
        else {
            return;
        };
        if !self.scene.contains(object) {
            self.controllers[index].release();
            return;
        }

        let desired = pose.local_to_world(offset);
        if let Err(err) = self.scene.set_world_position(object, desired) {
            log::warn!("could not move {:?}: {}", object, err);
            return;
        }
        if let Err(err) = constrain(&mut self.scene, object, &self.room) {
            log::warn!("could not constrain {:?}: {}", object, err);
            return;
        }

        let blocked = self
            .scene
            .world_position(object)
            .is_some_and(|actual| actual != desired);
        if blocked {
            log::trace!("{:?} blocked by the room bounds", object);
            self.scene.set_highlight_recursive(object, Highlight::Blocked);
            self.reverts
                .schedule(self.time + self.config.blocked_flash, object, Highlight::Selected);
        }
    }

    fn is_part_of_selected(&self, mesh: NodeId) -> bool {
        self.controllers
            .iter()
            .filter_map(|state| state.selected)
            .any(|object| self.scene.is_descendant_of(mesh, object))
    }

    /// Clears last frame's ray tint, leaving held objects alone
    pub(super) fn clean_intersected(&mut self) {
        while let Some(mesh) = self.intersected.pop() {
            if self.is_part_of_selected(mesh) {
                continue;
            }
            if let Some(node) = self.scene.get_mut(mesh) {
                node.highlight = Highlight::None;
            }
        }
    }

    /// Tints whatever a free controller points at
    pub(super) fn intersect_objects(&mut self, index: usize) {
        let state = self.controllers[index];
        let Some(pose) = state.pose else {
            self.controllers[index].ray_length = self.config.ray_length;
            return;
        };
        if pose.target_ray_mode == TargetRayMode::Screen || state.is_dragging() {
            return;
        }

        let hit = self.pick(index);
        let object = hit.and_then(|hit| self.top_level(hit.node));
        if let Some(object) = object {
            for mesh in self.scene.mesh_descendants(object) {
                if let Some(node) = self.scene.get_mut(mesh) {
                    if !matches!(node.highlight, Highlight::Selected | Highlight::Blocked) {
                        node.highlight = Highlight::Intersected;
                    }
                }
                self.intersected.push(mesh);
            }
        }

        self.controllers[index].ray_length = match (hit, object) {
            (Some(hit), Some(_)) => hit.distance,
            _ => self.config.ray_length,
        };
    }

    /// Reports the object closest to either free controller
    pub(super) fn update_hover(&mut self) {
        let mut closest: Option<Hit> = None;
        for index in 0..self.controllers.len() {
            if self.controllers[index].is_dragging() {
                continue;
            }
            if let Some(hit) = self.pick(index) {
                if closest.map_or(true, |best| hit.distance < best.distance) {
                    closest = Some(hit);
                }
            }
        }

        match closest.and_then(|hit| self.top_level(hit.node)) {
            Some(object) => {
                let name = self.display_name(object);
                if self.last_hovered.as_deref() != Some(name.as_str()) {
                    let polygons = self.scene.polygon_count(object);
                    self.callbacks.on_object_hovered(Some(name.as_str()), polygons);
                    self.last_hovered = Some(name);
                }
            }
            None => {
                if self.last_hovered.take().is_some() {
                    self.callbacks.on_object_hovered(None, 0);
                }
            }
        }
    }

    pub(super) fn display_name(&self, object: NodeId) -> String {
        self.scene
            .get(object)
            .map(|node| node.display_name().to_owned())
            .unwrap_or_else(|| "Object".to_owned())
    }
}
