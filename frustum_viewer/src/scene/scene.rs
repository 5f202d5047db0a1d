/// Scene - the set of meshes drawn by the viewer.
///
/// Uses a SlotMap for O(1) insert/remove with stable keys.

use glam::Vec3;
use slotmap::{new_key_type, SlotMap};
use crate::error::Result;
use crate::engine_err;
use super::mesh::Mesh;

new_key_type! {
    /// Stable handle to a mesh of the scene
    pub struct MeshKey;
}

#[derive(Debug, Clone, Default)]
pub struct Scene {
    meshes: SlotMap<MeshKey, Mesh>,
}

impl Scene {
    pub fn new() -> Self {
        Self { meshes: SlotMap::with_key() }
    }

    /// Add a mesh. The key stays valid until the mesh is removed.
    pub fn add(&mut self, mesh: Mesh) -> MeshKey {
        self.meshes.insert(mesh)
    }

    pub fn remove(&mut self, key: MeshKey) -> Option<Mesh> {
        self.meshes.remove(key)
    }

    pub fn get(&self, key: MeshKey) -> Option<&Mesh> {
        self.meshes.get(key)
    }

    pub fn get_mut(&mut self, key: MeshKey) -> Option<&mut Mesh> {
        self.meshes.get_mut(key)
    }

    /// Move a mesh. Unknown keys are an error.
    pub fn set_position(&mut self, key: MeshKey, position: Vec3) -> Result<()> {
        let mesh = self.meshes.get_mut(key).ok_or_else(|| {
            engine_err!(InvalidParameter, "fviewer::Scene", "unknown mesh key {:?}", key)
        })?;
        mesh.set_position(position)
    }

    pub fn iter(&self) -> impl Iterator<Item = (MeshKey, &Mesh)> {
        self.meshes.iter()
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }
}

#[cfg(test)]
#[path = "scene_tests.rs"]
mod tests;
