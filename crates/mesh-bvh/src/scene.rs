//! Caller-owned collection of placed meshes that is flattened into one
//! world-space soup whenever it changes.

use glam::Mat4;
use slotmap::{SlotMap, new_key_type};
use tracing::{info, instrument, warn};

use crate::{
    MeshBvh,
    config::BuildConfig,
    mesh::{MeshData, MeshError},
};

new_key_type! {
    pub struct ObjectId;
}

#[derive(Debug, Clone)]
pub struct SceneObject {
    pub mesh: MeshData,
    pub local_to_world: Mat4,
}

impl SceneObject {
    #[must_use]
    pub const fn new(mesh: MeshData, local_to_world: Mat4) -> Self {
        Self {
            mesh,
            local_to_world,
        }
    }
}

#[derive(Debug, Default)]
pub struct Scene {
    objects: SlotMap<ObjectId, SceneObject>,
    config: BuildConfig,
    needs_rebuild: bool,
    bvh: Option<MeshBvh>,
}

impl Scene {
    #[must_use]
    pub fn new(config: BuildConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Adds an object; its mesh is validated up front so a later rebuild
    /// cannot trip over it.
    pub fn register(&mut self, object: SceneObject) -> Result<ObjectId, MeshError> {
        object.mesh.as_mesh()?;

        self.needs_rebuild = true;
        Ok(self.objects.insert(object))
    }

    pub fn unregister(&mut self, id: ObjectId) -> Option<SceneObject> {
        let removed = self.objects.remove(id);
        if removed.is_some() {
            self.needs_rebuild = true;
        }
        removed
    }

    #[must_use]
    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(id)
    }

    /// Moves an object; marks the scene for rebuild.
    pub fn set_transform(&mut self, id: ObjectId, local_to_world: Mat4) -> bool {
        let Some(object) = self.objects.get_mut(id) else {
            return false;
        };

        object.local_to_world = local_to_world;
        self.needs_rebuild = true;
        true
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    #[must_use]
    pub const fn needs_rebuild(&self) -> bool {
        self.needs_rebuild
    }

    /// The tree from the last [`Scene::rebuild`], if there was anything to build.
    #[must_use]
    pub const fn bvh(&self) -> Option<&MeshBvh> {
        self.bvh.as_ref()
    }

    /// Every object moved into world space and concatenated, in slot order.
    #[must_use]
    pub fn world_mesh(&self) -> MeshData {
        let mut soup = MeshData::default();
        for object in self.objects.values() {
            soup.append_transformed(&object.mesh, &object.local_to_world);
        }
        soup
    }

    /// Rebuilds the tree if anything changed since the last call.
    ///
    /// Returns `Ok(None)` when no objects are registered.
    #[instrument(skip_all, fields(objects = self.objects.len()))]
    pub fn rebuild(&mut self) -> Result<Option<&MeshBvh>, MeshError> {
        if !self.needs_rebuild {
            return Ok(self.bvh.as_ref());
        }

        if self.objects.is_empty() {
            warn!("no objects to trace");
            self.bvh = None;
            self.needs_rebuild = false;
            return Ok(None);
        }

        let soup = self.world_mesh();
        let bvh = MeshBvh::build_with(soup.as_mesh()?, &self.config);

        info!(
            triangles = bvh.triangles().len(),
            nodes = bvh.nodes().len(),
            elapsed = ?bvh.stats().build_time,
            "rebuilt scene bvh"
        );

        self.needs_rebuild = false;
        let bvh = self.bvh.insert(bvh);
        Ok(Some(&*bvh))
    }
}
