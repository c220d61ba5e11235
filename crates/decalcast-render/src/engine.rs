//! Render-engine capability traits.
//!
//! The rendering engine itself is out of scope for this crate; it is modelled
//! as a set of independent capabilities a host engine provides. The display
//! controller implements the listener traits and registers each one
//! separately with the engine, rather than inheriting from engine base
//! classes.

use std::sync::Arc;

use decalcast_core::ImageFrame;
use glam::{Mat4, Vec2, Vec3, Vec4};

/// Opaque handle to an engine-owned scene node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u64);

/// Identifier of a render queue (pass group) within the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderQueueId(pub u8);

impl RenderQueueId {
    /// The main opaque-geometry queue, where decals apply.
    pub const MAIN: Self = Self(50);
}

/// Triangle mesh data handed to the engine when attaching geometry.
///
/// Per-vertex arrays are parallel; `indices` is a triangle list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    /// Vertex positions.
    pub positions: Vec<Vec3>,
    /// Per-vertex normals.
    pub normals: Vec<Vec3>,
    /// Per-vertex texture coordinates.
    pub uvs: Vec<Vec2>,
    /// Per-vertex colors (RGBA).
    pub colors: Vec<Vec4>,
    /// Triangle indices into the vertex arrays.
    pub indices: Vec<[u32; 3]>,
}

impl MeshData {
    /// Returns whether the mesh has no triangles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Returns the triangle count.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }
}

/// Scene-node attach/detach primitives provided by the engine.
pub trait SceneGraph {
    /// Creates a scene node; the label is diagnostic only.
    fn create_node(&mut self, label: &str) -> NodeId;

    /// Places a node in the scene.
    fn set_node_transform(&mut self, node: NodeId, transform: Mat4);

    /// Attaches mesh geometry to a node, replacing any previous geometry.
    fn attach_mesh(&mut self, node: NodeId, mesh: &MeshData);

    /// Removes the geometry attached to a node.
    fn detach_mesh(&mut self, node: NodeId);

    /// Destroys a node. Meshes must be detached first; the display
    /// controller owns that ordering.
    fn destroy_node(&mut self, node: NodeId);
}

/// Material texture-unit binding primitives provided by the engine.
///
/// A bound decal is global state on the named material, which is why the
/// binder scopes bindings to the render-queue events below.
pub trait MaterialBindings {
    /// Binds `frame` as the projective decal texture on `material`, with
    /// `projection` mapping world space to decal texture coordinates.
    fn bind_decal(&mut self, material: &str, frame: &Arc<ImageFrame>, projection: Mat4);

    /// Restores `material` to its non-decal state.
    fn unbind_decal(&mut self, material: &str);
}

/// Notification of render-queue boundaries, driven by the engine each frame.
pub trait RenderQueueListener {
    /// Called just before the given queue's passes run.
    fn pre_render_queue(&mut self, queue: RenderQueueId, materials: &mut dyn MaterialBindings);

    /// Called just after the given queue's passes finish.
    fn post_render_queue(&mut self, queue: RenderQueueId, materials: &mut dyn MaterialBindings);
}

/// Notification of render-target updates, driven by the engine each frame.
pub trait RenderTargetListener {
    /// Called before the target this display renders into is updated.
    fn pre_target_update(&mut self);

    /// Called after the target update completes.
    fn post_target_update(&mut self);
}

/// The full engine capability surface the display controller needs.
pub trait DecalEngine: SceneGraph + MaterialBindings {}

impl<T: SceneGraph + MaterialBindings> DecalEngine for T {}
