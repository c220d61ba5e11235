//! The composite per-quad record.

use decalcast_core::{ImageFrame, Pose, QuadOptions};
use decalcast_render::{DecalProjector, NodeId, SceneGraph};
use glam::Vec2;

use crate::mesh::{construct_mesh, QuadMesh};

/// Everything belonging to one quad: options, geometry, projector, and the
/// engine nodes placing them.
///
/// Keeping mesh, projector, and nodes in one record (instead of parallel
/// arrays indexed by quad) means they can never drift out of sync in length.
#[derive(Debug)]
pub struct Quad {
    index: usize,
    options: QuadOptions,
    resolved_size: Vec2,
    mesh: QuadMesh,
    projector: DecalProjector,
    mesh_node: Option<NodeId>,
    projector_node: Option<NodeId>,
    material: String,
    dirty: bool,
}

impl Quad {
    /// Creates a quad record for `index` with the given options.
    #[must_use]
    pub fn new(index: usize, options: QuadOptions) -> Self {
        Self {
            index,
            resolved_size: Vec2::new(options.width, options.height),
            options,
            mesh: QuadMesh::empty(),
            projector: DecalProjector::new(index),
            mesh_node: None,
            projector_node: None,
            material: format!("decal_quad_{index}"),
            dirty: true,
        }
    }

    /// Flags the quad for a geometry rebuild on the next tick.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Consumes the dirty flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Returns the quad index.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the name of the material receiving this quad's decal.
    #[must_use]
    pub fn material(&self) -> &str {
        &self.material
    }

    /// Returns the quad's options.
    #[must_use]
    pub fn options(&self) -> &QuadOptions {
        &self.options
    }

    /// Returns mutable options; the caller schedules the matching rebuild.
    pub fn options_mut(&mut self) -> &mut QuadOptions {
        &mut self.options
    }

    /// Returns the current mesh.
    #[must_use]
    pub fn mesh(&self) -> &QuadMesh {
        &self.mesh
    }

    /// Returns the projector.
    #[must_use]
    pub fn projector(&self) -> &DecalProjector {
        &self.projector
    }

    /// Returns the projector mutably.
    pub fn projector_mut(&mut self) -> &mut DecalProjector {
        &mut self.projector
    }

    /// Returns the physical size currently in effect.
    #[must_use]
    pub fn resolved_size(&self) -> Vec2 {
        self.resolved_size
    }

    /// Computes the physical size the quad should have.
    ///
    /// Explicitly configured dimensions win; a zero dimension is derived from
    /// the image size times `meters_per_pixel` once a frame is available.
    #[must_use]
    pub fn desired_size(&self, frame: Option<&ImageFrame>, meters_per_pixel: f32) -> Vec2 {
        let mut size = Vec2::new(self.options.width, self.options.height);
        if let Some(frame) = frame.filter(|f| !f.is_empty()) {
            if size.x <= 0.0 {
                size.x = frame.width() as f32 * meters_per_pixel;
            }
            if size.y <= 0.0 {
                size.y = frame.height() as f32 * meters_per_pixel;
            }
        }
        size
    }

    /// Rebuilds the mesh for `size`, discarding the previous one.
    pub fn rebuild_mesh(&mut self, size: Vec2) {
        self.resolved_size = size;
        self.mesh = construct_mesh(
            &self.options.offset,
            size.x,
            size.y,
            self.options.border_size,
            self.options.border_color,
        );
    }

    /// Creates this quad's scene nodes and attaches the current mesh.
    pub fn attach(&mut self, engine: &mut dyn SceneGraph) {
        if self.mesh_node.is_none() {
            self.mesh_node = Some(engine.create_node(&format!("quad {} mesh", self.index)));
            self.projector_node =
                Some(engine.create_node(&format!("quad {} projector", self.index)));
        }
        if let Some(node) = self.mesh_node {
            if self.mesh.is_empty() {
                engine.detach_mesh(node);
            } else {
                engine.attach_mesh(node, self.mesh.data());
            }
        }
    }

    /// Detaches geometry and destroys this quad's nodes.
    ///
    /// Nodes go first, then the mesh is dropped; the quad record itself is
    /// dropped by the owner afterwards.
    pub fn detach(&mut self, engine: &mut dyn SceneGraph) {
        if let Some(node) = self.mesh_node.take() {
            engine.detach_mesh(node);
            engine.destroy_node(node);
        }
        if let Some(node) = self.projector_node.take() {
            engine.destroy_node(node);
        }
        self.mesh = QuadMesh::empty();
    }

    /// Places the quad's nodes for a newly resolved anchor-frame pose.
    ///
    /// The mesh bakes in the quad's offset, so the node transform is the
    /// frame pose alone; the projector node follows the projector apex.
    pub fn place(&mut self, engine: &mut dyn SceneGraph, frame_pose: &Pose) {
        if let Some(node) = self.mesh_node {
            engine.set_node_transform(node, frame_pose.to_matrix());
        }
        if let Some(node) = self.projector_node {
            engine.set_node_transform(node, self.projector.decal().pose().to_matrix());
        }
    }

    /// The world anchor pose for this quad's projector.
    #[must_use]
    pub fn world_anchor(&self, frame_pose: &Pose) -> Pose {
        frame_pose.compose(&self.options.offset)
    }
}
