//! Recording engine: a headless test double for the engine capabilities.

use std::collections::HashMap;
use std::sync::Arc;

use decalcast_core::ImageFrame;
use glam::Mat4;

use crate::engine::{MaterialBindings, MeshData, NodeId, SceneGraph};

/// A scene node as the recording engine saw it.
#[derive(Debug, Clone)]
pub struct RecordedNode {
    /// Diagnostic label passed at creation.
    pub label: String,
    /// Last transform set on the node.
    pub transform: Mat4,
    /// Currently attached mesh, if any.
    pub mesh: Option<MeshData>,
}

/// Implements the engine capability traits by recording every call.
///
/// Stands in for a real engine in tests and headless runs: nodes live in a
/// map, decal bindings in another, and ordering violations are counted
/// instead of crashing.
#[derive(Debug, Default)]
pub struct RecordingEngine {
    next_node: u64,
    nodes: HashMap<NodeId, RecordedNode>,
    decals: HashMap<String, (Arc<ImageFrame>, Mat4)>,
    bind_count: usize,
    unbind_count: usize,
    ordering_violations: usize,
}

impl RecordingEngine {
    /// Creates an empty engine.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of live nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns a recorded node.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&RecordedNode> {
        self.nodes.get(&id)
    }

    /// Returns whether `material` currently has a decal bound.
    #[must_use]
    pub fn decal_bound(&self, material: &str) -> bool {
        self.decals.contains_key(material)
    }

    /// Returns the frame currently bound to `material`.
    #[must_use]
    pub fn bound_frame(&self, material: &str) -> Option<&Arc<ImageFrame>> {
        self.decals.get(material).map(|(frame, _)| frame)
    }

    /// Returns the number of materials with a decal bound right now.
    #[must_use]
    pub fn bound_decal_count(&self) -> usize {
        self.decals.len()
    }

    /// Total `bind_decal` calls observed.
    #[must_use]
    pub fn bind_count(&self) -> usize {
        self.bind_count
    }

    /// Total `unbind_decal` calls observed.
    #[must_use]
    pub fn unbind_count(&self) -> usize {
        self.unbind_count
    }

    /// Destruction-ordering violations observed (node destroyed with a mesh
    /// still attached, or operations on unknown nodes).
    #[must_use]
    pub fn ordering_violations(&self) -> usize {
        self.ordering_violations
    }
}

impl SceneGraph for RecordingEngine {
    fn create_node(&mut self, label: &str) -> NodeId {
        let id = NodeId(self.next_node);
        self.next_node += 1;
        self.nodes.insert(
            id,
            RecordedNode {
                label: label.to_string(),
                transform: Mat4::IDENTITY,
                mesh: None,
            },
        );
        id
    }

    fn set_node_transform(&mut self, node: NodeId, transform: Mat4) {
        match self.nodes.get_mut(&node) {
            Some(recorded) => recorded.transform = transform,
            None => self.ordering_violations += 1,
        }
    }

    fn attach_mesh(&mut self, node: NodeId, mesh: &MeshData) {
        match self.nodes.get_mut(&node) {
            Some(recorded) => recorded.mesh = Some(mesh.clone()),
            None => self.ordering_violations += 1,
        }
    }

    fn detach_mesh(&mut self, node: NodeId) {
        match self.nodes.get_mut(&node) {
            Some(recorded) => recorded.mesh = None,
            None => self.ordering_violations += 1,
        }
    }

    fn destroy_node(&mut self, node: NodeId) {
        match self.nodes.remove(&node) {
            Some(recorded) => {
                if recorded.mesh.is_some() {
                    log::warn!("node '{}' destroyed with mesh attached", recorded.label);
                    self.ordering_violations += 1;
                }
            }
            None => self.ordering_violations += 1,
        }
    }
}

impl MaterialBindings for RecordingEngine {
    fn bind_decal(&mut self, material: &str, frame: &Arc<ImageFrame>, projection: Mat4) {
        self.bind_count += 1;
        self.decals
            .insert(material.to_string(), (Arc::clone(frame), projection));
    }

    fn unbind_decal(&mut self, material: &str) {
        self.unbind_count += 1;
        self.decals.remove(material);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use decalcast_core::PixelEncoding;

    #[test]
    fn test_node_lifecycle() {
        let mut engine = RecordingEngine::new();
        let node = engine.create_node("quad 0");
        engine.set_node_transform(node, Mat4::from_translation(glam::Vec3::X));
        assert_eq!(engine.node_count(), 1);

        engine.attach_mesh(node, &MeshData::default());
        engine.detach_mesh(node);
        engine.destroy_node(node);
        assert_eq!(engine.node_count(), 0);
        assert_eq!(engine.ordering_violations(), 0);
    }

    #[test]
    fn test_destroy_with_mesh_counts_violation() {
        let mut engine = RecordingEngine::new();
        let node = engine.create_node("quad 0");
        engine.attach_mesh(node, &MeshData::default());
        engine.destroy_node(node);
        assert_eq!(engine.ordering_violations(), 1);
    }

    #[test]
    fn test_decal_bindings() {
        let mut engine = RecordingEngine::new();
        let frame =
            Arc::new(ImageFrame::new(1, 1, PixelEncoding::Mono8, vec![0u8], 3).unwrap());
        engine.bind_decal("mat", &frame, Mat4::IDENTITY);
        assert!(engine.decal_bound("mat"));
        assert_eq!(engine.bound_frame("mat").unwrap().seq(), 3);

        engine.unbind_decal("mat");
        assert!(!engine.decal_bound("mat"));
        assert_eq!(engine.bind_count(), 1);
        assert_eq!(engine.unbind_count(), 1);
    }
}
