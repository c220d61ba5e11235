//! Quad mesh construction.

use decalcast_core::Pose;
use decalcast_render::MeshData;
use glam::{Vec2, Vec3, Vec4};

/// A planar quad mesh with an optional border strip.
///
/// Owned by exactly one quad record and regenerated wholesale on any
/// geometry-affecting change; it is never edited incrementally.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuadMesh {
    data: MeshData,
    interior_triangles: usize,
    border_triangles: usize,
    extent: Vec2,
}

impl QuadMesh {
    /// An empty (degenerate) mesh.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the engine-facing mesh data.
    #[must_use]
    pub fn data(&self) -> &MeshData {
        &self.data
    }

    /// Returns whether the mesh has no geometry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the interior triangle count (2 for a valid quad).
    #[must_use]
    pub fn interior_triangle_count(&self) -> usize {
        self.interior_triangles
    }

    /// Returns the border triangle count (8 when a border is present).
    #[must_use]
    pub fn border_triangle_count(&self) -> usize {
        self.border_triangles
    }

    /// Returns the quad's physical width and height (without border).
    #[must_use]
    pub fn extent(&self) -> Vec2 {
        self.extent
    }

    /// Returns the axis-aligned bounding box of all vertices.
    ///
    /// `None` when the mesh is empty.
    #[must_use]
    pub fn bounding_box(&self) -> Option<(Vec3, Vec3)> {
        if self.data.positions.is_empty() {
            return None;
        }
        let mut min = Vec3::splat(f32::MAX);
        let mut max = Vec3::splat(f32::MIN);
        for &p in &self.data.positions {
            min = min.min(p);
            max = max.max(p);
        }
        Some((min, max))
    }
}

/// Builds a quad mesh from a pose and extents.
///
/// The rectangle lies in the pose's local XY plane: width along local X,
/// height along local Y, normal along local Z. Interior UVs cover [0,1]² with
/// v = 0 at the top edge, matching image row order. A positive `border_size`
/// adds a ring of triangles offset outward, vertex-colored `border_color` and
/// independent of the projected decal.
///
/// Invalid numeric input (non-positive width or height, negative border)
/// yields an empty mesh; callers check [`QuadMesh::is_empty`] before use.
#[must_use]
pub fn construct_mesh(
    pose: &Pose,
    width: f32,
    height: f32,
    border_size: f32,
    border_color: Vec4,
) -> QuadMesh {
    if width <= 0.0 || height <= 0.0 || border_size < 0.0 {
        return QuadMesh::empty();
    }

    let mut data = MeshData::default();
    let normal = pose.z_axis();
    let half = Vec2::new(width * 0.5, height * 0.5);
    let corner = |x: f32, y: f32| pose.transform_point(Vec3::new(x, y, 0.0));

    // Interior: four corners, counter-clockwise seen from the +Z (front) side.
    let corners = [
        (-half.x, -half.y),
        (half.x, -half.y),
        (half.x, half.y),
        (-half.x, half.y),
    ];
    let uvs = [
        Vec2::new(0.0, 1.0),
        Vec2::new(1.0, 1.0),
        Vec2::new(1.0, 0.0),
        Vec2::new(0.0, 0.0),
    ];
    for (&(x, y), &uv) in corners.iter().zip(uvs.iter()) {
        data.positions.push(corner(x, y));
        data.normals.push(normal);
        data.uvs.push(uv);
        data.colors.push(Vec4::ONE);
    }
    data.indices.push([0, 1, 2]);
    data.indices.push([0, 2, 3]);
    let interior_triangles = data.indices.len();

    if border_size > 0.0 {
        let outer = half + Vec2::splat(border_size);
        // Inner ring duplicates the corner positions so the border color does
        // not bleed into the interior vertices.
        let rings = [
            [
                (-half.x, -half.y),
                (half.x, -half.y),
                (half.x, half.y),
                (-half.x, half.y),
            ],
            [
                (-outer.x, -outer.y),
                (outer.x, -outer.y),
                (outer.x, outer.y),
                (-outer.x, outer.y),
            ],
        ];
        for ring in &rings {
            for &(x, y) in ring {
                data.positions.push(corner(x, y));
                data.normals.push(normal);
                data.uvs.push(Vec2::ZERO);
                data.colors.push(border_color);
            }
        }
        let inner = 4u32;
        let outer_base = 8u32;
        for side in 0..4u32 {
            let i0 = inner + side;
            let i1 = inner + (side + 1) % 4;
            let o0 = outer_base + side;
            let o1 = outer_base + (side + 1) % 4;
            data.indices.push([o0, o1, i1]);
            data.indices.push([o0, i1, i0]);
        }
    }
    let border_triangles = data.indices.len() - interior_triangles;

    QuadMesh {
        data,
        interior_triangles,
        border_triangles,
        extent: Vec2::new(width, height),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Quat;
    use proptest::prelude::*;

    #[test]
    fn test_interior_only() {
        let mesh = construct_mesh(&Pose::IDENTITY, 1.0, 0.5, 0.0, Vec4::ONE);
        assert!(!mesh.is_empty());
        assert_eq!(mesh.interior_triangle_count(), 2);
        assert_eq!(mesh.border_triangle_count(), 0);
        assert_eq!(mesh.data().positions.len(), 4);

        let (min, max) = mesh.bounding_box().unwrap();
        assert!((min - Vec3::new(-0.5, -0.25, 0.0)).length() < 1e-6);
        assert!((max - Vec3::new(0.5, 0.25, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_border_ring() {
        let mesh = construct_mesh(&Pose::IDENTITY, 1.0, 0.5, 0.05, Vec4::new(1.0, 0.0, 0.0, 1.0));
        assert_eq!(mesh.interior_triangle_count(), 2);
        assert_eq!(mesh.border_triangle_count(), 8);
        assert_eq!(mesh.data().positions.len(), 12);

        // The bounding box grows by exactly the border size.
        let (min, max) = mesh.bounding_box().unwrap();
        assert!((min - Vec3::new(-0.55, -0.3, 0.0)).length() < 1e-6);
        assert!((max - Vec3::new(0.55, 0.3, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_degenerate_input() {
        assert!(construct_mesh(&Pose::IDENTITY, 0.0, 1.0, 0.0, Vec4::ONE).is_empty());
        assert!(construct_mesh(&Pose::IDENTITY, 1.0, -1.0, 0.0, Vec4::ONE).is_empty());
        assert!(construct_mesh(&Pose::IDENTITY, 1.0, 1.0, -0.1, Vec4::ONE).is_empty());
        assert!(construct_mesh(&Pose::IDENTITY, 1.0, 1.0, 0.0, Vec4::ONE)
            .bounding_box()
            .is_some());
    }

    #[test]
    fn test_pose_carries_through() {
        let pose = Pose::new(Vec3::new(0.0, 0.0, 2.0), Quat::IDENTITY);
        let mesh = construct_mesh(&pose, 1.0, 1.0, 0.0, Vec4::ONE);
        let (min, max) = mesh.bounding_box().unwrap();
        assert!((min.z - 2.0).abs() < 1e-6);
        assert!((max.z - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_winding_faces_front() {
        let mesh = construct_mesh(&Pose::IDENTITY, 2.0, 1.0, 0.1, Vec4::ONE);
        for tri in &mesh.data().indices {
            let [a, b, c] = tri.map(|i| mesh.data().positions[i as usize]);
            let n = (b - a).cross(c - a);
            assert!(n.z > 0.0, "triangle {tri:?} winds away from +Z");
        }
    }

    #[test]
    fn test_uvs_follow_image_rows() {
        let mesh = construct_mesh(&Pose::IDENTITY, 1.0, 1.0, 0.0, Vec4::ONE);
        // Top-left corner (index 3) samples the first image row.
        assert_eq!(mesh.data().uvs[3], Vec2::new(0.0, 0.0));
        assert_eq!(mesh.data().uvs[1], Vec2::new(1.0, 1.0));
    }

    proptest! {
        #[test]
        fn prop_deterministic(
            w in 0.01f32..10.0,
            h in 0.01f32..10.0,
            b in 0.0f32..1.0,
        ) {
            let color = Vec4::new(0.2, 0.4, 0.6, 1.0);
            let first = construct_mesh(&Pose::IDENTITY, w, h, b, color);
            let second = construct_mesh(&Pose::IDENTITY, w, h, b, color);
            prop_assert_eq!(&first, &second);
        }

        #[test]
        fn prop_triangle_counts(
            w in 0.01f32..10.0,
            h in 0.01f32..10.0,
            b in 0.0f32..1.0,
        ) {
            let mesh = construct_mesh(&Pose::IDENTITY, w, h, b, Vec4::ONE);
            prop_assert_eq!(mesh.interior_triangle_count(), 2);
            if b > 0.0 {
                prop_assert_eq!(mesh.border_triangle_count(), 8);
            } else {
                prop_assert_eq!(mesh.border_triangle_count(), 0);
            }
        }
    }
}
