//! Per-quad decal projector: one decal frustum plus mask frustums.

use decalcast_core::Pose;
use glam::{Quat, Vec2, Vec3};
use std::f32::consts::FRAC_PI_2;

use crate::frustum::{Frustum, FrustumUniforms};

/// Distance from the quad plane to the projector apex, in meters.
///
/// The field of view is derived from this and the quad extent so the
/// projected frame exactly spans the quad at the plane.
pub const PROJECTION_DISTANCE: f32 = 1.0;

/// Field of view of each mask frustum, degrees.
const MASK_FOV_DEGREES: f32 = 90.0;

/// Projects the current frame onto one quad and masks the projection so it
/// cannot bleed onto unrelated geometry.
///
/// The decal frustum sits [`PROJECTION_DISTANCE`] in front of the quad along
/// the anchor's +Z, looking back at it. Four mask frustums share the apex and
/// look 90° outward about the decal's up and right axes; a point receives the
/// decal only if it is inside the decal frustum and inside no mask.
#[derive(Debug, Clone)]
pub struct DecalProjector {
    index: usize,
    decal: Frustum,
    masks: Vec<Frustum>,
    anchor: Pose,
    initialized: bool,
    stale: bool,
}

impl DecalProjector {
    /// Allocates the frustum set for a quad index.
    #[must_use]
    pub fn new(index: usize) -> Self {
        Self {
            index,
            decal: Frustum::new(),
            masks: Vec::new(),
            anchor: Pose::IDENTITY,
            initialized: false,
            stale: false,
        }
    }

    /// Returns the owning quad index.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the decal frustum.
    #[must_use]
    pub fn decal(&self) -> &Frustum {
        &self.decal
    }

    /// Returns the mask frustums.
    #[must_use]
    pub fn masks(&self) -> &[Frustum] {
        &self.masks
    }

    /// Returns the anchor pose of the last successful reposition.
    #[must_use]
    pub fn anchor(&self) -> Pose {
        self.anchor
    }

    /// Returns whether the projector has ever been positioned.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Returns whether the last transform lookup failed.
    #[must_use]
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Flags the transform as stale, keeping the last known frustum poses.
    ///
    /// The controller suppresses the decal while stale instead of snapping
    /// the projector to a wrong pose.
    pub fn mark_stale(&mut self) {
        if self.initialized && !self.stale {
            log::debug!("projector {} transform went stale", self.index);
        }
        self.stale = true;
    }

    /// Recomputes the frustum set for a new anchor pose and quad geometry.
    ///
    /// `extent` is the quad's physical width and height; `aspect_ratio` comes
    /// from the image being projected. Returns false (leaving the projector
    /// untouched) when the geometry or aspect is unusable.
    pub fn reposition(&mut self, anchor: Pose, extent: Vec2, aspect_ratio: f32) -> bool {
        if extent.x <= 0.0 || extent.y <= 0.0 || aspect_ratio <= 0.0 {
            log::debug!(
                "projector {}: skipping reposition for degenerate extent {extent:?}",
                self.index
            );
            return false;
        }

        let origin = anchor.transform_point(Vec3::Z * PROJECTION_DISTANCE);
        let fov_y = 2.0 * (extent.y / (2.0 * PROJECTION_DISTANCE)).atan().to_degrees();

        self.decal.set_pose(origin, anchor.orientation);
        self.decal.set_perspective(fov_y, aspect_ratio);
        self.decal
            .set_clip(PROJECTION_DISTANCE * 0.1, PROJECTION_DISTANCE * 10.0);

        self.masks = Self::side_rotations()
            .into_iter()
            .map(|side| {
                let mut mask = Frustum::new();
                mask.set_pose(origin, (anchor.orientation * side).normalize());
                mask.set_perspective(MASK_FOV_DEGREES, 1.0);
                mask.set_clip(PROJECTION_DISTANCE * 0.01, PROJECTION_DISTANCE * 10.0);
                mask
            })
            .collect();

        self.anchor = anchor;
        self.initialized = true;
        self.stale = false;
        true
    }

    /// Returns whether a world-space point receives the decal.
    #[must_use]
    pub fn affects(&self, point: Vec3) -> bool {
        self.initialized
            && self.decal.contains(point)
            && !self.masks.iter().any(|mask| mask.contains(point))
    }

    /// Returns GPU uniforms for the decal pass.
    #[must_use]
    pub fn uniforms(&self) -> FrustumUniforms {
        FrustumUniforms::from_frustum(&self.decal, self.stale)
    }

    fn side_rotations() -> [Quat; 4] {
        [
            Quat::from_rotation_y(FRAC_PI_2),
            Quat::from_rotation_y(-FRAC_PI_2),
            Quat::from_rotation_x(FRAC_PI_2),
            Quat::from_rotation_x(-FRAC_PI_2),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positioned() -> DecalProjector {
        let mut projector = DecalProjector::new(0);
        assert!(projector.reposition(Pose::IDENTITY, Vec2::new(1.0, 0.5), 2.0));
        projector
    }

    #[test]
    fn test_reposition_places_apex_in_front() {
        let projector = positioned();
        assert!(projector.is_initialized());
        assert!(!projector.is_stale());
        assert!(
            (projector.decal().origin() - Vec3::new(0.0, 0.0, PROJECTION_DISTANCE)).length()
                < 1e-6
        );
        // Looking back at the quad plane.
        assert!((projector.decal().look_dir() - -Vec3::Z).length() < 1e-6);
        assert_eq!(projector.masks().len(), 4);
    }

    #[test]
    fn test_degenerate_extent_rejected() {
        let mut projector = DecalProjector::new(1);
        assert!(!projector.reposition(Pose::IDENTITY, Vec2::new(0.0, 0.5), 1.0));
        assert!(!projector.is_initialized());
    }

    #[test]
    fn test_quad_surface_is_affected() {
        let projector = positioned();
        // Quad center and points inside the half-extent (0.5 × 0.25).
        assert!(projector.affects(Vec3::ZERO));
        assert!(projector.affects(Vec3::new(0.0, 0.2, 0.0)));
        assert!(projector.affects(Vec3::new(0.45, 0.0, 0.0)));
    }

    #[test]
    fn test_side_geometry_is_masked() {
        let projector = positioned();
        // Far off to the side at the projector's height: caught by a mask.
        assert!(!projector.affects(Vec3::new(5.0, 0.0, PROJECTION_DISTANCE)));
        assert!(!projector.affects(Vec3::new(0.0, -5.0, PROJECTION_DISTANCE)));
        // Behind the projector.
        assert!(!projector.affects(Vec3::new(0.0, 0.0, 3.0)));
    }

    #[test]
    fn test_stale_keeps_transform() {
        let mut projector = positioned();
        let before = projector.decal().origin();
        projector.mark_stale();
        assert!(projector.is_stale());
        assert_eq!(projector.decal().origin(), before);

        // A successful reposition clears the flag.
        assert!(projector.reposition(
            Pose::from_position(Vec3::X),
            Vec2::new(1.0, 0.5),
            2.0
        ));
        assert!(!projector.is_stale());
    }

    #[test]
    fn test_uniforms_carry_stale_flag() {
        let mut projector = positioned();
        assert_eq!(projector.uniforms().stale, 0.0);
        projector.mark_stale();
        assert_eq!(projector.uniforms().stale, 1.0);
    }
}
