//! Anchor poses and stamped transform lookups.

use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// A 6-DoF pose: position plus orientation in a reference frame.
///
/// Quads and projectors are placed by composing a tracked frame's pose with a
/// configured offset pose.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// Translation component.
    pub position: Vec3,
    /// Rotation component (unit quaternion).
    pub orientation: Quat,
}

impl Pose {
    /// The identity pose (origin, no rotation).
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        orientation: Quat::IDENTITY,
    };

    /// Creates a pose from position and orientation.
    pub fn new(position: Vec3, orientation: Quat) -> Self {
        Self {
            position,
            orientation: orientation.normalize(),
        }
    }

    /// Creates a pose with only a translation.
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            orientation: Quat::IDENTITY,
        }
    }

    /// Returns the local X axis (width direction for a quad).
    #[must_use]
    pub fn x_axis(&self) -> Vec3 {
        self.orientation * Vec3::X
    }

    /// Returns the local Y axis (height direction for a quad).
    #[must_use]
    pub fn y_axis(&self) -> Vec3 {
        self.orientation * Vec3::Y
    }

    /// Returns the local Z axis (plane normal for a quad).
    #[must_use]
    pub fn z_axis(&self) -> Vec3 {
        self.orientation * Vec3::Z
    }

    /// Transforms a point from local coordinates into the pose's frame.
    #[must_use]
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.position + self.orientation * point
    }

    /// Composes this pose with a child offset (`self` applied first).
    #[must_use]
    pub fn compose(&self, offset: &Pose) -> Pose {
        Pose {
            position: self.transform_point(offset.position),
            orientation: (self.orientation * offset.orientation).normalize(),
        }
    }

    /// Returns the equivalent homogeneous transform matrix.
    #[must_use]
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation, self.position)
    }

    /// Returns whether two poses agree within the given tolerances.
    ///
    /// Positions are compared by distance; orientations by the absolute dot
    /// product of the quaternions (1.0 means identical up to sign).
    #[must_use]
    pub fn approx_eq(&self, other: &Pose, pos_tolerance: f32, rot_tolerance: f32) -> bool {
        let pos_ok = self.position.distance(other.position) <= pos_tolerance;
        let rot_ok = (1.0 - self.orientation.dot(other.orientation).abs()) <= rot_tolerance;
        pos_ok && rot_ok
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// A pose together with the age of the lookup that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StampedPose {
    /// The resolved pose.
    pub pose: Pose,
    /// Seconds elapsed since the transform was last observed.
    pub age_seconds: f32,
}

impl StampedPose {
    /// Creates a stamped pose.
    pub fn new(pose: Pose, age_seconds: f32) -> Self {
        Self { pose, age_seconds }
    }

    /// Creates a stamped pose that was observed just now.
    pub fn fresh(pose: Pose) -> Self {
        Self {
            pose,
            age_seconds: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_identity_axes() {
        let pose = Pose::IDENTITY;
        assert_eq!(pose.x_axis(), Vec3::X);
        assert_eq!(pose.y_axis(), Vec3::Y);
        assert_eq!(pose.z_axis(), Vec3::Z);
    }

    #[test]
    fn test_transform_point() {
        let pose = Pose::new(
            Vec3::new(1.0, 2.0, 3.0),
            Quat::from_rotation_z(FRAC_PI_2),
        );
        // Local +X rotates to world +Y before translating.
        let p = pose.transform_point(Vec3::X);
        assert!((p - Vec3::new(1.0, 3.0, 3.0)).length() < 1e-5);
    }

    #[test]
    fn test_compose() {
        let base = Pose::from_position(Vec3::new(1.0, 0.0, 0.0));
        let offset = Pose::from_position(Vec3::new(0.0, 2.0, 0.0));
        let composed = base.compose(&offset);
        assert!((composed.position - Vec3::new(1.0, 2.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_approx_eq_tolerances() {
        let a = Pose::from_position(Vec3::ZERO);
        let b = Pose::from_position(Vec3::new(1e-5, 0.0, 0.0));
        assert!(a.approx_eq(&b, 1e-4, 1e-4));
        let c = Pose::from_position(Vec3::new(0.1, 0.0, 0.0));
        assert!(!a.approx_eq(&c, 1e-4, 1e-4));
    }

    #[test]
    fn test_quaternion_sign_insensitive() {
        let a = Pose::new(Vec3::ZERO, Quat::from_rotation_y(0.3));
        let negated = Quat::from_xyzw(
            -a.orientation.x,
            -a.orientation.y,
            -a.orientation.z,
            -a.orientation.w,
        );
        let b = Pose::new(Vec3::ZERO, negated);
        assert!(a.approx_eq(&b, 1e-6, 1e-6));
    }
}
