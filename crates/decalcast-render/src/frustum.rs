//! Projection frustum math.

use decalcast_core::Pose;
use glam::{Mat4, Quat, Vec3, Vec4};

/// A perspective frustum used to project or mask a decal.
///
/// The frustum looks down its local -Z axis, with +Y up and +X right, the
/// same camera convention the view matrix uses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frustum {
    origin: Vec3,
    orientation: Quat,
    fov_y_degrees: f32,
    aspect_ratio: f32,
    near: f32,
    far: f32,
}

impl Frustum {
    /// Creates a frustum at the origin with a 60° square field of view.
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            fov_y_degrees: 60.0,
            aspect_ratio: 1.0,
            near: 0.1,
            far: 100.0,
        }
    }

    /// Sets the frustum apex position and orientation.
    pub fn set_pose(&mut self, origin: Vec3, orientation: Quat) {
        self.origin = origin;
        self.orientation = orientation.normalize();
    }

    /// Sets the perspective shape.
    pub fn set_perspective(&mut self, fov_y_degrees: f32, aspect_ratio: f32) {
        self.fov_y_degrees = fov_y_degrees;
        self.aspect_ratio = aspect_ratio.max(f32::EPSILON);
    }

    /// Sets the clip distances.
    pub fn set_clip(&mut self, near: f32, far: f32) {
        self.near = near;
        self.far = far;
    }

    /// Returns the apex position.
    #[must_use]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Returns the apex orientation.
    #[must_use]
    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    /// Returns the vertical field of view in degrees.
    #[must_use]
    pub fn fov_y_degrees(&self) -> f32 {
        self.fov_y_degrees
    }

    /// Returns the aspect ratio (width / height).
    #[must_use]
    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    /// Returns the projection direction (local -Z in world space).
    #[must_use]
    pub fn look_dir(&self) -> Vec3 {
        self.orientation * -Vec3::Z
    }

    /// Returns the up direction.
    #[must_use]
    pub fn up_dir(&self) -> Vec3 {
        self.orientation * Vec3::Y
    }

    /// Returns the right direction.
    #[must_use]
    pub fn right_dir(&self) -> Vec3 {
        self.orientation * Vec3::X
    }

    /// Returns the frustum pose as [`Pose`].
    #[must_use]
    pub fn pose(&self) -> Pose {
        Pose::new(self.origin, self.orientation)
    }

    /// Returns the world-to-camera view matrix.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation, self.origin).inverse()
    }

    /// Returns the perspective projection matrix (depth range [0, 1]).
    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fov_y_degrees.to_radians(),
            self.aspect_ratio,
            self.near,
            self.far,
        )
    }

    /// Returns the matrix mapping world space to decal texture coordinates.
    ///
    /// NDC x maps to u left-to-right, NDC y maps to v top-to-bottom (image
    /// row 0 is the top of the frame), depth passes through.
    #[must_use]
    pub fn texture_projection_matrix(&self) -> Mat4 {
        let bias = Mat4::from_cols(
            Vec4::new(0.5, 0.0, 0.0, 0.0),
            Vec4::new(0.0, -0.5, 0.0, 0.0),
            Vec4::new(0.0, 0.0, 1.0, 0.0),
            Vec4::new(0.5, 0.5, 0.0, 1.0),
        );
        bias * self.projection_matrix() * self.view_matrix()
    }

    /// Returns whether a world-space point lies inside the frustum volume.
    #[must_use]
    pub fn contains(&self, point: Vec3) -> bool {
        let clip = self.projection_matrix() * self.view_matrix() * point.extend(1.0);
        if clip.w <= 0.0 {
            return false;
        }
        clip.x.abs() <= clip.w && clip.y.abs() <= clip.w && clip.z >= 0.0 && clip.z <= clip.w
    }
}

impl Default for Frustum {
    fn default() -> Self {
        Self::new()
    }
}

/// GPU-compatible frustum parameters for a decal pass.
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrustumUniforms {
    /// World-to-texture projection matrix, column major.
    pub texture_projection: [[f32; 4]; 4],
    /// Frustum apex position.
    pub origin: [f32; 3],
    /// Whether the projector transform is stale (1.0) or fresh (0.0).
    pub stale: f32,
}

impl FrustumUniforms {
    /// Builds uniforms from a frustum and its staleness flag.
    #[must_use]
    pub fn from_frustum(frustum: &Frustum, stale: bool) -> Self {
        Self {
            texture_projection: frustum.texture_projection_matrix().to_cols_array_2d(),
            origin: frustum.origin().to_array(),
            stale: if stale { 1.0 } else { 0.0 },
        }
    }
}
