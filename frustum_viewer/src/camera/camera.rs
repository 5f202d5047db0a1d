/// Camera - projection plus world placement.
///
/// Unlike a passive container, the camera keeps its projection and view
/// matrices in sync with its parameters: every setter validates its input
/// and recomputes the cached matrices before returning.

use glam::{Mat3, Mat4, Quat, Vec3};
use crate::error::Result;
use crate::engine_bail;
use super::projection::{Projection, OrthographicProjection, PerspectiveProjection};

/// Closest a camera may be to the point it looks at.
pub const MIN_LOOK_DISTANCE: f32 = 1e-4;

/// Position component selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        }
    }
}

/// A camera looking down its local -Z axis, +Y up.
#[derive(Debug, Clone)]
pub struct Camera {
    name: String,
    projection: Projection,
    position: Vec3,
    rotation: Quat,
    projection_matrix: Mat4,
    view_matrix: Mat4,
}

impl Camera {
    /// Create a camera at the origin with identity orientation.
    pub fn new(name: impl Into<String>, projection: Projection) -> Result<Self> {
        projection.validate()?;
        let mut camera = Self {
            name: name.into(),
            projection,
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            projection_matrix: projection.matrix(),
            view_matrix: Mat4::IDENTITY,
        };
        camera.update_view_matrix();
        Ok(camera)
    }

    pub fn new_orthographic(name: impl Into<String>, projection: OrthographicProjection) -> Result<Self> {
        Self::new(name, Projection::Orthographic(projection))
    }

    pub fn new_perspective(name: impl Into<String>, projection: PerspectiveProjection) -> Result<Self> {
        Self::new(name, Projection::Perspective(projection))
    }

    // ===== GETTERS =====

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    /// Direction the camera looks at, in world space.
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    /// Camera up vector, in world space.
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    /// Projection matrix (perspective or orthographic).
    pub fn projection_matrix(&self) -> &Mat4 {
        &self.projection_matrix
    }

    /// View matrix (inverse of the camera's world transform).
    pub fn view_matrix(&self) -> &Mat4 {
        &self.view_matrix
    }

    /// Camera placement in world space.
    pub fn world_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.position)
    }

    /// Combined view-projection matrix (projection * view).
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix * self.view_matrix
    }

    // ===== SETTERS =====

    /// Replace the projection. Invalid parameters leave the camera unchanged.
    pub fn set_projection(&mut self, projection: Projection) -> Result<()> {
        projection.validate()?;
        self.projection = projection;
        self.projection_matrix = projection.matrix();
        Ok(())
    }

    pub fn set_position(&mut self, position: Vec3) -> Result<()> {
        if !position.is_finite() {
            engine_bail!(InvalidParameter, "fviewer::Camera",
                "camera '{}' position must be finite, got {}", self.name, position);
        }
        self.position = position;
        self.update_view_matrix();
        Ok(())
    }

    /// Change a single position component.
    pub fn set_position_axis(&mut self, axis: Axis, value: f32) -> Result<()> {
        let mut position = self.position;
        position[axis.index()] = value;
        self.set_position(position)
    }

    pub fn set_rotation(&mut self, rotation: Quat) -> Result<()> {
        if !rotation.is_finite() || rotation.length_squared() == 0.0 {
            engine_bail!(InvalidParameter, "fviewer::Camera",
                "camera '{}' rotation must be a finite non-zero quaternion", self.name);
        }
        self.rotation = rotation.normalize();
        self.update_view_matrix();
        Ok(())
    }

    /// Orient the camera so that it faces `target`, keeping world +Y up.
    ///
    /// Looking straight up or down falls back to +Z as the up reference.
    pub fn look_at(&mut self, target: Vec3) -> Result<()> {
        if !target.is_finite() {
            engine_bail!(InvalidParameter, "fviewer::Camera",
                "camera '{}' look-at target must be finite, got {}", self.name, target);
        }
        let back = self.position - target;
        if back.length() < MIN_LOOK_DISTANCE {
            engine_bail!(InvalidParameter, "fviewer::Camera",
                "camera '{}' cannot look at its own position {}", self.name, target);
        }
        let z_axis = back.normalize();
        let mut x_axis = Vec3::Y.cross(z_axis);
        if x_axis.length_squared() <= f32::EPSILON {
            x_axis = Vec3::Z.cross(z_axis);
        }
        let x_axis = x_axis.normalize();
        let y_axis = z_axis.cross(x_axis);

        self.rotation = Quat::from_mat3(&Mat3::from_cols(x_axis, y_axis, z_axis)).normalize();
        self.update_view_matrix();
        Ok(())
    }

    fn update_view_matrix(&mut self) {
        self.view_matrix = self.world_matrix().inverse();
    }
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
