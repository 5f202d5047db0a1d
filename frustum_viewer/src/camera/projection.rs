/// Projection parameters for the two camera kinds.
///
/// Both produce matrices with a [0, 1] depth range (glam `*_rh`).

use glam::Mat4;
use crate::error::Result;
use crate::engine_bail;

/// Box-shaped view volume given by its clip planes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrthographicProjection {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
    pub near: f32,
    pub far: f32,
}

impl OrthographicProjection {
    /// Bounds for a view volume `frustum_size` units tall, widened by `aspect`.
    pub fn from_frustum_size(frustum_size: f32, aspect: f32, near: f32, far: f32) -> Self {
        let half_height = frustum_size / 2.0;
        let half_width = frustum_size * aspect / 2.0;
        Self {
            left: -half_width,
            right: half_width,
            top: half_height,
            bottom: -half_height,
            near,
            far,
        }
    }

    pub fn half_height(&self) -> f32 {
        (self.top - self.bottom) / 2.0
    }

    pub fn half_width(&self) -> f32 {
        (self.right - self.left) / 2.0
    }

    pub fn validate(&self) -> Result<()> {
        let values = [self.left, self.right, self.top, self.bottom, self.near, self.far];
        if values.iter().any(|v| !v.is_finite()) {
            engine_bail!(InvalidParameter, "fviewer::Camera",
                "orthographic bounds must be finite: {:?}", self);
        }
        if self.right <= self.left {
            engine_bail!(InvalidParameter, "fviewer::Camera",
                "orthographic right {} must be greater than left {}", self.right, self.left);
        }
        if self.top <= self.bottom {
            engine_bail!(InvalidParameter, "fviewer::Camera",
                "orthographic top {} must be greater than bottom {}", self.top, self.bottom);
        }
        if self.far <= self.near {
            engine_bail!(InvalidParameter, "fviewer::Camera",
                "orthographic far {} must be greater than near {}", self.far, self.near);
        }
        Ok(())
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::orthographic_rh(self.left, self.right, self.bottom, self.top, self.near, self.far)
    }
}

/// Pyramid-shaped view volume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveProjection {
    /// Vertical field of view, in degrees
    pub fov_y_degrees: f32,
    /// Width / height
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl PerspectiveProjection {
    pub fn new(fov_y_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self { fov_y_degrees, aspect, near, far }
    }

    pub fn validate(&self) -> Result<()> {
        let values = [self.fov_y_degrees, self.aspect, self.near, self.far];
        if values.iter().any(|v| !v.is_finite()) {
            engine_bail!(InvalidParameter, "fviewer::Camera",
                "perspective parameters must be finite: {:?}", self);
        }
        if self.fov_y_degrees <= 0.0 || self.fov_y_degrees >= 180.0 {
            engine_bail!(InvalidParameter, "fviewer::Camera",
                "perspective fov {} must be within (0, 180) degrees", self.fov_y_degrees);
        }
        if self.aspect <= 0.0 {
            engine_bail!(InvalidParameter, "fviewer::Camera",
                "perspective aspect {} must be positive", self.aspect);
        }
        if self.near <= 0.0 || self.far <= self.near {
            engine_bail!(InvalidParameter, "fviewer::Camera",
                "perspective clip range {}..{} must satisfy 0 < near < far", self.near, self.far);
        }
        Ok(())
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_degrees.to_radians(), self.aspect, self.near, self.far)
    }
}

/// Camera projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    Orthographic(OrthographicProjection),
    Perspective(PerspectiveProjection),
}

impl Projection {
    pub fn validate(&self) -> Result<()> {
        match self {
            Projection::Orthographic(p) => p.validate(),
            Projection::Perspective(p) => p.validate(),
        }
    }

    pub fn matrix(&self) -> Mat4 {
        match self {
            Projection::Orthographic(p) => p.matrix(),
            Projection::Perspective(p) => p.matrix(),
        }
    }

    pub fn near(&self) -> f32 {
        match self {
            Projection::Orthographic(p) => p.near,
            Projection::Perspective(p) => p.near,
        }
    }

    pub fn far(&self) -> f32 {
        match self {
            Projection::Orthographic(p) => p.far,
            Projection::Perspective(p) => p.far,
        }
    }
}
