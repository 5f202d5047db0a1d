/// Camera rig - the orthographic and the perspective camera of the viewer.
///
/// The rig keeps both projections consistent with the viewport size and is the
/// only write path for camera placement from the outside (`apply`).

use glam::Vec3;
use crate::config::CameraRigConfig;
use crate::error::Result;
use crate::{engine_bail, engine_debug};
use super::camera::{Axis, Camera};
use super::helper::CameraHelper;
use super::projection::{OrthographicProjection, PerspectiveProjection, Projection};

/// Which camera of the rig a command targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraId {
    Orthographic,
    Perspective,
}

impl CameraId {
    pub const ALL: [CameraId; 2] = [CameraId::Orthographic, CameraId::Perspective];

    pub fn label(self) -> &'static str {
        match self {
            CameraId::Orthographic => "Orthographic",
            CameraId::Perspective => "Perspective",
        }
    }
}

/// Validated camera mutation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraCommand {
    SetPosition(Vec3),
    SetPositionAxis(Axis, f32),
    LookAt(Vec3),
}

#[derive(Debug, Clone)]
pub struct CameraRig {
    orthographic: Camera,
    perspective: Camera,
    frustum_size: f32,
    width: u32,
    height: u32,
    helper: CameraHelper,
}

impl CameraRig {
    pub fn new(config: &CameraRigConfig, width: u32, height: u32) -> Result<Self> {
        config.validate()?;
        if width == 0 || height == 0 {
            engine_bail!(InvalidParameter, "fviewer::CameraRig",
                "initial viewport must be non-empty, got {}x{}", width, height);
        }
        let aspect = width as f32 / height as f32;

        let mut orthographic = Camera::new_orthographic(
            "orthographic",
            OrthographicProjection::from_frustum_size(
                config.frustum_size, aspect, config.ortho_near, config.ortho_far,
            ),
        )?;
        orthographic.set_position(config.ortho_position)?;

        let mut perspective = Camera::new_perspective(
            "perspective",
            PerspectiveProjection::new(
                config.fov_y_degrees, aspect, config.perspective_near, config.perspective_far,
            ),
        )?;
        perspective.set_position(config.perspective_position)?;
        perspective.look_at(config.perspective_target)?;

        let helper = CameraHelper::from_camera(&orthographic);

        Ok(Self {
            orthographic,
            perspective,
            frustum_size: config.frustum_size,
            width,
            height,
            helper,
        })
    }

    // ===== GETTERS =====

    pub fn orthographic(&self) -> &Camera {
        &self.orthographic
    }

    pub fn perspective(&self) -> &Camera {
        &self.perspective
    }

    /// Mutable access for the orbit controller. Camera setters still validate.
    pub fn perspective_mut(&mut self) -> &mut Camera {
        &mut self.perspective
    }

    pub fn camera(&self, id: CameraId) -> &Camera {
        match id {
            CameraId::Orthographic => &self.orthographic,
            CameraId::Perspective => &self.perspective,
        }
    }

    /// Outline of the orthographic camera's view volume.
    pub fn helper(&self) -> &CameraHelper {
        &self.helper
    }

    pub fn frustum_size(&self) -> f32 {
        self.frustum_size
    }

    pub fn viewport(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    // ===== UPDATES =====

    /// Recompute both projections for a new viewport size.
    ///
    /// The orthographic half-height stays `frustum_size / 2` and the perspective
    /// vertical fov is kept. An empty viewport (minimized window) is ignored.
    pub fn on_resize(&mut self, width: u32, height: u32) -> Result<()> {
        if width == 0 || height == 0 {
            engine_debug!("fviewer::CameraRig", "Ignoring resize to {}x{}", width, height);
            return Ok(());
        }
        let aspect = width as f32 / height as f32;
        let orthographic = self.orthographic_projection(self.frustum_size, aspect)?;
        let perspective = match *self.perspective.projection() {
            Projection::Perspective(p) => PerspectiveProjection { aspect, ..p },
            Projection::Orthographic(_) => {
                engine_bail!(InvalidState, "fviewer::CameraRig",
                    "perspective camera lost its perspective projection");
            }
        };
        perspective.validate()?;

        self.orthographic.set_projection(Projection::Orthographic(orthographic))?;
        self.perspective.set_projection(Projection::Perspective(perspective))?;
        self.width = width;
        self.height = height;
        self.helper.update(&self.orthographic);

        engine_debug!("fviewer::CameraRig", "Viewport resized to {}x{} (aspect {:.3})", width, height, aspect);
        Ok(())
    }

    /// Change the height of the orthographic view volume.
    pub fn set_frustum_size(&mut self, frustum_size: f32) -> Result<()> {
        if !frustum_size.is_finite() || frustum_size <= 0.0 {
            engine_bail!(InvalidParameter, "fviewer::CameraRig",
                "frustum_size must be positive, got {}", frustum_size);
        }
        let orthographic = self.orthographic_projection(frustum_size, self.aspect())?;
        self.orthographic.set_projection(Projection::Orthographic(orthographic))?;
        self.frustum_size = frustum_size;
        self.helper.update(&self.orthographic);
        Ok(())
    }

    /// Apply a command to one camera. On error the camera is unchanged.
    pub fn apply(&mut self, id: CameraId, command: CameraCommand) -> Result<()> {
        let camera = match id {
            CameraId::Orthographic => &mut self.orthographic,
            CameraId::Perspective => &mut self.perspective,
        };
        match command {
            CameraCommand::SetPosition(position) => camera.set_position(position)?,
            CameraCommand::SetPositionAxis(axis, value) => camera.set_position_axis(axis, value)?,
            CameraCommand::LookAt(target) => camera.look_at(target)?,
        }
        if id == CameraId::Orthographic {
            self.helper.update(&self.orthographic);
        }
        Ok(())
    }

    fn orthographic_projection(&self, frustum_size: f32, aspect: f32) -> Result<OrthographicProjection> {
        let (near, far) = (self.orthographic.projection().near(), self.orthographic.projection().far());
        let projection = OrthographicProjection::from_frustum_size(frustum_size, aspect, near, far);
        projection.validate()?;
        Ok(projection)
    }
}

#[cfg(test)]
#[path = "camera_rig_tests.rs"]
mod tests;
