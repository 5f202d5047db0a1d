/// Viewer configuration.
///
/// Plain structs with defaults matching the stock viewer. Call
/// `ViewerConfig::validate` (done by `Viewer::new`) before use.

use glam::Vec3;
use crate::camera::MIN_LOOK_DISTANCE;
use crate::error::Result;
use crate::engine_bail;

/// RGBA color, components in [0, 1].
pub type Color = [f32; 4];

/// Build an opaque color from a 0xRRGGBB value.
pub fn color_from_hex(hex: u32) -> Color {
    let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
    [channel(16), channel(8), channel(0), 1.0]
}

#[derive(Debug, Clone, PartialEq)]
pub struct CameraRigConfig {
    /// Height of the orthographic view volume in world units
    pub frustum_size: f32,
    pub ortho_near: f32,
    pub ortho_far: f32,
    pub ortho_position: Vec3,
    /// Vertical field of view of the perspective camera, in degrees
    pub fov_y_degrees: f32,
    pub perspective_near: f32,
    pub perspective_far: f32,
    pub perspective_position: Vec3,
    /// Point the perspective camera (and its orbit controller) looks at
    pub perspective_target: Vec3,
}

impl Default for CameraRigConfig {
    fn default() -> Self {
        Self {
            frustum_size: 10.0,
            ortho_near: 0.1,
            ortho_far: 100.0,
            ortho_position: Vec3::new(0.0, 0.0, 1.0),
            fov_y_degrees: 75.0,
            perspective_near: 0.1,
            perspective_far: 1000.0,
            perspective_position: Vec3::new(2.0, 2.0, 6.0),
            perspective_target: Vec3::ZERO,
        }
    }
}

impl CameraRigConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.frustum_size.is_finite() || self.frustum_size <= 0.0 {
            engine_bail!(InvalidParameter, "fviewer::Config",
                "frustum_size must be positive, got {}", self.frustum_size);
        }
        let points = [self.ortho_position, self.perspective_position, self.perspective_target];
        if points.iter().any(|p| !p.is_finite()) {
            engine_bail!(InvalidParameter, "fviewer::Config",
                "camera positions and target must be finite");
        }
        if self.perspective_position.distance(self.perspective_target) < MIN_LOOK_DISTANCE {
            engine_bail!(InvalidParameter, "fviewer::Config",
                "perspective camera cannot sit on its target {}", self.perspective_target);
        }
        // Clip ranges and fov are checked by the projections themselves.
        Ok(())
    }
}

/// Debug control panel layout.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelConfig {
    /// Lower bound of every position field
    pub min: f32,
    /// Upper bound of every position field
    pub max: f32,
    /// Folders start expanded
    pub open: bool,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self { min: -50.0, max: 50.0, open: true }
    }
}

impl PanelConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min > self.max {
            engine_bail!(InvalidParameter, "fviewer::Config",
                "panel range [{}, {}] is invalid", self.min, self.max);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    pub rig: CameraRigConfig,
    /// Show the debug panel and accept its edits
    pub debug: bool,
    pub panel: PanelConfig,
    /// Upper bound for the device pixel ratio used by the renderer
    pub max_pixel_ratio: f32,
    pub cube_size: Vec3,
    pub cube_position: Vec3,
    pub cube_color: Color,
    pub clear_color: Color,
    pub helper_color: Color,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            rig: CameraRigConfig::default(),
            debug: true,
            panel: PanelConfig::default(),
            max_pixel_ratio: 2.0,
            cube_size: Vec3::ONE,
            cube_position: Vec3::ZERO,
            cube_color: color_from_hex(0xffffff),
            clear_color: color_from_hex(0x000000),
            helper_color: color_from_hex(0xffaa00),
        }
    }
}

impl ViewerConfig {
    pub fn validate(&self) -> Result<()> {
        self.rig.validate()?;
        self.panel.validate()?;
        if !self.max_pixel_ratio.is_finite() || self.max_pixel_ratio <= 0.0 {
            engine_bail!(InvalidParameter, "fviewer::Config",
                "max_pixel_ratio must be positive, got {}", self.max_pixel_ratio);
        }
        if !self.cube_size.is_finite() || self.cube_size.min_element() <= 0.0 {
            engine_bail!(InvalidParameter, "fviewer::Config",
                "cube size must be positive on every axis, got {}", self.cube_size);
        }
        if !self.cube_position.is_finite() {
            engine_bail!(InvalidParameter, "fviewer::Config",
                "cube position must be finite, got {}", self.cube_position);
        }
        Ok(())
    }

    /// Device pixel ratio after applying `max_pixel_ratio`.
    pub fn pixel_ratio(&self, scale_factor: f32) -> f32 {
        scale_factor.min(self.max_pixel_ratio)
    }
}
