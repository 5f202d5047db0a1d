/// Renderer trait - the drawing backend seen by the viewer
///
/// A backend receives one `RenderFrame` per frame: the scene, the camera to
/// draw through, the helper outline and the debug panel fields. Values the
/// user typed into the panel come back as `FieldEdit`s; the viewer applies
/// them after the visibility tick of the same frame.

use glam::Vec3;
use crate::camera::Camera;
use crate::config::Color;
use crate::debug_panel::{FieldEdit, FieldSnapshot};
use crate::error::Result;
use crate::scene::Scene;

/// Everything a backend needs to draw one frame.
#[derive(Debug)]
pub struct RenderFrame<'a> {
    /// Frame number, starting at 1
    pub frame: u64,
    pub scene: &'a Scene,
    /// Camera the scene is drawn through
    pub camera: &'a Camera,
    /// Line-list points outlining the monitored camera's view volume
    pub helper_lines: &'a [Vec3],
    pub helper_color: Color,
    pub clear_color: Color,
    /// Panel fields; empty when the panel is disabled
    pub debug_fields: &'a [FieldSnapshot],
    /// Folders start expanded
    pub panel_open: bool,
    /// Target visibility as of the previous tick
    pub target_visible: bool,
}

/// Renderer statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RendererStats {
    /// Number of frames rendered
    pub frames: u64,
    /// Number of draw calls in the last frame
    pub draw_calls: u32,
    /// Number of triangles drawn in the last frame
    pub triangles: u32,
    /// Number of line segments drawn in the last frame
    pub lines: u32,
}

/// Drawing backend.
///
/// Implemented by `frustum_viewer_renderer_wgpu::WgpuRenderer` for native
/// windows, and by recording mocks in tests.
pub trait Renderer {
    /// Notify the renderer that the drawable surface changed size.
    ///
    /// # Arguments
    ///
    /// * `width` - New width in physical pixels
    /// * `height` - New height in physical pixels
    /// * `scale_factor` - Device pixel ratio reported by the window system
    fn resize(&mut self, width: u32, height: u32, scale_factor: f32);

    /// Draw one frame and return the panel edits made during it.
    fn render(&mut self, frame: &RenderFrame<'_>) -> Result<Vec<FieldEdit>>;

    fn stats(&self) -> RendererStats;
}
