/// Mock Renderer for unit tests (no GPU required)
///
/// Records what the viewer hands over each frame and returns queued panel
/// edits, so frame ordering can be checked without a window.

#[cfg(test)]
use std::collections::VecDeque;
#[cfg(test)]
use glam::Vec3;
#[cfg(test)]
use crate::debug_panel::FieldEdit;
#[cfg(test)]
use crate::error::Result;
#[cfg(test)]
use crate::renderer::{RenderFrame, Renderer, RendererStats};
#[cfg(test)]
use crate::engine_bail;

/// What the mock saw in one `render` call.
#[cfg(test)]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedFrame {
    pub frame: u64,
    pub camera_name: String,
    pub camera_position: Vec3,
    pub mesh_count: usize,
    pub helper_points: usize,
    pub field_count: usize,
    pub target_visible: bool,
}

#[cfg(test)]
#[derive(Debug, Default)]
pub struct MockRenderer {
    pub frames: Vec<RecordedFrame>,
    pub resizes: Vec<(u32, u32, f32)>,
    /// Edits returned by upcoming `render` calls, one batch per call
    pub queued_edits: VecDeque<Vec<FieldEdit>>,
    /// Make the next `render` call fail
    pub fail_next: bool,
    stats: RendererStats,
}

#[cfg(test)]
impl MockRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queue_edits(&mut self, edits: Vec<FieldEdit>) {
        self.queued_edits.push_back(edits);
    }
}

#[cfg(test)]
impl Renderer for MockRenderer {
    fn resize(&mut self, width: u32, height: u32, scale_factor: f32) {
        self.resizes.push((width, height, scale_factor));
    }

    fn render(&mut self, frame: &RenderFrame<'_>) -> Result<Vec<FieldEdit>> {
        if self.fail_next {
            self.fail_next = false;
            engine_bail!(BackendError, "fviewer::MockRenderer", "simulated render failure");
        }
        self.frames.push(RecordedFrame {
            frame: frame.frame,
            camera_name: frame.camera.name().to_string(),
            camera_position: frame.camera.position(),
            mesh_count: frame.scene.len(),
            helper_points: frame.helper_lines.len(),
            field_count: frame.debug_fields.len(),
            target_visible: frame.target_visible,
        });
        self.stats.frames += 1;
        self.stats.draw_calls = frame.scene.len() as u32 + 1;
        self.stats.triangles = frame.scene.len() as u32 * 12;
        self.stats.lines = frame.helper_lines.len() as u32 / 2;
        Ok(self.queued_edits.pop_front().unwrap_or_default())
    }

    fn stats(&self) -> RendererStats {
        self.stats
    }
}
