/*!
# Frustum Viewer - wgpu Renderer Backend

wgpu implementation of the frustum viewer's `Renderer` trait.

Draws the scene through a depth-tested mesh pipeline, overlays the camera
helper outline as a line list and paints the camera debug panel with egui.
`wgpu` and `winit` are re-exported so applications use matching versions.

```no_run
use std::sync::Arc;
use frustum_viewer::fviewer::ViewerConfig;
use frustum_viewer_renderer_wgpu::WgpuRenderer;
# fn demo(window: Arc<frustum_viewer_renderer_wgpu::winit::window::Window>) -> frustum_viewer::fviewer::Result<()> {
let renderer = WgpuRenderer::new(window, &ViewerConfig::default())?;
# Ok(())
# }
```
*/

pub use egui_wgpu::wgpu;
pub use egui_winit::winit;

mod debug_overlay;
mod wgpu_mesh;
mod wgpu_pipeline;
mod wgpu_renderer;
mod wgpu_texture;

pub use wgpu_renderer::WgpuRenderer;
