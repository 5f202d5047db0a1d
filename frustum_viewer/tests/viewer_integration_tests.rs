//! Integration tests for the viewer through its public API
//!
//! A headless renderer, a hand-driven scheduler and an in-memory container
//! stand in for the window system. No GPU required.
//!
//! Run with: cargo test --test viewer_integration_tests

use std::cell::RefCell;
use std::rc::Rc;
use frustum_viewer::fviewer::camera::{Axis, CameraCommand, CameraId, Projection};
use frustum_viewer::fviewer::{
    Error, FieldEdit, FieldId, FrameHandle, FrameScheduler, MountAdapter, RenderFrame,
    RenderLoop, Renderer, RendererStats, Result, SurfaceContainer, Viewer, ViewerConfig,
    Visibility, VisibilityTransition,
};
use frustum_viewer::glam::Vec3;

// ============================================================================
// HEADLESS COLLABORATORS
// ============================================================================

#[derive(Default)]
struct HeadlessRenderer {
    drawn: Vec<(u64, Vec3)>,
    edits: Vec<Vec<FieldEdit>>,
    stats: RendererStats,
}

impl Renderer for HeadlessRenderer {
    fn resize(&mut self, _width: u32, _height: u32, _scale_factor: f32) {}

    fn render(&mut self, frame: &RenderFrame<'_>) -> Result<Vec<FieldEdit>> {
        self.drawn.push((frame.frame, frame.camera.position()));
        self.stats.frames += 1;
        Ok(if self.edits.is_empty() { Vec::new() } else { self.edits.remove(0) })
    }

    fn stats(&self) -> RendererStats {
        self.stats
    }
}

#[derive(Default)]
struct CountingScheduler {
    issued: u64,
    cancelled: Vec<FrameHandle>,
}

impl FrameScheduler for CountingScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.issued += 1;
        FrameHandle(self.issued)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.cancelled.push(handle);
    }
}

#[derive(Default)]
struct Container {
    children: Vec<String>,
}

impl SurfaceContainer for Container {
    type Surface = String;

    fn attach(&mut self, surface: String) -> Result<()> {
        self.children.push(surface);
        Ok(())
    }

    fn detach(&mut self) -> Option<String> {
        self.children.pop()
    }
}

fn ortho_bounds(viewer: &Viewer) -> (f32, f32, f32, f32) {
    match viewer.rig().orthographic().projection() {
        Projection::Orthographic(p) => (p.left, p.right, p.top, p.bottom),
        other => panic!("expected orthographic projection, got {:?}", other),
    }
}

// ============================================================================
// SCENARIOS
// ============================================================================

#[test]
fn test_integration_cube_leaves_and_reenters_view() {
    let mut viewer = Viewer::new(ViewerConfig::default(), 800, 800).unwrap();
    let mut renderer = HeadlessRenderer::default();
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    viewer.subscribe_visibility(move |t: &VisibilityTransition| sink.borrow_mut().push(*t));

    assert_eq!(viewer.monitor().state(), Visibility::Visible);
    viewer.run_frame(&mut renderer).unwrap();
    viewer.run_frame(&mut renderer).unwrap();
    assert!(events.borrow().is_empty());

    viewer.set_target_position(Vec3::new(1000.0, 0.0, 0.0)).unwrap();
    viewer.run_frame(&mut renderer).unwrap();
    viewer.set_target_position(Vec3::new(0.0, 1.0, -2.0)).unwrap();
    viewer.run_frame(&mut renderer).unwrap();

    let events = events.borrow();
    assert_eq!(events.len(), 2);
    assert_eq!((events[0].visibility, events[0].tick), (Visibility::NotVisible, 3));
    assert_eq!((events[1].visibility, events[1].tick), (Visibility::Visible, 4));
}

#[test]
fn test_integration_resize_keeps_vertical_extent() {
    let config = ViewerConfig {
        rig: frustum_viewer::fviewer::CameraRigConfig { frustum_size: 5.0, ..Default::default() },
        ..ViewerConfig::default()
    };
    let mut viewer = Viewer::new(config, 800, 600).unwrap();
    let ortho_before = *viewer.rig().orthographic().projection_matrix();
    let perspective_before = *viewer.rig().perspective().projection_matrix();

    viewer.on_resize(1920, 1080).unwrap();

    assert_ne!(*viewer.rig().orthographic().projection_matrix(), ortho_before);
    assert_ne!(*viewer.rig().perspective().projection_matrix(), perspective_before);
    let (left, right, top, bottom) = ortho_bounds(&viewer);
    assert_eq!((top, bottom), (2.5, -2.5));
    assert!((right - 2.5 * 1920.0 / 1080.0).abs() < 1e-5);
    assert!((left + 2.5 * 1920.0 / 1080.0).abs() < 1e-5);
}

#[test]
fn test_integration_panel_edit_moves_monitored_camera() {
    let mut viewer = Viewer::new(ViewerConfig::default(), 800, 600).unwrap();
    let mut renderer = HeadlessRenderer::default();
    renderer.edits.push(vec![FieldEdit::new(FieldId::parse("orthographic.y").unwrap(), 40.0)]);

    let first = viewer.run_frame(&mut renderer).unwrap();
    let second = viewer.run_frame(&mut renderer).unwrap();

    assert_eq!(first.transition, None);
    assert_eq!(second.transition.map(|t| t.visibility), Some(Visibility::NotVisible));
    assert_eq!(viewer.rig().orthographic().position(), Vec3::new(0.0, 40.0, 1.0));
}

#[test]
fn test_integration_commands_are_validated() {
    let mut viewer = Viewer::new(ViewerConfig::default(), 800, 600).unwrap();

    let result = viewer.apply(CameraId::Perspective, CameraCommand::SetPositionAxis(Axis::X, f32::INFINITY));
    assert!(matches!(result, Err(Error::InvalidParameter(_))));
    assert_eq!(viewer.rig().perspective().position(), Vec3::new(2.0, 2.0, 6.0));

    viewer.apply(CameraId::Perspective, CameraCommand::LookAt(Vec3::new(1.0, 0.0, 0.0))).unwrap();
}

#[test]
fn test_integration_mount_loop_and_teardown() {
    let mut container = Container::default();
    let mut adapter = MountAdapter::new();
    let mut viewer = Viewer::new(ViewerConfig::default(), 800, 600).unwrap();
    let mut renderer = HeadlessRenderer::default();
    let mut render_loop = RenderLoop::new(CountingScheduler::default());

    adapter.mount(&mut container, "surface".to_string()).unwrap();
    render_loop.start();
    for _ in 0..10 {
        render_loop.on_display_refresh(&mut viewer, &mut renderer).unwrap();
    }
    render_loop.stop();
    assert_eq!(render_loop.on_display_refresh(&mut viewer, &mut renderer).unwrap(), None);
    viewer.dispose();
    let surface = adapter.unmount(&mut container);

    assert_eq!(renderer.drawn.len(), 10);
    assert_eq!(renderer.stats().frames, 10);
    assert_eq!(render_loop.scheduler().cancelled, vec![FrameHandle(11)]);
    assert_eq!(surface.as_deref(), Some("surface"));
    assert!(container.children.is_empty());
    assert!(viewer.is_disposed());
}
