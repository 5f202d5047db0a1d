use glam::Vec3;
use crate::config::ViewerConfig;
use crate::error::Error;
use crate::mock_renderer::MockRenderer;
use crate::viewer::Viewer;
use super::*;

/// Scheduler driven by hand: records every request and cancellation.
#[derive(Debug, Default)]
struct ManualScheduler {
    next: u64,
    requested: Vec<FrameHandle>,
    cancelled: Vec<FrameHandle>,
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.next += 1;
        let handle = FrameHandle(self.next);
        self.requested.push(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.cancelled.push(handle);
    }
}

fn setup() -> (RenderLoop<ManualScheduler>, Viewer, MockRenderer) {
    (
        RenderLoop::new(ManualScheduler::default()),
        Viewer::new(ViewerConfig::default(), 800, 600).unwrap(),
        MockRenderer::new(),
    )
}

#[test]
fn test_start_requests_first_frame() {
    let (mut render_loop, _, _) = setup();
    assert!(!render_loop.is_running());

    render_loop.start();
    render_loop.start();

    assert!(render_loop.is_running());
    assert_eq!(render_loop.pending(), Some(FrameHandle(1)));
    assert_eq!(render_loop.scheduler().requested.len(), 1);
}

#[test]
fn test_each_refresh_runs_one_frame_and_schedules_next() {
    let (mut render_loop, mut viewer, mut renderer) = setup();
    render_loop.start();

    for expected in 1..=5u64 {
        let report = render_loop.on_display_refresh(&mut viewer, &mut renderer).unwrap().unwrap();
        assert_eq!(report.frame, expected);
        assert_eq!(render_loop.pending(), Some(FrameHandle(expected + 1)));
    }
    assert_eq!(renderer.frames.len(), 5);
}

#[test]
fn test_refresh_without_request_is_ignored() {
    let (mut render_loop, mut viewer, mut renderer) = setup();

    assert_eq!(render_loop.on_display_refresh(&mut viewer, &mut renderer).unwrap(), None);
    assert!(renderer.frames.is_empty());
}

#[test]
fn test_stop_cancels_pending_frame() {
    let (mut render_loop, mut viewer, mut renderer) = setup();
    render_loop.start();
    render_loop.on_display_refresh(&mut viewer, &mut renderer).unwrap();

    render_loop.stop();

    assert!(!render_loop.is_running());
    assert_eq!(render_loop.pending(), None);
    assert_eq!(render_loop.scheduler().cancelled, vec![FrameHandle(2)]);
    assert_eq!(render_loop.on_display_refresh(&mut viewer, &mut renderer).unwrap(), None);
    assert_eq!(renderer.frames.len(), 1);
}

#[test]
fn test_restart_after_stop() {
    let (mut render_loop, mut viewer, mut renderer) = setup();
    render_loop.start();
    render_loop.stop();
    render_loop.start();

    assert!(render_loop.on_display_refresh(&mut viewer, &mut renderer).unwrap().is_some());
    assert_eq!(render_loop.scheduler().requested.len(), 3);
}

#[test]
fn test_failed_frame_keeps_loop_alive() {
    let (mut render_loop, mut viewer, mut renderer) = setup();
    render_loop.start();
    renderer.fail_next = true;

    let result = render_loop.on_display_refresh(&mut viewer, &mut renderer);

    assert!(matches!(result, Err(Error::BackendError(_))));
    assert!(render_loop.pending().is_some());
    assert!(render_loop.on_display_refresh(&mut viewer, &mut renderer).unwrap().is_some());
}

#[test]
fn test_transition_reported_through_loop() {
    let (mut render_loop, mut viewer, mut renderer) = setup();
    render_loop.start();
    render_loop.on_display_refresh(&mut viewer, &mut renderer).unwrap();

    viewer.set_target_position(Vec3::new(1000.0, 0.0, 0.0)).unwrap();
    let report = render_loop.on_display_refresh(&mut viewer, &mut renderer).unwrap().unwrap();

    assert_eq!(report.transition.map(|t| t.visible()), Some(false));
}
