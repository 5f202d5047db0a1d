/// Viewer - owns the cameras, the scene, the orbit controller, the debug panel
/// and the visibility monitor, and runs one frame at a time.
///
/// There is no global viewer: the application creates one with `Viewer::new`
/// and drives it from its event loop (see `RenderLoop`).

use glam::Vec3;
use crate::camera::{CameraCommand, CameraId, CameraRig, OrbitController};
use crate::config::ViewerConfig;
use crate::debug_panel::DebugPanel;
use crate::error::Result;
use crate::events::SubscriptionId;
use crate::monitor::{FrustumVisibilityMonitor, VisibilityTransition};
use crate::renderer::{RenderFrame, Renderer};
use crate::scene::{BoxGeometry, Mesh, MeshKey, Scene};
use crate::{engine_bail, engine_debug, engine_err, engine_info, engine_warn};

/// Outcome of one `run_frame`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameReport {
    /// Frame number, starting at 1
    pub frame: u64,
    /// The orbit controller moved the perspective camera
    pub camera_moved: bool,
    /// Visibility change observed by this frame's tick
    pub transition: Option<VisibilityTransition>,
    /// Panel edits applied after the tick
    pub edits_applied: usize,
}

pub struct Viewer {
    config: ViewerConfig,
    rig: CameraRig,
    scene: Scene,
    target: MeshKey,
    controller: OrbitController,
    panel: DebugPanel,
    monitor: FrustumVisibilityMonitor,
    frames: u64,
    disposed: bool,
}

impl Viewer {
    /// Build the cameras and the cube, and compute the initial visibility.
    pub fn new(config: ViewerConfig, width: u32, height: u32) -> Result<Self> {
        config.validate()?;
        let rig = CameraRig::new(&config.rig, width, height)?;

        let size = config.cube_size;
        let mut cube = Mesh::new("cube", BoxGeometry::new(size.x, size.y, size.z)?, config.cube_color);
        cube.set_position(config.cube_position)?;
        let mut scene = Scene::new();
        let target = scene.add(cube);

        let monitor = match scene.get(target) {
            Some(cube) => FrustumVisibilityMonitor::new(rig.orthographic(), cube),
            None => engine_bail!(InvalidState, "fviewer::Viewer", "cube vanished from the scene"),
        };
        let controller = OrbitController::new(config.rig.perspective_target);
        let panel = DebugPanel::new(config.debug, config.panel.clone());

        engine_info!("fviewer::Viewer", "Viewer created ({}x{}), target visible: {}",
            width, height, monitor.is_visible());

        Ok(Self {
            config,
            rig,
            scene,
            target,
            controller,
            panel,
            monitor,
            frames: 0,
            disposed: false,
        })
    }

    // ===== GETTERS =====

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn rig(&self) -> &CameraRig {
        &self.rig
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn target_key(&self) -> MeshKey {
        self.target
    }

    /// The cube watched by the monitor.
    pub fn target(&self) -> Result<&Mesh> {
        self.scene.get(self.target).ok_or_else(|| {
            engine_err!(InvalidState, "fviewer::Viewer", "target mesh is missing from the scene")
        })
    }

    pub fn monitor(&self) -> &FrustumVisibilityMonitor {
        &self.monitor
    }

    pub fn panel(&self) -> &DebugPanel {
        &self.panel
    }

    /// Orbit controller of the perspective camera, fed by input handlers.
    pub fn controller_mut(&mut self) -> &mut OrbitController {
        &mut self.controller
    }

    pub fn controller(&self) -> &OrbitController {
        &self.controller
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    // ===== INPUTS =====

    /// Viewport size changed. Ignored once disposed.
    pub fn on_resize(&mut self, width: u32, height: u32) -> Result<()> {
        if self.disposed {
            engine_debug!("fviewer::Viewer", "Ignoring resize after dispose");
            return Ok(());
        }
        self.rig.on_resize(width, height)
    }

    pub fn apply(&mut self, camera: CameraId, command: CameraCommand) -> Result<()> {
        self.rig.apply(camera, command)
    }

    pub fn set_target_position(&mut self, position: Vec3) -> Result<()> {
        self.scene.set_position(self.target, position)
    }

    /// Pan the perspective camera by a pointer drag, in pixels.
    pub fn pan(&mut self, dx: f32, dy: f32) {
        let (_, height) = self.rig.viewport();
        self.controller.pan(dx, dy, height as f32, self.rig.perspective());
    }

    /// Rotate the perspective camera by a pointer drag, in pixels.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        let (_, height) = self.rig.viewport();
        self.controller.on_drag_rotate(dx, dy, height as f32);
    }

    /// Wheel notches; positive values zoom in.
    pub fn zoom(&mut self, steps: f32) {
        let scale = self.controller.zoom_scale().powf(steps.abs());
        if steps > 0.0 {
            self.controller.dolly_in(scale);
        } else if steps < 0.0 {
            self.controller.dolly_out(scale);
        }
    }

    pub fn subscribe_visibility<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&VisibilityTransition) + 'static,
    {
        self.monitor.subscribe(callback)
    }

    pub fn unsubscribe_visibility(&mut self, id: SubscriptionId) -> bool {
        self.monitor.unsubscribe(id)
    }

    // ===== FRAME =====

    /// Run one frame: controller update, draw through the perspective camera,
    /// visibility tick on the orthographic camera, then panel edits.
    ///
    /// The tick runs even when the controller or the backend fails, so
    /// subscribers still see the transition. Such errors are returned after
    /// the tick, the backend's first.
    pub fn run_frame<R: Renderer + ?Sized>(&mut self, renderer: &mut R) -> Result<FrameReport> {
        if self.disposed {
            engine_bail!(InvalidState, "fviewer::Viewer", "run_frame called after dispose");
        }
        self.frames += 1;

        let updated = self.controller.update(self.rig.perspective_mut());

        let helper_lines = self.rig.helper().line_list();
        let debug_fields = self.panel.snapshot(&self.rig);
        let rendered = renderer.render(&RenderFrame {
            frame: self.frames,
            scene: &self.scene,
            camera: self.rig.perspective(),
            helper_lines: &helper_lines,
            helper_color: self.config.helper_color,
            clear_color: self.config.clear_color,
            debug_fields: &debug_fields,
            panel_open: self.config.panel.open,
            target_visible: self.monitor.is_visible(),
        });

        let target = self.scene.get(self.target).ok_or_else(|| {
            engine_err!(InvalidState, "fviewer::Viewer", "target mesh is missing from the scene")
        })?;
        let transition = self.monitor.tick(self.rig.orthographic(), target);

        let edits = rendered?;
        let mut edits_applied = 0;
        for edit in edits {
            match self.panel.write(&mut self.rig, edit) {
                Ok(_) => edits_applied += 1,
                Err(err) => engine_warn!("fviewer::Viewer", "Dropped panel edit {}: {}", edit.field, err),
            }
        }
        let camera_moved = updated?;

        Ok(FrameReport {
            frame: self.frames,
            camera_moved,
            transition,
            edits_applied,
        })
    }

    /// Release subscriptions and stop accepting frames and resizes.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.monitor.clear_subscribers();
        self.disposed = true;
        engine_info!("fviewer::Viewer", "Viewer disposed after {} frames", self.frames);
    }
}

#[cfg(test)]
#[path = "viewer_tests.rs"]
mod tests;
