/// Render loop driver.
///
/// The loop never blocks: it asks a `FrameScheduler` for the next display
/// refresh, and the host calls `on_display_refresh` when that refresh comes.
/// Each refresh runs exactly one viewer frame and schedules the next one.

use crate::error::Result;
use crate::renderer::Renderer;
use crate::viewer::{FrameReport, Viewer};
use crate::{engine_debug, engine_trace};

/// Token for a requested frame, used for cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// "Run on next display refresh" primitive of the host.
pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameHandle;
    fn cancel_frame(&mut self, handle: FrameHandle);
}

#[derive(Debug)]
pub struct RenderLoop<S: FrameScheduler> {
    scheduler: S,
    pending: Option<FrameHandle>,
    running: bool,
}

impl<S: FrameScheduler> RenderLoop<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            pending: None,
            running: false,
        }
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Handle of the frame waiting for the next refresh.
    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }

    /// Request the first frame. No-op if already running.
    pub fn start(&mut self) {
        if self.running {
            return;
        }
        self.running = true;
        self.pending = Some(self.scheduler.request_frame());
        engine_debug!("fviewer::RenderLoop", "Render loop started");
    }

    /// Cancel the pending frame. A frame already running completes.
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
        engine_debug!("fviewer::RenderLoop", "Render loop stopped");
    }

    /// Display refresh from the host.
    ///
    /// Runs one frame if one was requested, then requests the next one even if
    /// the frame failed. Returns `Ok(None)` for refreshes nobody asked for.
    pub fn on_display_refresh<R: Renderer + ?Sized>(
        &mut self,
        viewer: &mut Viewer,
        renderer: &mut R,
    ) -> Result<Option<FrameReport>> {
        let Some(handle) = self.pending.take() else {
            engine_trace!("fviewer::RenderLoop", "Ignoring unrequested refresh");
            return Ok(None);
        };
        engine_trace!("fviewer::RenderLoop", "Running frame {:?}", handle);

        let report = viewer.run_frame(renderer);
        if self.running {
            self.pending = Some(self.scheduler.request_frame());
        }
        report.map(Some)
    }
}

#[cfg(test)]
#[path = "render_loop_tests.rs"]
mod tests;
