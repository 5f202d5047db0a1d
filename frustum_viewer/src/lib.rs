/*!
# Frustum Viewer

Core types for a small 3D viewer with two cameras and a visibility monitor.

The viewer draws a cube through a perspective camera driven by an orbit
controller, and once per frame checks whether the cube intersects the view
volume of a second, orthographic camera. Visibility changes are edge-triggered:
they are reported to subscribers and to the diagnostic log only when the
state flips.

This crate has no windowing or GPU dependency. Drawing goes through the
`Renderer` trait (see `frustum_viewer_renderer_wgpu` for the native backend),
frame pacing through the `FrameScheduler` trait.

## Architecture

- **Viewer**: owns everything and runs one frame at a time
- **CameraRig**: orthographic + perspective camera, resize and validated commands
- **FrustumVisibilityMonitor**: frustum extraction, intersection test, transitions
- **RenderLoop**: one frame per display refresh until stopped
- **DebugPanel**: clamped position fields for both cameras
- **MountAdapter**: attaches the drawing surface to a host container
*/

// Internal modules
mod config;
mod debug_panel;
mod error;
mod events;
mod mock_renderer;
mod monitor;
mod mount;
mod render_loop;
mod renderer;
mod viewer;
pub mod camera;
pub mod log;
pub mod scene;

// Main fviewer namespace module
pub mod fviewer {
    // Error types
    pub use crate::error::{Error, Result};

    // Viewer and its frame loop
    pub use crate::viewer::{Viewer, FrameReport};
    pub use crate::render_loop::{RenderLoop, FrameScheduler, FrameHandle};

    // Renderer boundary
    pub use crate::renderer::{Renderer, RenderFrame, RendererStats};

    // Configuration
    pub use crate::config::{ViewerConfig, CameraRigConfig, PanelConfig, Color, color_from_hex};

    // Visibility monitor and events
    pub use crate::monitor::{FrustumVisibilityMonitor, Visibility, VisibilityTransition};
    pub use crate::events::{Subscribers, SubscriptionId};

    // Debug panel
    pub use crate::debug_panel::{DebugPanel, FieldId, FieldSnapshot, FieldEdit, ROOT_FOLDER};

    // Host mounting
    pub use crate::mount::{MountAdapter, SurfaceContainer};

    // Logging sub-module (types and functions; the engine_* macros live at the crate root)
    pub mod log {
        pub use crate::log::{
            Logger, LogEntry, LogSeverity, DefaultLogger,
            set_logger, reset_logger, log, log_detailed,
        };
    }

    // Camera sub-module
    pub mod camera {
        pub use crate::camera::*;
    }

    // Scene sub-module
    pub mod scene {
        pub use crate::scene::*;
    }
}

// Re-export math library at crate root
pub use glam;
