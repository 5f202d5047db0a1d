//! Camera module - cameras, projections, frustum and the viewer's camera rig.
//!
//! Cameras keep their matrices in sync with their parameters. The rig owns the
//! orthographic and perspective cameras of the viewer and is the validated
//! write path for outside edits.

mod camera;
mod camera_rig;
mod frustum;
mod helper;
mod orbit;
mod projection;

pub use camera::{Axis, Camera, MIN_LOOK_DISTANCE};
pub use camera_rig::{CameraCommand, CameraId, CameraRig};
pub use frustum::{Frustum, FrustumPlane};
pub use helper::CameraHelper;
pub use orbit::OrbitController;
pub use projection::{OrthographicProjection, PerspectiveProjection, Projection};
