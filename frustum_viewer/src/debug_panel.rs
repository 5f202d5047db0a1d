/// Debug control panel model.
///
/// Exposes the x, y, z position of each camera as a numeric field, grouped in
/// a "Cameras" folder with one sub-folder per camera. The panel holds no camera
/// state: `snapshot` reads the rig and `write` goes through `CameraRig::apply`.

use std::fmt;
use crate::camera::{Axis, CameraCommand, CameraId, CameraRig};
use crate::config::PanelConfig;
use crate::error::Result;
use crate::{engine_bail, engine_err, engine_trace};

/// Title of the top-level folder.
pub const ROOT_FOLDER: &str = "Cameras";

/// One editable field: a camera and a position component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldId {
    pub camera: CameraId,
    pub axis: Axis,
}

impl FieldId {
    pub fn new(camera: CameraId, axis: Axis) -> Self {
        Self { camera, axis }
    }

    /// Every field, folder by folder.
    pub fn all() -> impl Iterator<Item = FieldId> {
        CameraId::ALL
            .into_iter()
            .flat_map(|camera| Axis::ALL.into_iter().map(move |axis| FieldId { camera, axis }))
    }

    /// Parse a `"<camera>.<axis>"` path such as `"orthographic.x"`.
    pub fn parse(path: &str) -> Result<Self> {
        let (camera, axis) = path.split_once('.').ok_or_else(|| {
            engine_err!(InvalidParameter, "fviewer::DebugPanel", "unknown field '{}'", path)
        })?;
        let camera = CameraId::ALL
            .into_iter()
            .find(|id| id.label().eq_ignore_ascii_case(camera));
        let axis = Axis::ALL.into_iter().find(|a| a.label().eq_ignore_ascii_case(axis));
        match (camera, axis) {
            (Some(camera), Some(axis)) => Ok(Self { camera, axis }),
            _ => Err(engine_err!(InvalidParameter, "fviewer::DebugPanel", "unknown field '{}'", path)),
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.camera.label().to_lowercase(), self.axis.label())
    }
}

/// Current value of a field, with its allowed range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSnapshot {
    pub field: FieldId,
    pub value: f32,
    pub min: f32,
    pub max: f32,
}

/// A value typed into a field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldEdit {
    pub field: FieldId,
    pub value: f32,
}

impl FieldEdit {
    pub fn new(field: FieldId, value: f32) -> Self {
        Self { field, value }
    }
}

#[derive(Debug, Clone)]
pub struct DebugPanel {
    enabled: bool,
    config: PanelConfig,
}

impl DebugPanel {
    pub fn new(enabled: bool, config: PanelConfig) -> Self {
        Self { enabled, config }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    /// Current field values. Empty when the panel is disabled.
    pub fn snapshot(&self, rig: &CameraRig) -> Vec<FieldSnapshot> {
        if !self.enabled {
            return Vec::new();
        }
        FieldId::all()
            .map(|field| FieldSnapshot {
                field,
                value: rig.camera(field.camera).position()[field.axis.index()],
                min: self.config.min,
                max: self.config.max,
            })
            .collect()
    }

    /// Clamp `edit` to the field range and apply it. Returns the applied value.
    pub fn write(&self, rig: &mut CameraRig, edit: FieldEdit) -> Result<f32> {
        if !self.enabled {
            engine_bail!(InvalidState, "fviewer::DebugPanel",
                "debug panel is disabled, rejecting edit of {}", edit.field);
        }
        let value = edit.value.clamp(self.config.min, self.config.max);
        rig.apply(edit.field.camera, CameraCommand::SetPositionAxis(edit.field.axis, value))?;
        engine_trace!("fviewer::DebugPanel", "{} = {}", edit.field, value);
        Ok(value)
    }
}

#[cfg(test)]
#[path = "debug_panel_tests.rs"]
mod tests;
