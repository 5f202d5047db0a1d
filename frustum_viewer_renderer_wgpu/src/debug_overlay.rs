/// egui rendition of the camera debug panel.
///
/// One collapsible folder per camera under a "Cameras" window, one slider per
/// position component. Slider changes come back as `FieldEdit`s.

use egui::{CollapsingHeader, Context, Slider, Window};
use frustum_viewer::fviewer::camera::CameraId;
use frustum_viewer::fviewer::{FieldEdit, FieldSnapshot, ROOT_FOLDER};

pub(crate) fn show(
    ctx: &Context,
    fields: &[FieldSnapshot],
    open: bool,
    target_visible: bool,
) -> Vec<FieldEdit> {
    let mut edits = Vec::new();
    if fields.is_empty() {
        return edits;
    }

    Window::new(ROOT_FOLDER)
        .default_pos([12.0, 12.0])
        .resizable(false)
        .show(ctx, |ui| {
            for camera in CameraId::ALL {
                CollapsingHeader::new(camera.label())
                    .default_open(open)
                    .show(ui, |ui| {
                        for snapshot in fields.iter().filter(|s| s.field.camera == camera) {
                            let mut value = snapshot.value;
                            let slider = Slider::new(&mut value, snapshot.min..=snapshot.max)
                                .text(snapshot.field.axis.label());
                            if ui.add(slider).changed() {
                                edits.push(FieldEdit::new(snapshot.field, value));
                            }
                        }
                    });
            }
            ui.separator();
            ui.label(format!("Target visible: {}", target_visible));
        });

    edits
}
