//! Renders the capture surface: live preview, capture button, fallback text.

use crate::gui::Gui;
use eframe::egui::{self, Color32, Ui};

/// Renders the capture panel.
pub fn render(ui: &mut Ui, gui: &mut Gui) {
    ui.heading("Camera");
    ui.separator();

    if !gui.camera.available() {
        ui.colored_label(
            Color32::LIGHT_RED,
            "Camera unavailable. On mobile platforms the camera needs a secure \
             (HTTPS) context; on desktop check that a device is connected and \
             not in use.",
        );
        return;
    }

    match &gui.preview_texture {
        Some(texture) => {
            let size = texture.size_vec2();
            let scale = (ui.available_width() / size.x).min(1.0);
            ui.image((texture.id(), size * scale));
        }
        None => {
            ui.label("Waiting for the first frame…");
        }
    }

    ui.add_space(8.0);

    let capture_enabled = gui.camera.latest_frame().is_some() && !gui.recognition.in_flight();
    if ui
        .add_enabled(capture_enabled, egui::Button::new("📷 Capture dish"))
        .clicked()
    {
        gui.trigger_capture();
    }
    if gui.recognition.in_flight() {
        ui.spinner();
    }

    if let Some(still) = &gui.last_still {
        ui.add_space(4.0);
        ui.weak(format!(
            "Still captured ({} KiB, {}×{}) — stored for the future recognition backend.",
            still.as_bytes().len() / 1024,
            still.width(),
            still.height(),
        ));
    }
}
