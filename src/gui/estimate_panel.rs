//! Renders the estimation panel: the editable current candidate and the
//! recompute / add-to-log actions.

use crate::gui::Gui;
use eframe::egui::{self, Color32, Ui};

/// Renders the estimation panel.
pub fn render(ui: &mut Ui, gui: &mut Gui) {
    ui.heading("Estimate");
    ui.separator();

    if gui.candidate.is_none() {
        ui.label("Capture a dish to get a calorie estimate.");
        return;
    }

    ui.label("Recognized dish (correct as needed):");
    ui.text_edit_singleline(&mut gui.edit_name);

    egui::Grid::new("estimate_inputs")
        .num_columns(2)
        .spacing([12.0, 6.0])
        .show(ui, |ui| {
            ui.label("Weight, g");
            ui.text_edit_singleline(&mut gui.edit_weight);
            ui.end_row();

            ui.label("kcal per 100 g");
            ui.text_edit_singleline(&mut gui.edit_per100);
            ui.end_row();
        });

    if ui.button("Recompute calories").clicked() {
        gui.apply_recompute();
    }

    if let Some(notice) = &gui.recompute_notice {
        ui.colored_label(Color32::YELLOW, notice);
    }

    ui.separator();

    if let Some(candidate) = &gui.candidate {
        ui.label("Current dish:");
        ui.strong(candidate.name.as_str());
        ui.label(format!("Weight: {:.0} g", candidate.weight_grams));
        ui.label(format!("Calories: {} kcal", candidate.calories));

        ui.add_space(8.0);
        if ui.button("➕ Add to log").clicked() {
            gui.add_current_to_log();
        }
    }
}
