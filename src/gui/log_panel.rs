//! Renders the meal-log panel.
//!
//! Shows the committed entries newest-first with timestamps, the derived
//! daily total, and a clear-all action behind a confirmation step.

use crate::gui::Gui;
use eframe::egui::{self, Color32, ScrollArea, Ui};

/// Renders the log panel.
pub fn render(ui: &mut Ui, gui: &mut Gui) {
    ui.heading("Meal log");

    ui.horizontal(|ui| {
        ui.label(format!("Total: {} kcal", gui.log.total_calories()));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if gui.confirm_clear {
                if ui.button("Confirm").clicked() {
                    gui.log.clear_all();
                    gui.confirm_clear = false;
                }
                if ui.button("Cancel").clicked() {
                    gui.confirm_clear = false;
                }
                ui.colored_label(Color32::LIGHT_RED, "Clear everything?");
            } else if ui
                .add_enabled(!gui.log.is_empty(), egui::Button::new("Clear all"))
                .clicked()
            {
                gui.confirm_clear = true;
            }
        });
    });

    ui.separator();

    if gui.log.is_empty() {
        ui.weak("Nothing logged yet.");
        return;
    }

    ScrollArea::vertical().auto_shrink([false; 2]).show(ui, |ui| {
        for entry in gui.log.entries() {
            ui.horizontal(|ui| {
                ui.label(entry.created_at.format("%H:%M:%S").to_string());
                ui.strong(entry.name.as_str());
            });
            ui.horizontal(|ui| {
                ui.label(format!("{:.0} g", entry.weight_grams));
                ui.label(format!("{} kcal", entry.calories));
            });
            ui.separator();
        }
    });
}
