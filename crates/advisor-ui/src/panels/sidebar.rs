//! Department sidebar: the catalog, with the advisor currently answering
//! highlighted.

use egui::{self, RichText};
use advisor_types::department::{self, DEPARTMENTS};
use crate::theme::*;

pub fn department_sidebar(ui: &mut egui::Ui, current: &str) {
    ui.label(RichText::new("Departments").color(MAROON).strong());
    ui.separator();

    for dept in DEPARTMENTS.iter() {
        let active = dept.name == current;
        let (fill, name_color, desc_color) = if active {
            (MAROON, TEXT_ON_ACCENT, TEXT_ON_ACCENT)
        } else {
            (BG_SECONDARY, TEXT_PRIMARY, TEXT_SECONDARY)
        };

        egui::Frame::default()
            .fill(fill)
            .corner_radius(PANEL_ROUNDING)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(RichText::new(dept.name).color(name_color).strong());
                ui.label(RichText::new(dept.description).color(desc_color).small());
            });
        ui.add_space(2.0);
    }

    // The backend can answer as a unit the catalog does not list
    if department::find(current).is_none() {
        ui.add_space(6.0);
        ui.label(
            RichText::new(format!("Now answering: {}", department::display_name(current)))
                .color(MAROON)
                .italics(),
        );
    }
}
