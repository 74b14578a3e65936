//! Settings panel: backend endpoints, timing, storage backend.

use egui::{self, RichText, Vec2};
use advisor_types::config::{
    AdvisorConfig, StorageBackendType, MAX_REVERT_DELAY_MS, MIN_REVERT_DELAY_MS,
};
use crate::theme::*;

/// What the caller should do after rendering the settings panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsAction {
    None,
    /// A field was edited
    Changed,
    /// The user clicked Save
    SaveClicked,
}

/// Save feedback passed in from the app layer
#[derive(Clone)]
pub struct SaveFeedback {
    pub message: String,
    pub success: bool,
}

fn field_label(ui: &mut egui::Ui, text: &str) {
    ui.label(RichText::new(text).color(TEXT_SECONDARY).small());
}

pub fn settings_panel(
    ui: &mut egui::Ui,
    config: &mut AdvisorConfig,
    save_feedback: Option<&SaveFeedback>,
) -> SettingsAction {
    let mut changed = false;
    let mut save_clicked = false;

    egui::Frame::default()
        .fill(BG_SECONDARY)
        .inner_margin(PANEL_PADDING)
        .corner_radius(PANEL_ROUNDING)
        .show(ui, |ui| {
            ui.heading(RichText::new("Settings").color(TEXT_PRIMARY));
            ui.separator();

            // ── Backend ──────────────────────────────────────
            ui.label(RichText::new("Backend").color(MAROON).strong());
            ui.add_space(2.0);

            field_label(ui, "Advisor query URL");
            changed |= ui.text_edit_singleline(&mut config.api.query_url).changed();

            ui.add_space(4.0);
            field_label(ui, "Calendar API base");
            changed |= ui
                .text_edit_singleline(&mut config.api.calendar_base_url)
                .changed();

            ui.add_space(4.0);
            field_label(ui, "Request timeout (ms)");
            changed |= ui
                .add(egui::Slider::new(&mut config.api.request_timeout_ms, 5_000..=120_000))
                .changed();

            ui.add_space(12.0);
            ui.separator();

            // ── Timing ───────────────────────────────────────
            ui.label(RichText::new("Timing").color(MAROON).strong());
            ui.add_space(2.0);

            field_label(ui, "Return to faculty advisor after (ms)");
            changed |= ui
                .add(egui::Slider::new(
                    &mut config.timing.revert_delay_ms,
                    MIN_REVERT_DELAY_MS..=MAX_REVERT_DELAY_MS,
                ))
                .changed();

            field_label(ui, "Minimum thinking time (ms)");
            changed |= ui
                .add(egui::Slider::new(&mut config.timing.thinking_delay_ms, 0..=2_000))
                .changed();

            ui.add_space(12.0);
            ui.separator();

            // ── Storage ──────────────────────────────────────
            ui.label(RichText::new("Storage").color(MAROON).strong());
            ui.add_space(2.0);

            egui::ComboBox::from_id_salt("storage_backend")
                .selected_text(config.storage.backend.label())
                .show_ui(ui, |ui| {
                    for backend in StorageBackendType::all() {
                        changed |= ui
                            .selectable_value(&mut config.storage.backend, *backend, backend.label())
                            .changed();
                    }
                });
            ui.label(
                RichText::new(storage_description(config.storage.backend))
                    .color(TEXT_SECONDARY)
                    .small()
                    .italics(),
            );

            ui.add_space(16.0);
            ui.separator();
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                let btn = ui.add(
                    egui::Button::new(RichText::new("Save Settings").color(TEXT_ON_ACCENT).strong())
                        .fill(MAROON)
                        .corner_radius(PANEL_ROUNDING)
                        .min_size(Vec2::new(120.0, 28.0)),
                );
                save_clicked = btn.clicked();

                if let Some(fb) = save_feedback {
                    let color = if fb.success { SUCCESS } else { ERROR };
                    ui.label(RichText::new(&fb.message).color(color).small());
                }
            });
        });

    if save_clicked {
        SettingsAction::SaveClicked
    } else if changed {
        SettingsAction::Changed
    } else {
        SettingsAction::None
    }
}

/// Help line under the storage picker. A change applies on next load.
pub fn storage_description(backend: StorageBackendType) -> &'static str {
    match backend {
        StorageBackendType::Auto => "localStorage when the browser allows it, memory otherwise. Applies on reload.",
        StorageBackendType::Memory => "Nothing survives a reload. Applies on reload.",
        StorageBackendType::LocalStorage => "Conversation survives reloads; falls back to memory if blocked. Applies on reload.",
    }
}
