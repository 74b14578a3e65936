//! Chat panel: conversation log, welcome suggestions and the input row.

use std::time::Duration;

use egui::{self, Align, Layout, RichText, ScrollArea, Vec2};
use advisor_types::department;
use advisor_types::message::Role;
use crate::markdown;
use crate::panels::schedule::schedule_widget;
use crate::state::{ChatEntry, UiState, SUGGESTIONS};
use crate::theme::*;

/// Render the chat panel. Returns Some(text) when the user sends a message,
/// typed or picked from the suggestions.
pub fn chat_panel(ui: &mut egui::Ui, state: &mut UiState) -> Option<String> {
    let mut submitted = None;
    let mut export = None;
    let fresh = state.is_fresh();
    let rtl = state.language.is_rtl();

    egui::Frame::default()
        .fill(BG_PRIMARY)
        .inner_margin(PANEL_PADDING)
        .show(ui, |ui| {
            ui.vertical(|ui| {
                ui.horizontal(|ui| {
                    ui.heading(
                        RichText::new(department::display_name(&state.current_department))
                            .color(MAROON)
                            .strong(),
                    );
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        let status_color = if state.is_busy() { SYSTEM_FG } else { SUCCESS };
                        ui.label(RichText::new(&state.status_text).color(status_color).small());
                    });
                });

                ui.separator();

                let entries = &state.entries;
                let views = &mut state.schedule_views;
                let available_height = ui.available_height() - 60.0;
                ScrollArea::vertical()
                    .max_height(available_height)
                    .auto_shrink([false, false])
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        for (i, entry) in entries.iter().enumerate() {
                            render_message(ui, entry, rtl);

                            if let Some(schedule) = &entry.schedule {
                                let shown = views.get(&i).copied().unwrap_or_default();
                                let mut view = shown;
                                if schedule_widget(ui, i, entry, &mut view) {
                                    export = Some(schedule.clone());
                                }
                                if view != shown {
                                    views.insert(i, view);
                                }
                            }
                            ui.add_space(4.0);
                        }

                        if fresh {
                            if let Some(text) = welcome(ui) {
                                submitted = Some(text);
                            }
                        }
                    });

                ui.add_space(8.0);

                let layout = if rtl {
                    Layout::right_to_left(Align::Center)
                } else {
                    Layout::left_to_right(Align::Center)
                };
                ui.with_layout(layout, |ui| {
                    let input = egui::TextEdit::singleline(&mut state.input_text)
                        .hint_text("Type your message...")
                        .desired_width(ui.available_width() - 70.0)
                        .font(egui::FontId::proportional(14.0));
                    let response = ui.add(input);

                    let send_enabled = !state.input_text.trim().is_empty() && !state.busy;
                    let send_btn = ui.add_enabled(
                        send_enabled,
                        egui::Button::new(RichText::new("Send").color(TEXT_ON_ACCENT))
                            .fill(if send_enabled { MAROON } else { BG_SURFACE })
                            .corner_radius(PANEL_ROUNDING)
                            .min_size(Vec2::new(60.0, 0.0)),
                    );

                    let entered =
                        response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                    if entered || send_btn.clicked() {
                        if let Some(text) = state.take_input() {
                            submitted = Some(text);
                        }
                        response.request_focus();
                    }
                });
            });
        });

    if let Some(schedule) = export {
        state.open_calendar(schedule);
    }
    submitted
}

fn welcome(ui: &mut egui::Ui) -> Option<String> {
    let mut picked = None;
    ui.add_space(12.0);
    ui.vertical_centered(|ui| {
        ui.label(
            RichText::new("Welcome to MSFEA Academic Advisor")
                .color(MAROON)
                .strong()
                .size(18.0),
        );
        ui.label(
            RichText::new("Ask about majors, requirements, courses or your schedule.")
                .color(TEXT_SECONDARY),
        );
        ui.add_space(6.0);
        for suggestion in SUGGESTIONS {
            let btn = ui.add(
                egui::Button::new(RichText::new(suggestion).color(MAROON))
                    .fill(BG_SECONDARY)
                    .corner_radius(PANEL_ROUNDING),
            );
            if btn.clicked() {
                picked = Some(suggestion.to_string());
            }
        }
    });
    picked
}

fn thinking_text(ui: &egui::Ui) -> String {
    let phase = (ui.input(|i| i.time) * 3.0) as usize % 3;
    ui.ctx().request_repaint_after(Duration::from_millis(330));
    format!("Thinking{}", ".".repeat(phase + 1))
}

fn render_message(ui: &mut egui::Ui, entry: &ChatEntry, rtl: bool) {
    let message = &entry.message;

    if message.is_system || message.is_notification {
        let (bg, fg) = if message.is_system {
            (SYSTEM_BG, SYSTEM_FG)
        } else {
            (NOTIFICATION_BG, NOTIFICATION_FG)
        };
        ui.vertical_centered(|ui| {
            egui::Frame::default()
                .fill(bg)
                .corner_radius(PANEL_ROUNDING)
                .inner_margin(6.0)
                .show(ui, |ui| {
                    ui.label(RichText::new(&message.content).color(fg).small());
                });
        });
        return;
    }

    let user = message.role == Role::User;
    let align = if user != rtl { Align::Max } else { Align::Min };
    let (label, bg, fg, strong) = if user {
        ("You:".to_string(), MAROON, TEXT_ON_ACCENT, TEXT_ON_ACCENT)
    } else {
        let name = message
            .department
            .as_deref()
            .map(department::display_name)
            .unwrap_or(department::DEFAULT_DEPARTMENT);
        (format!("{}:", name), BOT_BUBBLE, TEXT_PRIMARY, MAROON_DARK)
    };

    ui.with_layout(Layout::top_down(align), |ui| {
        egui::Frame::default()
            .fill(bg)
            .corner_radius(BUBBLE_ROUNDING)
            .inner_margin(10.0)
            .show(ui, |ui| {
                ui.set_max_width(ui.available_width() * 0.8);
                ui.label(RichText::new(label).color(fg).strong().small());
                if entry.is_thinking() {
                    let text = thinking_text(ui);
                    ui.label(RichText::new(text).color(TEXT_SECONDARY).italics());
                } else {
                    ui.label(markdown::layout(&entry.display_text, 14.0, fg, strong));
                }
            });
    });
}
