//! "Add to Google Calendar" window: export options, then links or an error.

use egui::{self, Align2, RichText, Vec2};
use advisor_core::calendar::NO_LINKS_TEXT;
use crate::state::{CalendarAction, CalendarView};
use crate::theme::*;

const LINKS_INTRO: &str =
    "Click on each link below to add individual class sessions to your Google Calendar:";

fn option_button(ui: &mut egui::Ui, label: &str, primary: bool) -> bool {
    let (fill, color) = if primary {
        (MAROON, TEXT_ON_ACCENT)
    } else {
        (BG_SURFACE, TEXT_PRIMARY)
    };
    ui.add(
        egui::Button::new(RichText::new(label).color(color))
            .fill(fill)
            .corner_radius(PANEL_ROUNDING)
            .min_size(Vec2::new(220.0, 28.0)),
    )
    .clicked()
}

/// Render the window while `view` is Some. Closing it sets `view` to None.
pub fn calendar_window(
    ctx: &egui::Context,
    view: &mut Option<CalendarView>,
) -> Option<CalendarAction> {
    let mut action = None;
    let mut open = view.is_some();
    let mut dismissed = false;

    let Some(current) = view.as_ref() else {
        return None;
    };

    egui::Window::new("Add to Google Calendar")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
        .show(ctx, |ui| match current {
            CalendarView::Options(schedule) => {
                ui.label("How would you like to add this schedule?");
                ui.add_space(6.0);
                ui.vertical_centered(|ui| {
                    if option_button(ui, "Get Calendar Links", true) {
                        action = Some(CalendarAction::Links(schedule.clone()));
                    }
                    if option_button(ui, "Single Link for All Classes", true) {
                        action = Some(CalendarAction::SingleLink(schedule.clone()));
                    }
                    if option_button(ui, "Connect to Google Calendar", true) {
                        action = Some(CalendarAction::Google(schedule.clone()));
                    }
                    if option_button(ui, "Cancel", false) {
                        dismissed = true;
                    }
                });
            }
            CalendarView::Loading => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Generating calendar links...");
                });
            }
            CalendarView::Links(groups) => {
                if groups.is_empty() {
                    ui.label(NO_LINKS_TEXT);
                    return;
                }
                ui.label(LINKS_INTRO);
                egui::ScrollArea::vertical().max_height(320.0).show(ui, |ui| {
                    for group in groups {
                        ui.add_space(4.0);
                        ui.label(RichText::new(&group.course).color(MAROON).strong());
                        for link in &group.links {
                            ui.add(
                                egui::Hyperlink::from_label_and_url(
                                    format!("{} {}", link.day, link.time),
                                    &link.url,
                                )
                                .open_in_new_tab(true),
                            );
                        }
                    }
                });
            }
            CalendarView::Single(url) => {
                ui.label("Open this link to add all your classes at once:");
                ui.add(
                    egui::Hyperlink::from_label_and_url("Add all classes to Google Calendar", url)
                        .open_in_new_tab(true),
                );
            }
            CalendarView::Failed(message) => {
                ui.label(RichText::new(message).color(ERROR));
            }
        });

    if !open || dismissed {
        *view = None;
    }
    action
}
