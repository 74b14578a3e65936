//! Schedule widget shown under a bot reply that carried a schedule:
//! a list table or a painted week grid, plus the calendar export button.

use egui::{self, Align2, FontId, Pos2, Rect, RichText, Sense, Stroke, Vec2};
use advisor_core::timetable::{slot_label, WeeklyGrid, DAYS, DAY_COLUMNS, TIME_SLOTS};
use crate::state::{ChatEntry, ScheduleView};
use crate::theme::*;

const LABEL_WIDTH: f32 = 64.0;
const HEADER_HEIGHT: f32 = 24.0;
const ROW_HEIGHT: f32 = 22.0;

/// Render the widget for `entry`. Returns true when the user asked to
/// export the schedule to Google Calendar.
pub fn schedule_widget(
    ui: &mut egui::Ui,
    id: usize,
    entry: &ChatEntry,
    view: &mut ScheduleView,
) -> bool {
    let mut export = false;

    egui::Frame::default()
        .fill(BG_SECONDARY)
        .stroke(Stroke::new(1.0, GRID_LINE))
        .corner_radius(PANEL_ROUNDING)
        .inner_margin(PANEL_PADDING)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new("Course Schedule").color(MAROON).strong());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.selectable_value(view, ScheduleView::Week, "Week");
                    ui.selectable_value(view, ScheduleView::List, "List");
                });
            });
            ui.separator();

            match view {
                ScheduleView::List => list_view(ui, id, entry),
                ScheduleView::Week => match &entry.grid {
                    Some(grid) if !grid.is_empty() => week_view(ui, grid),
                    _ => {
                        ui.label(
                            RichText::new("No meetings with valid times to place on the week.")
                                .color(TEXT_SECONDARY)
                                .italics(),
                        );
                    }
                },
            }

            ui.add_space(6.0);
            let btn = ui.add(
                egui::Button::new(RichText::new("Add to Google Calendar").color(TEXT_ON_ACCENT))
                    .fill(MAROON)
                    .corner_radius(PANEL_ROUNDING),
            );
            if btn.clicked() {
                export = true;
            }
        });

    export
}

fn list_view(ui: &mut egui::Ui, id: usize, entry: &ChatEntry) {
    if entry.list_rows.is_empty() {
        ui.label(RichText::new("No class meetings listed.").color(TEXT_SECONDARY));
        return;
    }

    egui::ScrollArea::horizontal()
        .id_salt(("schedule_list_scroll", id))
        .show(ui, |ui| {
            egui::Grid::new(("schedule_list", id))
                .striped(true)
                .spacing(Vec2::new(12.0, 4.0))
                .show(ui, |ui| {
                    for header in ["Course", "Section", "Days", "Time", "Location", "Instructor"] {
                        ui.label(RichText::new(header).color(MAROON).strong().small());
                    }
                    ui.end_row();

                    for row in &entry.list_rows {
                        // Course-level cells only on a course's first meeting row
                        let first = row.span.is_some();
                        ui.label(if first { row.course.as_str() } else { "" });
                        ui.label(if first { row.section.as_str() } else { "" });
                        ui.label(&row.days);
                        ui.label(&row.time);
                        ui.label(&row.location);
                        ui.label(if first { row.instructor.as_str() } else { "" });
                        ui.end_row();
                    }
                });
        });
}

fn week_view(ui: &mut egui::Ui, grid: &WeeklyGrid) {
    let width = ui.available_width().max(LABEL_WIDTH + DAY_COLUMNS as f32 * 60.0);
    let height = HEADER_HEIGHT + TIME_SLOTS as f32 * ROW_HEIGHT;
    let (rect, _) = ui.allocate_exact_size(Vec2::new(width, height), Sense::hover());
    let painter = ui.painter_at(rect);
    let col_width = (width - LABEL_WIDTH) / DAY_COLUMNS as f32;
    let line = Stroke::new(1.0, GRID_LINE);

    painter.rect_filled(rect, 0.0, BG_SECONDARY);

    for (day, name) in DAYS.iter().enumerate() {
        let x = rect.left() + LABEL_WIDTH + day as f32 * col_width;
        painter.text(
            Pos2::new(x + col_width / 2.0, rect.top() + HEADER_HEIGHT / 2.0),
            Align2::CENTER_CENTER,
            *name,
            FontId::proportional(12.0),
            MAROON,
        );
        painter.line_segment([Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())], line);
    }

    for slot in 0..TIME_SLOTS {
        let y = rect.top() + HEADER_HEIGHT + slot as f32 * ROW_HEIGHT;
        painter.line_segment([Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)], line);
        painter.text(
            Pos2::new(rect.left() + 4.0, y + ROW_HEIGHT / 2.0),
            Align2::LEFT_CENTER,
            slot_label(slot),
            FontId::proportional(10.0),
            TEXT_SECONDARY,
        );
    }

    for (slot, day, block) in grid.blocks() {
        let min = Pos2::new(
            rect.left() + LABEL_WIDTH + day as f32 * col_width,
            rect.top() + HEADER_HEIGHT + slot as f32 * ROW_HEIGHT,
        );
        let cell = Rect::from_min_size(min, Vec2::new(col_width, block.duration as f32 * ROW_HEIGHT))
            .shrink(1.0);

        // Border drawn as an outer fill under a slightly smaller inner fill
        painter.rect_filled(cell, 4.0, course_border(&block.course));
        painter.rect_filled(cell.shrink(1.5), 3.0, course_fill(&block.course));

        let mut text = format!("{}\nSection {}", block.course, block.section);
        if !block.location.is_empty() {
            text.push('\n');
            text.push_str(&block.location);
        }
        painter.with_clip_rect(cell).text(
            cell.left_top() + Vec2::new(4.0, 3.0),
            Align2::LEFT_TOP,
            text,
            FontId::proportional(10.5),
            TEXT_PRIMARY,
        );
    }
}
