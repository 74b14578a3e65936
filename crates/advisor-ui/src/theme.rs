//! UI theme constants

use egui::{Color32, CornerRadius, Stroke, Vec2};
use advisor_core::timetable::course_hue;

pub const MAROON: Color32 = Color32::from_rgb(132, 1, 50);
pub const MAROON_DARK: Color32 = Color32::from_rgb(98, 0, 36);
pub const BG_PRIMARY: Color32 = Color32::from_rgb(248, 246, 247);
pub const BG_SECONDARY: Color32 = Color32::from_rgb(255, 255, 255);
pub const BG_SURFACE: Color32 = Color32::from_rgb(238, 233, 235);
pub const BOT_BUBBLE: Color32 = Color32::from_rgb(241, 241, 241);
pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(33, 33, 33);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(110, 110, 110);
pub const TEXT_ON_ACCENT: Color32 = Color32::from_rgb(255, 255, 255);
pub const SYSTEM_BG: Color32 = Color32::from_rgb(255, 243, 205);
pub const SYSTEM_FG: Color32 = Color32::from_rgb(133, 100, 4);
pub const NOTIFICATION_BG: Color32 = Color32::from_rgb(226, 239, 252);
pub const NOTIFICATION_FG: Color32 = Color32::from_rgb(25, 80, 140);
pub const GRID_LINE: Color32 = Color32::from_rgb(221, 221, 221);
pub const SUCCESS: Color32 = Color32::from_rgb(40, 167, 69);
pub const ERROR: Color32 = Color32::from_rgb(220, 53, 69);

pub const PANEL_ROUNDING: CornerRadius = CornerRadius::same(6);
pub const BUBBLE_ROUNDING: CornerRadius = CornerRadius::same(12);
pub const PANEL_PADDING: Vec2 = Vec2::new(12.0, 8.0);

/// Color from hue (degrees) and saturation/lightness in 0..=1
pub fn hsl(hue: u32, saturation: f32, lightness: f32) -> Color32 {
    let h = (hue % 360) as f32 / 60.0;
    let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let m = lightness - chroma / 2.0;
    let channel = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    Color32::from_rgb(channel(r), channel(g), channel(b))
}

/// Pastel fill for a course cell in the week view
pub fn course_fill(course_code: &str) -> Color32 {
    hsl(course_hue(course_code), 0.85, 0.92)
}

pub fn course_border(course_code: &str) -> Color32 {
    hsl(course_hue(course_code), 0.60, 0.80)
}

/// Apply the light maroon theme to an egui context
pub fn apply_theme(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();

    style.visuals = egui::Visuals::light();
    style.visuals.panel_fill = BG_PRIMARY;
    style.visuals.window_fill = BG_SECONDARY;
    style.visuals.extreme_bg_color = BG_SECONDARY;

    style.visuals.widgets.inactive.bg_fill = BG_SURFACE;
    style.visuals.widgets.inactive.weak_bg_fill = BG_SURFACE;
    style.visuals.widgets.hovered.bg_fill = BG_SURFACE;
    style.visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, MAROON);
    style.visuals.widgets.active.bg_fill = MAROON;
    style.visuals.widgets.active.fg_stroke = Stroke::new(1.0, TEXT_ON_ACCENT);

    style.visuals.selection.bg_fill = MAROON.linear_multiply(0.25);
    style.visuals.selection.stroke = Stroke::new(1.0, MAROON);
    style.visuals.hyperlink_color = MAROON;

    style.spacing.item_spacing = Vec2::new(8.0, 6.0);

    ctx.set_style(style);
}
