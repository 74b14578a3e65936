//! The one piece of markdown bot replies use: `**bold**`.
//!
//! Pairs are matched non-greedily within a line. An unpaired `**` stays
//! literal text.

use egui::text::{LayoutJob, TextFormat};
use egui::{Color32, FontId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span<'a> {
    pub text: &'a str,
    pub bold: bool,
}

fn bold_spans_in_line<'a>(line: &'a str, spans: &mut Vec<Span<'a>>) {
    let mut rest = line;
    while let Some(open) = rest.find("**") {
        let inner = &rest[open + 2..];
        let Some(close) = inner.find("**") else {
            break;
        };
        if open > 0 {
            spans.push(Span { text: &rest[..open], bold: false });
        }
        if close > 0 {
            spans.push(Span { text: &inner[..close], bold: true });
        }
        rest = &inner[close + 2..];
    }
    if !rest.is_empty() {
        spans.push(Span { text: rest, bold: false });
    }
}

/// Split `text` into plain and bold runs. Line breaks are kept as plain
/// `"\n"` spans.
pub fn bold_spans(text: &str) -> Vec<Span<'_>> {
    let mut spans = Vec::new();
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            spans.push(Span { text: "\n", bold: false });
        }
        bold_spans_in_line(line, &mut spans);
    }
    spans
}

/// Lay out `text` with bold runs drawn in `strong`
pub fn layout(text: &str, size: f32, color: Color32, strong: Color32) -> LayoutJob {
    let mut job = LayoutJob::default();
    for span in bold_spans(text) {
        let format = TextFormat {
            font_id: FontId::proportional(size),
            color: if span.bold { strong } else { color },
            ..Default::default()
        };
        job.append(span.text, 0.0, format);
    }
    job
}
