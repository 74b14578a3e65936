//! Locating the fenced schedule JSON the backend embeds in bot replies.

use std::sync::OnceLock;
use regex::Regex;
use advisor_types::schedule::ScheduleData;

/// Result of scanning a bot reply for a schedule
#[derive(Debug, Clone, PartialEq)]
pub enum ScheduleExtraction {
    /// A schedule block was found; `display_text` is the reply with every
    /// fenced JSON block removed.
    Found {
        data: ScheduleData,
        display_text: String,
    },
    /// No fenced JSON block, or one that is not a schedule
    NotFound,
    /// A fenced block was present but is not valid schedule JSON.
    /// The reply should be shown unchanged.
    Invalid(String),
}

fn block_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"```json\s*(\{[\s\S]*?\})\s*```").expect("static schedule regex")
    })
}

/// Scan `content` for the first fenced ```json block and parse it as a
/// schedule. Only `is_schedule: true` payloads count.
pub fn extract_schedule(content: &str) -> ScheduleExtraction {
    let Some(caps) = block_pattern().captures(content) else {
        return ScheduleExtraction::NotFound;
    };

    match serde_json::from_str::<ScheduleData>(&caps[1]) {
        Ok(data) if data.is_schedule => ScheduleExtraction::Found {
            data,
            display_text: strip_schedule_blocks(content),
        },
        Ok(_) => ScheduleExtraction::NotFound,
        Err(e) => {
            log::warn!("Failed to parse schedule JSON: {}", e);
            ScheduleExtraction::Invalid(e.to_string())
        }
    }
}

/// Remove every fenced ```json block from `content`
pub fn strip_schedule_blocks(content: &str) -> String {
    block_pattern().replace_all(content, "").into_owned()
}

impl ScheduleExtraction {
    pub fn schedule(&self) -> Option<&ScheduleData> {
        match self {
            ScheduleExtraction::Found { data, .. } => Some(data),
            _ => None,
        }
    }

    /// Text to display for a reply: stripped when a schedule was found,
    /// the original content otherwise
    pub fn display_text<'a>(&'a self, original: &'a str) -> &'a str {
        match self {
            ScheduleExtraction::Found { display_text, .. } => display_text,
            _ => original,
        }
    }
}
