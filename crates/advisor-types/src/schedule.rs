use serde::{Deserialize, Deserializer, Serialize};

/// Course schedule embedded by the backend inside a bot reply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleData {
    pub is_schedule: bool,
    #[serde(default)]
    pub schedule: Vec<Course>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub course_code: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub section: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructor: Option<String>,
    #[serde(default)]
    pub meetings: Vec<Meeting>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meeting {
    #[serde(default)]
    pub days: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// One pre-filled "add event" link produced by the calendar backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarLink {
    pub course: String,
    pub day: String,
    pub time: String,
    pub url: String,
}

impl Meeting {
    pub fn time_range(&self) -> String {
        format!(
            "{} - {}",
            self.start_time.as_deref().unwrap_or(""),
            self.end_time.as_deref().unwrap_or("")
        )
    }
}

impl Course {
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.course_code)
    }
}

// Sections come back as "1" from some prompts and 1 from others.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number for section, got {}",
            other
        ))),
    }
}
