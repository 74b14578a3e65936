use serde::{Deserialize, Serialize};
use crate::department::{DEFAULT_DEPARTMENT, DEFAULT_ICON};

pub const GREETING: &str = "Hello! How can I assist you with your academic inquiries today?";
pub const THINKING_TEXT: &str = "Thinking...";

/// Who a message is attributed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Bot,
    System,
}

/// A single entry of the conversation log.
///
/// Serialized with camelCase keys so a persisted log stays readable by
/// older copies of the widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub role: Role,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department_icon: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_thinking: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_system: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_notification: bool,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: text.into(),
            department: None,
            department_icon: None,
            is_thinking: false,
            is_system: false,
            is_notification: false,
        }
    }

    pub fn bot(
        text: impl Into<String>,
        department: impl Into<String>,
        icon: impl Into<String>,
    ) -> Self {
        Self {
            role: Role::Bot,
            content: text.into(),
            department: Some(department.into()),
            department_icon: Some(icon.into()),
            is_thinking: false,
            is_system: false,
            is_notification: false,
        }
    }

    /// Transient placeholder shown while a query is in flight
    pub fn thinking(department: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            is_thinking: true,
            ..Self::bot(THINKING_TEXT, department, icon)
        }
    }

    /// Department switch/return banner
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: text.into(),
            department: None,
            department_icon: None,
            is_thinking: false,
            is_system: true,
            is_notification: false,
        }
    }

    /// The opening bot line of a fresh conversation
    pub fn greeting() -> Self {
        Self::bot(GREETING, DEFAULT_DEPARTMENT, DEFAULT_ICON)
    }

    pub fn is_bot(&self) -> bool {
        self.role == Role::Bot && !self.is_system && !self.is_notification
    }
}
