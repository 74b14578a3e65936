use serde::{Deserialize, Serialize};

pub const MIN_REVERT_DELAY_MS: u32 = 500;
pub const MAX_REVERT_DELAY_MS: u32 = 2000;

/// Top-level widget configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AdvisorConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub language: Language,
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Advisory query endpoint; reset calls are derived from it
    pub query_url: String,
    /// Prefix for the Google Calendar helper routes
    pub calendar_base_url: String,
    pub request_timeout_ms: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            query_url: "http://localhost:8000/api/advisor/query".to_string(),
            calendar_base_url: "/api/gcalendar".to_string(),
            request_timeout_ms: 60_000,
        }
    }
}

impl ApiConfig {
    pub fn reset_url(&self, session_id: &str) -> String {
        format!("{}/reset/{}", self.query_url.trim_end_matches('/'), session_id)
    }

    pub fn calendar_url(&self, route: &str) -> String {
        format!("{}/{}", self.calendar_base_url.trim_end_matches('/'), route)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingConfig {
    /// How long a switched department stays active before reverting
    pub revert_delay_ms: u32,
    /// Minimum time the thinking placeholder stays visible
    pub thinking_delay_ms: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            revert_delay_ms: MAX_REVERT_DELAY_MS,
            thinking_delay_ms: 500,
        }
    }
}

impl TimingConfig {
    pub fn revert_delay_ms(&self) -> u32 {
        self.revert_delay_ms
            .clamp(MIN_REVERT_DELAY_MS, MAX_REVERT_DELAY_MS)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Language {
    #[default]
    English,
    Arabic,
}

impl Language {
    /// Value sent to the advisory API
    pub fn api_value(&self) -> &'static str {
        match self {
            Language::English => "english",
            Language::Arabic => "arabic",
        }
    }

    /// Toggle label shown in the header
    pub fn label(&self) -> &'static str {
        match self {
            Language::English => "En",
            Language::Arabic => "Ar",
        }
    }

    pub fn is_rtl(&self) -> bool {
        matches!(self, Language::Arabic)
    }

    pub fn toggled(&self) -> Self {
        match self {
            Language::English => Language::Arabic,
            Language::Arabic => Language::English,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct StorageConfig {
    pub backend: StorageBackendType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum StorageBackendType {
    /// localStorage when the browser allows it, memory otherwise
    #[default]
    Auto,
    Memory,
    LocalStorage,
}

impl StorageBackendType {
    pub fn all() -> &'static [StorageBackendType] {
        &[
            StorageBackendType::Auto,
            StorageBackendType::Memory,
            StorageBackendType::LocalStorage,
        ]
    }

    pub fn label(&self) -> &str {
        match self {
            StorageBackendType::Auto => "Auto",
            StorageBackendType::Memory => "Memory",
            StorageBackendType::LocalStorage => "localStorage",
        }
    }
}
