//! Port traits: the boundary between core logic and the browser.
//!
//! These traits are defined here in `advisor-core` (pure Rust).
//! Implementations live in `advisor-platform` (browser adapters).
//! The core never imports platform code; it only depends on these traits.

use async_trait::async_trait;
use futures::future::LocalBoxFuture;
use serde::{Deserialize, Serialize};
use advisor_types::{
    Result,
    config::Language,
    schedule::{CalendarLink, Course, ScheduleData},
};

// ─── Advisory API Port ───────────────────────────────────────

/// A question for the advising backend
#[derive(Debug, Clone, PartialEq)]
pub struct AdvisoryRequest {
    pub text: String,
    pub language: Language,
    /// Sent as `X-Session-ID` once the server has assigned one
    pub session_id: Option<String>,
}

/// Successful reply from the advising backend
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AdvisoryResponse {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
}

#[async_trait(?Send)]
pub trait AdvisoryPort {
    /// Send one query. Non-2xx statuses are errors.
    async fn query(&self, req: AdvisoryRequest) -> Result<AdvisoryResponse>;

    /// Ask the backend to forget the conversation.
    /// With a session id the session-scoped route is used.
    async fn reset(&self, session_id: Option<&str>) -> Result<()>;
}

// ─── Calendar Port ───────────────────────────────────────────

#[async_trait(?Send)]
pub trait CalendarPort {
    /// Google consent URL to redirect the user to
    async fn auth_url(&self) -> Result<String>;

    /// Exchange the OAuth code and create the events; returns how many were added
    async fn add_events(&self, code: &str, schedule: &[Course]) -> Result<u32>;

    /// One pre-filled link per course meeting day
    async fn generate_links(&self, schedule: &ScheduleData) -> Result<Vec<CalendarLink>>;

    /// A single link covering the whole schedule
    async fn generate_all_link(&self, schedule: &ScheduleData) -> Result<String>;
}

// ─── Storage Port ────────────────────────────────────────────

#[async_trait(?Send)]
pub trait StoragePort {
    /// Get a value by key
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Set a value
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete a value
    async fn delete(&self, key: &str) -> Result<()>;

    /// Check if a key exists
    async fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.get(key).await?.is_some())
    }

    /// Name of this backend (for logging/debug)
    fn backend_name(&self) -> &str;
}

// ─── Timer Port ──────────────────────────────────────────────

pub trait TimerPort {
    /// Wall-clock milliseconds
    fn now_ms(&self) -> f64;

    /// Resolve after `ms` milliseconds
    fn sleep(&self, ms: u32) -> LocalBoxFuture<'static, ()>;

    /// Run `task` after `delay_ms` unless the returned handle is cancelled
    /// or dropped first.
    fn schedule(&self, delay_ms: u32, task: LocalBoxFuture<'static, ()>) -> ScheduledTask;
}

/// Handle to a pending timer task. Cancels the task on `cancel()` or drop.
pub struct ScheduledTask {
    canceller: Option<Box<dyn FnOnce()>>,
}

impl ScheduledTask {
    pub fn new(canceller: impl FnOnce() + 'static) -> Self {
        Self {
            canceller: Some(Box::new(canceller)),
        }
    }

    pub fn cancel(mut self) {
        self.fire_canceller();
    }

    /// Drop the handle without cancelling; used once the task is running
    pub fn disarm(mut self) {
        self.canceller.take();
    }

    fn fire_canceller(&mut self) {
        if let Some(canceller) = self.canceller.take() {
            canceller();
        }
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        self.fire_canceller();
    }
}

impl std::fmt::Debug for ScheduledTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScheduledTask")
            .field("armed", &self.canceller.is_some())
            .finish()
    }
}
