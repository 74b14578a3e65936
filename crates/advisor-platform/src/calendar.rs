//! Google Calendar helper routes under `calendar_base_url`.

use std::cell::RefCell;
use async_trait::async_trait;
use gloo_net::http::Request;
use serde::Deserialize;
use serde_json::json;

use advisor_core::ports::CalendarPort;
use advisor_types::{
    AdvisorError, Result,
    config::ApiConfig,
    schedule::{CalendarLink, Course, ScheduleData},
};

pub struct HttpCalendarApi {
    config: RefCell<ApiConfig>,
}

impl HttpCalendarApi {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config: RefCell::new(config),
        }
    }

    pub fn set_config(&self, config: ApiConfig) {
        *self.config.borrow_mut() = config;
    }

    fn url(&self, route: &str) -> String {
        self.config.borrow().calendar_url(route)
    }

    async fn post<T: for<'de> Deserialize<'de>>(&self, route: &str, body: serde_json::Value) -> Result<T> {
        let response = Request::post(&self.url(route))
            .header("Content-Type", "application/json")
            .json(&body)
            .map_err(|e| AdvisorError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| AdvisorError::Network(e.to_string()))?;

        if !response.ok() {
            return Err(AdvisorError::Calendar(format!(
                "{} failed with HTTP {}",
                route,
                response.status()
            )));
        }
        response
            .json()
            .await
            .map_err(|e| AdvisorError::Calendar(e.to_string()))
    }
}

// ─── API response types ──────────────────────────────────────

#[derive(Deserialize)]
struct AuthUrlReply {
    auth_url: String,
}

#[derive(Deserialize)]
struct AddEventsReply {
    #[serde(default)]
    added_count: u32,
}

#[derive(Deserialize)]
struct LinksReply {
    status: String,
    #[serde(default)]
    links: Vec<CalendarLink>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Deserialize)]
struct AllLinkReply {
    status: String,
    #[serde(default)]
    link: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

fn not_successful(status: &str, message: Option<String>) -> AdvisorError {
    AdvisorError::Calendar(message.unwrap_or_else(|| format!("status {}", status)))
}

#[async_trait(?Send)]
impl CalendarPort for HttpCalendarApi {
    async fn auth_url(&self) -> Result<String> {
        let response = Request::get(&self.url("auth-url"))
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(|e| AdvisorError::Network(e.to_string()))?;

        if !response.ok() {
            return Err(AdvisorError::Calendar(
                "Failed to get authentication URL".to_string(),
            ));
        }
        let data: AuthUrlReply = response
            .json()
            .await
            .map_err(|e| AdvisorError::Calendar(e.to_string()))?;
        Ok(data.auth_url)
    }

    async fn add_events(&self, code: &str, schedule: &[Course]) -> Result<u32> {
        let reply: AddEventsReply = self
            .post("add-events", json!({ "code": code, "schedule": schedule }))
            .await?;
        Ok(reply.added_count)
    }

    async fn generate_links(&self, schedule: &ScheduleData) -> Result<Vec<CalendarLink>> {
        let reply: LinksReply = self
            .post("generate-links", json!({ "schedule_data": schedule }))
            .await?;
        if reply.status != "success" {
            return Err(not_successful(&reply.status, reply.message));
        }
        Ok(reply.links)
    }

    async fn generate_all_link(&self, schedule: &ScheduleData) -> Result<String> {
        let reply: AllLinkReply = self
            .post("generate-all-link", json!({ "schedule_data": schedule }))
            .await?;
        match (reply.status.as_str(), reply.link) {
            ("success", Some(link)) => Ok(link),
            (status, _) => Err(not_successful(status, reply.message)),
        }
    }
}
