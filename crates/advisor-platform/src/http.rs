//! Advisory backend adapter.
//!
//! `POST <query_url>` with `{text, language}`; the server session id travels
//! in the `X-Session-ID` header both ways. Uses browser `fetch()` via
//! gloo-net.

use std::cell::RefCell;
use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use serde_json::json;

use advisor_core::ports::*;
use advisor_types::{AdvisorError, Result, config::ApiConfig};

pub const SESSION_HEADER: &str = "X-Session-ID";

pub struct HttpAdvisoryApi {
    config: RefCell<ApiConfig>,
}

impl HttpAdvisoryApi {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config: RefCell::new(config),
        }
    }

    /// Point at a different endpoint; takes effect on the next request
    pub fn set_config(&self, config: ApiConfig) {
        *self.config.borrow_mut() = config;
    }

    fn query_url(&self) -> String {
        self.config.borrow().query_url.clone()
    }
}

fn network(e: gloo_net::Error) -> AdvisorError {
    AdvisorError::Network(e.to_string())
}

/// Non-2xx responses become `Server` errors carrying the body text
async fn ensure_ok(response: Response) -> Result<Response> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let message = response
        .text()
        .await
        .unwrap_or_else(|_| "unknown error".to_string());
    Err(AdvisorError::Server { status, message })
}

#[async_trait(?Send)]
impl AdvisoryPort for HttpAdvisoryApi {
    async fn query(&self, req: AdvisoryRequest) -> Result<AdvisoryResponse> {
        let url = self.query_url();
        let body = json!({
            "text": req.text,
            "language": req.language.api_value(),
        });

        let mut builder = Request::post(&url).header("Content-Type", "application/json");
        if let Some(session_id) = &req.session_id {
            builder = builder.header(SESSION_HEADER, session_id);
        }

        let response = builder
            .json(&body)
            .map_err(network)?
            .send()
            .await
            .map_err(network)?;
        let response = ensure_ok(response).await?;

        let status = response.status();
        let header_session = response.headers().get(SESSION_HEADER);
        let mut data: AdvisoryResponse = response.json().await.map_err(|e| {
            AdvisorError::Server {
                status,
                message: format!("undecodable reply: {}", e),
            }
        })?;

        if data.session_id.is_none() {
            data.session_id = header_session.filter(|s| !s.is_empty());
        }
        Ok(data)
    }

    async fn reset(&self, session_id: Option<&str>) -> Result<()> {
        let response = match session_id {
            Some(id) => {
                let url = self.config.borrow().reset_url(id);
                Request::post(&url)
                    .header(SESSION_HEADER, id)
                    .send()
                    .await
                    .map_err(network)?
            }
            None => Request::post(&self.query_url())
                .header("Content-Type", "application/json")
                .json(&json!({ "reset": true }))
                .map_err(network)?
                .send()
                .await
                .map_err(network)?,
        };
        ensure_ok(response).await?;
        Ok(())
    }
}
