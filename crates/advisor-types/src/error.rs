use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AdvisorError {
    #[error("Could not connect to the advisor service: {0}")]
    Network(String),

    #[error("The server returned an error (HTTP {status}): {message}")]
    Server { status: u16, message: String },

    #[error("Could not connect to the advisor service: no reply after {0}ms")]
    Timeout(u32),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Calendar error: {0}")]
    Calendar(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JS interop error: {0}")]
    JsInterop(String),

    #[error("{0}")]
    Other(String),
}

impl AdvisorError {
    /// Connectivity failures get their own user-facing copy. Classified by
    /// variant: a `Server` message carries the response body, whatever it says.
    pub fn is_connection_failure(&self) -> bool {
        matches!(self, AdvisorError::Network(_) | AdvisorError::Timeout(_))
    }
}

impl From<serde_json::Error> for AdvisorError {
    fn from(e: serde_json::Error) -> Self {
        AdvisorError::Serialization(e.to_string())
    }
}
