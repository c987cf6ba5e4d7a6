// File: src/error.rs
use thiserror::Error;

/// Why a call to the events API did not produce data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Server answered {code} {reason}")]
    Status { code: u16, reason: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("TLS setup failed: {0}")]
    Tls(String),
}

impl ApiError {
    pub fn status(code: http::StatusCode) -> Self {
        Self::Status {
            code: code.as_u16(),
            reason: code.canonical_reason().unwrap_or_default().to_string(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Status { code: 401 | 403, .. })
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(e.to_string())
    }
}
