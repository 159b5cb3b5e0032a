use crate::config;

/// Ways a call to the prediction service can fail.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FetchError {
    /// Non-2xx response carrying a structured `{ "error": ... }` body
    #[error("{message}")]
    Service { status: u16, message: String },
    /// Non-2xx response without a usable error message
    #[error("prediction service returned status {status}")]
    UnexpectedStatus { status: u16 },
    /// No response was received
    #[error("request failed: {0}")]
    Connectivity(String),
    /// 2xx response whose body could not be decoded
    #[error("invalid response body: {0}")]
    InvalidResponse(String),
}

impl FetchError {
    /// Text shown in the error banner
    pub fn user_message(&self) -> String {
        match self {
            FetchError::Service { message, .. } if !message.trim().is_empty() => message.clone(),
            _ => config::GENERIC_ERROR_MESSAGE.to_string(),
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            FetchError::InvalidResponse(err.to_string())
        } else {
            FetchError::Connectivity(err.to_string())
        }
    }
}
