use thiserror::Error;

/// Client-related errors
#[derive(Error, Debug)]
pub enum ClientError {
    /// The request could not be completed. The server may still have applied
    /// it if the failure happened after the body was sent.
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },
}

impl ClientError {
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            message: message.into(),
        }
    }
}
