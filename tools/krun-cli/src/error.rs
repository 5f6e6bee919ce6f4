use crate::client::ClientError;
use krun_gen::{CodecError, GenerateError};

/// Everything that can end a `run` or `service` invocation.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Generate(#[from] GenerateError),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("failed to encode {kind}: {source}")]
    Encode {
        kind: &'static str,
        source: CodecError,
    },

    #[error("request succeeded but the response could not be decoded: {0}")]
    Decode(CodecError),

    #[error("failed to format output: {0}")]
    Format(String),

    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

impl RunError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Raised before any request could have been sent.
    pub fn is_validation(&self) -> bool {
        match self {
            RunError::Validation(_) => true,
            RunError::Generate(e) => e.is_validation(),
            _ => false,
        }
    }
}
