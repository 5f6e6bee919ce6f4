/// Errors raised while resolving flags or running a generator.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("Parameter: {0} is required")]
    MissingParameter(String),

    #[error("invalid restart policy: {0}")]
    InvalidRestartPolicy(String),

    #[error("unknown generator: {0}")]
    UnknownGenerator(String),

    #[error("invalid label spec: {0}")]
    InvalidLabels(String),

    #[error("invalid env: {0}")]
    InvalidEnv(String),

    #[error("invalid value for '{param}': {value}")]
    InvalidValue { param: String, value: String },

    #[error("{0}")]
    Conflict(String),
}

impl GenerateError {
    pub fn invalid_value(
        param: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            param: param.into(),
            value: value.into(),
        }
    }

    /// True for errors caused by malformed or missing user input, as opposed
    /// to a generator rejecting a well-formed but conflicting parameter map.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingParameter(_)
                | Self::InvalidRestartPolicy(_)
                | Self::UnknownGenerator(_)
                | Self::InvalidLabels(_)
                | Self::InvalidEnv(_)
                | Self::InvalidValue { .. }
        )
    }
}
