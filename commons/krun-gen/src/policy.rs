use crate::error::GenerateError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Pod restart policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum RestartPolicy {
    Always,
    OnFailure,
    Never,
}

impl RestartPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            RestartPolicy::Always => "Always",
            RestartPolicy::OnFailure => "OnFailure",
            RestartPolicy::Never => "Never",
        }
    }
}

impl fmt::Display for RestartPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RestartPolicy {
    type Err = GenerateError;

    /// Case-sensitive; only the canonical spellings are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Always" => Ok(RestartPolicy::Always),
            "OnFailure" => Ok(RestartPolicy::OnFailure),
            "Never" => Ok(RestartPolicy::Never),
            other => Err(GenerateError::InvalidRestartPolicy(other.to_string())),
        }
    }
}

/// Resolve the `--restart` flag value.
///
/// An empty value defaults to `OnFailure` for interactive sessions and
/// `Always` otherwise.
pub fn resolve_restart_policy(
    raw: &str,
    interactive: bool,
) -> Result<RestartPolicy, GenerateError> {
    if raw.is_empty() {
        return Ok(if interactive {
            RestartPolicy::OnFailure
        } else {
            RestartPolicy::Always
        });
    }
    raw.parse()
}
