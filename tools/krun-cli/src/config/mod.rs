mod context;
mod file;

pub use context::*;
pub use file::*;

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

pub const DEFAULT_SERVER: &str = "http://127.0.0.1:8080/api/v1";
pub const DEFAULT_NAMESPACE: &str = "default";
const DEFAULT_CONTEXT: &str = "default";

/// Named API contexts and the one commands use unless told otherwise.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    pub contexts: BTreeMap<String, ContextConfig>,
    pub current_context: String,
}

/// Where to send create requests.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextConfig {
    /// API base URL including the version prefix, e.g. `http://host/api/v1`
    pub server: Option<String>,
    pub namespace: Option<String>,
}

impl ContextConfig {
    pub fn namespace_or_default(&self) -> &str {
        self.namespace.as_deref().unwrap_or(DEFAULT_NAMESPACE)
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        let local = ContextConfig {
            server: Some(DEFAULT_SERVER.to_string()),
            namespace: Some(DEFAULT_NAMESPACE.to_string()),
        };
        Self {
            contexts: BTreeMap::from([(DEFAULT_CONTEXT.to_string(), local)]),
            current_context: DEFAULT_CONTEXT.to_string(),
        }
    }
}

impl CliConfig {
    pub fn current_context(&self) -> Option<&ContextConfig> {
        self.get_context(&self.current_context)
    }

    pub fn get_context(&self, name: &str) -> Option<&ContextConfig> {
        self.contexts.get(name)
    }

    /// Make `name` current; it must already exist.
    pub fn set_current_context(&mut self, name: String) -> Result<()> {
        if self.get_context(&name).is_none() {
            bail!("Context '{}' does not exist", name);
        }
        self.current_context = name;
        Ok(())
    }

    /// Insert or replace a context.
    pub fn set_context(&mut self, name: String, context: ContextConfig) {
        self.contexts.insert(name, context);
    }
}

/// Read the config at `path`, writing the default one first if it is missing.
pub async fn load_or_create_config_from_path(path: &Path) -> Result<CliConfig> {
    if path.exists() {
        return file::load_config_from_path(path).await;
    }
    let config = CliConfig::default();
    file::save_config_to_path(&config, path).await?;
    Ok(config)
}
