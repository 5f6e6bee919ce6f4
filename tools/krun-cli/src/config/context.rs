use super::{CliConfig, ContextConfig, file};
use anyhow::Result;
use std::path::{Path, PathBuf};

/// The context file and its parsed contents.
pub struct ContextManager {
    config: CliConfig,
    config_path: PathBuf,
}

impl ContextManager {
    /// Load (or create) the configuration at the default location
    pub async fn new() -> Result<Self> {
        let path = file::get_config_file_path()?;
        Self::with_config_path(path).await
    }

    /// Load (or create) the configuration at a specific path
    pub async fn with_config_path<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let config =
            super::load_or_create_config_from_path(config_path.as_ref()).await?;
        Ok(Self {
            config,
            config_path: config_path.as_ref().to_path_buf(),
        })
    }

    /// Loaded configuration.
    pub fn config(&self) -> &CliConfig {
        &self.config
    }

    /// Write the configuration back to its file.
    pub async fn save(&self) -> Result<()> {
        file::save_config_to_path(&self.config, &self.config_path).await
    }

    /// Set context values; fields left as `None` keep their current value
    pub async fn set_context(
        &mut self,
        name: Option<String>,
        server: Option<String>,
        namespace: Option<String>,
    ) -> Result<()> {
        let context_name =
            name.unwrap_or_else(|| self.config.current_context.clone());

        let mut context = self
            .config
            .get_context(&context_name)
            .cloned()
            .unwrap_or_default();

        if let Some(server) = server {
            context.server = Some(server);
        }
        if let Some(namespace) = namespace {
            context.namespace = Some(namespace);
        }

        self.config.set_context(context_name.clone(), context);

        // A dangling current context is replaced by the one just written
        if !self
            .config
            .contexts
            .contains_key(&self.config.current_context)
        {
            self.config.current_context = context_name;
        }

        self.save().await
    }

    /// Make an existing context current and persist it.
    pub async fn select_context(&mut self, name: String) -> Result<()> {
        self.config.set_current_context(name)?;
        self.save().await
    }

    /// The context commands connect through.
    pub fn get_current_context(&self) -> Option<&ContextConfig> {
        self.config.current_context()
    }
}
