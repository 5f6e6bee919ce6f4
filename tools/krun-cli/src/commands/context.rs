use crate::config::ContextManager;
use crate::types::ContextOperation;
use anyhow::Result;
use std::io::Write;

/// Handle `krun context`
pub async fn handle_context_command(operation: &ContextOperation) -> Result<()> {
    let mut manager = ContextManager::new().await?;
    let mut stdout = std::io::stdout();
    handle_context_command_with_manager(operation, &mut manager, &mut stdout).await
}

/// Same as [`handle_context_command`] against a given manager and sink
pub async fn handle_context_command_with_manager(
    operation: &ContextOperation,
    manager: &mut ContextManager,
    out: &mut dyn Write,
) -> Result<()> {
    match operation {
        ContextOperation::Set {
            name,
            server,
            namespace,
        } => {
            manager
                .set_context(name.clone(), server.clone(), namespace.clone())
                .await?;
            let context_name = name
                .clone()
                .unwrap_or_else(|| manager.config().current_context.clone());
            writeln!(out, "ctx:'{}' updated successfully", context_name)?;

            if let Some(context) = manager.config().get_context(&context_name) {
                writeln!(out, "Configuration:")?;
                if let Some(server) = &context.server {
                    writeln!(out, "  server: '{}'", server)?;
                }
                writeln!(out, "  namespace: '{}'", context.namespace_or_default())?;
            }
            Ok(())
        }
        ContextOperation::Get => {
            let yaml = serde_yaml::to_string(manager.config())?;
            write!(out, "{}", yaml)?;
            Ok(())
        }
        ContextOperation::Select { name } => {
            manager.select_context(name.clone()).await?;
            writeln!(out, "Switched to context '{}'", name)?;
            Ok(())
        }
    }
}
