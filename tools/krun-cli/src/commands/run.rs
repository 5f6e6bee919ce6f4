use super::connect;
use crate::generate::run_command;
use crate::types::{ConnectionArgs, RunOperation};
use anyhow::Result;

/// Handle `krun run`
pub async fn handle_run_command(
    opt: &RunOperation,
    conn: &ConnectionArgs,
) -> Result<()> {
    let (factory, resolved) = connect(conn).await?;
    let mut stdout = std::io::stdout();
    run_command(&factory, opt, &resolved.namespace, &mut stdout).await?;
    Ok(())
}
