use super::connect;
use crate::generate::service_command;
use crate::types::{ConnectionArgs, ServiceOperation};
use anyhow::Result;

/// Handle `krun service`
pub async fn handle_service_command(
    opt: &ServiceOperation,
    conn: &ConnectionArgs,
) -> Result<()> {
    let (factory, resolved) = connect(conn).await?;
    let mut stdout = std::io::stdout();
    service_command(&factory, opt, &resolved.namespace, &mut stdout).await?;
    Ok(())
}
