mod context;
mod run;
mod service;

pub use context::*;
pub use run::*;
pub use service::*;

use crate::client::HttpClient;
use crate::generate::Factory;
use crate::types::{ConnectionArgs, ResolvedConnection};
use anyhow::Result;

/// Resolve the connection and build the collaborators for one invocation.
async fn connect(conn: &ConnectionArgs) -> Result<(Factory, ResolvedConnection)> {
    let resolved = conn.with_context().await?;
    let client = HttpClient::with_base_url(&resolved.server, resolved.timeout)?;
    Ok((Factory::new(client), resolved))
}
