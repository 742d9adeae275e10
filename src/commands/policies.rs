//! Barrier-policy inspection commands.

use clap::Subcommand;

use crate::client::BarrierClient;
use crate::error::Error;
use crate::output::OutputFormat;

#[derive(Debug, Subcommand)]
pub enum PolicyCommands {
    /// List all barrier policies in the tenant
    List,
    /// Get one barrier policy by id
    Get { id: String },
}

pub async fn handle(
    action: PolicyCommands,
    client: &BarrierClient,
    format: OutputFormat,
) -> Result<(), Error> {
    match action {
        PolicyCommands::List => {
            let policies = client.barrier_policies().await?;
            format.print(&policies);
        }
        PolicyCommands::Get { id } => {
            let policy = client.barrier_policy(&id).await?;
            format.print(&policy);
        }
    }
    Ok(())
}
