//! Segment inspection commands.

use clap::Subcommand;

use crate::client::BarrierClient;
use crate::error::Error;
use crate::output::OutputFormat;

#[derive(Debug, Subcommand)]
pub enum SegmentCommands {
    /// List all segments in the tenant
    List,
}

pub async fn handle(
    action: SegmentCommands,
    client: &BarrierClient,
    format: OutputFormat,
) -> Result<(), Error> {
    match action {
        SegmentCommands::List => {
            let segments = client.segments().await?;
            format.print(&segments);
        }
    }
    Ok(())
}
