//! The reconciliation sweep: fetch inventory, filter, reconcile every
//! segment's block policy, trigger the bulk application, log every outcome.

use std::path::PathBuf;

use clap::{ArgAction, Args};

use crate::client::BarrierClient;
use crate::error::Error;
use crate::filter::ExclusionFilter;
use crate::logfile::RunLog;
use crate::reconcile;

/// Default pattern for segments kept out of the barrier mesh entirely.
pub const DEFAULT_EXCLUDE: &str = "corporate*|corporate-sales";

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Exclusion pattern matched (case-insensitively) against segment names;
    /// matching segments get no policy and appear in no block list
    #[arg(long, default_value = DEFAULT_EXCLUDE)]
    pub exclude: String,

    /// Open a management session before any policy work
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub connect: bool,

    /// Close the management session at the end of the run
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub disconnect: bool,

    /// Directory for the CSV run log (defaults to the system temp directory)
    #[arg(long)]
    pub log_dir: Option<PathBuf>,
}

/// What a sweep did, for exit-code and summary reporting.
#[derive(Debug)]
pub struct RunSummary {
    pub attempted: usize,
    pub failures: usize,
    pub log_path: PathBuf,
}

pub async fn handle(args: RunArgs, client: &mut BarrierClient) -> Result<RunSummary, Error> {
    let exclusion = ExclusionFilter::new(&args.exclude)?;
    let log_dir = args.log_dir.unwrap_or_else(std::env::temp_dir);
    let log = RunLog::open(&log_dir)?;

    if args.connect {
        client.open_session().await?;
    }

    // Inventory is fetched once and read-only for the rest of the run;
    // concurrent tenant-side changes are not detected.
    let segments = client.segments().await?;
    let policies = client.barrier_policies().await?;
    tracing::info!(
        segments = segments.len(),
        policies = policies.len(),
        "fetched tenant inventory"
    );

    let filtered = exclusion.filter(segments);
    tracing::info!(candidates = filtered.len(), "segments after exclusion");

    let mut outcomes = reconcile::reconcile(client, &filtered, &policies).await;
    outcomes.push(reconcile::trigger_apply(client).await);

    for outcome in &outcomes {
        log.append(outcome)?;
        if let Some(error) = &outcome.error {
            tracing::warn!(
                policy = %outcome.policy,
                step = outcome.step.label(),
                %error,
                "operation failed"
            );
        }
    }

    if args.disconnect {
        if let Err(e) = client.close_session().await {
            tracing::warn!(error = %e, "failed to close management session");
        }
    }

    let failures = outcomes.iter().filter(|o| o.is_err()).count();
    Ok(RunSummary {
        attempted: outcomes.len(),
        failures,
        log_path: log.path().to_path_buf(),
    })
}
