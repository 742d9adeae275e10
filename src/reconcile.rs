//! Per-segment policy reconciliation and the bulk apply trigger.
//!
//! Each filtered segment gets exactly one reconciliation attempt: update the
//! policy already assigned to it, or create one if none exists. A failed
//! attempt is captured as an [`Outcome`] and the sweep moves on to the next
//! segment; nothing is rolled back.

use chrono::{DateTime, Local};

use crate::client::BarrierClient;
use crate::error::Error;
use crate::filter;
use crate::model::{BarrierPolicy, CreatePolicyRequest, PolicyState, Segment, UpdatePolicyRequest};

/// Step labels recorded in the run log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    UpdateExisting,
    CreateNew,
    Apply,
}

impl Step {
    pub fn label(&self) -> &'static str {
        match self {
            Step::UpdateExisting => "Updating Existing Policy",
            Step::CreateNew => "Creating New Policy",
            Step::Apply => "Applying Policy",
        }
    }
}

/// One reconciliation attempt, success or failure, stamped when the attempt
/// finished.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub policy: String,
    pub step: Step,
    pub error: Option<String>,
    pub time: DateTime<Local>,
}

impl Outcome {
    fn ok(policy: impl Into<String>, step: Step) -> Self {
        Self {
            policy: policy.into(),
            step,
            error: None,
            time: Local::now(),
        }
    }

    fn failed(policy: impl Into<String>, step: Step, error: impl ToString) -> Self {
        Self {
            policy: policy.into(),
            step,
            error: Some(error.to_string()),
            time: Local::now(),
        }
    }

    pub fn is_err(&self) -> bool {
        self.error.is_some()
    }
}

/// Display name given to a segment's block policy.
pub fn policy_name(segment: &str) -> String {
    format!("Block {} to non-corporate segments", segment)
}

/// Reconcile one policy per filtered segment, in order.
///
/// Returns one outcome per segment; the sweep always visits every segment
/// regardless of individual failures.
pub async fn reconcile(
    client: &BarrierClient,
    filtered: &[Segment],
    existing: &[BarrierPolicy],
) -> Vec<Outcome> {
    let mut outcomes = Vec::with_capacity(filtered.len());
    for segment in filtered {
        let outcome = reconcile_segment(client, segment, filtered, existing).await;
        outcomes.push(outcome);
    }
    outcomes
}

async fn reconcile_segment(
    client: &BarrierClient,
    segment: &Segment,
    filtered: &[Segment],
    existing: &[BarrierPolicy],
) -> Outcome {
    let current = existing
        .iter()
        .find(|p| p.assigned_segment.eq_ignore_ascii_case(&segment.name));

    match current {
        Some(policy) => {
            tracing::debug!(segment = %segment.name, policy = %policy.id, "updating existing policy");
            match update_policy(client, segment, filtered, policy).await {
                Ok(()) => Outcome::ok(&policy.name, Step::UpdateExisting),
                Err(e) => Outcome::failed(&policy.name, Step::UpdateExisting, e),
            }
        }
        None => {
            let name = policy_name(&segment.name);
            tracing::debug!(segment = %segment.name, "creating new policy");
            match create_policy(client, segment, filtered).await {
                Ok(()) => Outcome::ok(&name, Step::CreateNew),
                Err(e) => Outcome::failed(&name, Step::CreateNew, e),
            }
        }
    }
}

async fn create_policy(
    client: &BarrierClient,
    segment: &Segment,
    filtered: &[Segment],
) -> Result<(), Error> {
    let blocked = filter::block_list(segment, filtered)?;
    client
        .create_policy(&CreatePolicyRequest {
            name: policy_name(&segment.name),
            assigned_segment: segment.name.clone(),
            blocked_segments: blocked,
            state: PolicyState::Active,
            force: true,
        })
        .await?;
    Ok(())
}

async fn update_policy(
    client: &BarrierClient,
    segment: &Segment,
    filtered: &[Segment],
    policy: &BarrierPolicy,
) -> Result<(), Error> {
    let blocked = filter::block_list(segment, filtered)?;
    client
        .update_policy(
            &policy.id,
            &UpdatePolicyRequest {
                blocked_segments: blocked,
                state: PolicyState::Active,
                force: true,
            },
        )
        .await?;
    Ok(())
}

/// Trigger tenant-side application of all pending policy changes.
///
/// Fire and forget: the job may take hours to materialize; only the trigger
/// call's own success or failure is reported.
pub async fn trigger_apply(client: &BarrierClient) -> Outcome {
    match client.start_application().await {
        Ok(job) => {
            tracing::info!(job = %job.id, status = %job.status, "bulk policy application started");
            Outcome::ok("All policies", Step::Apply)
        }
        Err(e) => Outcome::failed("All policies", Step::Apply, e),
    }
}
