//! Wire types for the information-barrier management API.
//!
//! Fields follow the API's camelCase JSON. List endpoints wrap results in a
//! paginated envelope with an `items` array.

use serde::{Deserialize, Serialize};

/// A named grouping of users/resources in the information-barrier feature.
///
/// Segment names may carry a `-` delimited prefix (`hr-payroll`, `hr-legal`)
/// that groups them for block-list purposes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub name: String,
}

/// Barrier policy state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyState {
    Active,
    Inactive,
}

/// A barrier policy blocking its assigned segment from a set of others.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BarrierPolicy {
    pub id: String,
    pub name: String,
    pub assigned_segment: String,
    #[serde(default)]
    pub blocked_segments: Vec<String>,
    pub state: PolicyState,
}

/// Paginated list envelope used by the management API.
#[derive(Debug, Deserialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
}

/// Request body for `POST /barrier-policies`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePolicyRequest {
    pub name: String,
    pub assigned_segment: String,
    pub blocked_segments: Vec<String>,
    pub state: PolicyState,
    /// Apply without tenant-side confirmation.
    pub force: bool,
}

/// Request body for `PATCH /barrier-policies/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePolicyRequest {
    pub blocked_segments: Vec<String>,
    pub state: PolicyState,
    pub force: bool,
}

/// Management session handle returned by `POST /sessions`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
}

/// Bulk-application job handle returned by `POST /barrier-policies/apply`.
///
/// The job runs tenant-side and may take hours; barrierctl only records
/// whether the trigger itself was accepted.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationJob {
    pub id: String,
    pub status: String,
}
