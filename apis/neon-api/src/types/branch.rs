// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Branch-related types

use super::common::Timestamp;
use super::endpoint::{ConnectionUri, Endpoint, EndpointType, Provisioner};
use super::operation::Operation;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Path parameter for project-scoped branch operations
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ProjectPath {
    /// The Neon project ID
    pub project_id: String,
}

/// Path parameter for operations on a single branch
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct BranchPath {
    /// The Neon project ID
    pub project_id: String,
    /// The branch ID (`br-` prefix)
    pub branch_id: String,
}

/// Branch state
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum BranchState {
    Init,
    Ready,
}

/// A Neon branch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Branch {
    /// The branch ID, generated when the branch is created (e.g. `br-small-term-683261`)
    pub id: String,
    /// The ID of the project to which the branch belongs
    pub project_id: String,
    /// The `branch_id` of the parent branch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    /// The LSN on the parent branch from which this branch was created
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_lsn: Option<String>,
    /// The point in time on the parent branch from which this branch was created
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_timestamp: Option<Timestamp>,
    /// The branch name
    pub name: String,
    /// Current branch state
    pub current_state: BranchState,
    /// State the branch is transitioning to, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending_state: Option<BranchState>,
    /// The logical size of the branch, in bytes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logical_size: Option<i64>,
    /// The branch creation source (e.g. `console`)
    pub creation_source: String,
    /// Whether the branch is the project's primary branch
    pub primary: bool,
    /// CPU seconds used by all endpoints of the branch in the billing period
    pub cpu_used_sec: i64,
    /// When the branch was created
    pub created_at: Timestamp,
    /// When the branch was last updated
    pub updated_at: Timestamp,
}

/// Branch options for a create request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BranchCreateRequestBranch {
    /// The `branch_id` of the parent branch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    /// The branch name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// An LSN on the parent branch to take the branch data from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_lsn: Option<String>,
    /// A point in time on the parent branch to take the branch data from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_timestamp: Option<Timestamp>,
}

/// Compute endpoint to create together with the branch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BranchCreateRequestEndpointOptions {
    /// The compute endpoint type
    #[serde(rename = "type")]
    pub endpoint_type: EndpointType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autoscaling_limit_min_cu: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autoscaling_limit_max_cu: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provisioner: Option<Provisioner>,
    /// Inactivity in seconds before suspension; `0` is the default, `-1` never suspends
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suspend_timeout_seconds: Option<i64>,
}

/// Request body for creating a branch
///
/// Every field is optional: an empty body creates a branch from the
/// project's root branch with no endpoint and a generated name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BranchCreateRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoints: Option<Vec<BranchCreateRequestEndpointOptions>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<BranchCreateRequestBranch>,
}

/// Branch fields that may be changed by an update
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BranchUpdateRequestBranch {
    /// New branch name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Request body for updating a branch. Only renaming is supported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BranchUpdateRequest {
    pub branch: BranchUpdateRequestBranch,
}

/// Response to a successful branch creation (HTTP 201)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CreatedBranch {
    pub branch: Branch,
    pub endpoints: Vec<Endpoint>,
    pub operations: Vec<Operation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_uris: Option<Vec<ConnectionUri>>,
}

/// List of branches in a project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BranchesResponse {
    pub branches: Vec<Branch>,
}

/// A single branch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BranchResponse {
    pub branch: Branch,
}

/// A branch together with the operations a mutation started
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BranchOperations {
    pub branch: Branch,
    pub operations: Vec<Operation>,
}
