// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Project operation types
//!
//! An operation is an asynchronous action Neon performs on a project
//! resource. Mutating branch calls return the operations they started.

use super::common::Timestamp;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// The action performed by an operation
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OperationAction {
    CreateCompute,
    CreateTimeline,
    StartCompute,
    SuspendCompute,
    ApplyConfig,
    CheckAvailability,
    DeleteTimeline,
    CreateBranch,
    TenantMigrate,
    TenantDetach,
    TenantReattach,
    ReplaceSafekeeper,
}

/// The status of an operation
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OperationStatus {
    Running,
    Finished,
    Failed,
    Scheduling,
}

/// An operation on a project resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Operation {
    /// The operation ID
    pub id: String,
    pub project_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint_id: Option<String>,
    pub action: OperationAction,
    pub status: OperationStatus,
    /// The error that occurred, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// The number of times the operation failed
    pub failures_count: i32,
    /// When the operation was last retried
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
