// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Compute endpoint types

use super::common::Timestamp;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::{Display, EnumString};

/// Compute endpoint type
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EndpointType {
    ReadOnly,
    ReadWrite,
}

/// Compute endpoint state
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EndpointState {
    Init,
    Active,
    Idle,
}

/// The Neon compute provisioner
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Display, EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Provisioner {
    #[serde(rename = "k8s-pod")]
    #[strum(serialize = "k8s-pod")]
    K8sPod,
    #[serde(rename = "k8s-neonvm")]
    #[strum(serialize = "k8s-neonvm")]
    K8sNeonvm,
    Docker,
}

/// Connection pooler mode. Neon supports PgBouncer in transaction mode only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PoolerMode {
    Transaction,
}

/// Settings for a compute endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EndpointSettings {
    /// A raw representation of PostgreSQL settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pg_settings: Option<BTreeMap<String, String>>,
}

/// A compute endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Endpoint {
    /// Hostname used when connecting to a Neon database
    pub host: String,
    /// The compute endpoint ID (`ep-` prefix)
    pub id: String,
    pub project_id: String,
    pub branch_id: String,
    pub autoscaling_limit_min_cu: f64,
    pub autoscaling_limit_max_cu: f64,
    /// The region identifier (e.g. `aws-us-east-2`)
    pub region_id: String,
    #[serde(rename = "type")]
    pub endpoint_type: EndpointType,
    pub current_state: EndpointState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending_state: Option<EndpointState>,
    pub settings: EndpointSettings,
    pub pooler_enabled: bool,
    pub pooler_mode: PoolerMode,
    /// Whether connections to the endpoint are restricted
    pub disabled: bool,
    pub passwordless_access: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_active: Option<Timestamp>,
    pub creation_source: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    /// Deprecated upstream in favour of `host`
    pub proxy_host: String,
    pub suspend_timeout_seconds: i64,
    pub provisioner: Provisioner,
}

/// A ready-to-use libpq connection URI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ConnectionUri {
    pub connection_uri: String,
}
