// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Neon API step for CI pipelines
//!
//! Calls one Neon API operation (by default `createProjectBranch`), checks
//! that it succeeded, and publishes three step outputs:
//!
//! - `data`: the full response body
//! - `selection`: the first value matched by the `selector` input
//! - `selections`: every value matched, as a JSON array
//!
//! A response counts as a success only when its status is the one Neon
//! documents for the operation *and* its body carries no `code` field.
//! Anything else fails the step with `code:message`.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod outputs;

pub use config::{ActionConfig, ActionInputs, InvocationRequest};
pub use dispatch::{Dispatcher, InvocationOutcome, classify, is_success};
pub use error::{ApiError, ConfigError, InvocationError};
pub use outputs::WorkflowCommands;

/// Log filter used when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "neon_action=info,neon_client=info";
