// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Action inputs
//!
//! The runner passes each `with:` input as an `INPUT_<NAME>` environment
//! variable. [`ActionInputs`] reads those (or the equivalent flags) and
//! [`ActionInputs::into_config`] validates them into an [`ActionConfig`].
//! Nothing past this module looks at the environment.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use secrecy::SecretString;
use serde_json::Value;

use crate::ConfigError;

pub const DEFAULT_BODY: &str = "{}";
pub const DEFAULT_METADATA: &str = "{}";
pub const DEFAULT_SELECTOR: &str = json_selector::ROOT;
pub const DEFAULT_API_HOST: &str = neon_api::DEFAULT_BASE_URL;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Raw inputs, as supplied by the runner
#[derive(Parser, Debug, Default)]
#[command(
    name = "neon-action",
    version,
    about = "Run one Neon API operation and publish the result as step outputs",
    long_about = None
)]
pub struct ActionInputs {
    /// Operation to call, e.g. createProjectBranch
    #[arg(long, env = "INPUT_METHOD")]
    pub method: Option<String>,

    /// Neon API key
    #[arg(long, env = "INPUT_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// JSON request body
    #[arg(long, env = "INPUT_BODY")]
    pub body: Option<String>,

    /// JSON path parameters, e.g. {"project_id": "..."}
    #[arg(long, env = "INPUT_METADATA")]
    pub metadata: Option<String>,

    /// JSONPath applied to the response body
    #[arg(long, env = "INPUT_SELECTOR")]
    pub selector: Option<String>,

    /// Neon API base URL
    #[arg(long, env = "INPUT_API_HOST")]
    pub api_host: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "INPUT_TIMEOUT")]
    pub timeout: Option<String>,

    /// File step outputs are appended to
    #[arg(long, env = "GITHUB_OUTPUT")]
    pub output_file: Option<PathBuf>,
}

/// What to invoke, independent of how to reach the API
#[derive(Debug, Clone, PartialEq)]
pub struct InvocationRequest {
    /// Operation name, resolved by the dispatcher
    pub method: String,
    pub body: Value,
    pub metadata: Value,
    pub selector: String,
}

/// Validated configuration for one invocation
#[derive(Debug)]
pub struct ActionConfig {
    pub api_key: SecretString,
    pub api_host: String,
    pub timeout: Duration,
    pub output_file: Option<PathBuf>,
    pub request: InvocationRequest,
}

impl ActionInputs {
    pub fn into_config(self) -> Result<ActionConfig, ConfigError> {
        let method = required(self.method, "method")?;
        let api_key = required(self.api_key, "api_key")?;

        let body = json_input(self.body, DEFAULT_BODY, "body")?;
        let metadata = json_input(self.metadata, DEFAULT_METADATA, "metadata")?;
        let selector = optional(self.selector).unwrap_or_else(|| DEFAULT_SELECTOR.to_string());

        let api_host = optional(self.api_host).unwrap_or_else(|| DEFAULT_API_HOST.to_string());
        url::Url::parse(&api_host).map_err(|e| ConfigError::InvalidApiHost(e.to_string()))?;

        let timeout = match optional(self.timeout) {
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => return Err(ConfigError::InvalidTimeout(raw)),
            },
        };

        Ok(ActionConfig {
            api_key: SecretString::from(api_key),
            api_host,
            timeout,
            output_file: self.output_file.filter(|p| !p.as_os_str().is_empty()),
            request: InvocationRequest {
                method,
                body,
                metadata,
                selector,
            },
        })
    }
}

/// Trimmed value, with empty treated as unset
fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn required(value: Option<String>, name: &'static str) -> Result<String, ConfigError> {
    optional(value).ok_or(ConfigError::MissingInput(name))
}

fn json_input(value: Option<String>, default: &str, name: &'static str) -> Result<Value, ConfigError> {
    let raw = optional(value).unwrap_or_else(|| default.to_string());
    serde_json::from_str(&raw).map_err(|source| ConfigError::InvalidJson {
        input: name,
        source,
    })
}
