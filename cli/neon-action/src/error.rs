// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Error types for neon-action
//!
//! Every error here is fatal to the invocation. [`InvocationError`]'s
//! `Display` output is the exact message reported to the runner.

use http::StatusCode;
use json_selector::SelectorError;
use neon_client::{ClientError, RequestError};
use serde_json::Value;
use thiserror::Error;

/// Action inputs that are missing or malformed
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Input required and not supplied: {0}")]
    MissingInput(&'static str),

    #[error("Input {input} is not valid JSON: {source}")]
    InvalidJson {
        input: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Input timeout must be a positive number of seconds, got {0:?}")]
    InvalidTimeout(String),

    #[error("Input api_host is not a valid URL: {0}")]
    InvalidApiHost(String),
}

/// A response that did not meet the operation's success criteria
///
/// Displays as `code:message`, mirroring the Neon error payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code}:{message}")]
pub struct ApiError {
    pub status: StatusCode,
    pub code: String,
    pub message: String,
}

impl ApiError {
    /// Build from an unsuccessful response
    ///
    /// `code` and `message` come from the payload when present. A missing
    /// code falls back to the numeric status; a missing message to the raw
    /// text body, then to the status reason.
    pub fn from_response(status: StatusCode, data: &Value) -> Self {
        let code = data
            .get(neon_api::ERROR_DISCRIMINATOR)
            .and_then(scalar_text)
            .unwrap_or_else(|| status.as_u16().to_string());
        let message = data
            .get("message")
            .and_then(scalar_text)
            .or_else(|| data.as_str().filter(|s| !s.trim().is_empty()).map(str::to_string))
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("unexpected response").to_string());
        Self {
            status,
            code,
            message,
        }
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

/// Why an invocation failed
#[derive(Debug, Error)]
pub enum InvocationError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Unknown method: {0}")]
    UnknownOperation(String),

    #[error("Invalid selector: {0}")]
    InvalidSelector(#[source] SelectorError),

    #[error(transparent)]
    InvalidRequest(RequestError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Selector {0} matched nothing in the response")]
    EmptySelection(String),

    #[error("Failed to evaluate selector: {0}")]
    Selection(#[source] SelectorError),

    #[error(transparent)]
    Client(ClientError),
}

impl InvocationError {
    /// True for errors detected before any request was sent
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            InvocationError::Config(_)
                | InvocationError::UnknownOperation(_)
                | InvocationError::InvalidSelector(_)
                | InvocationError::InvalidRequest(_)
        )
    }
}

impl From<ClientError> for InvocationError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::InvalidRequest(RequestError::UnknownOperation(name)) => {
                InvocationError::UnknownOperation(name)
            }
            ClientError::InvalidRequest(req) => InvocationError::InvalidRequest(req),
            other => InvocationError::Client(other),
        }
    }
}
