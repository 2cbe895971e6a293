// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Common types shared across the Neon API

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// RFC 3339 timestamp as used throughout the Neon API
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Name of the field whose presence marks a response body as an error payload
pub const ERROR_DISCRIMINATOR: &str = "code";

/// General error payload returned by Neon for every non-success response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct GeneralError {
    /// Machine-readable error code
    pub code: String,
    /// Error message
    pub message: String,
}

impl GeneralError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for GeneralError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.code, self.message)
    }
}

impl std::error::Error for GeneralError {}
