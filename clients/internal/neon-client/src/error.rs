// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Error types for neon-client

use thiserror::Error;

use crate::Operation;

/// A request that was rejected before anything was sent
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("Unknown method: {0}")]
    UnknownOperation(String),

    #[error("{part} does not match the parameters of {operation}: {source}")]
    InvalidParameters {
        operation: Operation,
        part: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("request body for {operation} must be a JSON object")]
    BodyNotObject { operation: Operation },

    #[error("{operation} does not accept a request body")]
    BodyNotAccepted { operation: Operation },
}

/// Errors returned by [`crate::ApiClient`] implementations
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    InvalidRequest(#[from] RequestError),

    #[error("API key is not a valid header value")]
    InvalidApiKey,

    #[error("invalid API base URL {url}: {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to create HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to read response from {url}: {source}")]
    ResponseRead {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}
