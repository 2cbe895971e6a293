// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! HTTP client for the Neon API

use std::time::Duration;

use async_trait::async_trait;
use http::StatusCode;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use url::Url;

use crate::{ClientError, Operation};

/// Request timeout used when the caller does not pick one
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT: &str = concat!("neon-client/", env!("CARGO_PKG_VERSION"));

/// Raw result of one API call
///
/// `data` is whatever the server sent: a success payload or a
/// [`neon_api::GeneralError`] body. Interpreting it is up to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub data: Value,
}

/// Executes a single named operation against the Neon API
#[async_trait]
pub trait ApiClient: Send + Sync {
    async fn call(
        &self,
        operation: Operation,
        body: &Value,
        metadata: &Value,
    ) -> Result<ApiResponse, ClientError>;
}

/// [`ApiClient`] backed by reqwest, bound to one API key
#[derive(Debug, Clone)]
pub struct NeonClient {
    http: reqwest::Client,
    base_url: Url,
}

impl NeonClient {
    /// Create a client for `base_url` authenticating with `api_key`
    pub fn new(base_url: &str, api_key: &SecretString, timeout: Duration) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url).map_err(|source| ClientError::InvalidBaseUrl {
            url: base_url.to_string(),
            source,
        })?;

        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", api_key.expose_secret()))
            .map_err(|_| ClientError::InvalidApiKey)?;
        bearer.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        install_crypto_provider();
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()
            .map_err(ClientError::Build)?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path)
    }
}

#[async_trait]
impl ApiClient for NeonClient {
    async fn call(
        &self,
        operation: Operation,
        body: &Value,
        metadata: &Value,
    ) -> Result<ApiResponse, ClientError> {
        let prepared = operation.prepare(body, metadata)?;
        let url = self.endpoint(&prepared.path);

        tracing::debug!(%operation, method = %prepared.method, %url, "sending request");

        let mut request = self.http.request(prepared.method, &url);
        if let Some(body) = &prepared.body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|source| ClientError::Request {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|source| ClientError::ResponseRead {
                url: url.clone(),
                source,
            })?;

        tracing::debug!(%operation, status = status.as_u16(), bytes = text.len(), "received response");

        Ok(ApiResponse {
            status,
            data: decode_body(&text),
        })
    }
}

/// Empty bodies decode as `null`, non-JSON bodies as a JSON string
fn decode_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

/// reqwest is built without a default rustls provider; select ring once per process.
fn install_crypto_provider() {
    if rustls::crypto::CryptoProvider::get_default().is_none() {
        // Err means another thread installed one first.
        let _ = rustls::crypto::ring::default_provider().install_default();
    }
}
