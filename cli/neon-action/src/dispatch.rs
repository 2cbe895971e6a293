// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Operation dispatch
//!
//! An invocation goes PENDING -> SUCCEEDED or PENDING -> FAILED, once:
//!
//! 1. resolve the operation name and check the selector (no network yet)
//! 2. issue exactly one request through the [`ApiClient`]
//! 3. accept the response only if its status is the operation's documented
//!    success status and the body has no `code` field
//! 4. project the body through the selector

use json_selector::{JsonPathQuery, PathQuery};
use neon_client::{ApiClient, ApiResponse, Operation};
use serde_json::Value;

use crate::{ApiError, InvocationError, InvocationRequest};

/// Result of a successful invocation
#[derive(Debug, Clone, PartialEq)]
pub struct InvocationOutcome {
    /// The full decoded response body
    pub data: Value,
    /// First value matched by the selector
    pub selection: Value,
    /// Every value matched by the selector, in document order
    pub selections: Vec<Value>,
}

/// Runs invocations against an [`ApiClient`], selecting with a [`PathQuery`]
pub struct Dispatcher<C, Q = JsonPathQuery> {
    client: C,
    query: Q,
}

impl<C: ApiClient> Dispatcher<C> {
    /// Dispatcher using the default JSONPath engine
    pub fn new(client: C) -> Self {
        Self::with_query(client, JsonPathQuery)
    }
}

impl<C: ApiClient, Q: PathQuery> Dispatcher<C, Q> {
    pub fn with_query(client: C, query: Q) -> Self {
        Self { client, query }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub async fn execute(
        &self,
        request: &InvocationRequest,
    ) -> Result<InvocationOutcome, InvocationError> {
        let operation = Operation::resolve(&request.method)
            .map_err(|_| InvocationError::UnknownOperation(request.method.clone()))?;
        self.query
            .validate(&request.selector)
            .map_err(InvocationError::InvalidSelector)?;

        tracing::info!(%operation, selector = %request.selector, "invocation pending");

        let result = self.invoke(operation, request).await;
        match &result {
            Ok(outcome) => tracing::info!(
                %operation,
                matches = outcome.selections.len(),
                "invocation succeeded"
            ),
            Err(err) => tracing::warn!(%operation, error = %err, "invocation failed"),
        }
        result
    }

    async fn invoke(
        &self,
        operation: Operation,
        request: &InvocationRequest,
    ) -> Result<InvocationOutcome, InvocationError> {
        let response = self
            .client
            .call(operation, &request.body, &request.metadata)
            .await?;
        tracing::debug!(%operation, status = response.status.as_u16(), "response received");

        let data = classify(operation, response)?;

        let selections = self
            .query
            .query(&data, &request.selector)
            .map_err(InvocationError::Selection)?;
        let selection = selections
            .first()
            .cloned()
            .ok_or_else(|| InvocationError::EmptySelection(request.selector.clone()))?;

        Ok(InvocationOutcome {
            data,
            selection,
            selections,
        })
    }
}

/// Whether `response` counts as a success for `operation`
pub fn is_success(operation: Operation, response: &ApiResponse) -> bool {
    response.status == operation.success_status() && !has_error_discriminator(&response.data)
}

/// The response body on success, the reported failure otherwise
pub fn classify(operation: Operation, response: ApiResponse) -> Result<Value, ApiError> {
    if is_success(operation, &response) {
        Ok(response.data)
    } else {
        Err(ApiError::from_response(response.status, &response.data))
    }
}

fn has_error_discriminator(data: &Value) -> bool {
    data.as_object()
        .is_some_and(|m| m.contains_key(neon_api::ERROR_DISCRIMINATOR))
}
