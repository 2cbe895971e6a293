// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Neon API Trait Definition
//!
//! **IMPORTANT**: This trait defines a *subset* of the Neon REST API v2.
//! It only covers the branch endpoints of a project, which is what the
//! branch action and its tests depend on.
//!
//! The actual API is served by Neon (`https://console.neon.tech/api/v2`).
//! This trait exists to:
//! 1. Document the exact Neon API surface we depend on
//! 2. Give the request/response types a single home for the client crate
//! 3. Enable the stub server used in integration tests
//!
//! Reference: https://api-docs.neon.tech/reference/getting-started-with-neon-api

use dropshot::{
    HttpError, HttpResponseCreated, HttpResponseOk, Path, RequestContext, TypedBody,
};

pub mod types;
pub use types::*;

/// Production base URL of the Neon API v2
pub const DEFAULT_BASE_URL: &str = "https://console.neon.tech/api/v2";

/// Neon REST API v2 (branch subset)
///
/// Every non-success response from Neon carries a [`GeneralError`] body.
#[dropshot::api_description]
pub trait NeonApi {
    /// Context type for request handlers
    type Context: Send + Sync + 'static;

    /// Create a branch
    ///
    /// Creates a branch in the specified project. The request body is
    /// optional; by default the branch is created from the project's root
    /// branch with no endpoint and a generated name.
    ///
    /// **Neon API Reference**: POST /projects/{project_id}/branches
    #[endpoint {
        method = POST,
        path = "/projects/{project_id}/branches",
        tags = ["branch"],
    }]
    async fn create_project_branch(
        rqctx: RequestContext<Self::Context>,
        path: Path<ProjectPath>,
        body: TypedBody<BranchCreateRequest>,
    ) -> Result<HttpResponseCreated<CreatedBranch>, HttpError>;

    /// Get a list of branches
    ///
    /// **Neon API Reference**: GET /projects/{project_id}/branches
    #[endpoint {
        method = GET,
        path = "/projects/{project_id}/branches",
        tags = ["branch"],
    }]
    async fn list_project_branches(
        rqctx: RequestContext<Self::Context>,
        path: Path<ProjectPath>,
    ) -> Result<HttpResponseOk<BranchesResponse>, HttpError>;

    /// Get branch details
    ///
    /// **Neon API Reference**: GET /projects/{project_id}/branches/{branch_id}
    #[endpoint {
        method = GET,
        path = "/projects/{project_id}/branches/{branch_id}",
        tags = ["branch"],
    }]
    async fn get_project_branch(
        rqctx: RequestContext<Self::Context>,
        path: Path<BranchPath>,
    ) -> Result<HttpResponseOk<BranchResponse>, HttpError>;

    /// Update a branch
    ///
    /// Only changing the branch name is supported.
    ///
    /// **Neon API Reference**: PATCH /projects/{project_id}/branches/{branch_id}
    #[endpoint {
        method = PATCH,
        path = "/projects/{project_id}/branches/{branch_id}",
        tags = ["branch"],
    }]
    async fn update_project_branch(
        rqctx: RequestContext<Self::Context>,
        path: Path<BranchPath>,
        body: TypedBody<BranchUpdateRequest>,
    ) -> Result<HttpResponseOk<BranchOperations>, HttpError>;

    /// Delete a branch
    ///
    /// The deletion completes once the returned operations finish. The last
    /// remaining branch of a project cannot be deleted.
    ///
    /// **Neon API Reference**: DELETE /projects/{project_id}/branches/{branch_id}
    #[endpoint {
        method = DELETE,
        path = "/projects/{project_id}/branches/{branch_id}",
        tags = ["branch"],
    }]
    async fn delete_project_branch(
        rqctx: RequestContext<Self::Context>,
        path: Path<BranchPath>,
    ) -> Result<HttpResponseOk<BranchOperations>, HttpError>;
}
