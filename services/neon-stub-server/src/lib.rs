// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Stub Neon server for testing
//!
//! This crate provides a Dropshot-based HTTP server that implements the
//! [`neon_api::NeonApi`] trait over an in-memory branch store. It can be
//! used for:
//!
//! - End-to-end tests of `neon-action` without a Neon account
//! - Local development and demos
//!
//! Projects must be seeded up front with [`StubContext::with_project`]; each
//! seeded project starts with a single primary branch named `main`.

use chrono::Utc;
use dropshot::{HttpError, HttpResponseCreated, HttpResponseOk, Path, RequestContext, TypedBody};
use neon_api::{
    Branch, BranchCreateRequest, BranchCreateRequestEndpointOptions, BranchOperations, BranchPath,
    BranchResponse, BranchState, BranchUpdateRequest, BranchesResponse, ConnectionUri,
    CreatedBranch, Endpoint, EndpointSettings, EndpointState, EndpointType, Operation,
    OperationAction, OperationStatus, PoolerMode, ProjectPath, Provisioner, Timestamp,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

/// Region reported for every endpoint the stub creates
pub const STUB_REGION: &str = "aws-us-east-2";

/// Name of the primary branch of a seeded project
pub const PRIMARY_BRANCH_NAME: &str = "main";

const DEFAULT_COMPUTE_UNITS: f64 = 0.25;
const CREATION_SOURCE: &str = "console";

// ============================================================================
// Server Context
// ============================================================================

/// In-memory state of the stub server
#[derive(Debug, Default)]
pub struct StubContext {
    /// Branches indexed by project ID, in creation order
    projects: Mutex<HashMap<String, Vec<Branch>>>,
}

impl StubContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a project with its primary branch
    pub fn with_project(self, project_id: &str) -> Self {
        let now = Utc::now();
        let primary = Branch {
            id: new_id("br"),
            project_id: project_id.to_string(),
            parent_id: None,
            parent_lsn: None,
            parent_timestamp: None,
            name: PRIMARY_BRANCH_NAME.to_string(),
            current_state: BranchState::Ready,
            pending_state: None,
            logical_size: Some(0),
            creation_source: CREATION_SOURCE.to_string(),
            primary: true,
            cpu_used_sec: 0,
            created_at: now,
            updated_at: now,
        };
        if let Ok(mut projects) = self.projects.lock() {
            projects.insert(project_id.to_string(), vec![primary]);
        }
        self
    }

    /// The primary branch of `project_id`, if the project exists
    pub fn primary_branch(&self, project_id: &str) -> Option<Branch> {
        let projects = self.projects.lock().ok()?;
        projects
            .get(project_id)?
            .iter()
            .find(|b| b.primary)
            .cloned()
    }

    /// Number of branches in `project_id`
    pub fn branch_count(&self, project_id: &str) -> usize {
        self.projects
            .lock()
            .ok()
            .and_then(|p| p.get(project_id).map(Vec::len))
            .unwrap_or(0)
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, Vec<Branch>>>, HttpError> {
        self.projects
            .lock()
            .map_err(|_| HttpError::for_internal_error("branch store lock poisoned".to_string()))
    }

    pub fn create_branch(
        &self,
        project_id: &str,
        request: BranchCreateRequest,
    ) -> Result<CreatedBranch, HttpError> {
        let mut projects = self.lock()?;
        let branches = project_branches(&mut projects, project_id)?;
        let options = request.branch.unwrap_or_default();

        let parent_id = match options.parent_id {
            Some(id) => find_branch(branches, &id)?.id.clone(),
            None => branches
                .iter()
                .find(|b| b.primary)
                .map(|b| b.id.clone())
                .ok_or_else(|| {
                    HttpError::for_internal_error(format!(
                        "project {} has no primary branch",
                        project_id
                    ))
                })?,
        };

        let id = new_id("br");
        let name = options.name.unwrap_or_else(|| id.clone());
        ensure_unique_name(branches, &name)?;

        let now = Utc::now();
        let branch = Branch {
            id,
            project_id: project_id.to_string(),
            parent_id: Some(parent_id),
            parent_lsn: options.parent_lsn,
            parent_timestamp: options.parent_timestamp,
            name,
            current_state: BranchState::Init,
            pending_state: Some(BranchState::Ready),
            logical_size: None,
            creation_source: CREATION_SOURCE.to_string(),
            primary: false,
            cpu_used_sec: 0,
            created_at: now,
            updated_at: now,
        };

        let mut operations = vec![operation(
            &branch,
            None,
            OperationAction::CreateBranch,
            now,
        )];
        let endpoints: Vec<Endpoint> = request
            .endpoints
            .unwrap_or_default()
            .iter()
            .map(|opts| endpoint(&branch, opts, now))
            .collect();
        for ep in &endpoints {
            operations.push(operation(
                &branch,
                Some(ep.id.as_str()),
                OperationAction::StartCompute,
                now,
            ));
        }

        let connection_uris: Vec<ConnectionUri> = endpoints
            .iter()
            .filter(|ep| ep.endpoint_type == EndpointType::ReadWrite)
            .map(|ep| ConnectionUri {
                connection_uri: format!("postgresql://neondb_owner@{}/neondb?sslmode=require", ep.host),
            })
            .collect();

        branches.push(branch.clone());

        Ok(CreatedBranch {
            branch,
            endpoints,
            operations,
            connection_uris: (!connection_uris.is_empty()).then_some(connection_uris),
        })
    }

    pub fn list_branches(&self, project_id: &str) -> Result<Vec<Branch>, HttpError> {
        let mut projects = self.lock()?;
        Ok(project_branches(&mut projects, project_id)?.clone())
    }

    pub fn get_branch(&self, project_id: &str, branch_id: &str) -> Result<Branch, HttpError> {
        let mut projects = self.lock()?;
        let branches = project_branches(&mut projects, project_id)?;
        Ok(find_branch(branches, branch_id)?.clone())
    }

    pub fn update_branch(
        &self,
        project_id: &str,
        branch_id: &str,
        request: BranchUpdateRequest,
    ) -> Result<BranchOperations, HttpError> {
        let mut projects = self.lock()?;
        let branches = project_branches(&mut projects, project_id)?;
        find_branch(branches, branch_id)?;

        if let Some(name) = request.branch.name {
            if branches.iter().any(|b| b.name == name && b.id != branch_id) {
                return Err(name_taken(&name));
            }
            if let Some(branch) = branches.iter_mut().find(|b| b.id == branch_id) {
                branch.name = name;
                branch.updated_at = Utc::now();
            }
        }

        Ok(BranchOperations {
            branch: find_branch(branches, branch_id)?.clone(),
            operations: Vec::new(),
        })
    }

    pub fn delete_branch(
        &self,
        project_id: &str,
        branch_id: &str,
    ) -> Result<BranchOperations, HttpError> {
        let mut projects = self.lock()?;
        let branches = project_branches(&mut projects, project_id)?;
        let mut branch = find_branch(branches, branch_id)?.clone();

        if branch.primary {
            return Err(HttpError::for_bad_request(
                None,
                "cannot delete the primary branch".to_string(),
            ));
        }
        if branches
            .iter()
            .any(|b| b.parent_id.as_deref() == Some(branch_id))
        {
            return Err(HttpError::for_bad_request(
                None,
                format!("branch {} has child branches", branch_id),
            ));
        }

        branches.retain(|b| b.id != branch_id);
        let now = Utc::now();
        branch.updated_at = now;

        let operations = vec![operation(&branch, None, OperationAction::DeleteTimeline, now)];
        Ok(BranchOperations { branch, operations })
    }
}

// ============================================================================
// API Implementation
// ============================================================================

/// Marker type for the stub Neon API implementation
pub enum StubNeonApi {}

impl neon_api::NeonApi for StubNeonApi {
    type Context = Arc<StubContext>;

    async fn create_project_branch(
        rqctx: RequestContext<Self::Context>,
        path: Path<ProjectPath>,
        body: TypedBody<BranchCreateRequest>,
    ) -> Result<HttpResponseCreated<CreatedBranch>, HttpError> {
        let path = path.into_inner();
        let created = rqctx
            .context()
            .create_branch(&path.project_id, body.into_inner())?;
        tracing::info!(
            project_id = %path.project_id,
            branch_id = %created.branch.id,
            endpoints = created.endpoints.len(),
            "created branch"
        );
        Ok(HttpResponseCreated(created))
    }

    async fn list_project_branches(
        rqctx: RequestContext<Self::Context>,
        path: Path<ProjectPath>,
    ) -> Result<HttpResponseOk<BranchesResponse>, HttpError> {
        let path = path.into_inner();
        let branches = rqctx.context().list_branches(&path.project_id)?;
        Ok(HttpResponseOk(BranchesResponse { branches }))
    }

    async fn get_project_branch(
        rqctx: RequestContext<Self::Context>,
        path: Path<BranchPath>,
    ) -> Result<HttpResponseOk<BranchResponse>, HttpError> {
        let path = path.into_inner();
        let branch = rqctx
            .context()
            .get_branch(&path.project_id, &path.branch_id)?;
        Ok(HttpResponseOk(BranchResponse { branch }))
    }

    async fn update_project_branch(
        rqctx: RequestContext<Self::Context>,
        path: Path<BranchPath>,
        body: TypedBody<BranchUpdateRequest>,
    ) -> Result<HttpResponseOk<BranchOperations>, HttpError> {
        let path = path.into_inner();
        let updated =
            rqctx
                .context()
                .update_branch(&path.project_id, &path.branch_id, body.into_inner())?;
        tracing::info!(branch_id = %path.branch_id, name = %updated.branch.name, "updated branch");
        Ok(HttpResponseOk(updated))
    }

    async fn delete_project_branch(
        rqctx: RequestContext<Self::Context>,
        path: Path<BranchPath>,
    ) -> Result<HttpResponseOk<BranchOperations>, HttpError> {
        let path = path.into_inner();
        let deleted = rqctx
            .context()
            .delete_branch(&path.project_id, &path.branch_id)?;
        tracing::info!(branch_id = %path.branch_id, "deleted branch");
        Ok(HttpResponseOk(deleted))
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Neon-style resource ID, e.g. `br-3f2a9c41d0be`
fn new_id(prefix: &str) -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("{}-{}", prefix, &hex[..12])
}

fn project_branches<'a>(
    projects: &'a mut HashMap<String, Vec<Branch>>,
    project_id: &str,
) -> Result<&'a mut Vec<Branch>, HttpError> {
    projects.get_mut(project_id).ok_or_else(|| {
        HttpError::for_not_found(None, format!("project {} not found", project_id))
    })
}

fn find_branch<'a>(branches: &'a [Branch], branch_id: &str) -> Result<&'a Branch, HttpError> {
    branches
        .iter()
        .find(|b| b.id == branch_id)
        .ok_or_else(|| HttpError::for_not_found(None, format!("branch {} not found", branch_id)))
}

fn ensure_unique_name(branches: &[Branch], name: &str) -> Result<(), HttpError> {
    if branches.iter().any(|b| b.name == name) {
        Err(name_taken(name))
    } else {
        Ok(())
    }
}

fn name_taken(name: &str) -> HttpError {
    HttpError::for_bad_request(
        None,
        format!("branch with name {} already exists", name),
    )
}

fn endpoint(branch: &Branch, opts: &BranchCreateRequestEndpointOptions, now: Timestamp) -> Endpoint {
    let id = new_id("ep");
    let proxy_host = format!("{}.aws.neon.tech", STUB_REGION.trim_start_matches("aws-"));
    let min_cu = opts.autoscaling_limit_min_cu.unwrap_or(DEFAULT_COMPUTE_UNITS);
    Endpoint {
        host: format!("{}.{}", id, proxy_host),
        id,
        project_id: branch.project_id.clone(),
        branch_id: branch.id.clone(),
        autoscaling_limit_min_cu: min_cu,
        autoscaling_limit_max_cu: opts.autoscaling_limit_max_cu.unwrap_or(min_cu),
        region_id: STUB_REGION.to_string(),
        endpoint_type: opts.endpoint_type,
        current_state: EndpointState::Init,
        pending_state: Some(EndpointState::Active),
        settings: EndpointSettings::default(),
        pooler_enabled: false,
        pooler_mode: PoolerMode::Transaction,
        disabled: false,
        passwordless_access: true,
        last_active: None,
        creation_source: CREATION_SOURCE.to_string(),
        created_at: now,
        updated_at: now,
        proxy_host,
        suspend_timeout_seconds: opts.suspend_timeout_seconds.unwrap_or(0),
        provisioner: opts.provisioner.unwrap_or(Provisioner::K8sPod),
    }
}

fn operation(
    branch: &Branch,
    endpoint_id: Option<&str>,
    action: OperationAction,
    now: Timestamp,
) -> Operation {
    Operation {
        id: Uuid::new_v4().to_string(),
        project_id: branch.project_id.clone(),
        branch_id: Some(branch.id.clone()),
        endpoint_id: endpoint_id.map(str::to_string),
        action,
        status: OperationStatus::Running,
        error: None,
        failures_count: 0,
        retry_at: None,
        created_at: now,
        updated_at: now,
    }
}

/// Create the Dropshot API description for the stub server
pub fn api_description() -> Result<dropshot::ApiDescription<Arc<StubContext>>, String> {
    neon_api::neon_api_mod::api_description::<StubNeonApi>().map_err(|e| e.to_string())
}

// ============================================================================
// Tests
// ============================================================================
