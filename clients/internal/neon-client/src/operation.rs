// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! The closed set of Neon API operations the client can execute
//!
//! Each [`Operation`] knows its HTTP method, path template, documented
//! success status and how to turn an untyped `(body, metadata)` pair into a
//! [`PreparedRequest`]. Adding an operation means adding a variant and its
//! arms here; nothing else dispatches on operation names.

use http::{Method, StatusCode};
use neon_api::{BranchPath, ProjectPath};
use serde::de::DeserializeOwned;
use serde_json::Value;
use strum::{Display, EnumIter, EnumString, IntoStaticStr, VariantNames};

use crate::RequestError;

/// A Neon API operation, addressed by its SDK method name
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
    VariantNames,
)]
#[strum(serialize_all = "camelCase")]
pub enum Operation {
    CreateProjectBranch,
    ListProjectBranches,
    GetProjectBranch,
    UpdateProjectBranch,
    DeleteProjectBranch,
}

/// A validated request, ready to be sent
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRequest {
    pub operation: Operation,
    pub method: Method,
    /// Path relative to the API base URL, parameters already encoded
    pub path: String,
    /// JSON body to send, if any
    pub body: Option<Value>,
}

impl Operation {
    /// Look up an operation by its method name
    pub fn resolve(name: &str) -> Result<Self, RequestError> {
        name.parse()
            .map_err(|_| RequestError::UnknownOperation(name.to_string()))
    }

    pub fn method(self) -> Method {
        match self {
            Operation::CreateProjectBranch => Method::POST,
            Operation::ListProjectBranches | Operation::GetProjectBranch => Method::GET,
            Operation::UpdateProjectBranch => Method::PATCH,
            Operation::DeleteProjectBranch => Method::DELETE,
        }
    }

    pub fn path_template(self) -> &'static str {
        match self {
            Operation::CreateProjectBranch | Operation::ListProjectBranches => {
                "/projects/{project_id}/branches"
            }
            Operation::GetProjectBranch
            | Operation::UpdateProjectBranch
            | Operation::DeleteProjectBranch => "/projects/{project_id}/branches/{branch_id}",
        }
    }

    /// The status Neon documents for a successful call
    pub fn success_status(self) -> StatusCode {
        match self {
            Operation::CreateProjectBranch => StatusCode::CREATED,
            _ => StatusCode::OK,
        }
    }

    pub fn accepts_body(self) -> bool {
        matches!(
            self,
            Operation::CreateProjectBranch | Operation::UpdateProjectBranch
        )
    }

    /// Check `body` and `metadata` against this operation's parameters
    ///
    /// `metadata` carries the path parameters and is decoded strictly. The
    /// body only has to be a JSON object and is forwarded as given; Neon
    /// decides whether its fields are valid.
    pub fn prepare(self, body: &Value, metadata: &Value) -> Result<PreparedRequest, RequestError> {
        let (path, body) = match self {
            Operation::CreateProjectBranch => {
                let params: ProjectPath = self.decode("metadata", metadata)?;
                let body = if body.is_null() {
                    None
                } else {
                    Some(self.object_body(body)?)
                };
                (project_path(&params), body)
            }
            Operation::ListProjectBranches => {
                let params: ProjectPath = self.decode("metadata", metadata)?;
                self.reject_body(body)?;
                (project_path(&params), None)
            }
            Operation::GetProjectBranch | Operation::DeleteProjectBranch => {
                let params: BranchPath = self.decode("metadata", metadata)?;
                self.reject_body(body)?;
                (branch_path(&params), None)
            }
            Operation::UpdateProjectBranch => {
                let params: BranchPath = self.decode("metadata", metadata)?;
                (branch_path(&params), Some(self.object_body(body)?))
            }
        };

        Ok(PreparedRequest {
            operation: self,
            method: self.method(),
            path,
            body,
        })
    }

    fn decode<T: DeserializeOwned>(self, part: &'static str, value: &Value) -> Result<T, RequestError> {
        T::deserialize(value).map_err(|source| RequestError::InvalidParameters {
            operation: self,
            part,
            source,
        })
    }

    fn object_body(self, body: &Value) -> Result<Value, RequestError> {
        if body.is_object() {
            Ok(body.clone())
        } else {
            Err(RequestError::BodyNotObject { operation: self })
        }
    }

    fn reject_body(self, body: &Value) -> Result<(), RequestError> {
        let empty = match body {
            Value::Null => true,
            Value::Object(map) => map.is_empty(),
            _ => false,
        };
        if empty {
            Ok(())
        } else {
            Err(RequestError::BodyNotAccepted { operation: self })
        }
    }
}

fn project_path(params: &ProjectPath) -> String {
    format!(
        "/projects/{}/branches",
        urlencoding::encode(&params.project_id)
    )
}

fn branch_path(params: &BranchPath) -> String {
    format!(
        "/projects/{}/branches/{}",
        urlencoding::encode(&params.project_id),
        urlencoding::encode(&params.branch_id)
    )
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use serde_json::json;
    use strum::IntoEnumIterator;
    use test_case::test_case;

    #[test_case("createProjectBranch" => Operation::CreateProjectBranch)]
    #[test_case("listProjectBranches" => Operation::ListProjectBranches)]
    #[test_case("getProjectBranch" => Operation::GetProjectBranch)]
    #[test_case("updateProjectBranch" => Operation::UpdateProjectBranch)]
    #[test_case("deleteProjectBranch" => Operation::DeleteProjectBranch)]
    fn test_resolve(name: &str) -> Operation {
        Operation::resolve(name).unwrap()
    }

    #[test]
    fn test_names_round_trip() {
        for op in Operation::iter() {
            assert_eq!(Operation::resolve(&op.to_string()).unwrap(), op);
        }
        assert_eq!(Operation::VARIANTS.len(), Operation::iter().count());
    }

    #[test]
    fn test_unknown_operation_is_named() {
        let err = Operation::resolve("deleteEverything").unwrap_err();
        assert_eq!(err.to_string(), "Unknown method: deleteEverything");
        assert!(Operation::resolve("CreateProjectBranch").is_err());
        assert!(Operation::resolve("").is_err());
    }

    #[test]
    fn test_success_status() {
        assert_eq!(
            Operation::CreateProjectBranch.success_status(),
            StatusCode::CREATED
        );
        assert_eq!(
            Operation::DeleteProjectBranch.success_status(),
            StatusCode::OK
        );
    }

    #[test]
    fn test_prepare_create_forwards_body() {
        let body = json!({"branch": {"name": "preview"}, "annotation": {"pr": 7}});
        let req = Operation::CreateProjectBranch
            .prepare(&body, &json!({"project_id": "spring-example-302709"}))
            .unwrap();
        assert_eq!(req.method, Method::POST);
        assert_eq!(req.path, "/projects/spring-example-302709/branches");
        assert_eq!(req.body, Some(body));
    }

    #[test]
    fn test_prepare_create_without_body() {
        let req = Operation::CreateProjectBranch
            .prepare(&Value::Null, &json!({"project_id": "p"}))
            .unwrap();
        assert_eq!(req.body, None);
    }

    #[test]
    fn test_prepare_encodes_path_parameters() {
        let req = Operation::GetProjectBranch
            .prepare(&json!({}), &json!({"project_id": "a/b", "branch_id": "br 1"}))
            .unwrap();
        assert_eq!(req.path, "/projects/a%2Fb/branches/br%201");
        assert_eq!(req.body, None);
    }

    #[test]
    fn test_prepare_missing_path_parameter() {
        let err = Operation::CreateProjectBranch
            .prepare(&json!({}), &json!({}))
            .unwrap_err();
        assert!(matches!(
            err,
            RequestError::InvalidParameters {
                part: "metadata",
                ..
            }
        ));
        assert!(err.to_string().contains("project_id"));
    }

    #[test]
    fn test_prepare_forwards_unmodelled_values() {
        let body = json!({
            "endpoints": [{"type": "read_mostly", "suspend_timeout_seconds": "soon"}],
            "branch": {"protected": true}
        });
        let req = Operation::CreateProjectBranch
            .prepare(&body, &json!({"project_id": "p"}))
            .unwrap();
        assert_eq!(req.body, Some(body));

        let req = Operation::UpdateProjectBranch
            .prepare(&json!({}), &json!({"project_id": "p", "branch_id": "b"}))
            .unwrap();
        assert_eq!(req.method, Method::PATCH);
        assert_eq!(req.body, Some(json!({})));
    }

    #[test_case(Operation::CreateProjectBranch, json!([1, 2]); "create array")]
    #[test_case(Operation::CreateProjectBranch, json!("preview"); "create string")]
    #[test_case(Operation::UpdateProjectBranch, Value::Null; "update null")]
    fn test_prepare_requires_object_body(op: Operation, body: Value) {
        let err = op
            .prepare(&body, &json!({"project_id": "p", "branch_id": "b"}))
            .unwrap_err();
        assert!(matches!(err, RequestError::BodyNotObject { .. }));
        assert_eq!(
            err.to_string(),
            format!("request body for {} must be a JSON object", op)
        );
    }

    #[test]
    fn test_prepare_rejects_body_for_bodyless_operation() {
        let err = Operation::DeleteProjectBranch
            .prepare(
                &json!({"force": true}),
                &json!({"project_id": "p", "branch_id": "b"}),
            )
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "deleteProjectBranch does not accept a request body"
        );
    }
}
