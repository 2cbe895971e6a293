// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! JSONPath selection over `serde_json` documents
//!
//! The crate exposes two layers:
//!
//! - [`JsonPath`], a compiled JSONPath expression that can be evaluated
//!   against any number of documents.
//! - [`PathQuery`], the strategy trait callers depend on. [`JsonPathQuery`]
//!   is the default implementation; any
//!   `Fn(&Value, &str) -> Result<Vec<Value>, SelectorError>` works too, which
//!   keeps the query engine swappable in tests.
//!
//! # Supported syntax
//!
//! | Form                 | Meaning                                |
//! |----------------------|----------------------------------------|
//! | `$`                  | the document root                      |
//! | `.name`, `['name']`  | object member                          |
//! | `.*`, `[*]`          | every child                            |
//! | `..name`, `..*`      | recursive descent                      |
//! | `[0]`, `[-1]`        | array index (negative counts from end) |
//! | `[0,2]`, `['a','b']` | union                                  |
//! | `[start:end:step]`   | array slice                            |
//! | `[?(@.x == 'v')]`    | filter (`== != < <= > >= && \|\| !`)   |
//!
//! Matches are always returned in document order.

mod error;
mod eval;
mod parser;

pub use error::SelectorError;

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

/// Expression selecting the whole document
pub const ROOT: &str = "$";

/// A compiled JSONPath expression
#[derive(Debug, Clone, PartialEq)]
pub struct JsonPath {
    source: String,
    path: parser::Path,
}

impl JsonPath {
    /// Compile `expression`
    pub fn parse(expression: &str) -> Result<Self, SelectorError> {
        let path = parser::parse(expression)?;
        Ok(Self {
            source: expression.trim().to_string(),
            path,
        })
    }

    /// The expression this path was compiled from
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Every node matched in `document`, borrowed, in document order
    pub fn select<'v>(&self, document: &'v Value) -> Vec<&'v Value> {
        eval::evaluate(&self.path, document)
    }

    /// Every node matched in `document`, cloned, in document order
    pub fn select_owned(&self, document: &Value) -> Vec<Value> {
        self.select(document).into_iter().cloned().collect()
    }
}

impl FromStr for JsonPath {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Strategy for evaluating a path expression against a document
pub trait PathQuery: Send + Sync {
    /// All values matched by `expression` in `document`, in document order
    fn query(&self, document: &Value, expression: &str) -> Result<Vec<Value>, SelectorError>;

    /// Check that `expression` is acceptable without evaluating it
    ///
    /// The default runs the query against `null`, which surfaces syntax
    /// errors for any engine that compiles before evaluating.
    fn validate(&self, expression: &str) -> Result<(), SelectorError> {
        self.query(&Value::Null, expression).map(|_| ())
    }

    /// The first value matched, if any
    fn first(&self, document: &Value, expression: &str) -> Result<Option<Value>, SelectorError> {
        Ok(self.query(document, expression)?.into_iter().next())
    }
}

impl<F> PathQuery for F
where
    F: Fn(&Value, &str) -> Result<Vec<Value>, SelectorError> + Send + Sync,
{
    fn query(&self, document: &Value, expression: &str) -> Result<Vec<Value>, SelectorError> {
        self(document, expression)
    }
}

/// [`PathQuery`] backed by [`JsonPath`]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonPathQuery;

impl PathQuery for JsonPathQuery {
    fn query(&self, document: &Value, expression: &str) -> Result<Vec<Value>, SelectorError> {
        Ok(JsonPath::parse(expression)?.select_owned(document))
    }

    fn validate(&self, expression: &str) -> Result<(), SelectorError> {
        JsonPath::parse(expression).map(|_| ())
    }
}

/// Evaluate `expression` against `document` with the default engine
pub fn query(document: &Value, expression: &str) -> Result<Vec<Value>, SelectorError> {
    JsonPathQuery.query(document, expression)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use serde_json::json;
    use test_case::test_case;

    fn created_branch() -> Value {
        json!({
            "branch": {
                "id": "br-wispy-meadow-118737",
                "project_id": "spring-example-302709",
                "name": "preview-42",
                "current_state": "init"
            },
            "endpoints": [
                {"id": "ep-shy-bonus-1", "type": "read_write", "host": "ep-shy-bonus-1.neon.tech", "autoscaling_limit_max_cu": 1},
                {"id": "ep-calm-rain-2", "type": "read_only", "host": "ep-calm-rain-2.neon.tech", "autoscaling_limit_max_cu": 4}
            ],
            "operations": [
                {"id": "op-1", "action": "create_branch", "status": "running"},
                {"id": "op-2", "action": "start_compute", "status": "scheduling"}
            ]
        })
    }

    #[test]
    fn test_root_selects_whole_document() {
        let doc = created_branch();
        assert_eq!(query(&doc, ROOT).unwrap(), vec![doc.clone()]);
    }

    #[test_case("$.branch.id" => vec![json!("br-wispy-meadow-118737")]; "dot member")]
    #[test_case("$['branch']['name']" => vec![json!("preview-42")]; "bracket member")]
    #[test_case("$.endpoints[0].id" => vec![json!("ep-shy-bonus-1")]; "index")]
    #[test_case("$.endpoints[-1].id" => vec![json!("ep-calm-rain-2")]; "negative index")]
    #[test_case("$.endpoints[*].host" => vec![json!("ep-shy-bonus-1.neon.tech"), json!("ep-calm-rain-2.neon.tech")]; "wildcard")]
    #[test_case("$.operations[0,1].action" => vec![json!("create_branch"), json!("start_compute")]; "union")]
    #[test_case("$.operations[1:].id" => vec![json!("op-2")]; "slice")]
    #[test_case("$.endpoints[?(@.type == 'read_only')].id" => vec![json!("ep-calm-rain-2")]; "filter equality")]
    #[test_case("$.endpoints[?(@.autoscaling_limit_max_cu > 1)].id" => vec![json!("ep-calm-rain-2")]; "filter ordering")]
    #[test_case("$.operations[?(@.status != 'running' && @.action)].id" => vec![json!("op-2")]; "filter conjunction")]
    #[test_case("$.endpoints[?(!@.missing)].id" => vec![json!("ep-shy-bonus-1"), json!("ep-calm-rain-2")]; "filter negated existence")]
    #[test_case("$.branch.missing" => Vec::<Value>::new(); "missing member")]
    #[test_case("$.endpoints[7]" => Vec::<Value>::new(); "index out of range")]
    fn test_query(expression: &str) -> Vec<Value> {
        query(&created_branch(), expression).unwrap()
    }

    #[test]
    fn test_recursive_descent_in_document_order() {
        let doc = created_branch();
        let ids = query(&doc, "$..id").unwrap();
        assert_eq!(
            ids,
            vec![
                json!("br-wispy-meadow-118737"),
                json!("ep-shy-bonus-1"),
                json!("ep-calm-rain-2"),
                json!("op-1"),
                json!("op-2"),
            ]
        );
    }

    #[test]
    fn test_filter_against_root() {
        let doc = json!({"wanted": "b", "items": [{"k": "a"}, {"k": "b"}]});
        let hits = query(&doc, "$.items[?(@.k == $.wanted)]").unwrap();
        assert_eq!(hits, vec![json!({"k": "b"})]);
    }

    #[test]
    fn test_matched_null_is_a_match() {
        let doc = json!({"parent_id": null});
        assert_eq!(query(&doc, "$.parent_id").unwrap(), vec![Value::Null]);
        assert_eq!(JsonPathQuery.first(&doc, "$.parent_id").unwrap(), Some(Value::Null));
        assert_eq!(JsonPathQuery.first(&doc, "$.name").unwrap(), None);
    }

    #[test]
    fn test_invalid_expression() {
        let err = query(&json!({}), "branch.id").unwrap_err();
        assert!(err.to_string().starts_with("invalid JSONPath at offset 0"));
        assert!(JsonPathQuery.validate("$.endpoints[").is_err());
        assert!(JsonPathQuery.validate("$.endpoints[0]").is_ok());
    }

    #[test]
    fn test_extreme_slice_steps() {
        let doc = json!([10, 20, 30]);
        assert_eq!(query(&doc, "$[1::9223372036854775807]").unwrap(), vec![json!(20)]);
        assert_eq!(query(&doc, "$[::-9223372036854775808]").unwrap(), vec![json!(30)]);
    }

    #[test]
    fn test_deeply_nested_filter_is_rejected() {
        let expression = format!("$[?{}@.a]", "!".repeat(200_000));
        let err = JsonPathQuery.validate(&expression).unwrap_err();
        assert!(matches!(err, SelectorError::Parse { .. }));
    }

    #[test]
    fn test_compiled_path_is_reusable() {
        let path: JsonPath = " $.branch.name ".parse().unwrap();
        assert_eq!(path.as_str(), "$.branch.name");
        assert_eq!(path.to_string(), "$.branch.name");
        assert_eq!(path.select(&created_branch()), vec![&json!("preview-42")]);
        assert!(path.select(&json!([1, 2])).is_empty());
    }

    #[test]
    fn test_closure_strategy() {
        let fixed = |_: &Value, expression: &str| -> Result<Vec<Value>, SelectorError> {
            if expression == "boom" {
                Err(SelectorError::Engine("boom".to_string()))
            } else {
                Ok(vec![json!(expression)])
            }
        };
        assert_eq!(fixed.first(&Value::Null, "x").unwrap(), Some(json!("x")));
        assert_eq!(
            fixed.validate("boom").unwrap_err(),
            SelectorError::Engine("boom".to_string())
        );
    }
}
