// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! HTTP-level tests for neon-stub-server
//!
//! These tests start the stub on an ephemeral port and exercise the branch
//! lifecycle with plain reqwest calls, checking the wire shapes the action
//! depends on.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use std::sync::Arc;

use neon_stub_server::{StubContext, api_description};

const PROJECT: &str = "spring-example-302709";

fn start_stub() -> (dropshot::HttpServer<Arc<StubContext>>, String) {
    // reqwest is built without a default rustls provider.
    let _ = rustls::crypto::ring::default_provider().install_default();

    let context = Arc::new(StubContext::new().with_project(PROJECT));
    let api = api_description().expect("api description");

    let config = dropshot::ConfigDropshot {
        bind_address: "127.0.0.1:0".parse().unwrap(),
        default_request_body_max_bytes: 1024 * 1024,
        default_handler_task_mode: dropshot::HandlerTaskMode::Detached,
        ..Default::default()
    };
    let log = dropshot::ConfigLogging::StderrTerminal {
        level: dropshot::ConfigLoggingLevel::Warn,
    }
    .to_logger("neon-stub-test")
    .expect("logger");

    let server = dropshot::HttpServerStarter::new(&config, api, context, &log)
        .expect("start stub")
        .start();
    let base_url = format!("http://{}", server.local_addr());
    (server, base_url)
}

#[tokio::test]
async fn test_branch_lifecycle() {
    let (_server, base_url) = start_stub();
    let http = reqwest::Client::new();
    let branches_url = format!("{}/projects/{}/branches", base_url, PROJECT);

    // Create
    let resp = http
        .post(&branches_url)
        .json(&json!({
            "branch": {"name": "preview-42"},
            "endpoints": [{"type": "read_write"}]
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 201);
    let created: Value = resp.json().await.unwrap();
    assert_eq!(created["branch"]["name"], "preview-42");
    assert_eq!(created["endpoints"][0]["type"], "read_write");
    assert!(created.get("code").is_none());
    let branch_id = created["branch"]["id"].as_str().unwrap().to_string();
    let branch_url = format!("{}/{}", branches_url, branch_id);

    // List
    let listed: Value = http.get(&branches_url).send().await.unwrap().json().await.unwrap();
    assert_eq!(listed["branches"].as_array().unwrap().len(), 2);

    // Rename
    let resp = http
        .patch(&branch_url)
        .json(&json!({"branch": {"name": "preview-43"}}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);

    // Get
    let fetched: Value = http.get(&branch_url).send().await.unwrap().json().await.unwrap();
    assert_eq!(fetched["branch"]["name"], "preview-43");

    // Delete
    let resp = http.delete(&branch_url).send().await.unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    let deleted: Value = resp.json().await.unwrap();
    assert_eq!(deleted["operations"][0]["action"], "delete_timeline");

    let resp = http.get(&branch_url).send().await.unwrap();
    assert_eq!(resp.status().as_u16(), 404);
}

#[tokio::test]
async fn test_empty_body_creates_branch() {
    let (_server, base_url) = start_stub();
    let resp = reqwest::Client::new()
        .post(format!("{}/projects/{}/branches", base_url, PROJECT))
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 201);
    let created: Value = resp.json().await.unwrap();
    assert_eq!(created["endpoints"], json!([]));
    assert!(created.get("connection_uris").is_none());
}

#[tokio::test]
async fn test_unknown_project_is_not_found() {
    let (_server, base_url) = start_stub();
    let resp = reqwest::Client::new()
        .get(format!("{}/projects/missing/branches", base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 404);
}
