// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! End-to-end tests for the neon-action binary
//!
//! Happy paths run against neon-stub-server; error payloads the stub cannot
//! produce (a 201 carrying `code`, for instance) come from wiremock.

// Allow deprecated - cargo_bin is standard for CLI testing
#![allow(deprecated, clippy::unwrap_used, clippy::expect_used)]

use std::process::Output;
use std::sync::Arc;

use assert_cmd::Command;
use assert_cmd::assert::OutputAssertExt;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use neon_stub_server::{StubContext, api_description};

const PROJECT: &str = "spring-example-302709";

/// Inputs the runner may have exported into the test environment
const RUNNER_VARS: &[&str] = &[
    "INPUT_METHOD",
    "INPUT_API_KEY",
    "INPUT_BODY",
    "INPUT_METADATA",
    "INPUT_SELECTOR",
    "INPUT_API_HOST",
    "INPUT_TIMEOUT",
    "GITHUB_OUTPUT",
];

fn action_cmd() -> Command {
    let mut cmd = Command::cargo_bin("neon-action").expect("Failed to find neon-action binary");
    for var in RUNNER_VARS {
        cmd.env_remove(var);
    }
    cmd
}

/// Run off the async runtime so the in-process servers keep serving
async fn run_blocking(mut cmd: Command) -> Output {
    tokio::task::spawn_blocking(move || cmd.output().expect("Failed to execute neon-action"))
        .await
        .expect("join")
}

fn start_stub() -> (dropshot::HttpServer<Arc<StubContext>>, String) {
    let context = Arc::new(StubContext::new().with_project(PROJECT));
    let config = dropshot::ConfigDropshot {
        bind_address: "127.0.0.1:0".parse().unwrap(),
        default_request_body_max_bytes: 1024 * 1024,
        default_handler_task_mode: dropshot::HandlerTaskMode::Detached,
        ..Default::default()
    };
    let log = dropshot::ConfigLogging::StderrTerminal {
        level: dropshot::ConfigLoggingLevel::Warn,
    }
    .to_logger("neon-action-test")
    .expect("logger");

    let server = dropshot::HttpServerStarter::new(&config, api_description().unwrap(), context, &log)
        .expect("start stub")
        .start();
    let base_url = format!("http://{}", server.local_addr());
    (server, base_url)
}

#[test]
fn test_help() {
    action_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("--selector"));
}

#[test]
fn test_unknown_flag_is_reported_as_step_error() {
    action_cmd()
        .arg("--bogus")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("::error::"))
        .stdout(predicate::str::contains("--bogus"));
}

#[cfg(unix)]
#[test]
fn test_non_utf8_input_is_reported_as_step_error() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    action_cmd()
        .env("INPUT_METHOD", OsStr::from_bytes(b"create\xffBranch"))
        .env("INPUT_API_KEY", "k")
        .env("INPUT_API_HOST", "http://127.0.0.1:1")
        .assert()
        .code(1)
        .stdout(predicate::str::starts_with("::error::"));
}

#[test]
fn test_missing_method_fails_before_network() {
    action_cmd()
        .env("INPUT_API_KEY", "k")
        .env("INPUT_API_HOST", "http://127.0.0.1:1")
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "::error::Input required and not supplied: method",
        ));
}

#[test]
fn test_empty_api_key_fails_before_network() {
    action_cmd()
        .env("INPUT_METHOD", "createProjectBranch")
        .env("INPUT_API_KEY", "   ")
        .env("INPUT_API_HOST", "http://127.0.0.1:1")
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "::error::Input required and not supplied: api_key",
        ));
}

#[test]
fn test_unknown_method_fails_before_network() {
    action_cmd()
        .env("INPUT_METHOD", "deleteEverything")
        .env("INPUT_API_KEY", "k")
        .env("INPUT_API_HOST", "http://127.0.0.1:1")
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "::error::Unknown method: deleteEverything",
        ));
}

#[test]
fn test_invalid_body_json() {
    action_cmd()
        .env("INPUT_METHOD", "createProjectBranch")
        .env("INPUT_API_KEY", "k")
        .env("INPUT_BODY", "{branch:")
        .assert()
        .failure()
        .stdout(predicate::str::contains("::error::Input body is not valid JSON"));
}

#[test]
fn test_unreachable_host_reports_transport_error() {
    action_cmd()
        .env("INPUT_METHOD", "createProjectBranch")
        .env("INPUT_API_KEY", "k")
        .env("INPUT_API_HOST", "http://127.0.0.1:1")
        .env("INPUT_METADATA", json!({"project_id": PROJECT}).to_string())
        .env("INPUT_TIMEOUT", "5")
        .assert()
        .failure()
        .stdout(predicate::str::contains(format!(
            "::error::request to http://127.0.0.1:1/projects/{}/branches failed",
            PROJECT
        )))
        .stdout(predicate::str::contains("::set-output").not());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_create_branch_writes_outputs() {
    let (_server, base_url) = start_stub();
    let dir = tempfile::tempdir().unwrap();
    let output_path = dir.path().join("github_output");

    let mut cmd = action_cmd();
    cmd.env("INPUT_METHOD", "createProjectBranch")
        .env("INPUT_API_KEY", "napi_test_key")
        .env("INPUT_API_HOST", &base_url)
        .env("INPUT_METADATA", json!({"project_id": PROJECT}).to_string())
        .env(
            "INPUT_BODY",
            json!({"branch": {"name": "preview-42"}, "endpoints": [{"type": "read_write"}]})
                .to_string(),
        )
        .env("INPUT_SELECTOR", "$.endpoints[*].type")
        .env("GITHUB_OUTPUT", &output_path);

    run_blocking(cmd)
        .await
        .assert()
        .success()
        .stdout(predicate::str::contains("::add-mask::napi_test_key"))
        .stdout(predicate::str::contains("::error::").not());

    let written = std::fs::read_to_string(&output_path).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert!(lines[0].starts_with("data<<ghadelimiter_"));
    let data: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
    assert_eq!(data["branch"]["name"], "preview-42");
    assert_eq!(data["endpoints"][0]["type"], "read_write");
    assert!(lines[3].starts_with("selection<<ghadelimiter_"));
    assert_eq!(lines[4], "read_write");
    assert!(lines[6].starts_with("selections<<ghadelimiter_"));
    assert_eq!(lines[7], r#"["read_write"]"#);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_create_branch_legacy_outputs() {
    let (_server, base_url) = start_stub();

    let mut cmd = action_cmd();
    cmd.env("INPUT_METHOD", "createProjectBranch")
        .env("INPUT_API_KEY", "k")
        .env("INPUT_API_HOST", &base_url)
        .env("INPUT_METADATA", json!({"project_id": PROJECT}).to_string())
        .env("INPUT_SELECTOR", "$.branch.id");

    run_blocking(cmd)
        .await
        .assert()
        .success()
        .stdout(predicate::str::contains("::set-output name=data::{"))
        .stdout(predicate::str::contains("::set-output name=selection::br-"))
        .stdout(predicate::str::contains("::set-output name=selections::[\"br-"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_unknown_project_reports_status() {
    let (_server, base_url) = start_stub();

    let mut cmd = action_cmd();
    cmd.env("INPUT_METHOD", "listProjectBranches")
        .env("INPUT_API_KEY", "k")
        .env("INPUT_API_HOST", &base_url)
        .env("INPUT_METADATA", json!({"project_id": "missing"}).to_string());

    // Dropshot error bodies have no `code`, so the status stands in for it.
    run_blocking(cmd)
        .await
        .assert()
        .failure()
        .stdout(predicate::str::contains("::error::404:Not Found"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_error_payload_on_created_fails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/projects/{}/branches", PROJECT)))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({"code": "rate_limited", "message": "too many requests"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut cmd = action_cmd();
    cmd.env("INPUT_METHOD", "createProjectBranch")
        .env("INPUT_API_KEY", "k")
        .env("INPUT_API_HOST", server.uri())
        .env("INPUT_METADATA", json!({"project_id": PROJECT}).to_string());

    run_blocking(cmd)
        .await
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "::error::rate_limited:too many requests",
        ))
        .stdout(predicate::str::contains("::set-output").not());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_selector_without_match_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"branches": []})))
        .mount(&server)
        .await;

    let mut cmd = action_cmd();
    cmd.env("INPUT_METHOD", "listProjectBranches")
        .env("INPUT_API_KEY", "k")
        .env("INPUT_API_HOST", server.uri())
        .env("INPUT_METADATA", json!({"project_id": PROJECT}).to_string())
        .env("INPUT_SELECTOR", "$.branches[0].id");

    run_blocking(cmd)
        .await
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "::error::Selector $.branches[0].id matched nothing in the response",
        ));
}
