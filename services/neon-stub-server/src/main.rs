// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Standalone stub Neon server for testing and development
//!
//! Run with:
//! ```bash
//! cargo run -p neon-stub-server
//! ```
//!
//! Then point the action at it:
//! ```bash
//! INPUT_API_HOST=http://localhost:9090 INPUT_API_KEY=anything \
//!   INPUT_METHOD=createProjectBranch \
//!   INPUT_METADATA='{"project_id": "spring-example-302709"}' \
//!   cargo run -p neon-action
//! ```

use anyhow::Result;
use dropshot::{ConfigDropshot, ConfigLogging, ConfigLoggingLevel, HttpServerStarter};
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use neon_stub_server::{StubContext, api_description};

/// Project seeded at startup
const DEMO_PROJECT_ID: &str = "spring-example-302709";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "neon_stub_server=info".to_string()),
        ))
        .init();

    // Dropshot request logging
    let log_config = ConfigLogging::StderrTerminal {
        level: ConfigLoggingLevel::Info,
    };
    let log = log_config.to_logger("neon-stub-server")?;

    let context = Arc::new(StubContext::new().with_project(DEMO_PROJECT_ID));

    let config = ConfigDropshot {
        bind_address: SocketAddr::from((Ipv4Addr::LOCALHOST, 9090)),
        default_request_body_max_bytes: 1024 * 1024,
        default_handler_task_mode: dropshot::HandlerTaskMode::Detached,
        ..Default::default()
    };

    let api = api_description().map_err(|e| anyhow::anyhow!(e))?;
    let server = HttpServerStarter::new(&config, api, context, &log)
        .map_err(|e| anyhow::anyhow!("Failed to create server: {}", e))?
        .start();

    tracing::info!("Stub Neon server listening on http://localhost:9090");
    tracing::info!("Seeded project: {}", DEMO_PROJECT_ID);
    tracing::info!("Available endpoints:");
    tracing::info!("  POST   /projects/{{project_id}}/branches");
    tracing::info!("  GET    /projects/{{project_id}}/branches");
    tracing::info!("  GET    /projects/{{project_id}}/branches/{{branch_id}}");
    tracing::info!("  PATCH  /projects/{{project_id}}/branches/{{branch_id}}");
    tracing::info!("  DELETE /projects/{{project_id}}/branches/{{branch_id}}");

    server
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))
}
