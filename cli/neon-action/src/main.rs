// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! neon-action - run one Neon API operation as a CI step
//!
//! Inputs arrive as `INPUT_*` environment variables (or flags, see
//! `--help`). Stdout carries workflow commands only; logs go to stderr.

use std::io;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use neon_action::{ActionInputs, DEFAULT_LOG_FILTER, Dispatcher, WorkflowCommands};
use neon_client::NeonClient;
use secrecy::ExposeSecret;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string()),
        ))
        .init();

    let inputs = match ActionInputs::try_parse() {
        Ok(inputs) => inputs,
        // --help and --version keep clap's own output and exit code.
        Err(err) if !err.use_stderr() => err.exit(),
        Err(err) => return report(&anyhow::Error::from(err)),
    };

    match run(inputs).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report(&err),
    }
}

/// Fail the step with an `::error::` command
fn report(err: &anyhow::Error) -> ExitCode {
    tracing::error!("{:#}", err);
    let message = err.to_string();
    let mut commands = WorkflowCommands::new(io::stdout(), None);
    if let Err(write_err) = commands.error(message.trim_end()) {
        eprintln!("Error: {} (reporting failed: {})", err, write_err);
    }
    ExitCode::FAILURE
}

async fn run(inputs: ActionInputs) -> Result<()> {
    let config = inputs.into_config()?;

    let mut commands = WorkflowCommands::new(io::stdout(), config.output_file.clone());
    commands
        .add_mask(config.api_key.expose_secret())
        .context("Failed to mask API key")?;

    let client = NeonClient::new(&config.api_host, &config.api_key, config.timeout)?;
    tracing::debug!(api_host = %client.base_url(), timeout = ?config.timeout, "client ready");

    let outcome = Dispatcher::new(client).execute(&config.request).await?;

    commands
        .publish(&outcome)
        .context("Failed to write step outputs")?;
    Ok(())
}
