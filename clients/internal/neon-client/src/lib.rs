// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Client for the branch endpoints of the Neon API v2
//!
//! Unlike a typed SDK, [`ApiClient::call`] takes an operation name plus
//! untyped body and path metadata, and hands back the raw `{status, data}`
//! pair. Bodies and metadata are still checked against the typed
//! definitions in [`neon_api`] before a request is sent.
//!
//! ```no_run
//! # async fn demo() -> Result<(), neon_client::ClientError> {
//! use neon_client::{ApiClient, NeonClient, Operation, DEFAULT_TIMEOUT};
//! use secrecy::SecretString;
//! use serde_json::json;
//!
//! let key = SecretString::from("napi_...");
//! let client = NeonClient::new(neon_api::DEFAULT_BASE_URL, &key, DEFAULT_TIMEOUT)?;
//! let response = client
//!     .call(
//!         Operation::CreateProjectBranch,
//!         &json!({}),
//!         &json!({"project_id": "spring-example-302709"}),
//!     )
//!     .await?;
//! println!("{} {}", response.status, response.data);
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod operation;

pub use client::{ApiClient, ApiResponse, DEFAULT_TIMEOUT, NeonClient};
pub use error::{ClientError, RequestError};
pub use operation::{Operation, PreparedRequest};

// Re-export the API types so consumers need only this crate.
pub use neon_api as types;
