// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Neon API v2 types
//!
//! Request and response types for the branch endpoints, derived from the
//! JSON schemas Neon publishes for its v2 REST API.

pub mod branch;
pub mod common;
pub mod endpoint;
pub mod operation;

pub use branch::*;
pub use common::*;
pub use endpoint::*;
pub use operation::*;
